//! EKSA Core
//!
//! Core library for read-only data sources that render Kubernetes
//! custom resources as YAML manifests

pub mod manifest;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod validation;
