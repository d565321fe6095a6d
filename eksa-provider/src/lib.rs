//! EKSA Provider
//!
//! Data sources rendering the EKS Anywhere custom resources
//! (`anywhere.eks.amazonaws.com/v1alpha1`) as YAML manifests.
//!
//! ## Module Structure
//!
//! - `kinds` - One module per CRD kind: typed spec and attribute schema

pub mod kinds;

use eksa_core::provider::{DataSource, Provider};

/// Group/version of every kind served by this provider
pub const API_VERSION: &str = "anywhere.eks.amazonaws.com/v1alpha1";

/// Provider serving the EKS Anywhere manifest data sources
#[derive(Debug, Clone, Copy, Default)]
pub struct EksaProvider;

impl EksaProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Provider for EksaProvider {
    fn name(&self) -> &'static str {
        "k8s"
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        kinds::data_sources()
    }
}
