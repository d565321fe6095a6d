//! TinkerbellDatacenterConfig - Tinkerbell stack endpoints for bare metal

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    TinkerbellDatacenterConfig,
    kind = "TinkerbellDatacenterConfig",
    type_name = "tinkerbelldatacenterconfig",
    spec = TinkerbellDatacenterConfigSpec,
    attributes = spec_attributes,
    description = "TinkerbellDatacenterConfig is the Schema for the TinkerbellDatacenterConfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct TinkerbellDatacenterConfigSpec {
    #[serde(rename(serialize = "hookImagesURLPath"))]
    pub hook_images_url_path: Option<String>,
    #[serde(rename(serialize = "hookIsoURL"))]
    pub hook_iso_url: Option<String>,
    pub iso_boot: Option<bool>,
    #[serde(rename(serialize = "osImageURL"))]
    pub os_image_url: Option<String>,
    pub skip_load_balancer_deployment: Option<bool>,
    #[serde(rename(serialize = "tinkerbellIP"))]
    pub tinkerbell_ip: String,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("hook_images_url_path", AttributeType::String)
            .with_wire_name("hookImagesURLPath")
            .with_description("HookImagesURLPath can be used to override the default Hook images path to pull from a local server."),
        AttributeSchema::new("hook_iso_url", AttributeType::String)
            .with_wire_name("hookIsoURL")
            .with_description("HookIsoURL is the URL of the ISO image used when booting machines over ISO."),
        AttributeSchema::new("iso_boot", AttributeType::Bool)
            .with_description("IsoBoot can be used to indicate whether machines are booted from an ISO image."),
        AttributeSchema::new("os_image_url", AttributeType::String)
            .with_wire_name("osImageURL")
            .with_description("OSImageURL can be used to override the default OS image path to pull from a local server."),
        AttributeSchema::new("skip_load_balancer_deployment", AttributeType::Bool)
            .with_description("SkipLoadBalancerDeployment when set to \"true\" can be used to skip deploying a load balancer to expose Tinkerbell stack."),
        AttributeSchema::new("tinkerbell_ip", AttributeType::String)
            .required()
            .with_wire_name("tinkerbellIP")
            .with_description("TinkerbellIP is used to configure a VIP for hosting the Tinkerbell services."),
    ]
}
