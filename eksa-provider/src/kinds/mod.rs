//! CRD kinds of the anywhere.eks.amazonaws.com/v1alpha1 API
//!
//! Each module holds the typed spec of one kind (configuration names in,
//! manifest names out) together with the schema table describing it.

use eksa_core::manifest::ManifestDataSource;
use eksa_core::provider::DataSource;

macro_rules! define_manifest_kind {
    (
        $name:ident,
        kind = $kind:literal,
        type_name = $type_name:literal,
        spec = $spec:ty,
        attributes = $attributes:path,
        description = $description:literal
        $(, has_id = $has_id:literal)?
    ) => {
        pub struct $name;

        impl eksa_core::manifest::ManifestKind for $name {
            const TYPE_NAME: &'static str = concat!(
                "k8s_anywhere_eks_amazonaws_com_",
                $type_name,
                "_v1alpha1_manifest"
            );
            const API_VERSION: &'static str = $crate::API_VERSION;
            const KIND: &'static str = $kind;
            $(const HAS_ID: bool = $has_id;)?
            type Spec = $spec;

            fn description() -> String {
                $description.to_string()
            }

            fn spec_attributes() -> Vec<eksa_core::schema::AttributeSchema> {
                $attributes()
            }
        }
    };
}

pub mod aws_iam_config;
pub mod bundles;
pub mod cloudstack_datacenter_config;
pub mod cloudstack_machine_config;
pub mod cluster;
pub mod common;
pub mod eksa_release;
pub mod flux_config;
pub mod gitops_config;
pub mod nutanix_datacenter_config;
pub mod nutanix_machine_config;
pub mod oidc_config;
pub mod snow_datacenter_config;
pub mod snow_ip_pool;
pub mod snow_machine_config;
pub mod tinkerbell_datacenter_config;
pub mod tinkerbell_machine_config;
pub mod tinkerbell_template_config;
pub mod vsphere_datacenter_config;
pub mod vsphere_machine_config;

/// Returns all data sources served by this provider
pub fn data_sources() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(ManifestDataSource::<aws_iam_config::AwsIamConfig>::new()),
        Box::new(ManifestDataSource::<bundles::Bundles>::new()),
        Box::new(ManifestDataSource::<cloudstack_datacenter_config::CloudStackDatacenterConfig>::new()),
        Box::new(ManifestDataSource::<cloudstack_machine_config::CloudStackMachineConfig>::new()),
        Box::new(ManifestDataSource::<cluster::Cluster>::new()),
        Box::new(ManifestDataSource::<eksa_release::EksaRelease>::new()),
        Box::new(ManifestDataSource::<flux_config::FluxConfig>::new()),
        Box::new(ManifestDataSource::<gitops_config::GitOpsConfig>::new()),
        Box::new(ManifestDataSource::<nutanix_datacenter_config::NutanixDatacenterConfig>::new()),
        Box::new(ManifestDataSource::<nutanix_machine_config::NutanixMachineConfig>::new()),
        Box::new(ManifestDataSource::<oidc_config::OidcConfig>::new()),
        Box::new(ManifestDataSource::<snow_datacenter_config::SnowDatacenterConfig>::new()),
        Box::new(ManifestDataSource::<snow_ip_pool::SnowIpPool>::new()),
        Box::new(ManifestDataSource::<snow_machine_config::SnowMachineConfig>::new()),
        Box::new(ManifestDataSource::<tinkerbell_datacenter_config::TinkerbellDatacenterConfig>::new()),
        Box::new(ManifestDataSource::<tinkerbell_machine_config::TinkerbellMachineConfig>::new()),
        Box::new(ManifestDataSource::<tinkerbell_template_config::TinkerbellTemplateConfig>::new()),
        Box::new(ManifestDataSource::<vsphere_datacenter_config::VSphereDatacenterConfig>::new()),
        Box::new(ManifestDataSource::<vsphere_machine_config::VSphereMachineConfig>::new()),
    ]
}
