//! Blocks shared by several kinds

use std::collections::BTreeMap;

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

/// Operating systems accepted by machine configs
pub const OS_FAMILIES: &[&str] = &["bottlerocket", "ubuntu", "redhat"];

/// Reference to another object by kind and name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Ref {
    pub kind: Option<String>,
    pub name: Option<String>,
}

pub fn ref_type() -> AttributeType {
    AttributeType::Object(vec![
        AttributeSchema::new("kind", AttributeType::String),
        AttributeSchema::new("name", AttributeType::String),
    ])
}

/// Login user created on provisioned machines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct UserConfiguration {
    pub name: String,
    pub ssh_authorized_keys: Vec<String>,
}

pub fn users_type() -> AttributeType {
    AttributeType::list(AttributeType::Object(vec![
        AttributeSchema::new("name", AttributeType::String).required(),
        AttributeSchema::new("ssh_authorized_keys", types::string_list()).required(),
    ]))
}

/// Kubernetes node taint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Taint {
    pub effect: String,
    pub key: String,
    pub time_added: Option<String>,
    pub value: Option<String>,
}

pub fn taints_type() -> AttributeType {
    AttributeType::list(AttributeType::Object(vec![
        AttributeSchema::new(
            "effect",
            AttributeType::enumeration(&["NoSchedule", "PreferNoSchedule", "NoExecute"]),
        )
        .required()
        .with_description("The effect of the taint on pods that do not tolerate the taint."),
        AttributeSchema::new("key", AttributeType::String)
            .required()
            .with_description("The taint key to be applied to a node."),
        AttributeSchema::new("time_added", AttributeType::String).with_description(
            "TimeAdded represents the time at which the taint was added. It is only written for NoExecute taints.",
        ),
        AttributeSchema::new("value", AttributeType::String)
            .with_description("The taint value corresponding to the taint key."),
    ]))
}

/// Host operating system settings of a machine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct HostOsConfiguration {
    pub bottlerocket_configuration: Option<BottlerocketConfiguration>,
    pub cert_bundles: Option<Vec<CertBundle>>,
    pub ntp_configuration: Option<NtpConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BottlerocketConfiguration {
    pub boot: Option<BottlerocketBoot>,
    pub kernel: Option<BottlerocketKernel>,
    pub kubernetes: Option<BottlerocketKubernetes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BottlerocketBoot {
    pub boot_kernel_parameters: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BottlerocketKernel {
    pub sysctl_settings: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BottlerocketKubernetes {
    pub allowed_unsafe_sysctls: Option<Vec<String>>,
    #[serde(rename(serialize = "clusterDNSIPs"))]
    pub cluster_dns_ips: Option<Vec<String>>,
    pub max_pods: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CertBundle {
    pub data: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NtpConfiguration {
    pub servers: Vec<String>,
}

pub fn host_os_configuration() -> AttributeSchema {
    AttributeSchema::new(
        "host_os_configuration",
        AttributeType::Object(vec![
            AttributeSchema::new(
                "bottlerocket_configuration",
                AttributeType::Object(vec![
                    AttributeSchema::new(
                        "boot",
                        AttributeType::Object(vec![AttributeSchema::new(
                            "boot_kernel_parameters",
                            AttributeType::map(types::string_list()),
                        )
                        .with_description("Kernel parameters passed to the Bottlerocket boot loader.")]),
                    ),
                    AttributeSchema::new(
                        "kernel",
                        AttributeType::Object(vec![AttributeSchema::new(
                            "sysctl_settings",
                            types::string_map(),
                        )
                        .with_description("Kernel sysctl settings for Bottlerocket nodes.")]),
                    ),
                    AttributeSchema::new(
                        "kubernetes",
                        AttributeType::Object(vec![
                            AttributeSchema::new("allowed_unsafe_sysctls", types::string_list()),
                            AttributeSchema::new("cluster_dns_ips", types::string_list())
                                .with_wire_name("clusterDNSIPs"),
                            AttributeSchema::new("max_pods", AttributeType::Int),
                        ]),
                    ),
                ]),
            )
            .with_description("Bottlerocket specific settings; valid only when osFamily is bottlerocket."),
            AttributeSchema::new(
                "cert_bundles",
                AttributeType::list(AttributeType::Object(vec![
                    AttributeSchema::new("data", AttributeType::String)
                        .required()
                        .with_description("PEM encoded CA certificates."),
                    AttributeSchema::new("name", AttributeType::String).required(),
                ])),
            ),
            AttributeSchema::new(
                "ntp_configuration",
                AttributeType::Object(vec![
                    AttributeSchema::new("servers", types::string_list())
                        .required()
                        .with_description("NTP servers used for time synchronization.")
                        .with_validator(Validator::LengthAtLeast(1)),
                ]),
            ),
        ]),
    )
    .with_wire_name("hostOSConfiguration")
    .with_description("Customizations applied to the host operating system.")
}

/// Nutanix entity identifier, by name or by UUID
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixResourceIdentifier {
    pub name: Option<String>,
    pub r#type: String,
    pub uuid: Option<String>,
}

pub fn nutanix_identifier_type() -> AttributeType {
    AttributeType::Object(vec![
        AttributeSchema::new("name", AttributeType::String)
            .with_description("Name of the resource in the Prism Central."),
        AttributeSchema::new("type", AttributeType::enumeration(&["uuid", "name"]))
            .required()
            .with_description("Type is the identifier type to use for this resource."),
        AttributeSchema::new("uuid", AttributeType::String)
            .with_description("UUID of the resource in the PC."),
    ])
}
