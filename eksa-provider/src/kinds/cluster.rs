//! Cluster - Topology of an EKS Anywhere cluster

use std::collections::BTreeMap;

use eksa_core::schema::{AttributeSchema, AttributeType, Validator, types};
use serde::{Deserialize, Serialize};

use super::common::{Ref, Taint, ref_type, taints_type};

define_manifest_kind!(
    Cluster,
    kind = "Cluster",
    type_name = "cluster",
    spec = ClusterSpec,
    attributes = spec_attributes,
    description = "Cluster is the Schema for the clusters API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ClusterSpec {
    pub bundles_ref: Option<BundlesRef>,
    pub cluster_network: Option<ClusterNetwork>,
    pub control_plane_configuration: Option<ControlPlaneConfiguration>,
    pub datacenter_ref: Option<Ref>,
    pub eksa_version: Option<String>,
    pub etcd_encryption: Option<Vec<EtcdEncryption>>,
    pub external_etcd_configuration: Option<ExternalEtcdConfiguration>,
    pub git_ops_ref: Option<Ref>,
    pub identity_provider_refs: Option<Vec<Ref>>,
    pub kubernetes_version: Option<String>,
    pub license_token: Option<String>,
    pub machine_health_check: Option<MachineHealthCheck>,
    pub management_cluster: Option<ManagementCluster>,
    pub packages: Option<PackageConfiguration>,
    pub pod_iam_config: Option<PodIamConfig>,
    pub proxy_configuration: Option<ProxyConfiguration>,
    pub registry_mirror_configuration: Option<RegistryMirrorConfiguration>,
    pub worker_node_group_configurations: Option<Vec<WorkerNodeGroupConfiguration>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BundlesRef {
    pub api_version: String,
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ClusterNetwork {
    pub cni: Option<String>,
    pub cni_config: Option<CniConfig>,
    pub dns: Option<Dns>,
    pub nodes: Option<Nodes>,
    pub pods: Option<CidrBlocks>,
    pub services: Option<CidrBlocks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CniConfig {
    pub cilium: Option<CiliumConfig>,
    pub kindnetd: Option<KindnetdConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CiliumConfig {
    pub egress_masquerade_interfaces: Option<String>,
    #[serde(rename(serialize = "ipv4NativeRoutingCIDR"))]
    pub ipv4_native_routing_cidr: Option<String>,
    #[serde(rename(serialize = "ipv6NativeRoutingCIDR"))]
    pub ipv6_native_routing_cidr: Option<String>,
    pub policy_enforcement_mode: Option<String>,
    pub routing_mode: Option<String>,
    pub skip_upgrade: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindnetdConfig {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Dns {
    pub resolv_conf: Option<ResolvConf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ResolvConf {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Nodes {
    pub cidr_mask_size: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CidrBlocks {
    pub cidr_blocks: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ControlPlaneConfiguration {
    pub api_server_extra_args: Option<BTreeMap<String, String>>,
    pub cert_sans: Option<Vec<String>>,
    pub count: Option<i64>,
    pub endpoint: Option<Endpoint>,
    pub labels: Option<BTreeMap<String, String>>,
    pub machine_group_ref: Option<Ref>,
    pub machine_health_check: Option<MachineHealthCheck>,
    pub skip_load_balancer_deployment: Option<bool>,
    pub taints: Option<Vec<Taint>>,
    pub upgrade_rollout_strategy: Option<ControlPlaneUpgradeRolloutStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Endpoint {
    pub host: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ControlPlaneUpgradeRolloutStrategy {
    pub rolling_update: Option<ControlPlaneRollingUpdate>,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ControlPlaneRollingUpdate {
    pub max_surge: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct EtcdEncryption {
    pub providers: Vec<EtcdEncryptionProvider>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct EtcdEncryptionProvider {
    pub kms: Kms,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Kms {
    pub cachesize: Option<i64>,
    pub name: String,
    pub socket_listen_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ExternalEtcdConfiguration {
    pub count: Option<i64>,
    pub machine_group_ref: Option<Ref>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct MachineHealthCheck {
    pub max_unhealthy: Option<String>,
    pub node_startup_timeout: Option<String>,
    pub unhealthy_machine_timeout: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ManagementCluster {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct PackageConfiguration {
    pub controller: Option<PackageControllerConfiguration>,
    pub cronjob: Option<PackageCronJob>,
    pub disable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct PackageControllerConfiguration {
    pub digest: Option<String>,
    pub disable_webhooks: Option<bool>,
    pub env: Option<Vec<String>>,
    pub repository: Option<String>,
    pub resources: Option<PackageControllerResources>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct PackageControllerResources {
    pub limits: Option<ResourceList>,
    pub requests: Option<ResourceList>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ResourceList {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct PackageCronJob {
    pub digest: Option<String>,
    pub disable: Option<bool>,
    pub repository: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct PodIamConfig {
    pub service_account_issuer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ProxyConfiguration {
    pub http_proxy: String,
    pub https_proxy: String,
    pub no_proxy: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct RegistryMirrorConfiguration {
    pub authenticate: Option<bool>,
    pub ca_cert_content: Option<String>,
    pub endpoint: Option<String>,
    pub insecure_skip_verify: Option<bool>,
    pub oci_namespaces: Option<Vec<OciNamespace>>,
    pub port: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct OciNamespace {
    pub namespace: Option<String>,
    pub registry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct WorkerNodeGroupConfiguration {
    pub autoscaling_configuration: Option<AutoScalingConfiguration>,
    pub count: Option<i64>,
    pub kubernetes_version: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
    pub machine_group_ref: Option<Ref>,
    pub machine_health_check: Option<MachineHealthCheck>,
    pub name: String,
    pub taints: Option<Vec<Taint>>,
    pub upgrade_rollout_strategy: Option<WorkerNodesUpgradeRolloutStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct AutoScalingConfiguration {
    pub max_count: Option<i64>,
    pub min_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct WorkerNodesUpgradeRolloutStrategy {
    pub rolling_update: Option<WorkerNodesRollingUpdate>,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct WorkerNodesRollingUpdate {
    pub max_surge: Option<i64>,
    pub max_unavailable: Option<i64>,
}

const ROLLOUT_STRATEGY_TYPES: &[&str] = &["RollingUpdate", "InPlace"];

fn ref_attribute(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, ref_type())
}

fn machine_health_check() -> AttributeSchema {
    AttributeSchema::new(
        "machine_health_check",
        AttributeType::Object(vec![
            AttributeSchema::new("max_unhealthy", types::int_or_percent()).with_description(
                "MaxUnhealthy is used to configure the maximum number of unhealthy machines in machine health checks.",
            ),
            AttributeSchema::new("node_startup_timeout", AttributeType::String).with_description(
                "NodeStartupTimeout is used to configure the node startup timeout in machine health checks.",
            ),
            AttributeSchema::new("unhealthy_machine_timeout", AttributeType::String)
                .with_description(
                    "UnhealthyMachineTimeout is used to configure the unhealthy machine timeout in machine health checks.",
                ),
        ]),
    )
}

fn cluster_network() -> AttributeSchema {
    let cidr_blocks = |name: &str| {
        AttributeSchema::new(
            name,
            AttributeType::Object(vec![AttributeSchema::new(
                "cidr_blocks",
                AttributeType::list(types::cidr()),
            )]),
        )
    };

    AttributeSchema::new(
        "cluster_network",
        AttributeType::Object(vec![
            AttributeSchema::new("cni", AttributeType::enumeration(&["cilium", "kindnetd"]))
                .with_description("Deprecated. Use CNIConfig"),
            AttributeSchema::new(
                "cni_config",
                AttributeType::Object(vec![
                    AttributeSchema::new(
                        "cilium",
                        AttributeType::Object(vec![
                            AttributeSchema::new("egress_masquerade_interfaces", AttributeType::String)
                                .with_description(
                                    "EgressMasquaradeInterfaces determines which network interfaces are used to masquerade traffic.",
                                ),
                            AttributeSchema::new("ipv4_native_routing_cidr", AttributeType::String)
                                .with_wire_name("ipv4NativeRoutingCIDR")
                                .with_description(
                                    "IPv4NativeRoutingCIDR specifies the CIDR to use when RoutingMode is set to direct.",
                                ),
                            AttributeSchema::new("ipv6_native_routing_cidr", AttributeType::String)
                                .with_wire_name("ipv6NativeRoutingCIDR")
                                .with_description(
                                    "IPv6NativeRoutingCIDR specifies the IPv6 CIDR to use when RoutingMode is set to direct.",
                                ),
                            AttributeSchema::new(
                                "policy_enforcement_mode",
                                AttributeType::enumeration(&["default", "always", "never"]),
                            )
                            .with_description(
                                "PolicyEnforcementMode determines communication allowed between pods.",
                            ),
                            AttributeSchema::new(
                                "routing_mode",
                                AttributeType::enumeration(&["default", "direct"]),
                            )
                            .with_description(
                                "RoutingMode indicates the routing tunnel mode to use for Cilium.",
                            ),
                            AttributeSchema::new("skip_upgrade", AttributeType::Bool)
                                .with_description(
                                    "SkipUpgrade indicicates that Cilium maintenance should be skipped during upgrades.",
                                ),
                        ]),
                    ),
                    AttributeSchema::new("kindnetd", AttributeType::Object(vec![])),
                ]),
            ),
            AttributeSchema::new(
                "dns",
                AttributeType::Object(vec![AttributeSchema::new(
                    "resolv_conf",
                    AttributeType::Object(vec![
                        AttributeSchema::new("path", AttributeType::String)
                            .with_description("Path defines the path to the file that contains the DNS resolver configuration."),
                    ]),
                )
                .with_description("ResolvConf refers to the DNS resolver configuration.")]),
            ),
            AttributeSchema::new(
                "nodes",
                AttributeType::Object(vec![
                    AttributeSchema::new("cidr_mask_size", AttributeType::Int)
                        .with_description(
                            "CIDRMaskSize defines the mask size for node cidr in the cluster.",
                        )
                        .with_validator(Validator::IntAtLeast(1))
                        .with_validator(Validator::IntAtMost(128)),
                ]),
            ),
            cidr_blocks("pods"),
            cidr_blocks("services"),
        ]),
    )
    .with_description("ClusterNetwork is the network configuration of the cluster.")
}

fn control_plane_configuration() -> AttributeSchema {
    AttributeSchema::new(
        "control_plane_configuration",
        AttributeType::Object(vec![
            AttributeSchema::new("api_server_extra_args", types::string_map()).with_description(
                "APIServerExtraArgs defines the flags to configure for the API server.",
            ),
            AttributeSchema::new("cert_sans", types::string_list()).with_description(
                "CertSANs is a slice of domain names or IPs to be added as Subject Name Alternatives of the Kube API Servers Certificate.",
            ),
            AttributeSchema::new("count", AttributeType::Int)
                .with_description("Count defines the number of desired control plane nodes."),
            AttributeSchema::new(
                "endpoint",
                AttributeType::Object(vec![
                    AttributeSchema::new("host", AttributeType::String)
                        .required()
                        .with_description("Host defines the ip that you want to use to connect to the control plane"),
                ]),
            )
            .with_description("Endpoint defines the host ip and port to use for the control plane."),
            AttributeSchema::new("labels", types::string_map())
                .with_description("Labels define the labels to assign to the node"),
            ref_attribute("machine_group_ref").with_description(
                "MachineGroupRef defines the machine group configuration for the control plane.",
            ),
            machine_health_check(),
            AttributeSchema::new("skip_load_balancer_deployment", AttributeType::Bool)
                .with_description(
                    "SkipLoadBalancerDeployment skip deploying control plane load balancer.",
                ),
            AttributeSchema::new("taints", taints_type())
                .with_description("Taints define the set of taints to be applied on control plane nodes"),
            AttributeSchema::new(
                "upgrade_rollout_strategy",
                AttributeType::Object(vec![
                    AttributeSchema::new(
                        "rolling_update",
                        AttributeType::Object(vec![AttributeSchema::new(
                            "max_surge",
                            AttributeType::Int,
                        )]),
                    ),
                    AttributeSchema::new(
                        "type",
                        AttributeType::enumeration(ROLLOUT_STRATEGY_TYPES),
                    ),
                ]),
            )
            .with_description(
                "UpgradeRolloutStrategy determines the rollout strategy to use for rolling upgrades.",
            ),
        ]),
    )
}

fn worker_node_group_configurations() -> AttributeSchema {
    AttributeSchema::new(
        "worker_node_group_configurations",
        AttributeType::list(AttributeType::Object(vec![
            AttributeSchema::new(
                "autoscaling_configuration",
                AttributeType::Object(vec![
                    AttributeSchema::new("max_count", AttributeType::Int)
                        .with_description("MaxCount defines the maximum number of nodes for the associated resource group."),
                    AttributeSchema::new("min_count", AttributeType::Int)
                        .with_description("MinCount defines the minimum number of nodes for the associated resource group."),
                ]),
            )
            .with_description(
                "AutoScalingConfiguration defines the auto scaling configuration",
            ),
            AttributeSchema::new("count", AttributeType::Int)
                .with_description("Count defines the number of desired worker nodes. Defaults to 1."),
            AttributeSchema::new("kubernetes_version", AttributeType::String).with_description(
                "KuberenetesVersion defines the version for worker nodes. If not set, the top level spec kubernetesVersion will be used.",
            ),
            AttributeSchema::new("labels", types::string_map())
                .with_description("Labels define the labels to assign to the node"),
            ref_attribute("machine_group_ref").with_description(
                "MachineGroupRef defines the machine group configuration for the worker nodes.",
            ),
            machine_health_check(),
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Name refers to the name of the worker node group")
                .with_validator(Validator::LengthAtLeast(1)),
            AttributeSchema::new("taints", taints_type())
                .with_description("Taints define the set of taints to be applied on worker nodes"),
            AttributeSchema::new(
                "upgrade_rollout_strategy",
                AttributeType::Object(vec![
                    AttributeSchema::new(
                        "rolling_update",
                        AttributeType::Object(vec![
                            AttributeSchema::new("max_surge", AttributeType::Int),
                            AttributeSchema::new("max_unavailable", AttributeType::Int),
                        ]),
                    ),
                    AttributeSchema::new(
                        "type",
                        AttributeType::enumeration(ROLLOUT_STRATEGY_TYPES),
                    ),
                ]),
            ),
        ])),
    )
}

fn packages() -> AttributeSchema {
    let resource_list = |name: &str| {
        AttributeSchema::new(
            name,
            AttributeType::Object(vec![
                AttributeSchema::new("cpu", types::quantity()),
                AttributeSchema::new("memory", types::quantity()),
            ]),
        )
    };

    AttributeSchema::new(
        "packages",
        AttributeType::Object(vec![
            AttributeSchema::new(
                "controller",
                AttributeType::Object(vec![
                    AttributeSchema::new("digest", AttributeType::String)
                        .with_description("Digest is the sha256 of the controller image"),
                    AttributeSchema::new("disable_webhooks", AttributeType::Bool)
                        .with_description("DisableWebhooks on package controller"),
                    AttributeSchema::new("env", types::string_list())
                        .with_description("Env of package controller in the format 'key=value'"),
                    AttributeSchema::new("repository", AttributeType::String)
                        .with_description("Repository package controller repository."),
                    AttributeSchema::new(
                        "resources",
                        AttributeType::Object(vec![
                            resource_list("limits"),
                            resource_list("requests"),
                        ]),
                    )
                    .with_description("Resources of package controller"),
                    AttributeSchema::new("tag", AttributeType::String)
                        .with_description("Tag controller image tag"),
                ]),
            )
            .with_description("Controller package controller configuration"),
            AttributeSchema::new(
                "cronjob",
                AttributeType::Object(vec![
                    AttributeSchema::new("digest", AttributeType::String),
                    AttributeSchema::new("disable", AttributeType::Bool)
                        .with_description("Disable on cron job"),
                    AttributeSchema::new("repository", AttributeType::String),
                    AttributeSchema::new("tag", AttributeType::String),
                ]),
            )
            .with_description("Cronjob for ecr token refresher"),
            AttributeSchema::new("disable", AttributeType::Bool)
                .with_description("Disable package controller on cluster"),
        ]),
    )
    .with_description("PackageConfiguration for installing EKS Anywhere curated packages.")
}

fn registry_mirror_configuration() -> AttributeSchema {
    AttributeSchema::new(
        "registry_mirror_configuration",
        AttributeType::Object(vec![
            AttributeSchema::new("authenticate", AttributeType::Bool).with_description(
                "Authenticate defines if registry requires authentication",
            ),
            AttributeSchema::new("ca_cert_content", AttributeType::String).with_description(
                "CACertContent defines the contents registry mirror CA certificate",
            ),
            AttributeSchema::new("endpoint", AttributeType::String)
                .with_description("Endpoint defines the registry mirror endpoint to use for pulling images"),
            AttributeSchema::new("insecure_skip_verify", AttributeType::Bool).with_description(
                "InsecureSkipVerify skips the registry certificate verification.",
            ),
            AttributeSchema::new(
                "oci_namespaces",
                AttributeType::list(AttributeType::Object(vec![
                    AttributeSchema::new("namespace", AttributeType::String)
                        .with_description("Namespace refers to the name of a namespace in the local registry"),
                    AttributeSchema::new("registry", AttributeType::String)
                        .required()
                        .with_description("Name refers to the name of the upstream registry"),
                ])),
            )
            .with_description(
                "OCINamespaces defines the mapping from an upstream registry to a local namespace where upstream artifacts are placed into",
            ),
            AttributeSchema::new("port", AttributeType::String)
                .with_description("Port defines the port exposed for registry mirror endpoint"),
        ]),
    )
    .with_description("RegistryMirrorConfiguration defines the settings for image registry mirror.")
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "bundles_ref",
            AttributeType::Object(vec![
                AttributeSchema::new("api_version", AttributeType::String)
                    .required()
                    .with_description("APIVersion of the referent."),
                AttributeSchema::new("name", AttributeType::String)
                    .required()
                    .with_description("Name of the referent."),
                AttributeSchema::new("namespace", AttributeType::String)
                    .required()
                    .with_description("Namespace of the referent."),
            ]),
        )
        .with_description("BundlesRef contains a reference to the Bundles containing the desired dependencies for the cluster. DEPRECATED: Use EksaVersion instead."),
        cluster_network(),
        control_plane_configuration(),
        ref_attribute("datacenter_ref"),
        AttributeSchema::new("eksa_version", AttributeType::String)
            .with_description("EksaVersion is the semver identifying the release of eks-a used to populate the cluster components."),
        AttributeSchema::new(
            "etcd_encryption",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new(
                    "providers",
                    AttributeType::list(AttributeType::Object(vec![
                        AttributeSchema::new(
                            "kms",
                            AttributeType::Object(vec![
                                AttributeSchema::new("cachesize", AttributeType::Int)
                                    .with_description("CacheSize defines the maximum number of encrypted objects to be cached in memory."),
                                AttributeSchema::new("name", AttributeType::String)
                                    .required()
                                    .with_description("Name defines the name of KMS plugin to be used."),
                                AttributeSchema::new("socket_listen_address", AttributeType::String)
                                    .required()
                                    .with_description("SocketListenAddress defines a UNIX socket address that the KMS provider listens on."),
                            ]),
                        )
                        .required()
                        .with_description("KMS defines the configuration for KMS Encryption provider."),
                    ])),
                )
                .required()
                .with_validator(Validator::LengthAtLeast(1)),
                AttributeSchema::new("resources", types::string_list())
                    .required()
                    .with_validator(Validator::LengthAtLeast(1)),
            ])),
        ),
        AttributeSchema::new(
            "external_etcd_configuration",
            AttributeType::Object(vec![
                AttributeSchema::new("count", AttributeType::Int),
                ref_attribute("machine_group_ref").with_description(
                    "MachineGroupRef defines the machine group configuration for the etcd machines.",
                ),
            ]),
        )
        .with_description("ExternalEtcdConfiguration defines the configuration options for using unstacked etcd topology."),
        ref_attribute("git_ops_ref"),
        AttributeSchema::new("identity_provider_refs", AttributeType::list(ref_type())),
        AttributeSchema::new("kubernetes_version", AttributeType::String),
        AttributeSchema::new("license_token", AttributeType::String),
        machine_health_check(),
        AttributeSchema::new(
            "management_cluster",
            AttributeType::Object(vec![AttributeSchema::new("name", AttributeType::String).required()]),
        ),
        packages(),
        AttributeSchema::new(
            "pod_iam_config",
            AttributeType::Object(vec![
                AttributeSchema::new("service_account_issuer", AttributeType::String).required(),
            ]),
        ),
        AttributeSchema::new(
            "proxy_configuration",
            AttributeType::Object(vec![
                AttributeSchema::new("http_proxy", AttributeType::String).required(),
                AttributeSchema::new("https_proxy", AttributeType::String).required(),
                AttributeSchema::new("no_proxy", types::string_list()),
            ]),
        ),
        registry_mirror_configuration(),
        worker_node_group_configurations(),
    ]
}
