//! Bundles - Release bundle of every component shipped with a CLI version

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    Bundles,
    kind = "Bundles",
    type_name = "bundles",
    spec = BundlesSpec,
    attributes = spec_attributes,
    description = "Bundles is the Schema for the bundles API",
    has_id = false
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BundlesSpec {
    pub cli_max_version: Option<String>,
    pub cli_min_version: Option<String>,
    pub number: i64,
    pub versions_bundles: Vec<VersionsBundle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Image {
    pub arch: Option<Vec<String>>,
    pub description: Option<String>,
    pub image_digest: Option<String>,
    pub name: Option<String>,
    pub os: Option<String>,
    pub os_name: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Archive {
    pub arch: Option<Vec<String>>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub os: Option<String>,
    pub os_name: Option<String>,
    pub sha256: Option<String>,
    pub sha512: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Manifest {
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct VersionsBundle {
    pub bootstrap: CoreClusterApiBundle,
    pub bottle_rocket_host_containers: BottlerocketHostContainersBundle,
    pub cert_manager: CertManagerBundle,
    pub cilium: CiliumBundle,
    pub cloud_stack: CloudStackBundle,
    #[serde(rename(serialize = "clusterAPI"))]
    pub cluster_api: CoreClusterApiBundle,
    pub control_plane: CoreClusterApiBundle,
    pub docker: DockerBundle,
    pub eks_d: EksDRelease,
    pub eksa: EksaBundle,
    pub end_of_standard_support: Option<String>,
    pub etcdadm_bootstrap: CoreClusterApiBundle,
    pub etcdadm_controller: CoreClusterApiBundle,
    pub flux: FluxBundle,
    pub haproxy: HaproxyBundle,
    pub kindnetd: KindnetdBundle,
    pub kube_version: String,
    pub nutanix: NutanixBundle,
    pub package_controller: PackageBundle,
    pub snow: SnowBundle,
    pub tinkerbell: TinkerbellBundle,
    pub upgrader: Option<UpgraderBundle>,
    pub v_sphere: VSphereBundle,
}

/// Shape shared by the Cluster API core, bootstrap, control plane and etcdadm bundles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CoreClusterApiBundle {
    pub components: Manifest,
    pub controller: Image,
    pub kube_proxy: Image,
    pub metadata: Manifest,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BottlerocketHostContainersBundle {
    pub admin: Image,
    pub control: Image,
    pub kubeadm_bootstrap: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CertManagerBundle {
    pub acmesolver: Image,
    pub cainjector: Image,
    pub controller: Image,
    pub ctl: Option<Image>,
    pub manifest: Manifest,
    pub startupapicheck: Option<Image>,
    pub version: String,
    pub webhook: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CiliumBundle {
    pub cilium: Image,
    pub helm_chart: Image,
    pub manifest: Manifest,
    pub operator: Image,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct CloudStackBundle {
    #[serde(rename(serialize = "clusterAPIController"))]
    pub cluster_api_controller: Image,
    pub components: Manifest,
    pub kube_vip: Image,
    pub metadata: Manifest,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct DockerBundle {
    pub cluster_template: Manifest,
    pub components: Manifest,
    pub kube_proxy: Image,
    pub manager: Image,
    pub metadata: Manifest,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct EksDRelease {
    pub ami: Option<OsImageBundle>,
    pub channel: String,
    pub components: Option<String>,
    pub containerd: Option<Archive>,
    pub crictl: Option<Archive>,
    pub etcdadm: Option<Archive>,
    pub git_commit: String,
    pub imagebuilder: Option<Archive>,
    pub kind_node: Image,
    pub kube_version: String,
    pub manifest_url: String,
    pub name: String,
    pub ova: Option<OsImageBundle>,
    pub raw: Option<OsImageBundle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct OsImageBundle {
    pub bottlerocket: Option<Archive>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct EksaBundle {
    pub cli_tools: Image,
    pub cluster_controller: Image,
    pub components: Manifest,
    pub diagnostic_collector: Image,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct FluxBundle {
    pub helm_controller: Image,
    pub kustomize_controller: Image,
    pub notification_controller: Image,
    pub source_controller: Image,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct HaproxyBundle {
    pub image: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct KindnetdBundle {
    pub manifest: Manifest,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct NutanixBundle {
    pub cloud_provider: Image,
    #[serde(rename(serialize = "clusterAPIController"))]
    pub cluster_api_controller: Image,
    pub cluster_template: Manifest,
    pub components: Manifest,
    pub kube_vip: Image,
    pub metadata: Manifest,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct PackageBundle {
    pub credential_provider_package: Image,
    pub helm_chart: Image,
    pub package_controller: Image,
    pub token_refresher: Image,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SnowBundle {
    pub bottlerocket_bootstrap_snow: Image,
    pub components: Manifest,
    pub kube_vip: Image,
    pub manager: Image,
    pub metadata: Manifest,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct TinkerbellBundle {
    #[serde(rename(serialize = "clusterAPIController"))]
    pub cluster_api_controller: Image,
    pub cluster_template: Manifest,
    pub components: Manifest,
    pub envoy: Image,
    pub kube_vip: Image,
    pub metadata: Manifest,
    pub tinkerbell_stack: TinkerbellStackBundle,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct TinkerbellStackBundle {
    pub actions: ActionsBundle,
    pub boots: Image,
    pub hegel: Image,
    pub hook: HookBundle,
    pub rufio: Image,
    pub stack: Option<Image>,
    pub tink: TinkBundle,
    pub tinkerbell_chart: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct ActionsBundle {
    pub cexec: Image,
    pub image_to_disk: Image,
    pub kexec: Image,
    pub oci_to_disk: Image,
    pub reboot: Image,
    pub write_file: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct HookBundle {
    pub bootkit: Image,
    pub docker: Image,
    pub initramfs: HookArch,
    pub kernel: Image,
    pub vmlinuz: HookArch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct HookArch {
    pub amd: Archive,
    pub arm: Archive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct TinkBundle {
    pub nginx: Option<Image>,
    pub tink_controller: Image,
    pub tink_server: Image,
    pub tink_worker: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct UpgraderBundle {
    pub upgrader: Image,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct VSphereBundle {
    #[serde(rename(serialize = "clusterAPIController"))]
    pub cluster_api_controller: Image,
    pub components: Manifest,
    pub kube_proxy: Image,
    pub kube_vip: Image,
    pub manager: Image,
    pub metadata: Manifest,
    pub syncer: Option<Image>,
    pub version: String,
}

const OPERATING_SYSTEMS: &[&str] = &["linux", "darwin", "windows"];
const ARCHITECTURES: &[&str] = &["amd64", "arm64"];

fn artifact_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new(
            "arch",
            AttributeType::list(AttributeType::enumeration(ARCHITECTURES)),
        )
        .with_description("Architectures of the asset"),
        AttributeSchema::new("description", AttributeType::String),
        AttributeSchema::new("name", AttributeType::String)
            .with_description("The asset name"),
        AttributeSchema::new("os", AttributeType::enumeration(OPERATING_SYSTEMS))
            .with_description("Operating system of the asset"),
        AttributeSchema::new("os_name", AttributeType::String)
            .with_description("Name of the OS like ubuntu, bottlerocket"),
        AttributeSchema::new("uri", AttributeType::String)
            .with_description("The image repository, name, and tag"),
    ]
}

fn image_type() -> AttributeType {
    let mut attributes = artifact_attributes();
    attributes.push(
        AttributeSchema::new("image_digest", AttributeType::String)
            .with_description("The SHA256 digest of the image manifest"),
    );
    AttributeType::Object(attributes)
}

fn archive_type() -> AttributeType {
    let mut attributes = artifact_attributes();
    attributes.push(
        AttributeSchema::new("sha256", AttributeType::String)
            .with_description("The sha256 of the asset, only applies for 'file' store"),
    );
    attributes.push(
        AttributeSchema::new("sha512", AttributeType::String)
            .with_description("The sha512 of the asset, only applies for 'file' store"),
    );
    AttributeType::Object(attributes)
}

fn image(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, image_type()).required()
}

fn archive(name: &str) -> AttributeSchema {
    AttributeSchema::new(name, archive_type()).required()
}

fn manifest(name: &str) -> AttributeSchema {
    AttributeSchema::new(
        name,
        AttributeType::Object(vec![
            AttributeSchema::new("uri", AttributeType::String)
                .with_description("URI points to the manifest yaml file"),
        ]),
    )
    .required()
}

fn version() -> AttributeSchema {
    AttributeSchema::new("version", AttributeType::String).required()
}

fn block(name: &str, attributes: Vec<AttributeSchema>) -> AttributeSchema {
    AttributeSchema::new(name, AttributeType::Object(attributes)).required()
}

fn optional(attribute: AttributeSchema) -> AttributeSchema {
    AttributeSchema {
        required: false,
        ..attribute
    }
}

fn core_cluster_api(name: &str) -> AttributeSchema {
    block(
        name,
        vec![
            manifest("components"),
            image("controller"),
            image("kube_proxy"),
            manifest("metadata"),
            version(),
        ],
    )
}

fn os_image_bundle(name: &str) -> AttributeSchema {
    optional(block(name, vec![optional(archive("bottlerocket"))]))
}

fn eks_d_release() -> AttributeSchema {
    block(
        "eks_d",
        vec![
            os_image_bundle("ami"),
            AttributeSchema::new("channel", AttributeType::String)
                .required()
                .with_description("Release branch of the EKS-D release like 1-19, 1-20"),
            AttributeSchema::new("components", AttributeType::String)
                .with_description("Components refers to the url that points to the EKS-D release CRD"),
            optional(archive("containerd")),
            optional(archive("crictl")),
            optional(archive("etcdadm")),
            AttributeSchema::new("git_commit", AttributeType::String)
                .required()
                .with_description("Git commit the component is built from, before any patches"),
            optional(archive("imagebuilder")),
            image("kind_node"),
            AttributeSchema::new("kube_version", AttributeType::String)
                .required()
                .with_description("Release number of EKS-D release"),
            AttributeSchema::new("manifest_url", AttributeType::String)
                .required()
                .with_description("Url pointing to the EKS-D release manifest using which assets where created"),
            AttributeSchema::new("name", AttributeType::String).required(),
            os_image_bundle("ova"),
            os_image_bundle("raw"),
        ],
    )
    .with_wire_name("eksD")
}

fn tinkerbell_stack() -> AttributeSchema {
    let hook_arch = |name: &str| block(name, vec![archive("amd"), archive("arm")]);
    block(
        "tinkerbell_stack",
        vec![
            block(
                "actions",
                vec![
                    image("cexec"),
                    image("image_to_disk"),
                    image("kexec"),
                    image("oci_to_disk"),
                    image("reboot"),
                    image("write_file"),
                ],
            ),
            image("boots"),
            image("hegel"),
            block(
                "hook",
                vec![
                    image("bootkit"),
                    image("docker"),
                    hook_arch("initramfs"),
                    image("kernel"),
                    hook_arch("vmlinuz"),
                ],
            ),
            image("rufio"),
            optional(image("stack")),
            block(
                "tink",
                vec![
                    optional(image("nginx")),
                    image("tink_controller"),
                    image("tink_server"),
                    image("tink_worker"),
                ],
            ),
            image("tinkerbell_chart"),
        ],
    )
}

fn versions_bundle_attributes() -> Vec<AttributeSchema> {
    vec![
        core_cluster_api("bootstrap"),
        block(
            "bottle_rocket_host_containers",
            vec![image("admin"), image("control"), image("kubeadm_bootstrap")],
        ),
        block(
            "cert_manager",
            vec![
                image("acmesolver"),
                image("cainjector"),
                image("controller"),
                optional(image("ctl")),
                manifest("manifest"),
                optional(image("startupapicheck")),
                version(),
                image("webhook"),
            ],
        ),
        block(
            "cilium",
            vec![
                image("cilium"),
                image("helm_chart"),
                manifest("manifest"),
                image("operator"),
                version(),
            ],
        ),
        block(
            "cloud_stack",
            vec![
                image("cluster_api_controller").with_wire_name("clusterAPIController"),
                manifest("components"),
                image("kube_vip"),
                manifest("metadata"),
                version(),
            ],
        ),
        core_cluster_api("cluster_api").with_wire_name("clusterAPI"),
        core_cluster_api("control_plane"),
        block(
            "docker",
            vec![
                manifest("cluster_template"),
                manifest("components"),
                image("kube_proxy"),
                image("manager"),
                manifest("metadata"),
                version(),
            ],
        ),
        eks_d_release(),
        block(
            "eksa",
            vec![
                image("cli_tools"),
                image("cluster_controller"),
                manifest("components"),
                image("diagnostic_collector"),
                optional(version()),
            ],
        ),
        AttributeSchema::new("end_of_standard_support", AttributeType::String).with_description(
            "EndOfStandardSupport is the end of standard support date for the Kubernetes version",
        ),
        core_cluster_api("etcdadm_bootstrap"),
        core_cluster_api("etcdadm_controller"),
        block(
            "flux",
            vec![
                image("helm_controller"),
                image("kustomize_controller"),
                image("notification_controller"),
                image("source_controller"),
                version(),
            ],
        ),
        block("haproxy", vec![image("image")]),
        block("kindnetd", vec![manifest("manifest"), version()]),
        AttributeSchema::new("kube_version", AttributeType::String).required(),
        block(
            "nutanix",
            vec![
                image("cloud_provider"),
                image("cluster_api_controller").with_wire_name("clusterAPIController"),
                manifest("cluster_template"),
                manifest("components"),
                image("kube_vip"),
                manifest("metadata"),
                version(),
            ],
        ),
        block(
            "package_controller",
            vec![
                image("credential_provider_package"),
                image("helm_chart"),
                image("package_controller"),
                image("token_refresher"),
                version(),
            ],
        ),
        block(
            "snow",
            vec![
                image("bottlerocket_bootstrap_snow"),
                manifest("components"),
                image("kube_vip"),
                image("manager"),
                manifest("metadata"),
                version(),
            ],
        ),
        block(
            "tinkerbell",
            vec![
                image("cluster_api_controller").with_wire_name("clusterAPIController"),
                manifest("cluster_template"),
                manifest("components"),
                image("envoy"),
                image("kube_vip"),
                manifest("metadata"),
                tinkerbell_stack(),
                version(),
            ],
        ),
        optional(block("upgrader", vec![image("upgrader")])),
        block(
            "v_sphere",
            vec![
                image("cluster_api_controller").with_wire_name("clusterAPIController"),
                manifest("components"),
                image("kube_proxy"),
                image("kube_vip"),
                image("manager"),
                manifest("metadata"),
                optional(image("syncer")),
                version(),
            ],
        ),
    ]
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("cli_max_version", AttributeType::String)
            .with_description("Maximum eksa CLI version the bundle is compatible with"),
        AttributeSchema::new("cli_min_version", AttributeType::String)
            .with_description("Minimum eksa CLI version the bundle is compatible with"),
        AttributeSchema::new("number", AttributeType::Int)
            .required()
            .with_description("Monotonically increasing release number"),
        AttributeSchema::new(
            "versions_bundles",
            AttributeType::list(AttributeType::Object(versions_bundle_attributes())),
        )
        .required(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::manifest::{RenderConfig, read};
    use eksa_core::resource::Value;

    fn minimal_config() -> Value {
        Value::map([
            (
                "metadata",
                Value::map([("name", Value::from("foo")), ("namespace", Value::from("bar"))]),
            ),
            (
                "spec",
                Value::map([
                    ("cli_max_version", Value::from("1.0")),
                    ("cli_min_version", Value::from("0.9")),
                    ("number", Value::Int(1)),
                    ("versions_bundles", Value::List(vec![])),
                ]),
            ),
        ])
    }

    #[test]
    fn minimal_bundles_manifest() {
        let rendered = read::<Bundles>(&minimal_config(), &RenderConfig::default()).unwrap();

        assert_eq!(rendered.id, None);
        assert_eq!(
            rendered.yaml,
            "apiVersion: anywhere.eks.amazonaws.com/v1alpha1\n\
             kind: Bundles\n\
             metadata:\n  name: foo\n  namespace: bar\n\
             spec:\n  cliMaxVersion: '1.0'\n  cliMinVersion: '0.9'\n  number: 1\n"
        );
    }

    #[test]
    fn number_is_required() {
        let mut config = minimal_config();
        if let Value::Map(map) = &mut config
            && let Some(Value::Map(spec)) = map.get_mut("spec")
        {
            spec.remove("number");
        }
        let err = read::<Bundles>(&config, &RenderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("spec.number: required attribute is missing"));
    }

    #[test]
    fn number_zero_renders() {
        let mut config = minimal_config();
        if let Value::Map(map) = &mut config
            && let Some(Value::Map(spec)) = map.get_mut("spec")
        {
            spec.insert("number".to_string(), Value::Int(0));
        }
        let rendered = read::<Bundles>(&config, &RenderConfig::default()).unwrap();
        assert!(rendered.yaml.contains("  number: 0\n"));
    }

    #[test]
    fn image_os_is_enumerated() {
        let image = Value::map([("os", Value::from("plan9"))]);
        let errors = image_type().validate(&image).unwrap_err();
        assert!(errors[0].to_string().contains("expected one of: linux, darwin, windows"));
    }

    #[test]
    fn eks_d_uses_wire_name() {
        let schema = read_schema();
        let eks_d = schema.find("spec.versions_bundles.eks_d").unwrap();
        assert_eq!(eks_d.wire_name(), "eksD");
        let cluster_api = schema.find("spec.versions_bundles.cluster_api").unwrap();
        assert_eq!(cluster_api.wire_name(), "clusterAPI");
    }

    fn read_schema() -> eksa_core::schema::DataSourceSchema {
        eksa_core::manifest::schema::<Bundles>()
    }
}
