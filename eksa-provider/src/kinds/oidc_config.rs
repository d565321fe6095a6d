//! OIDCConfig - OpenID Connect identity provider

use eksa_core::schema::{AttributeSchema, AttributeType};
use serde::{Deserialize, Serialize};

define_manifest_kind!(
    OidcConfig,
    kind = "OIDCConfig",
    type_name = "oidcconfig",
    spec = OidcConfigSpec,
    attributes = spec_attributes,
    description = "OIDCConfig is the Schema for the oidcconfigs API"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct OidcConfigSpec {
    pub client_id: Option<String>,
    pub groups_claim: Option<String>,
    pub groups_prefix: Option<String>,
    pub issuer_url: Option<String>,
    pub required_claims: Option<Vec<OidcConfigRequiredClaim>>,
    pub username_claim: Option<String>,
    pub username_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct OidcConfigRequiredClaim {
    pub claim: Option<String>,
    pub value: Option<String>,
}

pub fn spec_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("client_id", AttributeType::String)
            .with_description("ClientId defines the client ID for the OpenID Connect client"),
        AttributeSchema::new("groups_claim", AttributeType::String)
            .with_description("GroupsClaim defines the name of a custom OpenID Connect claim for specifying user groups"),
        AttributeSchema::new("groups_prefix", AttributeType::String)
            .with_description("GroupsPrefix defines a string to be prefixed to all groups to prevent conflicts with other authentication strategies"),
        AttributeSchema::new("issuer_url", AttributeType::String)
            .with_description("IssuerUrl defines the URL of the OpenID issuer, only HTTPS scheme will be accepted"),
        AttributeSchema::new(
            "required_claims",
            AttributeType::list(AttributeType::Object(vec![
                AttributeSchema::new("claim", AttributeType::String),
                AttributeSchema::new("value", AttributeType::String),
            ])),
        )
        .with_description("RequiredClaims list of key=value pairs that describe a required claim in the ID Token"),
        AttributeSchema::new("username_claim", AttributeType::String)
            .with_description("UsernameClaim defines the OpenID claim to use as the user name."),
        AttributeSchema::new("username_prefix", AttributeType::String)
            .with_description("UsernamePrefix defines a string to prefixed to all usernames."),
    ]
}
