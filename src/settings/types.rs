use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persistent disk size (MB) for the Micro BOSH VM
pub const PERSISTENT_DISK_SIZE: u32 = 16384;

/// Network address written until a real one is assigned
pub const PLACEHOLDER_IP_ADDRESS: &str = "0.0.0.0";

/// Everything the wizard has decided so far
///
/// Each optional field is one fact; its presence means the step that produces it
/// has completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Credential source the profiles were read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_path: Option<String>,
    /// Whether provisioning stages should upgrade dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_deps: Option<bool>,
    /// The selected provider profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_credentials: Option<ResolvedCredentials>,
    /// Normalized provider id (`aws`, `openstack`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bosh_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bosh_cloud_properties: Option<CloudProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bosh_resources_cloud_properties: Option<ResourceProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bosh_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bosh_password: Option<String>,
    /// Deployment credentials record handed to the deploy stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bosh: Option<DeploymentCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_bosh_stemcell_name: Option<String>,
    /// Keys this version does not know about, kept as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Settings {
    /// Provider of the resolved credentials, if selection has completed
    pub fn provider(&self) -> Option<ProviderKind> {
        self.fog_credentials.as_ref().map(|c| c.provider)
    }

    /// True once the provider selection stage has produced credentials
    pub fn has_provider(&self) -> bool {
        self.fog_credentials.is_some()
    }
}

/// The chosen credential profile plus its provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCredentials {
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl ResolvedCredentials {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Region recorded in the credentials, if any
    pub fn region(&self) -> Option<&str> {
        self.field("region")
    }
}

/// Provider-specific cloud properties, keyed by provider id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsCloudProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openstack: Option<OpenStackCloudProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsCloudProperties {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub ec2_endpoint: String,
    pub default_key_name: String,
    pub default_security_groups: Vec<String>,
    pub ec2_private_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenStackCloudProperties {
    pub auth_url: String,
    pub username: String,
    pub api_key: String,
    pub tenant: String,
    pub default_key_name: String,
    pub default_security_groups: Vec<String>,
    pub private_key: String,
}

/// VM sizing for the Micro BOSH instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperties {
    pub instance_type: String,
}

/// Deployment login, its salted hash and fixed VM allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentCredentials {
    pub username: String,
    pub password: String,
    pub salted_password: String,
    pub persistent_disk: u32,
    pub ip_address: String,
}
