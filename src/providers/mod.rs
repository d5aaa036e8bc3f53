//! Infrastructure providers: catalog parsing, selection and region handling

pub mod catalog;
pub mod regions;
pub mod resolver;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use catalog::{parse_profiles, ProviderCatalog, ProviderProfile};
pub use regions::{apply_region, regions_for_provider, resolve_region, CloudRegion};
pub use resolver::{derive_properties, resolve_provider, ProviderResolution};

/// Infrastructure vendor recognised in a credential source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "OpenStack")]
    OpenStack,
    #[serde(rename = "Rackspace")]
    Rackspace,
}

impl ProviderKind {
    /// All kinds, in detection order
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Aws,
        ProviderKind::OpenStack,
        ProviderKind::Rackspace,
    ];

    /// Name shown to the operator
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Aws => "AWS",
            ProviderKind::OpenStack => "OpenStack",
            ProviderKind::Rackspace => "Rackspace",
        }
    }

    /// Normalized identifier used by BOSH (`aws`, `openstack`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Aws => "aws",
            ProviderKind::OpenStack => "openstack",
            ProviderKind::Rackspace => "rackspace",
        }
    }

    /// Credential field whose presence identifies this provider
    pub fn marker_field(&self) -> &'static str {
        match self {
            ProviderKind::Aws => "aws_access_key_id",
            ProviderKind::OpenStack => "openstack_username",
            ProviderKind::Rackspace => "rackspace_api_key",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml::to_string(&ProviderKind::OpenStack).unwrap();
        assert_eq!(yaml.trim(), "OpenStack");
        let kind: ProviderKind = serde_yaml::from_str("AWS").unwrap();
        assert_eq!(kind, ProviderKind::Aws);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(ProviderKind::Aws.as_str(), "aws");
        assert_eq!(ProviderKind::OpenStack.to_string(), "OpenStack");
        assert_eq!(ProviderKind::Rackspace.marker_field(), "rackspace_api_key");
    }
}
