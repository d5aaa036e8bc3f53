//! Provider resolution: pick one profile and derive its deployment metadata

use super::catalog::{ProviderCatalog, ProviderProfile};
use super::regions::{aws_endpoint, DEFAULT_AWS_REGION};
use super::ProviderKind;
use crate::error::{Result, WizardError};
use crate::settings::{
    AwsCloudProperties, CloudProperties, OpenStackCloudProperties, ResolvedCredentials,
    ResourceProperties,
};
use crate::wizard::Prompter;
use log::{debug, info};

const DEFAULT_KEY_NAME: &str = "microbosh";
const DEFAULT_SECURITY_GROUP: &str = "microbosh";
const DEFAULT_PRIVATE_KEY: &str = "~/.ssh/microbosh.pem";
const DEFAULT_INSTANCE_TYPE: &str = "m1.medium";

/// Outcome of provider resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResolution {
    /// Profile the credentials came from
    pub profile: ProviderProfile,
    pub credentials: ResolvedCredentials,
    pub cloud_properties: CloudProperties,
    pub resource_properties: ResourceProperties,
}

/// Choose a profile (asking only when there is more than one) and derive its properties
pub fn resolve_provider(
    catalog: &ProviderCatalog,
    prompter: &mut dyn Prompter,
) -> Result<ProviderResolution> {
    let profiles = catalog.profiles();
    let profile = match profiles {
        [] => {
            return Err(WizardError::EmptyCatalog {
                path: catalog.source().to_path_buf(),
            });
        }
        [only] => {
            info!("Using the only provider profile: {}", only.label);
            only.clone()
        }
        _ => {
            let index = prompter.select("Choose infrastructure:", &catalog.labels())?;
            profiles.get(index).cloned().ok_or_else(|| WizardError::Prompt {
                prompt: "Choose infrastructure:".to_string(),
                message: format!("choice {} is out of range", index),
            })?
        }
    };

    let credentials = ResolvedCredentials {
        provider: profile.kind,
        fields: profile.fields.clone(),
    };
    let (cloud_properties, resource_properties) = derive_properties(&credentials)?;

    Ok(ProviderResolution {
        profile,
        credentials,
        cloud_properties,
        resource_properties,
    })
}

/// Derive cloud and resource properties for the credentials' provider
///
/// Providers without a derivation are refused rather than given guessed defaults.
pub fn derive_properties(
    credentials: &ResolvedCredentials,
) -> Result<(CloudProperties, ResourceProperties)> {
    debug!("Deriving cloud properties for {}", credentials.provider);
    let cloud = match credentials.provider {
        ProviderKind::Aws => CloudProperties {
            aws: Some(aws_cloud_properties(credentials)?),
            ..Default::default()
        },
        ProviderKind::OpenStack => CloudProperties {
            openstack: Some(openstack_cloud_properties(credentials)?),
            ..Default::default()
        },
        unsupported @ ProviderKind::Rackspace => {
            return Err(WizardError::UnsupportedProvider(
                unsupported.display_name().to_string(),
            ));
        }
    };

    let resources = ResourceProperties {
        instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
    };
    Ok((cloud, resources))
}

fn aws_cloud_properties(credentials: &ResolvedCredentials) -> Result<AwsCloudProperties> {
    let region = credentials.region().unwrap_or(DEFAULT_AWS_REGION);
    Ok(AwsCloudProperties {
        access_key_id: required(credentials, "aws_access_key_id")?,
        secret_access_key: required(credentials, "aws_secret_access_key")?,
        ec2_endpoint: aws_endpoint(region),
        default_key_name: DEFAULT_KEY_NAME.to_string(),
        default_security_groups: vec![DEFAULT_SECURITY_GROUP.to_string()],
        ec2_private_key: DEFAULT_PRIVATE_KEY.to_string(),
    })
}

fn openstack_cloud_properties(
    credentials: &ResolvedCredentials,
) -> Result<OpenStackCloudProperties> {
    Ok(OpenStackCloudProperties {
        auth_url: required(credentials, "openstack_auth_url")?,
        username: required(credentials, "openstack_username")?,
        api_key: required(credentials, "openstack_api_key")?,
        tenant: required(credentials, "openstack_tenant")?,
        default_key_name: DEFAULT_KEY_NAME.to_string(),
        default_security_groups: vec![DEFAULT_SECURITY_GROUP.to_string()],
        private_key: DEFAULT_PRIVATE_KEY.to_string(),
    })
}

fn required(credentials: &ResolvedCredentials, field: &str) -> Result<String> {
    credentials
        .field(field)
        .map(str::to_string)
        .ok_or_else(|| WizardError::MissingCredentialField {
            provider: credentials.provider.display_name().to_string(),
            field: field.to_string(),
        })
}
