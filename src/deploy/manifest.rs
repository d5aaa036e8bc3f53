//! Micro BOSH deployment manifest (`micro_bosh.yml`) rendered from settings

use crate::error::{Result, WizardError};
use crate::settings::{CloudProperties, ResourceProperties, Settings};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicroBoshManifest {
    pub name: String,
    pub logging: Logging,
    pub network: Network,
    pub resources: Resources,
    pub cloud: Cloud,
    pub env: Env,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logging {
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Network {
    #[serde(rename = "type")]
    pub kind: String,
    pub vip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resources {
    pub persistent_disk: u32,
    pub cloud_properties: ResourceProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cloud {
    pub plugin: String,
    pub properties: CloudProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Env {
    pub bosh: EnvBosh,
}

/// Login for the VM user; only the salted hash is written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvBosh {
    pub password: String,
}

/// Deployment name: `microbosh-<provider>-<region>`
pub fn deployment_name(settings: &Settings) -> Result<String> {
    let provider = settings
        .bosh_provider
        .as_deref()
        .ok_or_else(|| missing("bosh_provider"))?;
    let region = settings.region_code.as_deref().unwrap_or("default");
    Ok(format!("microbosh-{}-{}", provider, region))
}

impl MicroBoshManifest {
    /// Build the manifest; every stage-1 and stage-2 fact must be present
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let name = deployment_name(settings)?;
        let plugin = settings
            .bosh_provider
            .clone()
            .ok_or_else(|| missing("bosh_provider"))?;
        let cloud_properties = settings
            .bosh_cloud_properties
            .clone()
            .ok_or_else(|| missing("bosh_cloud_properties"))?;
        let resource_properties = settings
            .bosh_resources_cloud_properties
            .clone()
            .ok_or_else(|| missing("bosh_resources_cloud_properties"))?;
        let bosh = settings.bosh.as_ref().ok_or_else(|| missing("bosh"))?;

        Ok(Self {
            name,
            logging: Logging {
                level: "DEBUG".to_string(),
            },
            network: Network {
                kind: "dynamic".to_string(),
                vip: bosh.ip_address.clone(),
            },
            resources: Resources {
                persistent_disk: bosh.persistent_disk,
                cloud_properties: resource_properties,
            },
            cloud: Cloud {
                plugin,
                properties: cloud_properties,
            },
            env: Env {
                bosh: EnvBosh {
                    password: bosh.salted_password.clone(),
                },
            },
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| WizardError::Render {
            what: "micro_bosh.yml".to_string(),
            message: e.to_string(),
        })
    }
}

fn missing(field: &str) -> WizardError {
    WizardError::IncompleteSettings {
        field: field.to_string(),
    }
}
