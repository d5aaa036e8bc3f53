//! Region selection for providers that have regions
//!
//! Only AWS offers a region choice. The chosen code is written to two places:
//! the credentials (`region`, read by API clients) and the AWS EC2 endpoint in
//! the cloud properties (read by the deployment manifest).

use super::ProviderKind;
use crate::error::{Result, WizardError};
use crate::settings::{CloudProperties, ResolvedCredentials};
use crate::wizard::Prompter;
use log::debug;

/// A selectable region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudRegion {
    /// Region code (e.g., "us-east-1")
    pub id: &'static str,
    /// Human-readable location
    pub name: &'static str,
}

/// AWS regions, in menu order
pub static AWS_REGIONS: &[CloudRegion] = &[
    CloudRegion { id: "us-east-1", name: "US East (N. Virginia)" },
    CloudRegion { id: "us-west-1", name: "US West (N. California)" },
    CloudRegion { id: "us-west-2", name: "US West (Oregon)" },
    CloudRegion { id: "eu-west-1", name: "EU (Ireland)" },
    CloudRegion { id: "ap-southeast-1", name: "Asia Pacific (Singapore)" },
    CloudRegion { id: "ap-southeast-2", name: "Asia Pacific (Sydney)" },
    CloudRegion { id: "ap-northeast-1", name: "Asia Pacific (Tokyo)" },
    CloudRegion { id: "sa-east-1", name: "South America (São Paulo)" },
];

/// Region used for the EC2 endpoint until one is chosen
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Regions offered for a provider; empty when it has no region concept
pub fn regions_for_provider(kind: ProviderKind) -> &'static [CloudRegion] {
    match kind {
        ProviderKind::Aws => AWS_REGIONS,
        ProviderKind::OpenStack | ProviderKind::Rackspace => &[],
    }
}

/// EC2 API endpoint for a region
pub fn aws_endpoint(region: &str) -> String {
    format!("ec2.{}.amazonaws.com", region)
}

/// Ask for a region if the provider has any; `None` without prompting otherwise
pub fn resolve_region(kind: ProviderKind, prompter: &mut dyn Prompter) -> Result<Option<String>> {
    let regions = regions_for_provider(kind);
    if regions.is_empty() {
        debug!("{} has no regions to choose from", kind);
        return Ok(None);
    }

    let options: Vec<String> = regions
        .iter()
        .map(|r| format!("{}  ({})", r.id, r.name))
        .collect();
    let message = format!("Choose {} region:", kind);
    let index = prompter.select(&message, &options)?;
    regions
        .get(index)
        .map(|r| Some(r.id.to_string()))
        .ok_or_else(|| WizardError::Prompt {
            prompt: message,
            message: format!("choice {} is out of range", index),
        })
}

/// Fold a chosen region into the credentials and the provider endpoint
pub fn apply_region(
    region: &str,
    credentials: &mut ResolvedCredentials,
    cloud_properties: &mut CloudProperties,
) {
    credentials
        .fields
        .insert("region".to_string(), region.to_string());
    if let Some(aws) = cloud_properties.aws.as_mut() {
        aws.ec2_endpoint = aws_endpoint(region);
    }
}
