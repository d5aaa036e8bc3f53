//! Stemcell lookup: the newest stable Micro BOSH image for a provider

use crate::common::command_utils::capture_stdout;
use crate::error::{Result, WizardError};
use log::debug;

const STEMCELL_PREFIX: &str = "micro-bosh-stemcell-";

/// Finds the latest deployment image for a provider
pub trait ImageLookup {
    /// Identifier of the newest image tagged for `provider` and `scope`.
    /// An empty string means nothing matched.
    fn latest(&self, provider: &str, scope: &str) -> Result<String>;
}

/// Asks the `bosh` CLI for public stemcells
#[derive(Debug, Default, Clone)]
pub struct BoshCliImageLookup;

impl ImageLookup for BoshCliImageLookup {
    fn latest(&self, provider: &str, scope: &str) -> Result<String> {
        let tags = format!("micro,{},{}", provider, scope);
        debug!("Looking up stemcells tagged {}", tags);
        let listing = capture_stdout("bosh", &["public", "stemcells", "--tags", &tags])?;
        Ok(latest_stemcell_name(&listing).unwrap_or_default())
    }
}

/// Resolve the stable stemcell, refusing an empty answer
pub fn resolve_stemcell(lookup: &dyn ImageLookup, provider: &str) -> Result<String> {
    let name = lookup.latest(provider, "stable")?;
    let name = name.trim();
    if name.is_empty() {
        return Err(WizardError::UnresolvedStemcell {
            provider: provider.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Pick the newest `micro-bosh-stemcell-*` name from a `bosh public stemcells` table
pub fn latest_stemcell_name(listing: &str) -> Option<String> {
    listing
        .split(|c: char| c.is_whitespace() || c == '|')
        .filter(|token| token.starts_with(STEMCELL_PREFIX))
        .max_by(|a, b| compare_versions(a, b))
        .map(str::to_string)
}

// Numeric runs compare as numbers: 0.10.0 is newer than 0.8.1
fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    let key = |s: &str| -> Vec<u64> {
        s.split(|c: char| !c.is_ascii_digit())
            .filter(|p| !p.is_empty())
            .filter_map(|p| p.parse().ok())
            .collect()
    };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}
