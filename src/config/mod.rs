//! Wizard options: where the settings and credential files live
//!
//! Values come from command-line flags (which clap also fills from the
//! environment) and fall back to paths under the home directory.

use crate::error::{Result, WizardError};
use std::path::{Path, PathBuf};

const SETTINGS_DIR_NAME: &str = ".bosh_bootstrap";
const SETTINGS_FILE_NAME: &str = "manifest.yml";
const CREDENTIAL_SOURCE_NAME: &str = ".fog";

/// Environment variable overriding the settings file path
pub const SETTINGS_ENV: &str = "BOSH_BOOTSTRAP_SETTINGS";
/// Environment variable overriding the credential source path
pub const CREDENTIAL_SOURCE_ENV: &str = "BOSH_BOOTSTRAP_FOG";

/// Get the default settings directory (~/.bosh_bootstrap)
pub fn default_settings_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(SETTINGS_DIR_NAME))
}

/// Get the default settings file path (~/.bosh_bootstrap/manifest.yml)
pub fn default_settings_path() -> Option<PathBuf> {
    default_settings_dir().map(|d| d.join(SETTINGS_FILE_NAME))
}

/// Get the default credential source path (~/.fog)
pub fn default_credential_source_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CREDENTIAL_SOURCE_NAME))
}

/// Options resolved once per wizard run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOptions {
    /// Settings document path
    pub settings_path: PathBuf,
    /// Credential source (fog) file path
    pub credential_source: PathBuf,
    /// Force dependency upgrades in the provisioning stages
    pub upgrade_deps: bool,
}

impl WizardOptions {
    /// Resolve options from optional overrides, filling gaps from the home directory
    pub fn resolve(
        settings_path: Option<PathBuf>,
        credential_source: Option<PathBuf>,
        upgrade_deps: bool,
    ) -> Result<Self> {
        let settings_path = match settings_path {
            Some(p) => p,
            None => default_settings_path().ok_or(WizardError::NoHomeDirectory)?,
        };
        let credential_source = match credential_source {
            Some(p) => expand_home(&p),
            None => default_credential_source_path().ok_or(WizardError::NoHomeDirectory)?,
        };
        Ok(Self {
            settings_path: expand_home(&settings_path),
            credential_source,
            upgrade_deps,
        })
    }

    /// Directory containing the settings file; deployment files go below it
    pub fn settings_dir(&self) -> PathBuf {
        self.settings_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
