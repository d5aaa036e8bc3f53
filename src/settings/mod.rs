//! Settings store
//!
//! Persists wizard decisions in a single YAML document (by default
//! `~/.bosh_bootstrap/manifest.yml`). Writes go through a temporary file in the
//! same directory that is renamed over the target, so the file on disk is
//! always a complete document. On Unix the file is readable by its owner only.

pub mod types;

pub use types::{
    AwsCloudProperties, CloudProperties, DeploymentCredentials, OpenStackCloudProperties,
    ResolvedCredentials, ResourceProperties, Settings, PERSISTENT_DISK_SIZE,
    PLACEHOLDER_IP_ADDRESS,
};

use crate::error::{Result, WizardError};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed settings document
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `path`, creating an empty document if it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, starting empty", path.display());
            let store = Self {
                path: path.to_path_buf(),
                settings: Settings::default(),
            };
            store.flush()?;
            return Ok(store);
        }

        let content = fs::read_to_string(path).map_err(|e| WizardError::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let settings = if content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| WizardError::SettingsParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply a change and persist it immediately
    pub fn update<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        change(&mut self.settings);
        self.flush()
    }

    /// Write the full document to disk
    pub fn flush(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| WizardError::SettingsDirectory {
                path: dir.clone(),
                source,
            })?;
            restrict_dir_permissions(&dir);
        }

        let content = serde_yaml::to_string(&self.settings).map_err(|e| {
            WizardError::SettingsWrite {
                path: self.path.clone(),
                source: std::io::Error::other(e),
            }
        })?;

        let write_err = |source| WizardError::SettingsWrite {
            path: self.path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
        restrict_file_permissions(tmp.path()).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_file_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_file_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn restrict_dir_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o700)).ok();
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_path: &Path) {}
