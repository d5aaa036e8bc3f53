//! Provider catalog: turns a credential source into labeled provider options
//!
//! The credential source is a YAML mapping of profile names to credential
//! fields, in the layout used by fog (`~/.fog`). Keys may carry a leading `:`
//! (Ruby symbols); it is stripped.

use super::ProviderKind;
use crate::error::{Result, WizardError};
use log::debug;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One usable profile from the credential source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Profile name as written in the source
    pub name: String,
    /// Menu label, e.g. "AWS (default)"
    pub label: String,
    /// Detected provider
    pub kind: ProviderKind,
    /// Credential fields with normalized keys
    pub fields: BTreeMap<String, String>,
}

/// Ordered set of provider profiles
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    source: PathBuf,
    profiles: Vec<ProviderProfile>,
}

impl ProviderCatalog {
    /// Parse a credential source document; errors if nothing is recognised
    pub fn from_yaml(content: &str, source: &Path) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| WizardError::MalformedCredentialSource {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;
        match value {
            Value::Mapping(map) => Self::from_mapping(&map, source),
            // An empty file parses as null
            Value::Null => Err(WizardError::EmptyCatalog {
                path: source.to_path_buf(),
            }),
            _ => Err(WizardError::MalformedCredentialSource {
                path: source.to_path_buf(),
                message: "expected a mapping of profile names".to_string(),
            }),
        }
    }

    /// Build the catalog from profile-name → field mappings, in source order
    pub fn from_mapping(raw: &Mapping, source: &Path) -> Result<Self> {
        let mut profiles: Vec<ProviderProfile> = Vec::new();

        for (name, entry) in raw {
            let Some(name) = scalar_to_string(name) else {
                continue;
            };
            let name = normalize_key(&name);
            let Value::Mapping(entry) = entry else {
                debug!("Skipping profile '{}': not a mapping", name);
                continue;
            };

            let fields = credential_fields(entry);
            let Some(kind) = detect_kind(&fields) else {
                debug!("Skipping profile '{}': no known provider fields", name);
                continue;
            };

            if profiles
                .iter()
                .any(|p| p.kind == kind && p.fields == fields)
            {
                debug!("Skipping profile '{}': duplicate credentials", name);
                continue;
            }

            let label = format!("{} ({})", kind.display_name(), name);
            if profiles.iter().any(|p| p.label == label) {
                debug!("Skipping profile '{}': label {} already listed", name, label);
                continue;
            }

            profiles.push(ProviderProfile {
                label,
                name,
                kind,
                fields,
            });
        }

        if profiles.is_empty() {
            return Err(WizardError::EmptyCatalog {
                path: source.to_path_buf(),
            });
        }

        Ok(Self {
            source: source.to_path_buf(),
            profiles,
        })
    }

    pub fn profiles(&self) -> &[ProviderProfile] {
        &self.profiles
    }

    pub fn labels(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Path the catalog was read from
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Read and parse the credential source file
pub fn parse_profiles(path: &Path) -> Result<ProviderCatalog> {
    if !path.exists() {
        return Err(WizardError::MissingCredentialSource {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| WizardError::MalformedCredentialSource {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let catalog = ProviderCatalog::from_yaml(&content, path)?;
    debug!(
        "Loaded {} provider profile(s) from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

fn detect_kind(fields: &BTreeMap<String, String>) -> Option<ProviderKind> {
    ProviderKind::ALL
        .into_iter()
        .find(|kind| fields.contains_key(kind.marker_field()))
}

/// Field names the saved credentials use themselves
const RESERVED_FIELDS: &[&str] = &["provider"];

fn credential_fields(entry: &Mapping) -> BTreeMap<String, String> {
    entry
        .iter()
        .filter_map(|(k, v)| {
            let key = normalize_key(&scalar_to_string(k)?);
            if RESERVED_FIELDS.contains(&key.as_str()) {
                debug!("Ignoring reserved credential field '{}'", key);
                return None;
            }
            let value = scalar_to_string(v)?;
            Some((key, value))
        })
        .collect()
}

fn normalize_key(key: &str) -> String {
    key.trim().trim_start_matches(':').to_string()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
