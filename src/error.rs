//! Error types for the bootstrap wizard
//!
//! Every fatal condition is a variant here. Stage failures wrap the underlying
//! error so the operator sees which stage stopped the run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop the wizard
#[derive(Debug, Error)]
pub enum WizardError {
    /// The credential source file does not exist
    #[error("Credential source not found at {}", path.display())]
    MissingCredentialSource { path: PathBuf },

    /// The credential source exists but is not a mapping of profiles
    #[error("Credential source {} is malformed: {message}", path.display())]
    MalformedCredentialSource { path: PathBuf, message: String },

    /// No profile in the credential source matched a known provider
    #[error("No infrastructure provider credentials found in {}", path.display())]
    EmptyCatalog { path: PathBuf },

    /// The selected profile lacks a field the provider needs
    #[error("{provider} credentials are missing '{field}'")]
    MissingCredentialField { provider: String, field: String },

    /// A provider was recognised but has no cloud property derivation
    #[error("Provider '{0}' is not supported yet")]
    UnsupportedProvider(String),

    /// The home directory could not be determined
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// The settings directory could not be created
    #[error("Failed to create settings directory {}: {source}", path.display())]
    SettingsDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be written
    #[error("Failed to write settings file {}: {source}", path.display())]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but cannot be parsed
    #[error("Settings file {} is malformed: {message}", path.display())]
    SettingsParse { path: PathBuf, message: String },

    /// A prompt requires a terminal but none is attached
    #[error("'{prompt}' needs an interactive terminal")]
    NonInteractive { prompt: String },

    /// The operator cancelled a prompt (Esc / Ctrl+C)
    #[error("Wizard cancelled")]
    Cancelled,

    /// A prompt failed for another reason
    #[error("Prompt '{prompt}' failed: {message}")]
    Prompt { prompt: String, message: String },

    /// Hashing the deployment password failed
    #[error("Failed to hash deployment password: {0}")]
    PasswordHash(String),

    /// A later stage needs a setting an earlier stage should have written
    #[error("Settings are missing '{field}'")]
    IncompleteSettings { field: String },

    /// A generated document could not be serialized
    #[error("Failed to render {what}: {message}")]
    Render { what: String, message: String },

    /// The image lookup returned nothing usable
    #[error("No stable stemcell found for provider '{provider}'")]
    UnresolvedStemcell { provider: String },

    /// An external command could not be started or returned a failure
    #[error("Command '{command}' failed: {message}")]
    ExternalCommand { command: String, message: String },

    /// The command runner reported failure for a provisioning stage
    #[error("Commands for this stage did not complete successfully")]
    CommandsFailed,

    /// Wraps any error with the name of the stage it happened in
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<WizardError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WizardError {
    /// Attach the name of the stage this error occurred in
    pub fn in_stage(self, stage: &str) -> Self {
        match self {
            // Keep the innermost stage name
            WizardError::Stage { .. } => self,
            other => WizardError::Stage {
                stage: stage.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Remediation hint for configuration errors
    pub fn hint(&self) -> Option<String> {
        match self {
            WizardError::MissingCredentialSource { path } => Some(format!(
                "Create {} with a profile such as:\n  default:\n    aws_access_key_id: ...\n    aws_secret_access_key: ...\nor pass --fog <PATH>",
                path.display()
            )),
            WizardError::MalformedCredentialSource { .. } => Some(
                "The credential source must be a YAML mapping of profile names to credential fields"
                    .to_string(),
            ),
            WizardError::EmptyCatalog { .. } => Some(
                "Add a profile with aws_access_key_id or openstack_username to the credential source"
                    .to_string(),
            ),
            WizardError::MissingCredentialField { field, .. } => Some(format!(
                "Add '{field}' to the profile in the credential source"
            )),
            WizardError::UnsupportedProvider(_) => Some(
                "Choose an AWS or OpenStack profile from the credential source"
                    .to_string(),
            ),
            WizardError::SettingsParse { path, .. } => Some(format!(
                "Fix or remove {} to continue; it is never repaired automatically",
                path.display()
            )),
            WizardError::NonInteractive { .. } => Some(
                "Run the wizard from an interactive terminal; answers already saved are kept"
                    .to_string(),
            ),
            WizardError::IncompleteSettings { field } => Some(format!(
                "Run `bosh-bootstrap remote` to fill in '{field}' before deploying"
            )),
            WizardError::UnresolvedStemcell { .. } => Some(
                "Check that the bosh CLI is installed, or set micro_bosh_stemcell_name in the settings file"
                    .to_string(),
            ),
            WizardError::Stage { source, .. } => source.hint(),
            _ => None,
        }
    }

    /// Name of the stage this error was raised in, if known
    pub fn stage(&self) -> Option<&str> {
        match self {
            WizardError::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;
