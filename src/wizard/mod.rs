//! Interactive bootstrap wizard
//!
//! Walks the operator through provider selection and deployment configuration,
//! saving every answer so a re-run only asks what is still missing.

mod credentials;
mod orchestrator;
mod prompt;
mod render;
pub mod testing;

pub use credentials::{current_username, prompt_credentials, prompt_password, DeploymentLogin};
pub use orchestrator::{
    deployment_configuration_stage, provider_selection_stage, run_configuration,
    ConfigurationReport, StepOutcome, WizardContext, CONFIGURATION_STAGE, PROVIDER_STAGE,
};
pub use prompt::{Prompter, TerminalPrompter};
pub use render::{
    display_banner, display_confirmation, display_skipped, display_stage_header, region_phrase,
    wizard_render_config,
};
