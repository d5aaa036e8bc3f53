// Handler modules
pub mod local;
pub mod remote;

pub use local::handle_local;
pub use remote::handle_remote;

use crate::common::ShaCryptHasher;
use crate::config::WizardOptions;
use crate::deploy::BoshCliImageLookup;
use crate::error::Result;
use crate::wizard::{display_banner, run_configuration, TerminalPrompter, WizardContext};
use crate::settings::Settings;

/// Run stages 1 and 2 against the terminal and return the saved settings
pub(crate) fn configure(options: WizardOptions) -> Result<Settings> {
    display_banner("Bootstrap Micro BOSH");
    let mut prompter = TerminalPrompter::new();
    let hasher = ShaCryptHasher;
    let images = BoshCliImageLookup;
    let mut ctx = WizardContext::new(options, &mut prompter, &hasher, &images)?;
    run_configuration(&mut ctx)?;
    Ok(ctx.store.settings().clone())
}
