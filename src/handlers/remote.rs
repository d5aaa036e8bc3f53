use super::configure;
use crate::config::WizardOptions;
use crate::error::Result;
use crate::wizard::display_confirmation;
use log::info;

/// `remote`: configure only; provisioning runs elsewhere from the saved settings
pub fn handle_remote(options: WizardOptions) -> Result<()> {
    let settings_path = options.settings_path.clone();
    configure(options)?;
    info!("Settings saved to {}", settings_path.display());
    display_confirmation(&format!("Settings saved to {}", settings_path.display()));
    Ok(())
}
