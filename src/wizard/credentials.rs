//! Deployment login prompt
//!
//! Asks for the username and password the Micro BOSH director will accept.
//! The password is entered masked and not confirmed; this is a local bootstrap
//! tool, not an account system.

use crate::error::Result;
use crate::wizard::Prompter;
use std::fmt;

const FALLBACK_USERNAME: &str = "admin";

/// Username/password pair chosen by the operator
#[derive(Clone, PartialEq, Eq)]
pub struct DeploymentLogin {
    pub username: String,
    pub password: String,
}

// Keep the password out of debug output
impl fmt::Debug for DeploymentLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentLogin")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Name of the user running the wizard
pub fn current_username() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Ask for username (defaulting to the current user) and password
pub fn prompt_credentials(prompter: &mut dyn Prompter) -> Result<DeploymentLogin> {
    let default = current_username().unwrap_or_else(|| FALLBACK_USERNAME.to_string());
    let username = prompter.text("Username for the new deployment:", Some(&default))?;
    let username = match username.trim() {
        "" => default,
        name => name.to_string(),
    };
    let password = prompt_password(prompter)?;
    Ok(DeploymentLogin { username, password })
}

/// Ask for the password alone
pub fn prompt_password(prompter: &mut dyn Prompter) -> Result<String> {
    prompter.password("Password for the new deployment:")
}
