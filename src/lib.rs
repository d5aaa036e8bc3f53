//! # bosh-bootstrap
//!
//! Interactive wizard that bootstraps a Micro BOSH onto AWS or OpenStack.
//!
//! Credentials come from a fog file (`~/.fog`). Every answer is saved to
//! `~/.bosh_bootstrap/manifest.yml` as soon as it is known, so a re-run only
//! asks what is still missing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bosh_bootstrap::common::ShaCryptHasher;
//! use bosh_bootstrap::config::WizardOptions;
//! use bosh_bootstrap::deploy::BoshCliImageLookup;
//! use bosh_bootstrap::wizard::{run_configuration, TerminalPrompter, WizardContext};
//!
//! # fn main() -> bosh_bootstrap::Result<()> {
//! let options = WizardOptions::resolve(None, None, false)?;
//! let mut prompter = TerminalPrompter::new();
//! let mut ctx = WizardContext::new(options, &mut prompter, &ShaCryptHasher, &BoshCliImageLookup)?;
//! run_configuration(&mut ctx)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod deploy;
pub mod error;
pub mod handlers;
pub mod providers;
pub mod settings;
pub mod wizard;

pub use error::{Result, WizardError};
