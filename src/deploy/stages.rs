//! Provisioning stages handed to the command runner after configuration

use super::manifest::{deployment_name, MicroBoshManifest};
use crate::common::{CommandRunner, CommandSpec};
use crate::error::{Result, WizardError};
use crate::settings::Settings;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const PREPARE_STAGE: &str = "Prepare Inception VM";
pub const DEPLOY_STAGE: &str = "Deploy Micro BOSH";

const MANIFEST_FILE_NAME: &str = "micro_bosh.yml";

/// Commands preparing this machine to run the deploy
pub fn prepare_inception_vm(settings: &Settings, deployments_dir: &Path) -> Vec<CommandSpec> {
    let mut commands = vec![CommandSpec::new(
        "create deployments directory",
        format!("mkdir -p {}", shell_quote(&deployments_dir.display().to_string())),
    )];
    if settings.upgrade_deps.unwrap_or(false) {
        commands.push(CommandSpec::new(
            "upgrade bosh cli",
            "gem install bosh_cli bosh_cli_plugin_micro --no-ri --no-rdoc",
        ));
    }
    commands.push(CommandSpec::new(
        "check bosh cli",
        "command -v bosh >/dev/null && bosh --version",
    ));
    commands
}

/// Write `micro_bosh.yml` into the deployment's directory and return its path
pub fn write_manifest(settings: &Settings, deployments_dir: &Path) -> Result<PathBuf> {
    let manifest = MicroBoshManifest::from_settings(settings)?;
    let dir = deployments_dir.join(&manifest.name);
    fs::create_dir_all(&dir)?;
    let path = dir.join(MANIFEST_FILE_NAME);
    fs::write(&path, manifest.to_yaml()?)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Commands that download the stemcell and deploy Micro BOSH
pub fn deploy_micro_bosh(settings: &Settings, deployments_dir: &Path) -> Result<Vec<CommandSpec>> {
    let name = deployment_name(settings)?;
    let stemcell = settings
        .micro_bosh_stemcell_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| WizardError::IncompleteSettings {
            field: "micro_bosh_stemcell_name".to_string(),
        })?;

    let cd = format!("cd {}", shell_quote(&deployments_dir.display().to_string()));
    let stemcell = shell_quote(stemcell);
    Ok(vec![
        CommandSpec::new(
            "download stemcell",
            format!(
                "{cd} && (test -f {stemcell} || bosh -n public stemcell download {stemcell})"
            ),
        ),
        CommandSpec::new(
            "select deployment",
            format!("{cd} && bosh -n micro deployment {}", shell_quote(&name)),
        ),
        CommandSpec::new(
            "deploy micro bosh",
            format!("{cd} && bosh -n micro deploy {stemcell}"),
        ),
    ])
}

/// Run a stage's commands, turning a reported failure into a stage error
pub fn run_stage(runner: &mut dyn CommandRunner, stage: &str, commands: &[CommandSpec]) -> Result<()> {
    match runner.run(commands) {
        Ok(true) => Ok(()),
        Ok(false) => Err(WizardError::CommandsFailed.in_stage(stage)),
        Err(e) => Err(e.in_stage(stage)),
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
