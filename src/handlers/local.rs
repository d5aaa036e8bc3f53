use super::configure;
use crate::common::{CommandRunner, LocalCommandRunner};
use crate::config::WizardOptions;
use crate::deploy::stages::{DEPLOY_STAGE, PREPARE_STAGE};
use crate::deploy::{deploy_micro_bosh, prepare_inception_vm, run_stage, write_manifest};
use crate::error::Result;
use crate::settings::Settings;
use crate::wizard::{display_confirmation, display_stage_header};
use std::path::Path;

const DEPLOYMENTS_DIR: &str = "deployments";

/// `local`: configure, then prepare this machine and deploy Micro BOSH from it
pub fn handle_local(options: WizardOptions, dry_run: bool) -> Result<()> {
    let deployments_dir = options.settings_dir().join(DEPLOYMENTS_DIR);
    let settings = configure(options)?;
    let mut runner = if dry_run {
        LocalCommandRunner::dry_run()
    } else {
        LocalCommandRunner::new()
    };
    provision(&settings, &deployments_dir, &mut runner)?;
    display_confirmation("Micro BOSH deployed");
    Ok(())
}

/// Stages 3 and 4 against an already configured settings document
pub fn provision(
    settings: &Settings,
    deployments_dir: &Path,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    display_stage_header(
        3,
        PREPARE_STAGE,
        "Make sure this machine has the tools needed to deploy Micro BOSH.",
    );
    run_stage(runner, PREPARE_STAGE, &prepare_inception_vm(settings, deployments_dir))?;

    display_stage_header(
        4,
        DEPLOY_STAGE,
        "Write the deployment manifest, fetch the stemcell and deploy.",
    );
    let manifest = write_manifest(settings, deployments_dir).map_err(|e| e.in_stage(DEPLOY_STAGE))?;
    display_confirmation(&format!("Wrote {}", manifest.display()));
    let commands = deploy_micro_bosh(settings, deployments_dir).map_err(|e| e.in_stage(DEPLOY_STAGE))?;
    run_stage(runner, DEPLOY_STAGE, &commands)
}
