//! Wizard orchestration - ties all stages together
//!
//! Each stage checks the settings before every sub-step and skips the ones an
//! earlier run already answered. Results are flushed to the settings file as
//! soon as they are known, so an interrupted run picks up where it stopped.

use crate::common::PasswordHasher;
use crate::config::WizardOptions;
use crate::deploy::{resolve_stemcell, ImageLookup};
use crate::error::{Result, WizardError};
use crate::providers::{apply_region, parse_profiles, resolve_provider, resolve_region};
use crate::settings::{
    DeploymentCredentials, SettingsStore, PERSISTENT_DISK_SIZE, PLACEHOLDER_IP_ADDRESS,
};
use crate::wizard::credentials::{prompt_credentials, prompt_password};
use crate::wizard::render::{
    display_confirmation, display_skipped, display_stage_header, region_phrase,
};
use crate::wizard::Prompter;
use log::{debug, info};

pub const PROVIDER_STAGE: &str = "Provider Selection";
pub const CONFIGURATION_STAGE: &str = "Deployment Configuration";

/// Whether a step did work or reused a saved answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed,
    Skipped,
}

/// What the configuration stage did for each of its sub-steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationReport {
    pub credentials: StepOutcome,
    pub stemcell: StepOutcome,
}

/// Everything a wizard run needs, built once and passed to each stage
pub struct WizardContext<'a> {
    pub options: WizardOptions,
    pub store: SettingsStore,
    pub prompter: &'a mut dyn Prompter,
    pub hasher: &'a dyn PasswordHasher,
    pub images: &'a dyn ImageLookup,
}

impl<'a> WizardContext<'a> {
    /// Load the settings store named in `options` and assemble the context
    pub fn new(
        options: WizardOptions,
        prompter: &'a mut dyn Prompter,
        hasher: &'a dyn PasswordHasher,
        images: &'a dyn ImageLookup,
    ) -> Result<Self> {
        // Loading is the first thing stage 1 needs
        let store =
            SettingsStore::load(&options.settings_path).map_err(|e| e.in_stage(PROVIDER_STAGE))?;
        Ok(Self {
            options,
            store,
            prompter,
            hasher,
            images,
        })
    }

    /// Record the run options downstream stages read; writes only on change
    pub fn record_options(&mut self) -> Result<()> {
        let fog_path = self.options.credential_source.display().to_string();
        let upgrade_deps = self.options.upgrade_deps;
        let settings = self.store.settings();
        if settings.fog_path.as_deref() == Some(fog_path.as_str())
            && settings.upgrade_deps == Some(upgrade_deps)
        {
            return Ok(());
        }
        self.store.update(|s| {
            s.fog_path = Some(fog_path);
            s.upgrade_deps = Some(upgrade_deps);
        })
    }
}

/// Stage 1: choose the provider, its credentials and region
pub fn provider_selection_stage(ctx: &mut WizardContext<'_>) -> Result<StepOutcome> {
    let outcome = if ctx.store.settings().has_provider() {
        display_skipped("Infrastructure provider");
        StepOutcome::Skipped
    } else {
        let catalog = parse_profiles(&ctx.options.credential_source)?;
        let mut resolution = resolve_provider(&catalog, &mut *ctx.prompter)?;
        let kind = resolution.credentials.provider;
        let region = resolve_region(kind, &mut *ctx.prompter)?;
        if let Some(region) = region.as_deref() {
            apply_region(
                region,
                &mut resolution.credentials,
                &mut resolution.cloud_properties,
            );
        }

        info!("Selected {}", resolution.profile.label);
        // Credentials, properties and region land together: a run interrupted at the
        // region menu must ask again rather than skip with no region saved.
        ctx.store.update(|s| {
            s.fog_credentials = Some(resolution.credentials);
            s.bosh_provider = Some(kind.as_str().to_string());
            s.region_code = region;
            s.bosh_cloud_properties = Some(resolution.cloud_properties);
            s.bosh_resources_cloud_properties = Some(resolution.resource_properties);
        })?;
        StepOutcome::Executed
    };

    let settings = ctx.store.settings();
    let provider = settings
        .provider()
        .ok_or_else(|| WizardError::IncompleteSettings {
            field: "fog_credentials".to_string(),
        })?;
    display_confirmation(&format!(
        "Using {} {}",
        provider,
        region_phrase(settings.region_code.as_deref())
    ));
    Ok(outcome)
}

/// Stage 2: deployment login, its salted hash and the stemcell to deploy
pub fn deployment_configuration_stage(ctx: &mut WizardContext<'_>) -> Result<ConfigurationReport> {
    let provider = ctx
        .store
        .settings()
        .provider()
        .ok_or_else(|| WizardError::IncompleteSettings {
            field: "fog_credentials".to_string(),
        })?;

    let settings = ctx.store.settings();
    let (username, password, credentials) =
        match (settings.bosh_username.clone(), settings.bosh_password.clone()) {
            (Some(username), Some(password)) => {
                display_skipped(&format!("Deployment login for {}", username));
                (username, password, StepOutcome::Skipped)
            }
            (Some(username), None) => {
                let password = prompt_password(&mut *ctx.prompter)?;
                ctx.store
                    .update(|s| s.bosh_password = Some(password.clone()))?;
                (username, password, StepOutcome::Executed)
            }
            (None, _) => {
                let login = prompt_credentials(&mut *ctx.prompter)?;
                ctx.store.update(|s| {
                    s.bosh_username = Some(login.username.clone());
                    s.bosh_password = Some(login.password.clone());
                })?;
                (login.username, login.password, StepOutcome::Executed)
            }
        };

    // Always re-salted, even when the login was saved by an earlier run
    let salted_password = ctx.hasher.hash(&password)?;
    debug!("Computed salted password for {}", username);
    ctx.store.update(|s| {
        s.bosh = Some(DeploymentCredentials {
            username,
            password,
            salted_password,
            persistent_disk: PERSISTENT_DISK_SIZE,
            ip_address: PLACEHOLDER_IP_ADDRESS.to_string(),
        });
    })?;

    let stemcell = match ctx.store.settings().micro_bosh_stemcell_name.clone() {
        Some(name) if !name.trim().is_empty() => {
            display_skipped(&format!("Stemcell {}", name));
            StepOutcome::Skipped
        }
        _ => {
            let name = resolve_stemcell(ctx.images, provider.as_str())?;
            info!("Resolved stemcell {}", name);
            ctx.store
                .update(|s| s.micro_bosh_stemcell_name = Some(name))?;
            StepOutcome::Executed
        }
    };

    if let Some(name) = ctx.store.settings().micro_bosh_stemcell_name.as_deref() {
        display_confirmation(&format!("Micro BOSH will be deployed from {}", name));
    }

    Ok(ConfigurationReport {
        credentials,
        stemcell,
    })
}

/// Run stages 1 and 2, naming the stage in any error
pub fn run_configuration(ctx: &mut WizardContext<'_>) -> Result<ConfigurationReport> {
    ctx.record_options()
        .map_err(|e| e.in_stage(PROVIDER_STAGE))?;

    display_stage_header(
        1,
        PROVIDER_STAGE,
        "Choose the infrastructure provider and credentials to bootstrap against.",
    );
    provider_selection_stage(ctx).map_err(|e| e.in_stage(PROVIDER_STAGE))?;

    display_stage_header(
        2,
        CONFIGURATION_STAGE,
        "Choose the login for the new deployment and find the stemcell to deploy.",
    );
    deployment_configuration_stage(ctx).map_err(|e| e.in_stage(CONFIGURATION_STAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ShaCryptHasher;
    use crate::wizard::testing::ScriptedPrompter;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    struct CountingLookup {
        name: &'static str,
        calls: Cell<usize>,
    }

    impl CountingLookup {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                calls: Cell::new(0),
            }
        }
    }

    impl ImageLookup for CountingLookup {
        fn latest(&self, _provider: &str, scope: &str) -> Result<String> {
            assert_eq!(scope, "stable");
            self.calls.set(self.calls.get() + 1);
            Ok(self.name.to_string())
        }
    }

    fn options(dir: &TempDir, fog: &str) -> WizardOptions {
        let fog_path = dir.path().join("fog");
        fs::write(&fog_path, fog).unwrap();
        WizardOptions {
            settings_path: dir.path().join("bb").join("manifest.yml"),
            credential_source: fog_path,
            upgrade_deps: false,
        }
    }

    const ONE_OPENSTACK: &str = r#"
default:
  openstack_username: admin
  openstack_api_key: key
  openstack_tenant: dev
  openstack_auth_url: http://keystone:5000/v2.0/tokens
"#;

    #[test]
    fn test_openstack_selection_needs_no_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompter = ScriptedPrompter::new();
        let lookup = CountingLookup::new("micro-bosh-stemcell-openstack-0.8.1.tgz");
        let mut ctx = WizardContext::new(
            options(&dir, ONE_OPENSTACK),
            &mut prompter,
            &ShaCryptHasher,
            &lookup,
        )
        .unwrap();

        let outcome = provider_selection_stage(&mut ctx).unwrap();
        assert_eq!(outcome, StepOutcome::Executed);
        let settings = ctx.store.settings();
        assert_eq!(settings.bosh_provider.as_deref(), Some("openstack"));
        assert_eq!(settings.region_code, None);
        assert!(settings.bosh_cloud_properties.as_ref().unwrap().openstack.is_some());
        drop(ctx);
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_saved_credentials_reload_when_profile_names_its_provider() {
        let dir = tempfile::tempdir().unwrap();
        let fog = format!("{}  provider: OpenStack\n", ONE_OPENSTACK);
        let opts = options(&dir, &fog);
        let settings_path = opts.settings_path.clone();
        let mut prompter = ScriptedPrompter::new();
        let lookup = CountingLookup::new("x");
        let mut ctx = WizardContext::new(opts, &mut prompter, &ShaCryptHasher, &lookup).unwrap();
        provider_selection_stage(&mut ctx).unwrap();
        let written = ctx.store.settings().clone();
        drop(ctx);

        let reloaded = SettingsStore::load(&settings_path).unwrap();
        assert_eq!(reloaded.settings(), &written);
        let raw = fs::read_to_string(&settings_path).unwrap();
        assert_eq!(raw.matches("provider: OpenStack").count(), 1);
    }

    #[test]
    fn test_malformed_settings_name_the_first_stage() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(&dir, ONE_OPENSTACK);
        fs::create_dir_all(opts.settings_path.parent().unwrap()).unwrap();
        fs::write(&opts.settings_path, "bosh_username: [unterminated\n").unwrap();
        let mut prompter = ScriptedPrompter::new();
        let lookup = CountingLookup::new("x");

        let err = WizardContext::new(opts, &mut prompter, &ShaCryptHasher, &lookup)
            .err()
            .unwrap();
        assert_eq!(err.stage(), Some(PROVIDER_STAGE));
        assert!(matches!(
            err,
            WizardError::Stage { ref source, .. } if matches!(**source, WizardError::SettingsParse { .. })
        ));
    }

    #[test]
    fn test_configuration_requires_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompter = ScriptedPrompter::new();
        let lookup = CountingLookup::new("x");
        let mut ctx = WizardContext::new(
            options(&dir, ONE_OPENSTACK),
            &mut prompter,
            &ShaCryptHasher,
            &lookup,
        )
        .unwrap();
        let err = deployment_configuration_stage(&mut ctx).unwrap_err();
        assert!(matches!(err, WizardError::IncompleteSettings { .. }));
    }

    #[test]
    fn test_saved_username_without_password_asks_password_only() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(&dir, ONE_OPENSTACK);
        let mut prompter = ScriptedPrompter::new().then_password("pw");
        let lookup = CountingLookup::new("micro-bosh-stemcell-openstack-0.8.1.tgz");
        let mut ctx = WizardContext::new(opts, &mut prompter, &ShaCryptHasher, &lookup).unwrap();
        provider_selection_stage(&mut ctx).unwrap();
        ctx.store
            .update(|s| s.bosh_username = Some("ops".into()))
            .unwrap();

        let report = deployment_configuration_stage(&mut ctx).unwrap();
        assert_eq!(report.credentials, StepOutcome::Executed);
        let bosh = ctx.store.settings().bosh.clone().unwrap();
        assert_eq!(bosh.username, "ops");
        assert_eq!(bosh.password, "pw");
        drop(ctx);
        assert_eq!(prompter.asked(), &["Password for the new deployment:"]);
    }

    #[test]
    fn test_record_options_only_writes_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(&dir, ONE_OPENSTACK);
        let settings_path = opts.settings_path.clone();
        let mut prompter = ScriptedPrompter::new();
        let lookup = CountingLookup::new("x");
        let mut ctx = WizardContext::new(opts, &mut prompter, &ShaCryptHasher, &lookup).unwrap();

        ctx.record_options().unwrap();
        let first = fs::read_to_string(&settings_path).unwrap();
        assert!(first.contains("upgrade_deps: false"));
        let modified = fs::metadata(&settings_path).unwrap().modified().unwrap();

        ctx.record_options().unwrap();
        assert_eq!(fs::read_to_string(&settings_path).unwrap(), first);
        assert_eq!(
            fs::metadata(&settings_path).unwrap().modified().unwrap(),
            modified
        );
    }
}
