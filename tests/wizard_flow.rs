use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use bosh_bootstrap::common::PasswordHasher;
use bosh_bootstrap::config::WizardOptions;
use bosh_bootstrap::deploy::ImageLookup;
use bosh_bootstrap::settings::{SettingsStore, PERSISTENT_DISK_SIZE};
use bosh_bootstrap::wizard::testing::ScriptedPrompter;
use bosh_bootstrap::wizard::{run_configuration, ConfigurationReport, StepOutcome, WizardContext};
use bosh_bootstrap::{Result, WizardError};

/// End-to-end wizard runs against a scripted terminal, a fixed hasher and a
/// canned stemcell listing

const TWO_AWS_PROFILES: &str = r#"
:default:
  :aws_access_key_id: AKIADEFAULT
  :aws_secret_access_key: default-secret
:ops:
  :aws_access_key_id: AKIAOPS
  :aws_secret_access_key: ops-secret
"#;

const RACKSPACE_ONLY: &str = r#"
:default:
  :rackspace_username: ops
  :rackspace_api_key: key
"#;

const STEMCELL: &str = "micro-bosh-stemcell-aws-0.8.1.tgz";

struct FixedHasher;

impl PasswordHasher for FixedHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("$6$fixedsalt${}", password.len()))
    }
}

struct CountingLookup {
    calls: Cell<usize>,
}

impl ImageLookup for CountingLookup {
    fn latest(&self, provider: &str, scope: &str) -> Result<String> {
        assert_eq!(provider, "aws");
        assert_eq!(scope, "stable");
        self.calls.set(self.calls.get() + 1);
        Ok(STEMCELL.to_string())
    }
}

fn workspace(fog: &str) -> (TempDir, WizardOptions) {
    let dir = TempDir::new().unwrap();
    let fog_path = dir.path().join("fog");
    fs::write(&fog_path, fog).unwrap();
    let options = WizardOptions {
        settings_path: dir.path().join(".bosh_bootstrap").join("manifest.yml"),
        credential_source: fog_path,
        upgrade_deps: false,
    };
    (dir, options)
}

fn run(
    options: &WizardOptions,
    prompter: &mut ScriptedPrompter,
    lookup: &CountingLookup,
) -> Result<ConfigurationReport> {
    let mut ctx = WizardContext::new(options.clone(), prompter, &FixedHasher, lookup)?;
    run_configuration(&mut ctx)
}

fn saved(path: &Path) -> bosh_bootstrap::settings::Settings {
    SettingsStore::load(path).unwrap().settings().clone()
}

fn lookup() -> CountingLookup {
    CountingLookup {
        calls: Cell::new(0),
    }
}

#[test]
fn test_first_run_persists_every_answer() {
    let (_dir, options) = workspace(TWO_AWS_PROFILES);
    let images = lookup();
    // "AWS (ops)", then us-west-2
    let mut prompter = ScriptedPrompter::new()
        .then_choose(1)
        .then_choose(2)
        .then_text("admin")
        .then_password("c1oudc0w");

    let report = run(&options, &mut prompter, &images).unwrap();
    assert_eq!(report.credentials, StepOutcome::Executed);
    assert_eq!(report.stemcell, StepOutcome::Executed);
    assert_eq!(prompter.remaining(), 0);

    let settings = saved(&options.settings_path);
    let creds = settings.fog_credentials.as_ref().unwrap();
    assert_eq!(creds.field("aws_access_key_id"), Some("AKIAOPS"));
    assert_eq!(settings.bosh_provider.as_deref(), Some("aws"));
    assert_eq!(settings.region_code.as_deref(), Some("us-west-2"));
    assert_eq!(settings.fog_path.as_deref(), options.credential_source.to_str());

    let aws = settings
        .bosh_cloud_properties
        .as_ref()
        .and_then(|p| p.aws.as_ref())
        .unwrap();
    assert_eq!(aws.ec2_endpoint, "ec2.us-west-2.amazonaws.com");
    assert_eq!(aws.access_key_id, "AKIAOPS");

    let bosh = settings.bosh.as_ref().unwrap();
    assert_eq!(bosh.username, "admin");
    assert_eq!(bosh.password, "c1oudc0w");
    assert_ne!(bosh.salted_password, bosh.password);
    assert_eq!(bosh.persistent_disk, PERSISTENT_DISK_SIZE);
    assert_eq!(bosh.ip_address, "0.0.0.0");

    assert_eq!(settings.micro_bosh_stemcell_name.as_deref(), Some(STEMCELL));
    assert_eq!(images.calls.get(), 1);
}

#[cfg(unix)]
#[test]
fn test_settings_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, options) = workspace(TWO_AWS_PROFILES);
    let mut prompter = ScriptedPrompter::new()
        .then_choose(0)
        .then_choose(0)
        .then_text("")
        .then_password("pw");
    run(&options, &mut prompter, &lookup()).unwrap();

    let mode = fs::metadata(&options.settings_path)
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_second_run_asks_nothing_and_leaves_file_unchanged() {
    let (_dir, options) = workspace(TWO_AWS_PROFILES);
    let images = lookup();
    let mut first = ScriptedPrompter::new()
        .then_choose(0)
        .then_choose(0)
        .then_text("admin")
        .then_password("pw");
    run(&options, &mut first, &images).unwrap();
    let before = fs::read(&options.settings_path).unwrap();

    let mut second = ScriptedPrompter::new();
    let report = run(&options, &mut second, &images).unwrap();

    assert!(second.asked().is_empty());
    assert_eq!(report.credentials, StepOutcome::Skipped);
    assert_eq!(report.stemcell, StepOutcome::Skipped);
    assert_eq!(images.calls.get(), 1);
    assert_eq!(fs::read(&options.settings_path).unwrap(), before);
}

#[test]
fn test_interrupted_run_resumes_at_first_missing_answer() {
    let (_dir, options) = workspace(TWO_AWS_PROFILES);
    let images = lookup();

    // Provider and region answered, then the terminal goes away
    let mut first = ScriptedPrompter::new().then_choose(0).then_choose(0);
    let err = run(&options, &mut first, &images).unwrap_err();
    assert_eq!(err.stage(), Some("Deployment Configuration"));
    let partial = saved(&options.settings_path);
    assert!(partial.fog_credentials.is_some());
    assert_eq!(partial.region_code.as_deref(), Some("us-east-1"));
    assert!(partial.bosh.is_none());

    let mut second = ScriptedPrompter::new().then_text("").then_password("pw");
    run(&options, &mut second, &images).unwrap();
    assert_eq!(
        second.asked(),
        &[
            "Username for the new deployment:".to_string(),
            "Password for the new deployment:".to_string(),
        ]
    );
}

#[test]
fn test_hand_edited_settings_are_respected() {
    let (_dir, options) = workspace(TWO_AWS_PROFILES);
    let images = lookup();
    let mut first = ScriptedPrompter::new()
        .then_choose(0)
        .then_choose(0)
        .then_text("admin")
        .then_password("pw");
    run(&options, &mut first, &images).unwrap();

    // Removing the stemcell name re-runs only the lookup
    let mut store = SettingsStore::load(&options.settings_path).unwrap();
    store.update(|s| s.micro_bosh_stemcell_name = None).unwrap();

    let mut second = ScriptedPrompter::new();
    let report = run(&options, &mut second, &images).unwrap();
    assert_eq!(report.stemcell, StepOutcome::Executed);
    assert_eq!(report.credentials, StepOutcome::Skipped);
    assert!(second.asked().is_empty());
    assert_eq!(images.calls.get(), 2);
}

#[test]
fn test_unknown_settings_keys_survive_a_run() {
    let (_dir, options) = workspace(TWO_AWS_PROFILES);
    fs::create_dir_all(options.settings_path.parent().unwrap()).unwrap();
    fs::write(&options.settings_path, "operator_note: keep me\n").unwrap();

    let mut prompter = ScriptedPrompter::new()
        .then_choose(0)
        .then_choose(0)
        .then_text("")
        .then_password("pw");
    run(&options, &mut prompter, &lookup()).unwrap();

    let text = fs::read_to_string(&options.settings_path).unwrap();
    assert!(text.contains("operator_note: keep me"));
}

#[test]
fn test_rackspace_selection_stops_without_saving_credentials() {
    let (_dir, options) = workspace(RACKSPACE_ONLY);
    let mut prompter = ScriptedPrompter::new();

    let err = run(&options, &mut prompter, &lookup()).unwrap_err();
    assert_eq!(err.stage(), Some("Provider Selection"));
    assert!(err.to_string().contains("Rackspace"));
    assert!(saved(&options.settings_path).fog_credentials.is_none());
}

#[test]
fn test_missing_fog_file_is_reported_with_its_path() {
    let (dir, mut options) = workspace(TWO_AWS_PROFILES);
    options.credential_source = PathBuf::from(dir.path()).join("absent-fog");
    let mut prompter = ScriptedPrompter::new();

    let err = run(&options, &mut prompter, &lookup()).unwrap_err();
    assert_eq!(err.stage(), Some("Provider Selection"));
    assert!(err.to_string().contains("absent-fog"));
    match err {
        WizardError::Stage { source, .. } => {
            assert!(matches!(*source, WizardError::MissingCredentialSource { .. }))
        }
        other => panic!("unexpected error: {other}"),
    }
}
