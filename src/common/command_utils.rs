use crate::error::{Result, WizardError};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::process::{Command, Output};
use std::time::Duration;

/// One named shell step of a provisioning stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Short label shown while the step runs
    pub name: String,
    /// Script passed to `bash -c`
    pub script: String,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
        }
    }
}

/// Executes an ordered list of commands against the target host
pub trait CommandRunner {
    /// Run every command in order, stopping at the first failure.
    /// Returns `Ok(false)` when a command ran but did not succeed.
    fn run(&mut self, commands: &[CommandSpec]) -> Result<bool>;
}

/// Runs commands on this machine (the inception VM)
#[derive(Debug, Default)]
pub struct LocalCommandRunner {
    /// Print commands instead of running them
    pub dry_run: bool,
}

impl LocalCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    fn spinner(name: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(name.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

impl CommandRunner for LocalCommandRunner {
    fn run(&mut self, commands: &[CommandSpec]) -> Result<bool> {
        for spec in commands {
            if self.dry_run {
                println!("{}: {}", spec.name, spec.script);
                continue;
            }

            debug!("Executing '{}': {}", spec.name, spec.script);
            let spinner = Self::spinner(&spec.name);
            let output = execute_command("bash", &["-c", &spec.script]);
            spinner.finish_and_clear();
            let output = output?;

            if output.status.success() {
                info!("✅ {}", spec.name);
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("❌ {} failed: {}", spec.name, stderr.trim());
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Execute a command and return the output
pub fn execute_command(cmd: &str, args: &[&str]) -> Result<Output> {
    Command::new(cmd)
        .args(args)
        .output()
        .map_err(|e| WizardError::ExternalCommand {
            command: format!("{} {}", cmd, args.join(" ")),
            message: e.to_string(),
        })
}

/// Execute a command and return its stdout, failing on a non-zero exit
pub fn capture_stdout(cmd: &str, args: &[&str]) -> Result<String> {
    let output = execute_command(cmd, args)?;
    if !output.status.success() {
        return Err(WizardError::ExternalCommand {
            command: format!("{} {}", cmd, args.join(" ")),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_runs_in_order_and_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("log");
        let commands = vec![
            CommandSpec::new("first", format!("echo one >> {}", log.display())),
            CommandSpec::new("second", format!("echo two >> {}", log.display())),
        ];
        assert!(LocalCommandRunner::new().run(&commands).unwrap());
        assert_eq!(std::fs::read_to_string(&log).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("after");
        let commands = vec![
            CommandSpec::new("fails", "exit 3"),
            CommandSpec::new("never", format!("touch {}", marker.display())),
        ];
        assert!(!LocalCommandRunner::new().run(&commands).unwrap());
        assert!(!marker.exists());
    }

    #[test]
    fn test_dry_run_executes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("touched");
        let commands = vec![CommandSpec::new("touch", format!("touch {}", marker.display()))];
        assert!(LocalCommandRunner::dry_run().run(&commands).unwrap());
        assert!(!marker.exists());
    }

    #[test]
    fn test_capture_stdout() {
        assert_eq!(capture_stdout("echo", &["hello"]).unwrap().trim(), "hello");
        assert!(capture_stdout("false", &[]).is_err());
        assert!(execute_command("definitely-not-a-command-xyz", &[]).is_err());
    }
}
