use bosh_bootstrap::{
    cli::{Cli, Commands},
    config::WizardOptions,
    handlers::{handle_local, handle_remote},
};
use clap::Parser;
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{} {}", "Hint:".yellow(), hint);
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> bosh_bootstrap::Result<()> {
    match cli.command {
        Commands::Local {
            fog,
            upgrade_deps,
            dry_run,
        } => {
            let options = WizardOptions::resolve(cli.settings, fog, upgrade_deps)?;
            handle_local(options, dry_run)
        }
        Commands::Remote { fog, upgrade_deps } => {
            let options = WizardOptions::resolve(cli.settings, fog, upgrade_deps)?;
            handle_remote(options)
        }
    }
}
