//! cleanup-rules: rule engine for flagging unreleased cloud-client resources
//!
//! A CLI over the rule file consumed by the release-check analyzer: validate,
//! inspect, query exemptions, toggle the test exception, diff, back up and
//! restore.

use anyhow::{bail, Context, Result};
use clap::Parser;

use cleanup_rules::cli::{Cli, Commands};
use cleanup_rules::config::ConfigManager;
use cleanup_rules::domain::logger::{self, LogSettings};
use cleanup_rules::service::{OutputFormatter, RulesService};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_settings = LogSettings {
        debug: cli.debug,
        log_dir: cli.log_dir.clone(),
    };
    if log_settings.enabled() {
        logger::init(&log_settings)?;
    }

    let formatter = OutputFormatter::new(cli.format);

    let (result, is_query) = match &cli.command {
        Commands::Verify { path } => {
            ConfigManager::verify_config_change(path)
                .with_context(|| format!("Verification failed for {}", path.display()))?;
            (formatter.message(&format!("{} is valid.", path.display())), false)
        }
        Commands::Init { path } => {
            let path = path.clone().unwrap_or_else(ConfigManager::default_path);
            ConfigManager::init_at(&path)?;
            (
                formatter.message(&format!("Rules file created at: {}", path.display())),
                false,
            )
        }
        Commands::Version => (format!("cleanup-rules {}", env!("CARGO_PKG_VERSION")), true),
        command => {
            let mut service = RulesService::open(cli.config.as_deref(), cli.format)?;
            run(&mut service, command)?
        }
    };

    // --quiet only silences status messages, never query results
    if is_query || !cli.quiet {
        println!("{}", result);
    }

    Ok(())
}

/// Run a command that operates on the loaded rules file.
///
/// Returns the rendered result and whether it is a query result.
fn run(service: &mut RulesService, command: &Commands) -> Result<(String, bool)> {
    let result = match command {
        Commands::Validate => (service.validate()?, false),
        Commands::Show => (service.show()?, true),
        Commands::Check { path, file } => (service.check(path, *file)?, true),
        Commands::SetTestException { enabled, output } => {
            (service.set_test_exception(*enabled, output.as_deref())?, false)
        }
        Commands::Backup { path } => (service.backup(path)?, false),
        Commands::Restore { path, output } => (service.restore(path, output.as_deref())?, false),
        Commands::Compare { other } => (service.compare(other)?, true),
        Commands::Verify { .. } | Commands::Init { .. } | Commands::Version => {
            bail!("command does not operate on a rules file")
        }
    };
    Ok(result)
}
