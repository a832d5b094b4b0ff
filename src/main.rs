use anyhow::{Context, Result};
use autobackup::config::{self, MailSettings};
use autobackup::{BackupManager, LogSession};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autobackup")]
#[command(about = "Mirror configured directories with rsync and email failures", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (defaults to <prefix>/etc/autobackup.cfg)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration errors are fatal and reported before logging exists
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = config::load_config(&config_path)
        .with_context(|| format!("Invalid configuration {}", config_path.display()))?;

    let session = LogSession::init(&config::default_log_directory(), std::io::stderr().is_terminal())?;

    let backup_manager = BackupManager::new(config, &MailSettings::default());
    let summary = backup_manager.run(&session);

    std::process::exit(summary.exit_code());
}
