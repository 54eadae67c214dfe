use clap::Parser;
use logger_redacted::{init_logging, LoggerConfig};
use ops_cli::{execute, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logger = LoggerConfig::from_env();
    if cli.verbose {
        logger.log_level = "debug".to_string();
    }
    init_logging(&logger)?;

    let config = cli.load_config()?;
    let output = execute(&cli.command, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
