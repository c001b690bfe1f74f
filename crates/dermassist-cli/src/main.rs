use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use dermassist_cli::config::{self, DermAssistConfig};
use dermassist_cli::render::{read_json, render_report};
use dermassist_export::ExportFormat;

/// Compose DermAssist screening reports from classification results.
#[derive(Parser, Debug)]
#[command(name = "dermassist")]
#[command(version)]
struct Cli {
    /// Emit structured JSON logs
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "DERMASSIST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one report
    Render {
        /// Classification result JSON
        #[arg(long)]
        scan: PathBuf,

        /// Patient identity JSON
        #[arg(long)]
        patient: PathBuf,

        /// pdf, docx, md or json (defaults to the configured format)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file (defaults to `<report id>.<ext>` in the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config
    Show,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_path()?,
    };

    match cli.command {
        Command::Render {
            scan,
            patient,
            format,
            out,
        } => {
            let config = config::load_or_default(&config_path)?;
            let format = format.unwrap_or(config.default_format);
            let report = render_report(&config, &read_json(&scan)?, &read_json(&patient)?, format)?;

            let out = match out {
                Some(out) => out,
                None => report.default_path(&std::env::current_dir()?),
            };
            std::fs::write(&out, &report.bytes)
                .map_err(|e| eyre::eyre!("failed to write {}: {e}", out.display()))?;
            tracing::info!(path = %out.display(), "report written");
        }
        Command::Config { action } => match action {
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                let config = DermAssistConfig {
                    created_at: Some(jiff::Timestamp::now()),
                    ..DermAssistConfig::default()
                };
                config::save_config(&config, &config_path)?;
            }
            ConfigAction::Show => {
                let config = config::load_or_default(&config_path)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}
