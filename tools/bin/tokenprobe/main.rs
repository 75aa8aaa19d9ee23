use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, arg, command};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tokens::config::{read_config, read_stylesheets};

mod probe;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// config file
    #[arg(short, long, default_value = "tokenprobe.toml")]
    config: String,

    /// print json instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// resolve the configured tokens and properties under each theme
    Resolve,

    /// list every declared token matching a prefix, under each theme
    Audit {
        /// token prefix, e.g. --brand or --space-
        #[arg(short, long, allow_hyphen_values = true)]
        prefix: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let path = PathBuf::from(&cli.config);
    let config = read_config(path.clone()).await?;

    // stylesheet paths are relative to the config file
    let base = path.parent().map(PathBuf::from).unwrap_or_default();
    let sheet = read_stylesheets(&config, &base).await?;

    info!(rules = sheet.rules().len(), "loaded stylesheets");

    let snapshots = match cli.command.unwrap_or(Commands::Resolve) {
        Commands::Resolve => probe::resolve(sheet, &config),
        Commands::Audit { prefix } => probe::audit(sheet, &config, &prefix),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        print!("{}", probe::render_text(&snapshots));
    }

    Ok(())
}
