use anyhow::Result;
use clap::{Parser, Subcommand};

/// weekplan - weekly calendar planner
#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Weekly calendar planner API server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = weekplan::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    weekplan::observability::init_observability(
        "weekplan",
        &config.observability.log_level,
        config.observability.log_format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => weekplan::server::serve(config, host, port).await,
        Commands::Migrate => weekplan::migrate::migrate(&config).await,
        Commands::Reset => weekplan::migrate::reset(&config).await,
    }
}
