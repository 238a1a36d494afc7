use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "stopfake",
    version,
    about = "Fake-news analysis coordinator with per-session state tracking and live status events",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the coordinator API server
    Serve {
        /// Path to a TOML config file (environment variables otherwise)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Analyze one text and print the settled state as JSON
    Analyze {
        /// Input file; "-" or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Treat input as HTML and extract the article text first
        #[arg(long, default_value = "false")]
        html: bool,

        /// Session ID to submit under (generated when omitted)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Extract article text from an HTML document
    Extract {
        /// Input HTML file; "-" or omitted reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the bare extraction without length bounds
        #[arg(long, default_value = "false")]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("Stop Fake coordinator starting");

    match cli.command {
        Commands::Serve { config } => {
            tracing::info!(config = ?config, "Starting serve command");
            stopfake::commands::serve(config).await?;
        }

        Commands::Analyze {
            input,
            html,
            session,
        } => {
            tracing::info!(
                input = ?input,
                html = %html,
                session = ?session,
                "Starting analyze command"
            );
            stopfake::commands::analyze(input, html, session).await?;
        }

        Commands::Extract { input, raw } => {
            tracing::info!(input = ?input, raw = %raw, "Starting extract command");
            stopfake::commands::extract(input, raw).await?;
        }
    }

    tracing::info!("stopfake completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("stopfake=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("stopfake=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
