use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use odour_bridge::commands;
use odour_bridge::fetcher::DEFAULT_ENDPOINT;

#[derive(Parser)]
#[command(
    name = "odour-bridge",
    about = "Republishes OdourCollect odour observations as Darwin Core records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest observations and replace the snapshot
    Fetch {
        /// Upstream OdourCollect list endpoint
        #[arg(long, env = "ODOUR_BRIDGE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
        /// Snapshot CSV path shared with the server
        #[arg(long, env = "ODOUR_BRIDGE_SNAPSHOT", default_value = "odourcollect.csv")]
        snapshot: String,
    },
    /// Serve the observations API from the current snapshot
    Serve {
        /// Interface to bind to
        #[arg(long, env = "ODOUR_BRIDGE_INTERFACE", default_value = "127.0.0.1")]
        interface: String,
        /// Port to listen on
        #[arg(long, env = "ODOUR_BRIDGE_PORT", default_value_t = 5000)]
        port: u16,
        /// Snapshot CSV path shared with the fetcher
        #[arg(long, env = "ODOUR_BRIDGE_SNAPSHOT", default_value = "odourcollect.csv")]
        snapshot: String,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { endpoint, snapshot } => commands::handle_fetch(endpoint, snapshot).await,
        Commands::Serve {
            interface,
            port,
            snapshot,
        } => commands::handle_serve(interface, port, snapshot).await,
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
