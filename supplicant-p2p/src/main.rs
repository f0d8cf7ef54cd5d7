//! supplicant-p2p: P2P network object daemon and client
//!
//! This binary hosts the supplicant's P2P network objects behind a Unix domain
//! control socket and provides a client for talking to it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "supplicant-p2p")]
#[command(about = "P2P network object daemon and client for the Wi-Fi supplicant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daemon in foreground mode
    Daemon {
        /// Custom home directory (defaults to SUPPLICANT_P2P_HOME env var or ~/.supplicant-p2p)
        #[arg(long, env = "SUPPLICANT_P2P_HOME")]
        home: Option<PathBuf>,
    },
    /// Send one JSON request to the daemon and print the response
    Call {
        /// Request, e.g. '{"type":"get-id","ifname":"p2p-dev-wlan0","network_id":0}'
        request: String,
        /// Custom home directory (defaults to SUPPLICANT_P2P_HOME env var or ~/.supplicant-p2p)
        #[arg(long, env = "SUPPLICANT_P2P_HOME")]
        home: Option<PathBuf>,
    },
    /// Show configured interfaces and networks
    Status {
        /// Custom home directory (defaults to SUPPLICANT_P2P_HOME env var or ~/.supplicant-p2p)
        #[arg(long, env = "SUPPLICANT_P2P_HOME")]
        home: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    cli::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Daemon { home } => {
            let home = cli::get_home(home)?;
            tracing::info!(home = %home.display(), "starting supplicant-p2p daemon");
            cli::daemon::run(home).await
        }
        Commands::Call { request, home } => {
            let home = cli::get_home(home)?;
            cli::client::call(home, request).await
        }
        Commands::Status { home } => {
            let home = cli::get_home(home)?;
            cli::status::show_status(home).await
        }
    }
}
