//! CLI module for supplicant-p2p daemon and client functionality

use std::path::PathBuf;

pub mod client;
pub mod daemon;
pub mod status;

/// Get the home directory from clap args, environment variable, or default
pub fn get_home(custom_home: Option<PathBuf>) -> eyre::Result<PathBuf> {
    if let Some(home) = custom_home {
        return Ok(home);
    }

    // Fallback to ~/.supplicant-p2p if no SUPPLICANT_P2P_HOME env var or --home flag
    let home_dir = directories::UserDirs::new()
        .ok_or_else(|| eyre::eyre!("Could not determine user home directory"))?
        .home_dir()
        .to_path_buf();

    Ok(home_dir.join(".supplicant-p2p"))
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` selects the filter, defaulting to `info`. Logs go to stderr so
/// `call` output on stdout stays machine-readable.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
