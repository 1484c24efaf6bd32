//! RTT Scope - Entry Point

use clap::Parser;
use rtt_scope::config::CliOverrides;
use rtt_scope::source::StreamClient;
use rtt_scope::state::ScopeSession;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// RTT Scope - terminal oscilloscope for raw 32-bit RTT telemetry
#[derive(Parser, Debug)]
#[command(name = "rtt-scope")]
#[command(version)]
#[command(about = "Plot a stream of little-endian u32 samples from an RTT TCP server")]
pub struct Args {
    /// RTT server host [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// RTT server port [default: 60001]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Number of samples shown (buffer capacity) [default: 10000]
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub points: Option<u64>,

    /// Initial upper bound of the vertical axis [default: 16384]
    #[arg(long, value_parser = rtt_scope::config::parse_y_max)]
    pub y_max: Option<f64>,

    /// Start with auto-scale disabled
    #[arg(long)]
    pub no_auto_scale: bool,

    /// Directory snapshots are written to [default: current directory]
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// CLI values that override config file and environment.
    ///
    /// Flags only override when given, so `--no-auto-scale` absent leaves
    /// the configured value alone.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            port: self.port,
            sample_count: self
                .points
                .map(|points| usize::try_from(points).unwrap_or(usize::MAX)),
            initial_y_max: self.y_max,
            auto_scale: if self.no_auto_scale { Some(false) } else { None },
            snapshot_dir: self.snapshot_dir.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rtt_scope::config::load_config_with_precedence(args.config.clone())?;
        let merged = rtt_scope::config::merge_config(config_file);
        let with_env = rtt_scope::config::apply_env_overrides(merged);
        rtt_scope::config::apply_cli_overrides(with_env, args.overrides())
    };

    rtt_scope::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mut client =
        StreamClient::new(config.endpoint()).with_reconnect_interval(config.reconnect_interval);
    if let Err(err) = client.connect() {
        // Not fatal: the client keeps retrying from the tick loop
        warn!(error = %err, "Initial connection failed");
    }

    let session = ScopeSession::new(client, config.session_settings(), Instant::now());
    rtt_scope::view::run_with_session(session)?;

    info!("Exiting");
    Ok(())
}
