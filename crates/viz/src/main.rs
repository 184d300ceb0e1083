//! Swarm run replay viewer
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- runs/log_file.xml
//!   cargo run -p viz -- --config replay.toml runs/log_file.xml
//!   cargo run -p viz -- --print-config

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use viz::config::ViewerConfig;
use viz::playback::Playback;
use viz::state_loader::ReplayState;
use viz::ReplayVizPlugin;

/// Swarm run replay viewer
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "Step through a recorded swarm run frame by frame")]
struct Args {
    /// Run log to replay
    #[arg(default_value = "log_file.xml")]
    log: PathBuf,

    /// Viewer configuration file (defaults to replay.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> AppExit {
    let args = Args::parse();

    let config = match ViewerConfig::resolve(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: failed to read viewer config: {}", e);
            return AppExit::error();
        }
    };

    if args.print_config {
        return match config.to_toml() {
            Ok(toml) => {
                print!("{}", toml);
                AppExit::Success
            }
            Err(e) => {
                eprintln!("error: failed to serialize config: {}", e);
                AppExit::error()
            }
        };
    }

    let mut app = App::new();
    app.add_plugins(ReplayVizPlugin {
        config: config.clone(),
    });

    // Loading after the plugins are built so load-time warnings reach the log.
    let replay = match ReplayState::load(&args.log, config.display) {
        Ok(replay) => replay,
        Err(e) => {
            tracing::error!("Failed to load {:?}: {}", args.log, e);
            return AppExit::error();
        }
    };

    let playback = Playback::new(&replay.log, config.playback.validated_initial_step());
    app.insert_resource(replay).insert_resource(playback).run()
}
