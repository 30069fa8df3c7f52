//! caravel curates a folder of audio files into a clean, deduplicated,
//! consistently named copy for car stereo USB drives.

use anyhow::Result;
use clap::Parser;
use tracing::warn;

mod cli;
mod config;
mod convert;
mod download;
mod error;
mod export;
mod fingerprint;
mod format;
mod library;
mod organize;
mod report;
mod runtime;
mod sanitize;
mod tags;

use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let opts = Cli::parse().into_options();
    let settings = load_settings();

    let outcome = runtime::run(&opts, &settings)?;

    for warning in report::diagnostics(&outcome.list) {
        warn!("{warning}");
    }

    if let Some(mode) = opts.simulate {
        let rows = report::preview(&outcome.list, mode);
        println!("\nPlayback order preview:");
        for row in &rows {
            println!("{:03} | {} - {}", row.position, row.artist, row.title);
        }
        println!("Total tracks: {}", rows.len());
        println!("Estimated duration: {}s", outcome.stats.total_duration_secs);
    }

    if let Some(dest) = &opts.export {
        let copied = export::export(&outcome.list, dest);
        println!("Exported {copied} tracks to {}", dest.display());
    }

    println!();
    for line in report::stats_lines(&outcome.stats) {
        println!("{line}");
    }

    Ok(())
}

fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("caravel: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent a run.
            eprintln!("caravel: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
