mod cli;
mod commands;
mod config;
mod inputs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if let Some(threads) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!(error = %e, "failed to configure worker pool, using default");
        } else {
            debug!(threads, "worker pool configured");
        }
    }

    let mut config = config::load(args.config.as_deref()).context("failed to load configuration")?;

    match args.command {
        Command::Toc {
            inputs,
            out_dir,
            scan,
        } => {
            scan.apply(&mut config);
            config.log_summary();
            commands::toc(&inputs, &out_dir, &config)
        }
        Command::Raw { input, scan } => {
            scan.apply(&mut config);
            commands::raw(&input, &config)
        }
        Command::Chunk {
            input,
            toc,
            out,
            chunking,
        } => {
            chunking.apply(&mut config);
            config.log_summary();
            commands::chunk(&input, &toc, &out, &config)
        }
        Command::Run {
            inputs,
            out_dir,
            scan,
            chunking,
        } => {
            scan.apply(&mut config);
            chunking.apply(&mut config);
            config.log_summary();
            commands::run(&inputs, &out_dir, &config)
        }
        Command::Combine { files, out } => commands::combine(&files, &out),
    }
}
