// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw: follow background audit runs from the terminal

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rw_adapters::{HttpAuditApi, HttpConfig};
use rw_core::SystemClock;
use rw_engine::Session;

use crate::commands::run;
use crate::config::{Overrides, Settings};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "rw", version, about = "Follow background audit runs", styles = color::styles())]
struct Cli {
    /// Backend base URL [env: RW_API_BASE]
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Per-request timeout in milliseconds [env: RW_TIMEOUT_MS]
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, global = true, default_value_t)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new audit run and follow it to completion
    Trigger(run::TriggerArgs),
    /// Reconstruct a past or still-running audit run
    Load(run::LoadArgs),
}

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(err) = dispatch(cli).await {
        if let Some(exit) = err.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("Error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let lookback_days = match &cli.command {
        Commands::Trigger(args) => args.lookback_days,
        Commands::Load(_) => None,
    };
    let settings = Settings::load(Overrides {
        api_base: cli.api_base,
        timeout_ms: cli.timeout_ms,
        lookback_days,
    })?;
    tracing::debug!(api_base = %settings.api_base, timeout = ?settings.timeout, "resolved settings");

    let api = HttpAuditApi::new(HttpConfig::new(settings.api_base.clone()).timeout(settings.timeout))?;
    let handle = Session::spawn(api, SystemClock);

    match cli.command {
        Commands::Trigger(_) => run::trigger(&handle, settings.lookback_days, cli.output).await,
        Commands::Load(args) => run::load(&handle, args.run_id, cli.output).await,
    }
}
