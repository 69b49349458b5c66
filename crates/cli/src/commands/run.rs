// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw trigger` and `rw load`: start or attach to a run, then follow it
//! until it settles.

use anyhow::Result;
use clap::Args;
use rw_core::RunStatus;
use rw_engine::{RunState, SessionHandle};
use tokio::sync::watch;

use crate::color;
use crate::exit_error::{ExitError, INTERRUPTED, RUN_FAILED};
use crate::output::{format_summary, progress_lines, OutputFormat};

#[derive(Args, Debug)]
pub struct TriggerArgs {
    /// Days of activity the audit looks back over [env: RW_LOOKBACK_DAYS]
    #[arg(long)]
    pub lookback_days: Option<u32>,
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Backend-issued run id
    pub run_id: String,
}

pub async fn trigger(handle: &SessionHandle, lookback_days: u32, format: OutputFormat) -> Result<()> {
    let updates = handle.subscribe();
    handle.trigger_run(lookback_days).await?;
    follow(handle, updates, format).await
}

pub async fn load(handle: &SessionHandle, run_id: String, format: OutputFormat) -> Result<()> {
    let updates = handle.subscribe();
    handle.load_past_run(run_id).await?;
    follow(handle, updates, format).await
}

async fn follow(
    handle: &SessionHandle,
    mut updates: watch::Receiver<RunState>,
    format: OutputFormat,
) -> Result<()> {
    let mut shown = RunState::new();
    let settled = handle.wait_settled();
    tokio::pin!(settled);

    let state = loop {
        tokio::select! {
            result = &mut settled => break result?,
            changed = updates.changed() => {
                changed?;
                let next = updates.borrow_and_update().clone();
                print_progress(&shown, &next, format);
                shown = next;
            }
            _ = tokio::signal::ctrl_c() => {
                handle.reset().await?;
                return Err(ExitError::new(INTERRUPTED, "interrupted").into());
            }
        }
    };
    print_progress(&shown, &state, format);
    tracing::debug!(status = %state.status, "run settled");

    match format {
        OutputFormat::Text => print_summary(&state),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
    }

    if !state.status.is_terminal() {
        let message = format!("run stopped while {}", state.status);
        return Err(ExitError::new(RUN_FAILED, message).into());
    }
    match state.status {
        RunStatus::Completed => Ok(()),
        _ => {
            let message = state.error.unwrap_or_else(|| "audit run failed".to_string());
            Err(ExitError::new(RUN_FAILED, message).into())
        }
    }
}

fn print_progress(shown: &RunState, next: &RunState, format: OutputFormat) {
    if format != OutputFormat::Text {
        return;
    }
    for line in progress_lines(shown, next) {
        if line.starts_with("Run ") {
            println!("{}", color::header(&line));
        } else {
            println!("{}", color::context(&line));
        }
    }
}

fn print_summary(state: &RunState) {
    let heading = match &state.run_id {
        Some(run_id) => format!("\nRun {run_id}: {}", state.status),
        None => format!("\nRun {}", state.status),
    };
    println!("{}", color::header(&heading));
    if let Some(error) = &state.error {
        println!("{}", color::failure(error));
    }
    print!("{}", format_summary(state));
}
