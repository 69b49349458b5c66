// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The stream session actor.
//!
//! One task owns the [`RunState`] and consumes a single queue: commands from
//! handles, frames from the stream bridge and settlements from backend calls.
//! Handlers never interleave, so the state needs no lock.
//!
//! Two counters keep late arrivals out:
//! - the executor's epoch, bumped on every reset or new run, tags backend
//!   calls; settlements from an older epoch are dropped
//! - the connection id tags frames; frames from a closed connection are
//!   dropped

mod commands;
mod settlements;
mod stream;

use crate::executor::Executor;
use crate::handle::SessionHandle;
use crate::message::Message;
use rw_adapters::AuditApi;
use rw_core::{Clock, Effect};
use rw_state::RunState;
use tokio::sync::{mpsc, watch};

const QUEUE_CAPACITY: usize = 256;

pub struct Session<A, C> {
    state: RunState,
    executor: Executor<A>,
    clock: C,
    rx: mpsc::Receiver<Message>,
    state_tx: watch::Sender<RunState>,
    idle_tx: watch::Sender<bool>,
}

impl<A: AuditApi, C: Clock> Session<A, C> {
    /// Spawn a session on the current tokio runtime.
    ///
    /// The session runs until every handle has been dropped.
    pub fn spawn(api: A, clock: C) -> SessionHandle {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let (state_tx, state_rx) = watch::channel(RunState::new());
        let (idle_tx, idle_rx) = watch::channel(true);
        let session = Session {
            state: RunState::new(),
            executor: Executor::new(api, tx.downgrade()),
            clock,
            rx,
            state_tx,
            idle_tx,
        };
        tokio::spawn(session.run());
        SessionHandle::new(tx, state_rx, idle_rx)
    }

    async fn run(mut self) {
        while let Some(message) = self.rx.recv().await {
            self.handle(message).await;
            self.publish();
        }
        self.executor.close_stream().await;
        tracing::debug!("session stopped");
    }

    async fn handle(&mut self, message: Message) {
        match message {
            Message::Command(command) => self.handle_command(command).await,
            Message::Frame { conn, frame } => self.handle_frame(conn, frame).await,
            Message::StreamEnded { conn, error } => self.handle_stream_end(conn, error).await,
            Message::Settled { epoch, settlement } => {
                if epoch != self.executor.epoch() {
                    tracing::debug!(epoch, current = self.executor.epoch(), "dropping stale settlement");
                    return;
                }
                self.executor.settled();
                self.handle_settlement(settlement).await;
            }
        }
    }

    /// Push the state to subscribers when it changed, then the idle flag.
    ///
    /// Commands publish before acknowledging, so a caller never observes
    /// the state from before its own command.
    fn publish(&self) {
        let state = &self.state;
        self.state_tx.send_if_modified(|current| {
            if current == state {
                return false;
            }
            *current = state.clone();
            true
        });
        let idle = self.executor.is_idle();
        self.idle_tx.send_if_modified(|current| std::mem::replace(current, idle) != idle);
    }

    /// Close any connection, drop in-flight calls and clear the run view.
    async fn start_over(&mut self) {
        self.executor.begin_epoch().await;
        self.state.reset();
    }

    async fn execute(&mut self, effect: Effect) {
        self.executor.execute(effect).await;
    }
}

#[cfg(test)]
#[path = "../session_tests/mod.rs"]
mod tests;
