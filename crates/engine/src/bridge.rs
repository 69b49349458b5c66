// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream bridge: forwards frames from one live connection into the
//! session queue.

use crate::message::Message;
use futures_util::StreamExt;
use rw_adapters::FrameStream;
use rw_core::RunId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Background task owning one connection. The stream is dropped (and the
/// connection closed) when the task returns.
///
/// Holds only a weak sender between frames, so an attached stream never
/// keeps the session alive once every handle is gone.
pub(crate) async fn stream_bridge(
    mut stream: FrameStream,
    run_id: RunId,
    conn: u64,
    tx: mpsc::WeakSender<Message>,
    cancel: CancellationToken,
) {
    tracing::debug!(%run_id, conn, "stream bridge connected");

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = stream.next() => next,
        };

        let (message, last) = match next {
            Some(Ok(frame)) => (Message::Frame { conn, frame }, false),
            Some(Err(e)) => {
                tracing::warn!(%run_id, conn, error = %e, "stream bridge: read error");
                (Message::StreamEnded { conn, error: Some(e) }, true)
            }
            None => {
                tracing::info!(%run_id, conn, "stream bridge: stream ended");
                (Message::StreamEnded { conn, error: None }, true)
            }
        };

        let Some(tx) = tx.upgrade() else {
            tracing::debug!(%run_id, conn, "stream bridge: session gone");
            break;
        };
        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = tx.send(message) => sent.is_ok(),
        };
        if !sent || last {
            break;
        }
    }

    tracing::debug!(%run_id, conn, "stream bridge stopped");
}
