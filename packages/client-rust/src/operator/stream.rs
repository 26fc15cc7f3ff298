//! Streaming result sequence backed by a bounded channel.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// An asynchronous sequence of `Result<T>` items from a paginated fetch.
///
/// Items arrive through a bounded buffer: the producer stays at most one
/// buffer ahead of the consumer. After the first `Err` item the sequence is
/// closed; [`recv`](Self::recv) returns `None` from then on.
///
/// Implements [`futures_util::Stream`], so the usual `StreamExt` and
/// `TryStreamExt` combinators apply. Dropping the stream stops the producer
/// at its next send.
pub struct ResultStream<T> {
    rx: mpsc::Receiver<Result<T>>,
}

impl<T> ResultStream<T> {
    pub(crate) fn new(rx: mpsc::Receiver<Result<T>>) -> Self {
        Self { rx }
    }

    /// A sequence that yields `err` and nothing else.
    ///
    /// Façades use this to surface pre-flight failures (e.g. a missing
    /// capability) through the same shape as a live stream.
    #[must_use]
    pub fn failed(err: Error) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 on a fresh channel: this send cannot fail.
        let _ = tx.try_send(Err(err));
        Self { rx }
    }

    /// Receive the next item, or `None` once the sequence is closed.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        self.rx.recv().await
    }
}

impl<T> futures_util::Stream for ResultStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> std::fmt::Debug for ResultStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultStream").finish_non_exhaustive()
    }
}
