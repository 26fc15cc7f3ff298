//! Cooperative cancellation helpers.
//!
//! Every long-running operation takes a [`CancellationToken`] and observes it
//! at each await point. Deadlines use the same mechanism: [`cancel_after`]
//! derives a token that cancels itself when the duration elapses, so "timed
//! out" and "caller gave up" flow through one code path.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Derives a token that cancels when `parent` cancels or after `deadline`,
/// whichever comes first.
///
/// The timer never cancels the parent; sibling operations sharing `parent`
/// are unaffected by this deadline.
#[must_use]
pub fn cancel_after(parent: &CancellationToken, deadline: Duration) -> CancellationToken {
    let child = parent.child_token();
    let timer = child.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = tokio::time::sleep(deadline) => timer.cancel(),
            () = timer.cancelled() => {}
        }
    });
    child
}
