//! One-shot initialization guard built on a pre-loaded token channel.
//!
//! [`Once`] runs a caller-supplied initializer exactly once, no matter how
//! many threads race to run it, and every call returns only after that one
//! run has completed.
//!
//! # Mechanism
//!
//! The guard wraps a capacity-1 channel pre-loaded with a single token.
//! Exactly one racing caller receives the live token; it runs the
//! initializer and then permanently closes the channel. Everyone else blocks
//! on the now-empty channel until the close, which doubles as a broadcast:
//! callers arriving after the close observe it without blocking at all.
//!
//! Closing happens by dropping the token channel's last `Sender`, which is
//! itself parked in a side channel so that no state outside channel content
//! is needed.

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::chan;

/// Runs an initializer exactly once across any number of racing callers.
///
/// # Example
///
/// ```
/// use chansync::Once;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// static RUNS: AtomicUsize = AtomicUsize::new(0);
///
/// let guard = Once::new();
/// guard.call_once(|| {
///     RUNS.fetch_add(1, Ordering::SeqCst);
/// });
/// guard.call_once(|| {
///     RUNS.fetch_add(1, Ordering::SeqCst);
/// });
/// assert_eq!(RUNS.load(Ordering::SeqCst), 1);
/// ```
#[derive(Debug)]
pub struct Once {
    /// Capacity-1 channel pre-loaded with the single run token.
    token: Receiver<()>,
    /// Parks the token channel's lone sender until completion; pulling it
    /// out and dropping it closes `token` for good.
    closer: Receiver<Sender<()>>,
}

impl Once {
    /// Creates a guard whose initializer has not yet run.
    #[must_use]
    pub fn new() -> Self {
        let (token_tx, token_rx) = bounded(1);
        token_tx
            .send(())
            .expect("fresh token channel rejected its token");

        let (closer_tx, closer_rx) = bounded(1);
        closer_tx
            .send(token_tx)
            .expect("fresh closer channel rejected its sender");
        // The closer's own sender is dropped here; its single item is all it
        // will ever carry.

        Self {
            token: token_rx,
            closer: closer_rx,
        }
    }

    /// Runs `f` if no initializer has run yet.
    ///
    /// Exactly one concurrent caller observes the live token and runs `f`;
    /// every other call, no matter when it arrives, returns only after that
    /// single run has fully completed and never invokes its own closure.
    pub fn call_once<F: FnOnce()>(&self, f: F) {
        if self.token.recv().is_ok() {
            tracing::trace!("once::call_once won the token, running initializer");
            f();
            if let Ok(token_tx) = self.closer.try_recv() {
                drop(token_tx);
            }
            tracing::trace!("once::call_once closed");
        }
        // A failed receive means the channel is closed: the winner's run
        // happened before we observed the close, so there is nothing to do.
    }

    /// Returns true once the initializer has completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        chan::is_closed(&self.token)
    }
}

impl Default for Once {
    fn default() -> Self {
        Self::new()
    }
}
