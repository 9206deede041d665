//! Counting semaphore whose permit ledger is a channel's occupancy.
//!
//! Each held permit is one token parked in a capacity-N channel: acquiring
//! sends a token (blocking while all N are outstanding), releasing receives
//! one back. There is no counter anywhere — the channel *is* the count.

use crate::chan::SyncChannel;

/// A counting semaphore limiting concurrent holders to a fixed maximum.
///
/// # Example
///
/// ```
/// use chansync::Semaphore;
///
/// let sem = Semaphore::new(2);
/// sem.acquire();
/// assert!(sem.try_acquire());
/// assert!(!sem.try_acquire()); // both permits outstanding
/// sem.release();
/// sem.release();
/// ```
#[derive(Debug)]
pub struct Semaphore {
    /// One parked token per outstanding permit.
    permits: SyncChannel<()>,
}

impl Semaphore {
    /// Creates a semaphore with `permits` permits available.
    ///
    /// # Panics
    /// Panics if `permits` is zero.
    #[must_use]
    pub fn new(permits: usize) -> Self {
        assert!(permits > 0, "semaphore requires at least 1 permit");
        Self {
            permits: SyncChannel::new(permits),
        }
    }

    /// Acquires one permit, blocking while none is free.
    pub fn acquire(&self) {
        tracing::trace!("semaphore::acquire waiting");
        self.permits.send(());
        tracing::trace!("semaphore::acquire acquired");
    }

    /// Acquires one permit without blocking.
    ///
    /// Returns false immediately when all permits are outstanding.
    #[must_use]
    pub fn try_acquire(&self) -> bool {
        self.permits.try_send(()).is_ok()
    }

    /// Releases one permit back to the semaphore.
    ///
    /// Releasing a permit that was never acquired is undetected caller
    /// misuse: it silently raises the number of available permits beyond
    /// what was ever truly held. The semaphore does not track holder
    /// identity and cannot reject it.
    pub fn release(&self) {
        self.permits.recv();
        tracing::trace!("semaphore::release returned a permit");
    }

    /// Returns the number of permits currently free.
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.permits.capacity() - self.permits.len()
    }

    /// Returns the maximum number of permits (the initial count).
    #[must_use]
    pub fn max_permits(&self) -> usize {
        self.permits.capacity()
    }
}
