//! Mutual exclusion as the one-permit case of the semaphore.
//!
//! A [`Mutex`] is a [`Semaphore`] with a single permit: locking parks the
//! lone token, unlocking removes it. Like the semaphore it is a raw lock —
//! it owns no application data and pairs of `lock`/`unlock` calls are the
//! caller's responsibility.

use super::Semaphore;

/// A mutual-exclusion lock with at most one holder at a time.
///
/// # Example
///
/// ```
/// use chansync::Mutex;
///
/// let mutex = Mutex::new();
/// mutex.lock();
/// assert!(!mutex.try_lock());
/// mutex.unlock();
/// assert!(mutex.try_lock());
/// mutex.unlock();
/// ```
#[derive(Debug)]
pub struct Mutex {
    inner: Semaphore,
}

impl Mutex {
    /// Creates an unlocked mutex.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Semaphore::new(1),
        }
    }

    /// Locks the mutex, blocking while another holder has it.
    pub fn lock(&self) {
        tracing::trace!("mutex::lock waiting");
        self.inner.acquire();
        tracing::trace!("mutex::lock held");
    }

    /// Locks the mutex without blocking.
    ///
    /// Returns false immediately when the mutex is already held.
    #[must_use]
    pub fn try_lock(&self) -> bool {
        self.inner.try_acquire()
    }

    /// Unlocks the mutex.
    ///
    /// Unlocking a mutex the caller never locked is undetected misuse, with
    /// the same silent-permit-inflation hazard as
    /// [`Semaphore::release`](super::Semaphore::release).
    pub fn unlock(&self) {
        self.inner.release();
    }

    /// Returns true while some caller holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.available_permits() == 0
    }
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}
