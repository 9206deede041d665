//! Read-write lock over two single-slot channels, reader-preferring.
//!
//! The lock's entire state lives in two capacity-1 channels:
//!
//! - `write_slot` holds a token whenever *anyone* holds the lock — a writer,
//!   or the first reader on behalf of all current readers.
//! - `reader_count` holds the live reader count whenever it is non-zero; the
//!   count is absent (not zero) while no reader holds the lock.
//!
//! At most one of "write-held" and "read-held with count ≥ 1" is true at any
//! instant: a writer cannot enter while readers are present because the
//! first reader parks a token in `write_slot` for the whole read-held span.
//!
//! # Fairness
//!
//! This lock is **reader-preferring** and deliberately provides no
//! writer-preference queuing:
//!
//! | Scenario                  | Behavior                                      |
//! |---------------------------|-----------------------------------------------|
//! | Lock free                 | First arrival (reader or writer) wins         |
//! | Readers active            | New readers join immediately                  |
//! | Readers active + writer   | Writer waits for the reader count to hit zero |
//! | Writer active             | Readers and writers wait for release          |
//!
//! A continuous stream of overlapping readers therefore delays a waiting
//! writer indefinitely. This is a documented property of the design, not a
//! defect: new readers do not queue behind a pending writer.

use crate::chan::{race_send_recv, Raced, SyncChannel};

/// A read-write lock allowing many concurrent readers or one writer.
///
/// Like the other primitives in this crate it is a raw lock: it owns no
/// application data, and matching unlock calls are the caller's
/// responsibility.
///
/// # Example
///
/// ```
/// use chansync::RwLock;
///
/// let lock = RwLock::new();
/// lock.lock_shared();
/// lock.lock_shared();      // readers share freely
/// assert!(!lock.try_lock()); // writer shut out while readers hold
/// lock.unlock_shared();
/// lock.unlock_shared();
/// assert!(lock.try_lock());
/// lock.unlock();
/// ```
#[derive(Debug)]
pub struct RwLock {
    /// Occupied while anyone (a writer, or the first reader) holds the lock.
    write_slot: SyncChannel<()>,
    /// Holds the live reader count; absent while the count is zero.
    reader_count: SyncChannel<usize>,
}

impl RwLock {
    /// Creates an unlocked lock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            write_slot: SyncChannel::new(1),
            reader_count: SyncChannel::new(1),
        }
    }

    /// Acquires the lock exclusively, blocking while any holder is present.
    pub fn lock(&self) {
        tracing::trace!("rwlock::lock waiting");
        self.write_slot.send(());
        tracing::trace!("rwlock::lock write-held");
    }

    /// Releases the exclusive lock.
    ///
    /// Calling this without holding the write lock is undetected misuse: the
    /// receive blocks until some other token lands in the writer slot and
    /// then steals it.
    pub fn unlock(&self) {
        self.write_slot.recv();
        tracing::trace!("rwlock::unlock released");
    }

    /// Acquires the lock exclusively without blocking.
    ///
    /// Returns false immediately when a writer or any reader holds the lock.
    #[must_use]
    pub fn try_lock(&self) -> bool {
        self.write_slot.try_send(()).is_ok()
    }

    /// Acquires the lock for shared reading, blocking while a writer holds it.
    ///
    /// A single indivisible wait races two alternatives: become the first
    /// reader (occupying the writer slot so writers stay out), or join the
    /// readers already present by taking the live count. Exactly one branch
    /// fires; either way the incremented count is then republished.
    pub fn lock_shared(&self) {
        tracing::trace!("rwlock::lock_shared waiting");
        let previous = match race_send_recv(&self.write_slot, (), &self.reader_count) {
            // No holder existed: this reader now occupies the writer slot.
            Raced::Sent => 0,
            // Readers already present: the count is temporarily ours alone.
            Raced::Received(count) => count,
        };
        self.reader_count.send(previous + 1);
        tracing::trace!(readers = previous + 1, "rwlock::lock_shared read-held");
    }

    /// Releases one shared hold.
    ///
    /// The last reader out drains the writer slot, returning the lock fully
    /// to free. Calling this without a matching [`lock_shared`](Self::lock_shared)
    /// is undetected misuse.
    pub fn unlock_shared(&self) {
        let count = self.reader_count.recv();
        if count == 1 {
            self.write_slot.recv();
            tracing::trace!("rwlock::unlock_shared last reader out");
        } else {
            self.reader_count.send(count - 1);
            tracing::trace!(readers = count - 1, "rwlock::unlock_shared");
        }
    }

    /// Acquires the lock for shared reading without blocking.
    ///
    /// Same two alternatives as [`lock_shared`](Self::lock_shared), probed
    /// non-blockingly; on success the full increment-and-republish is still
    /// performed. May spuriously fail while another reader is mid-way
    /// through publishing the count.
    #[must_use]
    pub fn try_lock_shared(&self) -> bool {
        if let Some(count) = self.reader_count.try_recv() {
            self.reader_count.send(count + 1);
            return true;
        }
        if self.write_slot.try_send(()).is_ok() {
            self.reader_count.send(1);
            return true;
        }
        false
    }
}

impl Default for RwLock {
    fn default() -> Self {
        Self::new()
    }
}
