//! Bounded synchronization channels: the substrate every primitive builds on.
//!
//! A [`SyncChannel`] is a fixed-capacity blocking queue whose occupancy *is*
//! the guarded state: sending parks a token, receiving removes one. The
//! channel owns both of its endpoints, so it can never disconnect for the
//! lifetime of the primitive that owns it — a blocked `send` or `recv` only
//! ever resumes because another task made the complementary move.
//!
//! The module also provides [`race_send_recv`], a single indivisible wait
//! over a send and a receive on two different channels. Exactly one branch
//! fires; the reader side of the read-write lock is built on it.
//!
//! One-shot broadcast ("this channel is closed for good") is not part of
//! [`SyncChannel`]: primitives that need it hold raw `crossbeam_channel`
//! endpoints and drop the last `Sender`, after which every receive returns
//! immediately. The drop happens-before every receive that observes the
//! disconnection.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

/// A fixed-capacity blocking queue used only to coordinate tasks.
///
/// Both endpoints live inside the struct, so the channel stays connected as
/// long as the owning primitive is alive. All operations take `&self`; the
/// channel content is the only mutable state.
#[derive(Debug)]
pub struct SyncChannel<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    capacity: usize,
}

impl<T> SyncChannel<T> {
    /// Creates a channel holding at most `capacity` items.
    ///
    /// # Panics
    /// Panics if `capacity` is zero. A zero-capacity channel would be a
    /// rendezvous point, not a queue, and no primitive here wants that.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "synchronization channel requires capacity >= 1");
        let (tx, rx) = bounded(capacity);
        Self { tx, rx, capacity }
    }

    /// Parks one item in the channel, blocking while it is full.
    pub fn send(&self, value: T) {
        self.tx
            .send(value)
            .expect("synchronization channel disconnected");
    }

    /// Removes one item from the channel, blocking while it is empty.
    pub fn recv(&self) -> T {
        self.rx
            .recv()
            .expect("synchronization channel disconnected")
    }

    /// Parks one item without blocking.
    ///
    /// Fails immediately when the channel is full, handing the item back to
    /// the caller.
    pub fn try_send(&self, value: T) -> Result<(), T> {
        self.tx.try_send(value).map_err(|err| match err {
            TrySendError::Full(value) | TrySendError::Disconnected(value) => value,
        })
    }

    /// Removes one item without blocking, or returns `None` when empty.
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Returns the number of items currently in the channel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns true if the channel currently holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Returns true if the channel is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.rx.len() == self.capacity
    }

    /// Returns the fixed capacity the channel was created with.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Which branch of a [`race_send_recv`] wait fired.
#[derive(Debug)]
pub enum Raced<R> {
    /// The send into the first channel went through.
    Sent,
    /// A value was received from the second channel.
    Received(R),
}

/// Blocks on both operations at once and performs exactly one of them.
///
/// Waits until either `value` can be sent into `send_ch` or an item can be
/// received from `recv_ch`, whichever becomes possible first. The two
/// branches are mutually exclusive: the losing operation is never performed.
/// When both are ready the choice is non-deterministic.
pub fn race_send_recv<S, R>(send_ch: &SyncChannel<S>, value: S, recv_ch: &SyncChannel<R>) -> Raced<R> {
    crossbeam_channel::select! {
        send(send_ch.tx, value) -> res => {
            res.expect("synchronization channel disconnected");
            Raced::Sent
        }
        recv(recv_ch.rx) -> msg => {
            Raced::Received(msg.expect("synchronization channel disconnected"))
        }
    }
}

/// Non-consuming check for a permanently closed one-shot channel.
///
/// Returns true only when `rx`'s channel is empty and all senders are gone.
/// Safe to call on a channel that may still hold its token: the buffered
/// item is probed via `is_empty` first and never consumed.
pub(crate) fn is_closed<T>(rx: &Receiver<T>) -> bool {
    // Items are only ever loaded at construction, so once empty the channel
    // stays empty and try_recv can no longer consume anything.
    rx.is_empty() && matches!(rx.try_recv(), Err(TryRecvError::Disconnected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn send_recv_round_trip() {
        init_test("send_recv_round_trip");
        let ch = SyncChannel::new(2);
        ch.send(1u32);
        ch.send(2u32);
        let first = ch.recv();
        crate::assert_with_log!(first == 1, "fifo order", 1u32, first);
        let second = ch.recv();
        crate::assert_with_log!(second == 2, "fifo order", 2u32, second);
        crate::test_complete!("send_recv_round_trip");
    }

    #[test]
    fn try_send_fails_when_full() {
        init_test("try_send_fails_when_full");
        let ch = SyncChannel::new(1);
        let accepted = ch.try_send(7u32).is_ok();
        crate::assert_with_log!(accepted, "first try_send accepted", true, accepted);
        let rejected = ch.try_send(8u32);
        crate::assert_with_log!(rejected == Err(8), "full channel hands item back", Err::<(), u32>(8), rejected);
        let full = ch.is_full();
        crate::assert_with_log!(full, "channel reports full", true, full);
        crate::test_complete!("try_send_fails_when_full");
    }

    #[test]
    fn try_recv_fails_when_empty() {
        init_test("try_recv_fails_when_empty");
        let ch: SyncChannel<u32> = SyncChannel::new(1);
        let got = ch.try_recv();
        crate::assert_with_log!(got.is_none(), "empty channel yields none", true, got.is_none());
        crate::test_complete!("try_recv_fails_when_empty");
    }

    #[test]
    fn send_blocks_until_capacity_frees() {
        init_test("send_blocks_until_capacity_frees");
        let ch = Arc::new(SyncChannel::new(1));
        ch.send(1u32);

        let ch_clone = Arc::clone(&ch);
        let handle = thread::spawn(move || {
            // Blocks until the main thread drains the slot.
            ch_clone.send(2u32);
        });

        thread::sleep(Duration::from_millis(20));
        let first = ch.recv();
        crate::assert_with_log!(first == 1, "drained first item", 1u32, first);
        handle.join().expect("sender thread failed");
        let second = ch.recv();
        crate::assert_with_log!(second == 2, "blocked send completed", 2u32, second);
        crate::test_complete!("send_blocks_until_capacity_frees");
    }

    #[test]
    fn race_prefers_whichever_side_is_ready() {
        init_test("race_prefers_whichever_side_is_ready");
        let send_ch: SyncChannel<()> = SyncChannel::new(1);
        let recv_ch: SyncChannel<usize> = SyncChannel::new(1);

        // Only the send side is ready.
        let raced = race_send_recv(&send_ch, (), &recv_ch);
        let sent = matches!(raced, Raced::Sent);
        crate::assert_with_log!(sent, "send branch fired", true, sent);

        // Send side is now full; only the recv side is ready.
        recv_ch.send(3);
        let raced = race_send_recv(&send_ch, (), &recv_ch);
        let received = matches!(raced, Raced::Received(3));
        crate::assert_with_log!(received, "recv branch fired", true, received);
        crate::test_complete!("race_prefers_whichever_side_is_ready");
    }

    #[test]
    #[should_panic(expected = "synchronization channel requires capacity >= 1")]
    fn zero_capacity_panics() {
        let _ = SyncChannel::<()>::new(0);
    }
}
