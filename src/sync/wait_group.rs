//! Reusable countdown barrier with per-generation completion signals.
//!
//! A [`WaitGroup`] counts outstanding work: [`add`](WaitGroup::add) raises
//! the count, [`done`](WaitGroup::done) lowers it, and
//! [`wait`](WaitGroup::wait) blocks until the count of the *current
//! generation* reaches zero. Unlike a one-shot barrier the group is
//! reusable: once the count returns to zero, the next `add` opens a fresh
//! generation with its own completion signal.
//!
//! # Generations
//!
//! The entire state is one record swapped through a single-slot channel:
//! only one task can hold the record out of the slot at a time, which
//! serializes every mutation without any lock. The record pairs the live
//! count with that generation's signal — a channel that fires (permanently
//! disconnects) when its parked sender is dropped. A waiter binds to the
//! signal of the generation current at fetch time, so a new generation
//! opened concurrently with an old generation's waiters disturbs neither:
//! old waiters still hold the old signal's receiver.

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::chan::SyncChannel;

/// One generation of the countdown: its signal and its remaining count.
#[derive(Debug)]
struct Generation {
    /// `Some` while the generation is open; dropping it fires the signal.
    armed: Option<Sender<()>>,
    /// Disconnects (releasing all waiters) when `armed` is dropped.
    signal: Receiver<()>,
    /// Outstanding count. Never negative; going negative is fatal.
    remaining: isize,
}

impl Generation {
    /// A generation that has already fired, with nothing outstanding.
    fn fired() -> Self {
        let (armed, signal) = bounded(1);
        drop(armed);
        Self {
            armed: None,
            signal,
            remaining: 0,
        }
    }

    /// A fresh, unfired generation with nothing outstanding yet.
    fn open() -> Self {
        let (armed, signal) = bounded(1);
        Self {
            armed: Some(armed),
            signal,
            remaining: 0,
        }
    }
}

/// A reusable "wait for N events" barrier.
///
/// # Example
///
/// ```
/// use chansync::WaitGroup;
/// use std::sync::Arc;
/// use std::thread;
///
/// let group = Arc::new(WaitGroup::new());
/// group.add(3);
/// for _ in 0..3 {
///     let group = Arc::clone(&group);
///     thread::spawn(move || {
///         // ... do work ...
///         group.done();
///     });
/// }
/// group.wait(); // returns once all three are done
/// ```
#[derive(Debug)]
pub struct WaitGroup {
    /// Single-slot channel carrying the current generation record; holding
    /// the record out of the slot is the sole source of mutual exclusion.
    slot: SyncChannel<Generation>,
}

impl WaitGroup {
    /// Creates a group with a zero count.
    ///
    /// A [`wait`](Self::wait) before any [`add`](Self::add) returns
    /// immediately: the initial generation is born already fired.
    #[must_use]
    pub fn new() -> Self {
        let slot = SyncChannel::new(1);
        slot.send(Generation::fired());
        Self { slot }
    }

    /// Adjusts the outstanding count by `delta` (which may be negative).
    ///
    /// A transition of the count from zero to positive opens a new
    /// generation; a transition to exactly zero fires the current
    /// generation's signal, releasing all its waiters permanently.
    ///
    /// # Panics
    /// Panics if the adjustment would drive the count negative. This is
    /// fatal caller misuse and leaves the group unusable.
    pub fn add(&self, delta: isize) {
        let mut generation = self.slot.recv();
        if generation.remaining == 0 {
            // Generation boundary: the previous signal (fired or not) is
            // retired and a fresh one takes its place.
            generation = Generation::open();
        }
        let updated = generation.remaining + delta;
        assert!(
            updated >= 0,
            "wait group counter driven negative ({} + {delta})",
            generation.remaining
        );
        if updated == 0 {
            tracing::trace!("wait_group::add fired generation");
            drop(generation.armed.take());
        }
        generation.remaining = updated;
        self.slot.send(generation);
    }

    /// Records one completed event; equivalent to `add(-1)`.
    ///
    /// # Panics
    /// Panics if the count is already zero.
    pub fn done(&self) {
        self.add(-1);
    }

    /// Blocks until the count of the current generation reaches zero.
    ///
    /// The waiter binds to the generation active at the instant of the
    /// call: an `add` that opens a new generation afterwards does not
    /// extend this waiter's wait.
    pub fn wait(&self) {
        let generation = self.slot.recv();
        let signal = generation.signal.clone();
        self.slot.send(generation);

        tracing::trace!("wait_group::wait blocking on generation signal");
        // The receive returns only once the generation's sender is dropped;
        // nothing is ever sent on the signal channel.
        let _ = signal.recv();
        tracing::trace!("wait_group::wait released");
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn wait_on_fresh_group_returns_immediately() {
        init_test("wait_on_fresh_group_returns_immediately");
        let group = WaitGroup::new();
        group.wait();
        group.wait(); // still immediate: the initial generation stays fired
        crate::test_complete!("wait_on_fresh_group_returns_immediately");
    }

    #[test]
    fn waiters_release_when_count_reaches_zero() {
        init_test("waiters_release_when_count_reaches_zero");
        let group = Arc::new(WaitGroup::new());
        group.add(3);

        let released = Arc::new(AtomicUsize::new(0));
        let mut waiters = Vec::new();
        for _ in 0..4 {
            let group = Arc::clone(&group);
            let released = Arc::clone(&released);
            waiters.push(thread::spawn(move || {
                group.wait();
                released.fetch_add(1, Ordering::SeqCst);
            }));
        }

        thread::sleep(Duration::from_millis(20));
        let early = released.load(Ordering::SeqCst);
        crate::assert_with_log!(early == 0, "waiters blocked while count > 0", 0usize, early);

        let mut workers = Vec::new();
        for _ in 0..3 {
            let group = Arc::clone(&group);
            workers.push(thread::spawn(move || group.done()));
        }
        for worker in workers {
            worker.join().expect("worker thread failed");
        }
        for waiter in waiters {
            waiter.join().expect("waiter thread failed");
        }

        let total = released.load(Ordering::SeqCst);
        crate::assert_with_log!(total == 4, "all waiters released", 4usize, total);
        crate::test_complete!("waiters_release_when_count_reaches_zero");
    }

    #[test]
    fn group_is_reusable_across_generations() {
        init_test("group_is_reusable_across_generations");
        let group = Arc::new(WaitGroup::new());

        for round in 0..3 {
            crate::test_section!("generation round");
            group.add(2);

            let group_a = Arc::clone(&group);
            let a = thread::spawn(move || group_a.done());
            let group_b = Arc::clone(&group);
            let b = thread::spawn(move || group_b.done());

            group.wait();
            a.join().expect("worker thread failed");
            b.join().expect("worker thread failed");
            tracing::debug!(round, "generation completed");
        }
        crate::test_complete!("group_is_reusable_across_generations");
    }

    #[test]
    fn waiter_binds_to_the_generation_at_fetch_time() {
        init_test("waiter_binds_to_the_generation_at_fetch_time");
        let group = Arc::new(WaitGroup::new());
        group.add(1);

        let waiter_group = Arc::clone(&group);
        let waiter = thread::spawn(move || {
            waiter_group.wait();
        });

        thread::sleep(Duration::from_millis(20));
        // Close the current generation, then immediately open a new one.
        // The parked waiter must be released by the old generation's signal
        // even though a new generation is already open.
        group.done();
        group.add(1);

        waiter.join().expect("waiter thread failed");

        // Clean up the second generation.
        group.done();
        group.wait();
        crate::test_complete!("waiter_binds_to_the_generation_at_fetch_time");
    }

    #[test]
    fn add_can_raise_and_lower_in_steps() {
        init_test("add_can_raise_and_lower_in_steps");
        let group = WaitGroup::new();
        group.add(2);
        group.add(3);
        group.add(-4);
        group.add(-1);
        group.wait(); // count is back to zero
        crate::test_complete!("add_can_raise_and_lower_in_steps");
    }

    #[test]
    #[should_panic(expected = "wait group counter driven negative")]
    fn negative_count_is_fatal() {
        let group = WaitGroup::new();
        group.add(-1);
    }

    #[test]
    #[should_panic(expected = "wait group counter driven negative")]
    fn overshooting_done_is_fatal() {
        let group = WaitGroup::new();
        group.add(1);
        group.done();
        group.done();
    }
}
