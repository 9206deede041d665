//! Chansync: synchronization primitives built entirely from bounded channels.
//!
//! # Overview
//!
//! Chansync re-derives classic concurrency control — once guard, semaphore,
//! mutex, read-write lock, object pool, and a reusable countdown barrier —
//! from a single lower-level mechanism: the fixed-capacity blocking channel.
//! Each primitive's only shared mutable state is the content of its internal
//! channel(s); there is nothing else to guard, so no primitive reaches for a
//! mutex or an atomic of its own.
//!
//! # Core Ideas
//!
//! - **Occupancy is state**: a semaphore's outstanding permits are tokens
//!   parked in a capacity-N channel; a lock is held while its slot is full.
//! - **Single-slot serialization**: a record swapped through a capacity-1
//!   channel can only be mutated by the one task currently holding it out
//!   of the slot — mutual exclusion with no lock.
//! - **Close as broadcast**: permanently closing a channel releases every
//!   current and future receiver at once; the once guard and the wait
//!   group's generation signals are built on it.
//!
//! # Module Structure
//!
//! - [`chan`]: the bounded synchronization-channel substrate
//! - [`sync`]: the primitives built on it
//! - [`test_utils`]: tracing-based logging and assertion helpers for tests
//!
//! # Caveats
//!
//! These are raw, in-process primitives: no cancellation, no timeouts, no
//! poisoning, and fairness only as documented per primitive (the read-write
//! lock deliberately permits writer starvation). A caller needing a timeout
//! races the blocking call against a timer at a higher layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]

pub mod chan;
pub mod sync;
pub mod test_utils;

// Re-exports for convenient access to the primitives
pub use chan::{race_send_recv, Raced, SyncChannel};
pub use sync::{Mutex, Once, Pool, RwLock, Semaphore, WaitGroup};
