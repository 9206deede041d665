//! Synchronization primitives built from bounded channels.
//!
//! Every primitive here keeps its entire mutable state inside one or two
//! bounded channels: occupancy encodes the protected state, and blocking
//! channel operations do the waiting. No primitive carries an auxiliary
//! mutex or atomic.
//!
//! # Primitives
//!
//! - [`Once`]: run an initializer exactly once; all callers observe completion
//! - [`Semaphore`]: bound concurrent holders to N permits
//! - [`Mutex`]: mutual exclusion, the one-permit semaphore
//! - [`RwLock`]: many concurrent readers or one writer (reader-preferring)
//! - [`Pool`]: bounded reuse cache with allocate/clean hooks
//! - [`WaitGroup`]: reusable countdown barrier with generation signals
//!
//! # Raw locks
//!
//! The locks own no application data: `lock`/`unlock` pairs are explicit
//! operations, and matching them correctly is the caller's responsibility.
//! Misuse that the channels cannot detect (an unmatched unlock) is
//! documented per primitive rather than guessed at.

mod mutex;
mod once;
mod pool;
mod rwlock;
mod semaphore;
mod wait_group;

pub use mutex::Mutex;
pub use once::Once;
pub use pool::Pool;
pub use rwlock::RwLock;
pub use semaphore::Semaphore;
pub use wait_group::WaitGroup;
