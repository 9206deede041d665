//! Bounded object pool with an allocate factory and an optional clean hook.
//!
//! The pool is a capacity-S channel of idle items. [`Pool::get`] prefers a
//! recycled item from the channel and falls back to the factory on a miss;
//! [`Pool::put`] parks the item for reuse or silently drops it when the pool
//! is full. Neither operation ever blocks — miss and overflow are normal
//! operating conditions, not errors.
//!
//! The clean hook runs if and only if the returned item was physically
//! recycled from the channel: never on a freshly allocated item, never
//! skipped for a recycled one.

use std::fmt;

use crate::chan::SyncChannel;

type AllocFn<T> = Box<dyn Fn() -> T + Send + Sync>;
type CleanFn<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// A bounded reuse cache for items of type `T`.
///
/// # Example
///
/// ```
/// use chansync::Pool;
///
/// let pool: Pool<Vec<u8>> = Pool::with_clean(
///     4,
///     || Vec::with_capacity(1024),
///     |mut buf| {
///         buf.clear();
///         buf
///     },
/// );
///
/// let buf = pool.get(); // freshly allocated: pool was empty
/// pool.put(buf);
/// let buf = pool.get(); // recycled: cleared by the clean hook
/// assert!(buf.is_empty());
/// ```
pub struct Pool<T> {
    /// Idle items awaiting reuse.
    items: SyncChannel<T>,
    /// Produces a fresh item on a pool miss.
    alloc: AllocFn<T>,
    /// Applied to every recycled item before it is handed out.
    clean: Option<CleanFn<T>>,
}

impl<T> Pool<T> {
    /// Creates a pool holding at most `capacity` idle items, with no clean
    /// hook.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new<A>(capacity: usize, alloc: A) -> Self
    where
        A: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            items: SyncChannel::new(capacity),
            alloc: Box::new(alloc),
            clean: None,
        }
    }

    /// Creates a pool whose recycled items pass through `clean` before being
    /// handed out.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_clean<A, C>(capacity: usize, alloc: A, clean: C) -> Self
    where
        A: Fn() -> T + Send + Sync + 'static,
        C: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            items: SyncChannel::new(capacity),
            alloc: Box::new(alloc),
            clean: Some(Box::new(clean)),
        }
    }

    /// Takes an item from the pool, allocating a fresh one on a miss.
    ///
    /// Never blocks. A recycled item passes through the clean hook (when one
    /// was configured); a freshly allocated item never does.
    #[must_use]
    pub fn get(&self) -> T {
        match self.items.try_recv() {
            Some(item) => {
                tracing::trace!("pool::get recycled an item");
                match &self.clean {
                    Some(clean) => clean(item),
                    None => item,
                }
            }
            None => {
                tracing::trace!("pool::get miss, allocating");
                (self.alloc)()
            }
        }
    }

    /// Returns an item to the pool for reuse.
    ///
    /// Never blocks. When the pool is already full the item is silently
    /// dropped and left to the allocator.
    pub fn put(&self, item: T) {
        if self.items.try_send(item).is_err() {
            tracing::trace!("pool::put overflow, dropping item");
        }
    }

    /// Returns the number of idle items currently pooled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when no idle items are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the maximum number of idle items the pool retains.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("has_clean", &self.clean.is_some())
            .finish()
    }
}
