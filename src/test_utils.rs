//! Test utilities for Chansync.
//!
//! Shared helpers for unit tests:
//! - Consistent tracing-based logging initialization
//! - Phase/section macros for readable test output
//! - Assertion macros that log expected/actual values
//! - A tracked mock item for pool-style tests
//!
//! # Example
//! ```
//! use chansync::test_utils::init_test_logging;
//!
//! fn my_test() {
//!     init_test_logging();
//!     // test code
//! }
//! ```

use std::sync::Once as StdOnce;

use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: StdOnce = StdOnce::new();

/// Initialize test logging with trace-level output.
///
/// Safe to call multiple times; only initializes once.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
///
/// The first call wins; later calls are no-ops.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Log a test phase transition with a visual separator.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log a section within a test phase.
#[macro_export]
macro_rules! test_section {
    ($name:expr) => {
        tracing::debug!(section = %$name, "--- {} ---", $name);
    };
}

/// Log test completion with summary.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info!(
            test = %$name,
            $($key = %$value,)*
            "test completed successfully: {}",
            $name
        );
    };
}

/// Log before assertions for context.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            "Asserting: {}",
            $msg
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}

/// Mock pool item that remembers how often it was cleaned.
#[derive(Debug, PartialEq, Eq)]
pub struct TrackedItem {
    id: usize,
    cleans: usize,
}

impl TrackedItem {
    /// Create a new item with a stable ID and no cleans recorded.
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self { id, cleans: 0 }
    }

    /// Returns the item's ID.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns how many times the item passed through a clean hook.
    #[must_use]
    pub fn cleans(&self) -> usize {
        self.cleans
    }

    /// Records one pass through a clean hook; usable directly as the hook.
    #[must_use]
    pub fn cleaned(mut self) -> Self {
        self.cleans += 1;
        self
    }
}
