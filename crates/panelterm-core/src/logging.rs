//! Diagnostics hooks.
//!
//! The core emits a handful of low-volume events:
//!
//! | Level | Event |
//! |-------|-------|
//! | `debug` | the screen grew past its initial row count |
//! | `debug` | a terminal was consumed while a sequence was still open |
//! | `trace` | an escape or SGR sequence was recognized and ignored |
//!
//! With the `tracing` feature they go to the `tracing` crate. Without it the
//! macros below expand to nothing, so callers of `crate::debug!` and friends
//! compile the same either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Expands to nothing.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to an inert [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// Expands to nothing.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Stand-in for `tracing::Span` when the feature is off.
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
