//! Tracing and logging (shared setup).

/// Install the process-wide log subscriber. See [`tracing::init`].
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
