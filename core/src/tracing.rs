//! Tracing utilities for query rendering and row decoding.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event with the rendered SQL text and parameter count.
///
/// ```ignore
/// sqlweave_trace_render!(&rendered.sql, rendered.params.len(), dialect);
/// ```
macro_rules! sqlweave_trace_render {
    ($sql:expr, $param_count:expr, $dialect:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(
            sql = %$sql,
            params = $param_count,
            dialect = %$dialect,
            "sqlweave.render"
        );
    };
}

/// Emit a trace-level event when a row is decoded into a result tuple.
macro_rules! sqlweave_trace_decode {
    ($columns:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(columns = $columns, "sqlweave.decode");
    };
}

/// Emit a debug-level event when a named placeholder is bound.
macro_rules! sqlweave_trace_bind {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(placeholder = %$name, "sqlweave.bind");
    };
}

pub(crate) use sqlweave_trace_bind;
pub(crate) use sqlweave_trace_decode;
pub(crate) use sqlweave_trace_render;
