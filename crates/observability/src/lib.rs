//! Tracing and logging (shared setup).

use serde::Deserialize;

/// Output format of the process-wide subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Initialize process-wide observability (tracing/logging).
///
/// `RUST_LOG` wins over `filter`; with neither set the level is `info`.
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat, filter: Option<&str>) {
    tracing::init(format, filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
