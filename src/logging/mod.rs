//! Logging setup and pipeline log events.
//!
//! Cloak logs to stderr by default and can mirror events to a rotating
//! JSON file (see [`structured`]). Documents are only ever referenced
//! by path in log output; variant text never appears here. The macros
//! below mark the start and end of a per-document run.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Logs the start of a document run.
///
/// ```no_run
/// use cloak::log_document_start;
/// use std::path::Path;
///
/// let path = Path::new("notes.md");
/// log_document_start!(path);
/// ```
#[macro_export]
macro_rules! log_document_start {
    ($path:expr) => {
        tracing::info!(
            document = %$path.display(),
            "Processing document"
        );
    };
}

/// Logs the completion of a document run with its counters.
///
/// ```no_run
/// use cloak::log_document_complete;
/// use std::path::Path;
///
/// let path = Path::new("notes.md");
/// log_document_complete!(path, 3, 3);
/// ```
#[macro_export]
macro_rules! log_document_complete {
    ($path:expr, $found:expr, $replaced:expr) => {
        tracing::info!(
            document = %$path.display(),
            found = $found,
            replaced = $replaced,
            "Document anonymized"
        );
    };
}
