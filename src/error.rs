use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scheduling run.
///
/// Anything recoverable (malformed lines, missing prior-assignment files,
/// unassignable students, primary-render failures) is logged and handled at
/// the boundary where it occurs instead of surfacing here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no students found in {0}")]
    NoStudents(PathBuf),

    #[error("no TAs found in {0}")]
    NoTas(PathBuf),
}
