//! Kill-Counter Subsystem Error Hierarchy
//!
//! No error from the persistence path is ever allowed to propagate into the
//! event-handling path; background workers log and swallow.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage open or commit failure. Logged, operation abandoned, no retry;
    /// the next event of the same kind naturally re-attempts the write.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    /// Kill event lacking a usable identifier or map context. Dropped with a
    /// debug log, never retro-attributed.
    #[error("kill event could not be attributed: {0}")]
    AttributionUnresolved(&'static str),

    /// A main-context callback's target disconnected between dispatch and
    /// completion. The callback becomes a no-op.
    #[error("callback target is no longer connected")]
    StaleHandle,

    /// Configuration load or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Event submitted against a tracker whose loop has stopped or whose
    /// queue is full.
    #[error("event submission failed: {0}")]
    SubmissionFailed(String),
}
