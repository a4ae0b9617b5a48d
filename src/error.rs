//! Pipeline error types.

use std::io;
use thiserror::Error;

/// Errors surfaced while building or driving a pipeline.
///
/// Data-level anomalies (a rejected filter, a partial trailing input
/// group, a copy target that already matches) are policy decisions, not
/// errors; they drop or branch the record silently.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// `run()` was invoked on a stage that is not the origin. This is a
    /// contract violation by the caller, not a data error.
    #[error("{stage} is not an origin stage and cannot drive the pipeline")]
    NotRunnable { stage: &'static str },

    /// The external source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
