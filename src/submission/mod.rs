//! Asynchronous submission pipeline.
//!
//! A file is first staged (uploaded raw to obtain a durable URL), then the
//! form is submitted referencing that URL. Every state change goes through
//! [`SubmissionReducer`]; [`SubmissionPipeline`] performs the I/O around it.

mod error;
mod intent;
mod pipeline;
mod reducer;
mod state;

pub use error::SubmissionError;
pub use intent::SubmissionIntent;
pub use pipeline::{
    ResetPolicy, SubmissionPipeline, STAGING_FAILED_MESSAGE, STAGING_MISSING_MESSAGE,
    SUCCESS_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
pub use reducer::SubmissionReducer;
pub use state::{AttemptPhase, Rejection, StagingState, SubmissionState};
