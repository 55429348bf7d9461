use crate::model::ImageResource;
use crate::mvi::Intent;
use crate::validation::ValidationOutcome;

#[derive(Debug, Clone)]
pub enum SubmissionIntent {
    // Staging
    StageStarted,
    StageCompleted { url: String },
    StageFailed,
    ClearStaging,

    // Attempt
    AttemptStarted,
    ValidationRejected { outcomes: Vec<ValidationOutcome> },
    StagingMissing,
    UploadStarted,
    UploadSucceeded { image: ImageResource },
    UploadFailed { cause: String },

    /// The surface closed mid-flight; drop everything.
    Cancelled,
    /// Clear the form after an attempt.
    Reset,
}

impl Intent for SubmissionIntent {}
