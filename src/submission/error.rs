use thiserror::Error;

use crate::api::ApiError;
use crate::validation::ValidationOutcome;

/// Outcome of a submission attempt that did not create an image.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// One or more fields failed the client-side rules; nothing was sent.
    #[error("Invalid submission: {}", describe_rejections(.outcomes))]
    ValidationFailed { outcomes: Vec<ValidationOutcome> },

    /// Submit was called before a file finished staging.
    #[error("No staged image to submit")]
    StagingMissing,

    /// The staging host rejected or never answered the raw upload.
    #[error("Failed to stage file: {cause}")]
    StagingFailed {
        #[source]
        cause: ApiError,
    },

    /// The create request failed. Not retried.
    #[error("Failed to upload image: {cause}")]
    UploadFailed {
        #[source]
        cause: ApiError,
    },

    /// Another attempt or staging call from this form is still running.
    #[error("A submission is already in progress")]
    Busy,

    /// The submission surface closed before the attempt finished.
    #[error("Submission cancelled")]
    Cancelled,
}

impl SubmissionError {
    /// Rejected fields, for `ValidationFailed`.
    pub fn rejected_fields(&self) -> Vec<&ValidationOutcome> {
        match self {
            SubmissionError::ValidationFailed { outcomes } => {
                outcomes.iter().filter(|o| !o.accepted()).collect()
            }
            _ => Vec::new(),
        }
    }
}

pub(crate) fn describe_rejections(outcomes: &[ValidationOutcome]) -> String {
    outcomes
        .iter()
        .filter(|o| !o.accepted())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CandidateSubmission;
    use crate::validation::validate_all;

    #[test]
    fn validation_message_lists_only_rejected_fields() {
        let outcomes = validate_all(&CandidateSubmission::new(None, "Ab", ""));
        let err = SubmissionError::ValidationFailed { outcomes };
        assert_eq!(
            err.to_string(),
            "Invalid submission: image: file required; description: required"
        );
        assert_eq!(err.rejected_fields().len(), 2);
    }

    #[test]
    fn other_errors_have_no_rejected_fields() {
        assert!(SubmissionError::StagingMissing.rejected_fields().is_empty());
    }
}
