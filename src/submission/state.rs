//! State for the submission form and its current attempt.

use crate::model::ImageResource;
use crate::mvi::UiState;
use crate::validation::ValidationOutcome;

/// Two-phase precondition: a file must be staged before the form submits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StagingState {
    #[default]
    Unstaged,
    /// The raw file is being uploaded to the staging host.
    Staging,
    Staged {
        url: String,
    },
    /// The staged URL has been handed to the upload step.
    Submitted {
        url: String,
    },
}

impl StagingState {
    /// URL usable by a new attempt; only set in `Staged`.
    pub fn staged_url(&self) -> Option<&str> {
        match self {
            StagingState::Staged { url } => Some(url),
            _ => None,
        }
    }
}

/// Local rejection that ended an attempt before any upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Invalid(Vec<ValidationOutcome>),
    StagingMissing,
}

/// Lifecycle of one attempt:
/// `Idle -> Validating -> {Rejected | Uploading -> {Succeeded | Failed}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttemptPhase {
    #[default]
    Idle,
    Validating,
    Rejected(Rejection),
    Uploading,
    Succeeded(ImageResource),
    Failed { cause: String },
}

impl AttemptPhase {
    /// An attempt is running; a new one must not start.
    pub fn is_active(&self) -> bool {
        matches!(self, AttemptPhase::Validating | AttemptPhase::Uploading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptPhase::Rejected(_) | AttemptPhase::Succeeded(_) | AttemptPhase::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionState {
    pub phase: AttemptPhase,
    pub staging: StagingState,
}

impl UiState for SubmissionState {}

impl SubmissionState {
    /// Whether `stage` or `submit` would be rejected as busy.
    pub fn is_busy(&self) -> bool {
        self.phase.is_active() || self.staging == StagingState::Staging
    }
}
