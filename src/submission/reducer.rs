//! Reducer for the submission form.

use crate::mvi::Reducer;

use super::intent::SubmissionIntent;
use super::state::{AttemptPhase, Rejection, StagingState, SubmissionState};

/// Pure transitions. Out-of-order intents (a late staging result after the
/// form was cleared, an upload result with no upload running) leave the
/// state unchanged.
pub struct SubmissionReducer;

impl Reducer for SubmissionReducer {
    type State = SubmissionState;
    type Intent = SubmissionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let SubmissionState { phase, staging } = state;

        match intent {
            SubmissionIntent::StageStarted => SubmissionState {
                phase,
                staging: StagingState::Staging,
            },
            SubmissionIntent::StageCompleted { url } => match staging {
                StagingState::Staging => SubmissionState {
                    phase,
                    staging: StagingState::Staged { url },
                },
                // Cleared while the upload was running: ignore the late URL.
                other => SubmissionState {
                    phase,
                    staging: other,
                },
            },
            SubmissionIntent::StageFailed => match staging {
                StagingState::Staging => SubmissionState {
                    phase,
                    staging: StagingState::Unstaged,
                },
                other => SubmissionState {
                    phase,
                    staging: other,
                },
            },
            SubmissionIntent::ClearStaging => SubmissionState {
                phase,
                staging: StagingState::Unstaged,
            },

            SubmissionIntent::AttemptStarted => {
                if phase.is_active() {
                    return SubmissionState { phase, staging };
                }
                SubmissionState {
                    phase: AttemptPhase::Validating,
                    staging,
                }
            }
            SubmissionIntent::ValidationRejected { outcomes } => match phase {
                AttemptPhase::Validating => SubmissionState {
                    phase: AttemptPhase::Rejected(Rejection::Invalid(outcomes)),
                    staging,
                },
                other => SubmissionState {
                    phase: other,
                    staging,
                },
            },
            SubmissionIntent::StagingMissing => match phase {
                AttemptPhase::Validating => SubmissionState {
                    phase: AttemptPhase::Rejected(Rejection::StagingMissing),
                    staging,
                },
                other => SubmissionState {
                    phase: other,
                    staging,
                },
            },
            SubmissionIntent::UploadStarted => match (phase, staging) {
                (AttemptPhase::Validating, StagingState::Staged { url }) => SubmissionState {
                    phase: AttemptPhase::Uploading,
                    staging: StagingState::Submitted { url },
                },
                (phase, staging) => SubmissionState { phase, staging },
            },
            SubmissionIntent::UploadSucceeded { image } => match phase {
                AttemptPhase::Uploading => SubmissionState {
                    phase: AttemptPhase::Succeeded(image),
                    staging,
                },
                other => SubmissionState {
                    phase: other,
                    staging,
                },
            },
            SubmissionIntent::UploadFailed { cause } => match phase {
                AttemptPhase::Uploading => SubmissionState {
                    phase: AttemptPhase::Failed { cause },
                    // Hand the staged file back so the form can be resubmitted.
                    staging: match staging {
                        StagingState::Submitted { url } => StagingState::Staged { url },
                        other => other,
                    },
                },
                other => SubmissionState {
                    phase: other,
                    staging,
                },
            },

            SubmissionIntent::Cancelled | SubmissionIntent::Reset => SubmissionState::default(),
        }
    }
}
