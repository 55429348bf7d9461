use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use super::error::{describe_rejections, SubmissionError};
use super::intent::SubmissionIntent;
use super::reducer::SubmissionReducer;
use super::state::SubmissionState;
use crate::api::{ImageStager, ImageUploader};
use crate::cache::{CollectionCache, HeadWriter, GALLERY_COLLECTION};
use crate::config::SubmissionConfig;
use crate::model::{CandidateSubmission, CreateImageRequest, FileBlob, ImageResource, StagedImage};
use crate::mvi::Reducer;
use crate::notify::{Notification, SubmissionSurface};
use crate::surface::CancelToken;
use crate::validation::{all_accepted, validate_all, validate_image};

pub const SUCCESS_MESSAGE: &str = "Image added successfully!";
pub const STAGING_MISSING_MESSAGE: &str = "Image does not exist";
pub const UPLOAD_FAILED_MESSAGE: &str = "Error adding image";
pub const STAGING_FAILED_MESSAGE: &str = "Error uploading file";

/// When the form is cleared after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Clear and close after every attempt, failed ones included.
    #[default]
    Always,
    /// Keep staged input after a failure so it can be resubmitted.
    OnSuccess,
}

impl ResetPolicy {
    pub fn resets_on_failure(self) -> bool {
        self == ResetPolicy::Always
    }
}

impl From<&SubmissionConfig> for ResetPolicy {
    fn from(config: &SubmissionConfig) -> Self {
        if config.reset_on_failure {
            ResetPolicy::Always
        } else {
            ResetPolicy::OnSuccess
        }
    }
}

/// Validate → upload → update cache → notify → reset.
///
/// Attempts are serialized: a `submit` or `stage` issued while another
/// one is running fails with [`SubmissionError::Busy`] and leaves the
/// running attempt alone.
pub struct SubmissionPipeline {
    stager: Arc<dyn ImageStager>,
    uploader: Arc<dyn ImageUploader>,
    head: HeadWriter,
    surface: Arc<dyn SubmissionSurface>,
    policy: ResetPolicy,
    cancel: CancelToken,
    state: Mutex<SubmissionState>,
}

impl SubmissionPipeline {
    pub fn new(
        stager: Arc<dyn ImageStager>,
        uploader: Arc<dyn ImageUploader>,
        cache: &CollectionCache,
        surface: Arc<dyn SubmissionSurface>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            stager,
            uploader,
            head: cache.head_writer(GALLERY_COLLECTION),
            surface,
            policy: ResetPolicy::default(),
            cancel,
            state: Mutex::new(SubmissionState::default()),
        }
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state.lock().clone()
    }

    /// Upload the raw file to the staging host and remember its URL.
    ///
    /// The image rules run first; a file they reject is never sent.
    pub async fn stage(&self, file: FileBlob) -> Result<StagedImage, SubmissionError> {
        let outcome = validate_image(Some(&file));
        if !outcome.accepted() {
            tracing::debug!(%outcome, "file rejected before staging");
            return Err(SubmissionError::ValidationFailed {
                outcomes: vec![outcome],
            });
        }
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }

        {
            let mut state = self.state.lock();
            if state.is_busy() {
                return Err(SubmissionError::Busy);
            }
            *state = SubmissionReducer::reduce(std::mem::take(&mut *state), SubmissionIntent::StageStarted);
        }
        let pending = self.pending(SubmissionIntent::ClearStaging);

        let result = match self.cancel.run(self.stager.stage(&file)).await {
            None => {
                self.dispatch(SubmissionIntent::ClearStaging);
                Err(SubmissionError::Cancelled)
            }
            Some(Ok(staged)) => {
                tracing::debug!(url = %staged.url, "file staged");
                self.dispatch(SubmissionIntent::StageCompleted {
                    url: staged.url.clone(),
                });
                Ok(staged)
            }
            Some(Err(cause)) => {
                tracing::warn!(error = %cause, transport = cause.is_transport(), "staging failed");
                self.dispatch(SubmissionIntent::StageFailed);
                self.surface.notify(Notification::error(STAGING_FAILED_MESSAGE));
                Err(SubmissionError::StagingFailed { cause })
            }
        };
        pending.settle();
        result
    }

    /// Drop the staged file and its preview.
    pub fn clear_staging(&self) {
        self.dispatch(SubmissionIntent::ClearStaging);
    }

    /// Run one attempt.
    ///
    /// Exactly one notification is sent to the surface for every attempt
    /// that starts, except when the surface itself was closed.
    pub async fn submit(&self, candidate: CandidateSubmission) -> Result<ImageResource, SubmissionError> {
        let span = tracing::info_span!("submission", attempt = %Uuid::new_v4());
        async {
            let pending = self.begin_attempt()?;
            let result = self.attempt(candidate).await;
            self.finish(&result);
            pending.settle();
            result
        }
        .instrument(span)
        .await
    }

    fn dispatch(&self, intent: SubmissionIntent) {
        let mut state = self.state.lock();
        *state = SubmissionReducer::reduce(std::mem::take(&mut *state), intent);
    }

    /// Guard that dispatches `on_drop` if the caller drops the running
    /// future before it settles.
    fn pending(&self, on_drop: SubmissionIntent) -> Pending<'_> {
        Pending {
            pipeline: self,
            on_drop: Some(on_drop),
        }
    }

    fn begin_attempt(&self) -> Result<Pending<'_>, SubmissionError> {
        if self.cancel.is_cancelled() {
            return Err(SubmissionError::Cancelled);
        }
        let mut state = self.state.lock();
        if state.phase.is_active() {
            tracing::debug!(phase = ?state.phase, "submit rejected, attempt in flight");
            return Err(SubmissionError::Busy);
        }
        *state = SubmissionReducer::reduce(std::mem::take(&mut *state), SubmissionIntent::AttemptStarted);
        Ok(self.pending(SubmissionIntent::Cancelled))
    }

    /// Hand the staged URL to the upload step, or `None` if nothing is staged.
    fn take_staged_url(&self) -> Option<String> {
        let mut state = self.state.lock();
        let url = state.staging.staged_url()?.to_string();
        *state = SubmissionReducer::reduce(std::mem::take(&mut *state), SubmissionIntent::UploadStarted);
        Some(url)
    }

    async fn attempt(&self, candidate: CandidateSubmission) -> Result<ImageResource, SubmissionError> {
        let outcomes = validate_all(&candidate);
        if !all_accepted(&outcomes) {
            tracing::info!(rejected = %describe_rejections(&outcomes), "submission failed validation");
            self.dispatch(SubmissionIntent::ValidationRejected {
                outcomes: outcomes.clone(),
            });
            return Err(SubmissionError::ValidationFailed { outcomes });
        }

        let Some(url) = self.take_staged_url() else {
            tracing::info!("submission has no staged image");
            self.dispatch(SubmissionIntent::StagingMissing);
            return Err(SubmissionError::StagingMissing);
        };

        let request = CreateImageRequest {
            url,
            title: candidate.title,
            description: candidate.description,
        };

        match self.cancel.run(self.uploader.create(&request)).await {
            None => Err(SubmissionError::Cancelled),
            Some(Err(cause)) => {
                if cause.is_transport() {
                    tracing::warn!(error = %cause, "upload failed, backend unreachable");
                } else {
                    tracing::error!(error = %cause, "upload failed");
                }
                self.dispatch(SubmissionIntent::UploadFailed {
                    cause: cause.to_string(),
                });
                Err(SubmissionError::UploadFailed { cause })
            }
            Some(Ok(image)) => {
                if !self.head.prepend(image.clone()) {
                    tracing::debug!(id = %image.identifier, "created image already cached");
                }
                self.dispatch(SubmissionIntent::UploadSucceeded {
                    image: image.clone(),
                });
                tracing::info!(id = %image.identifier, "image created");
                Ok(image)
            }
        }
    }

    fn finish(&self, result: &Result<ImageResource, SubmissionError>) {
        match result {
            Ok(_) => {
                self.surface.notify(Notification::success(SUCCESS_MESSAGE));
                self.reset_and_close();
            }
            Err(SubmissionError::Cancelled) => {
                tracing::info!("submission surface closed mid-attempt, result discarded");
                self.dispatch(SubmissionIntent::Cancelled);
            }
            Err(err) => {
                self.surface.notify(Notification::error(failure_message(err)));
                if self.policy.resets_on_failure() {
                    self.reset_and_close();
                }
            }
        }
    }

    fn reset_and_close(&self) {
        self.dispatch(SubmissionIntent::Reset);
        self.surface.close();
    }
}

/// A `stage` or `submit` still running on the caller's behalf.
///
/// Dropped unsettled, it treats the operation like a closed surface: state
/// goes back to where a new attempt can start and nothing is notified.
struct Pending<'a> {
    pipeline: &'a SubmissionPipeline,
    on_drop: Option<SubmissionIntent>,
}

impl Pending<'_> {
    fn settle(mut self) {
        self.on_drop = None;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if let Some(intent) = self.on_drop.take() {
            tracing::info!(?intent, "submission abandoned before it settled");
            self.pipeline.dispatch(intent);
        }
    }
}

fn failure_message(err: &SubmissionError) -> String {
    match err {
        SubmissionError::StagingMissing => STAGING_MISSING_MESSAGE.to_string(),
        SubmissionError::UploadFailed { .. } => UPLOAD_FAILED_MESSAGE.to_string(),
        SubmissionError::StagingFailed { .. } => STAGING_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn policy_from_config() {
        let mut config = SubmissionConfig::default();
        assert_eq!(ResetPolicy::from(&config), ResetPolicy::Always);
        config.reset_on_failure = false;
        assert_eq!(ResetPolicy::from(&config), ResetPolicy::OnSuccess);
    }

    #[test]
    fn failure_messages() {
        assert_eq!(failure_message(&SubmissionError::StagingMissing), "Image does not exist");
        assert_eq!(
            failure_message(&SubmissionError::UploadFailed {
                cause: ApiError::Timeout { duration: 1 }
            }),
            "Error adding image"
        );
        let invalid = SubmissionError::ValidationFailed { outcomes: Vec::new() };
        assert!(failure_message(&invalid).starts_with("Invalid submission"));
    }
}
