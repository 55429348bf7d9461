//! Shared test utilities: fixtures and in-memory collaborators.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use gallery::api::{ApiError, ImageStager, ImageUploader, PageSource};
use gallery::model::{CreateImageRequest, StagedImage};
use gallery::notify::{Notification, SubmissionSurface};
use gallery::{CandidateSubmission, Cursor, FileBlob, ImageResource, Page};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// -- Fixtures -----------------------------------------------------------------

pub fn image(id: &str) -> ImageResource {
    ImageResource {
        identifier: id.to_string(),
        url: format!("https://img.example/{id}.png"),
        title: format!("Image {id}"),
        description: format!("description of {id}"),
        created_at: 0,
    }
}

pub fn page(ids: &[&str], after: Option<&str>) -> Page {
    Page::new(ids.iter().map(|id| image(id)).collect(), after.map(Cursor::new))
}

pub fn ids(items: &[ImageResource]) -> Vec<String> {
    items.iter().map(|i| i.identifier.clone()).collect()
}

pub fn png(size: u64) -> FileBlob {
    FileBlob::described(size, "image/png").with_name("photo.png")
}

pub fn candidate(file: Option<FileBlob>, title: &str, description: &str) -> CandidateSubmission {
    CandidateSubmission::new(file, title, description)
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: message.to_string(),
    }
}

// -- Fetch collaborator -------------------------------------------------------

/// Replays queued responses and records the cursor of every call.
#[derive(Default)]
pub struct FakePageSource {
    responses: Mutex<VecDeque<Result<Page, ApiError>>>,
    calls: Mutex<Vec<Option<String>>>,
    delay: Mutex<Option<Duration>>,
}

impl FakePageSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: Result<Page, ApiError>) {
        self.responses.lock().push_back(response);
    }

    pub fn push_page(&self, ids: &[&str], after: Option<&str>) {
        self.push(Ok(page(ids, after)));
    }

    /// Delay every response, so overlapping calls can be observed.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl PageSource for FakePageSource {
    async fn fetch_page(&self, after: Option<&Cursor>) -> Result<Page, ApiError> {
        self.calls.lock().push(after.map(|c| c.as_str().to_string()));
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(server_error("no response queued")))
    }
}

// -- Stage / upload collaborators ---------------------------------------------

/// Stager that hands back a fixed URL, or fails when told to.
pub struct FakeStager {
    fail: Mutex<Option<String>>,
    calls: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

impl FakeStager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: Mutex::new(None),
            calls: AtomicUsize::new(0),
            delay: Mutex::new(None),
        })
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail.lock() = Some(message.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub const STAGED_URL: &str = "https://staging.example/abc.png";

#[async_trait]
impl ImageStager for FakeStager {
    async fn stage(&self, _file: &FileBlob) -> Result<StagedImage, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.fail.lock().clone() {
            Some(message) => Err(server_error(&message)),
            None => Ok(StagedImage {
                url: STAGED_URL.to_string(),
            }),
        }
    }
}

/// Uploader that echoes the request back as a created image.
pub struct FakeUploader {
    requests: Mutex<Vec<CreateImageRequest>>,
    fail: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    next_id: AtomicUsize,
}

impl FakeUploader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail: Mutex::new(None),
            delay: Mutex::new(None),
            next_id: AtomicUsize::new(100),
        })
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail.lock() = Some(message.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn requests(&self) -> Vec<CreateImageRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ImageUploader for FakeUploader {
    async fn create(&self, request: &CreateImageRequest) -> Result<ImageResource, ApiError> {
        self.requests.lock().push(request.clone());
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.fail.lock().clone() {
            return Err(server_error(&message));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ImageResource {
            identifier: id.to_string(),
            url: request.url.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            created_at: 1,
        })
    }
}

// -- Surface ------------------------------------------------------------------

/// Records notifications and close requests.
#[derive(Default)]
pub struct RecordingSurface {
    notifications: Mutex<Vec<Notification>>,
    closes: AtomicUsize,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl SubmissionSurface for RecordingSurface {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
