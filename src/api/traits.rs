//! Collaborator contracts consumed by the loader and the pipeline.

use async_trait::async_trait;

use super::error::ApiError;
use crate::model::{CreateImageRequest, Cursor, FileBlob, ImageResource, Page, StagedImage};

/// `GET collection?after=<cursor>`.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page following `after`, or the first page when `None`.
    async fn fetch_page(&self, after: Option<&Cursor>) -> Result<Page, ApiError>;
}

/// Uploads a raw file to obtain the durable URL a submission references.
#[async_trait]
pub trait ImageStager: Send + Sync {
    async fn stage(&self, file: &FileBlob) -> Result<StagedImage, ApiError>;
}

/// `POST collection { url, title, description }`.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Create the image; the server assigns its identifier.
    async fn create(&self, request: &CreateImageRequest) -> Result<ImageResource, ApiError>;
}
