use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::timeout;

use super::error::ApiError;
use super::traits::{ImageStager, ImageUploader, PageSource};
use crate::config::{ApiConfig, Config};
use crate::model::{CreateImageRequest, Cursor, FileBlob, ImageResource, Page, StagedImage};

/// Timeouts applied to every backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl From<&ApiConfig> for TimeoutConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            connect: Duration::from_secs(u64::from(api.connect_timeout_seconds)),
            request: Duration::from_secs(u64::from(api.timeout_seconds)),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

#[derive(Deserialize)]
struct CreatedImage {
    image: ImageResource,
}

#[derive(Deserialize)]
struct StagingResponse {
    data: StagedImage,
}

/// HTTP implementation of the fetch, stage and upload collaborators.
pub struct GalleryClient {
    client: Client,
    collection_url: Url,
    staging_url: Url,
    timeouts: TimeoutConfig,
}

impl GalleryClient {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let collection_url = Url::parse(&config.api.base_url)
            .and_then(|base| base.join(&config.api.collection_path))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.api.base_url, e)))?;

        let mut staging_url = Url::parse(&config.staging.endpoint)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.staging.endpoint, e)))?;
        if let Some(key) = &config.staging.api_key {
            staging_url.query_pairs_mut().append_pair("key", key);
        }

        let timeouts = TimeoutConfig::from(&config.api);
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            collection_url,
            staging_url,
            timeouts,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// Send `request` under the total timeout and decode a JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let result = timeout(self.timeouts.request, self.send_and_decode(request, url)).await;

        match result {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!(url = %url, "request timed out");
                Err(ApiError::Timeout {
                    duration: self.timeouts.request.as_secs(),
                })
            }
        }
    }

    async fn send_and_decode<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let connection_error = |source| ApiError::Connection {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(connection_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(connection_error)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": "..."}`, `{"error": {"message": "..."}}` and
/// `{"message": "..."}`; otherwise falls back to the raw text.
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        let message = value
            .get("error")
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(|m| m.as_str())))
            .or_else(|| value.get("message").and_then(|m| m.as_str()));
        if let Some(message) = message {
            return Some(message.to_string());
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl PageSource for GalleryClient {
    async fn fetch_page(&self, after: Option<&Cursor>) -> Result<Page, ApiError> {
        let mut url = self.collection_url.clone();
        if let Some(cursor) = after {
            url.query_pairs_mut().append_pair("after", cursor.as_str());
        }
        tracing::debug!(url = %url, "fetching page");

        let request = self.client.get(url.clone());
        self.execute(request, &url).await
    }
}

#[async_trait]
impl ImageStager for GalleryClient {
    async fn stage(&self, file: &FileBlob) -> Result<StagedImage, ApiError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone().unwrap_or_else(|| "upload".to_string()))
            .mime_str(&file.mime_type)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("image", part);

        tracing::debug!(size = file.size_bytes, mime = %file.mime_type, "staging file");
        let request = self.client.post(self.staging_url.clone()).multipart(form);
        let response: StagingResponse = self.execute(request, &self.staging_url).await?;
        Ok(response.data)
    }
}

#[async_trait]
impl ImageUploader for GalleryClient {
    async fn create(&self, request: &CreateImageRequest) -> Result<ImageResource, ApiError> {
        let http = self.client.post(self.collection_url.clone()).json(request);
        let created: CreatedImage = self.execute(http, &self.collection_url).await?;
        Ok(created.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url_joins_path() {
        let client = GalleryClient::from_config(&Config::default()).unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:3000/api/images"
        );
    }

    #[test]
    fn staging_key_becomes_query() {
        let mut config = Config::default();
        config.staging.api_key = Some("secret".to_string());
        let client = GalleryClient::from_config(&config).unwrap();
        assert_eq!(client.staging_url.query(), Some("key=secret"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            GalleryClient::from_config(&config),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn timeouts_follow_config() {
        let timeouts = TimeoutConfig::default();
        assert_eq!(timeouts.request, Duration::from_secs(30));
        assert_eq!(timeouts.connect, Duration::from_secs(5));
    }

    #[test]
    fn error_message_shapes() {
        assert_eq!(error_message(br#"{"error":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(
            error_message(br#"{"error":{"message":"deep"}}"#).as_deref(),
            Some("deep")
        );
        assert_eq!(error_message(br#"{"message":"m"}"#).as_deref(), Some("m"));
        assert_eq!(error_message(b"plain text").as_deref(), Some("plain text"));
        assert_eq!(error_message(b"  "), None);
    }
}
