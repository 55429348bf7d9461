//! Gallery data model shared by the loader, the pipeline and the HTTP client.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque pagination token handed out by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image the backend has accepted. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    #[serde(rename = "id")]
    pub identifier: String,
    pub url: String,
    pub title: String,
    pub description: String,
    /// Backend timestamp; older backends call it `ts`.
    #[serde(default, alias = "ts")]
    pub created_at: i64,
}

impl ImageResource {
    /// Link the preview overlay offers for opening the full-size original.
    pub fn original_link(&self) -> &str {
        &self.url
    }
}

/// One page of the collection as returned by `GET collection?after=<cursor>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "data", default)]
    pub items: Vec<ImageResource>,
    /// Absent, null or empty means the collection is exhausted.
    #[serde(rename = "after", default, deserialize_with = "non_empty_cursor")]
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn new(items: Vec<ImageResource>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

fn non_empty_cursor<'de, D>(deserializer: D) -> Result<Option<Cursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let token: Option<String> = Option::deserialize(deserializer)?;
    Ok(token.filter(|t| !t.is_empty()).map(Cursor))
}

/// Raw file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: Option<String>,
    pub size_bytes: u64,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: None,
            size_bytes: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// A blob known only by its metadata (size and type), with no content.
    pub fn described(size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: None,
            size_bytes,
            mime_type: mime_type.into(),
            bytes: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Form input for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSubmission {
    pub file: Option<FileBlob>,
    pub title: String,
    pub description: String,
}

impl CandidateSubmission {
    pub fn new(file: Option<FileBlob>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            file,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Result of staging a raw file: the durable URL the form will reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StagedImage {
    pub url: String,
}

/// Body of the final `POST collection` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateImageRequest {
    pub url: String,
    pub title: String,
    pub description: String,
}
