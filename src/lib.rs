//! Client-side core of an image gallery.
//!
//! - [`loader`]: cursor-based collection loader with load-more and
//!   exhaustion tracking
//! - [`submission`]: validate → stage/upload → cache update → notify
//! - [`cache`]: session-scoped store shared by both
//! - [`validation`]: pure per-field rules
//! - [`api`]: collaborator traits and their HTTP implementation

pub mod api;
pub mod cache;
pub mod config;
pub mod loader;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod notify;
pub mod submission;
pub mod surface;
pub mod validation;

pub use cache::{CollectionCache, GALLERY_COLLECTION};
pub use config::Config;
pub use loader::{CollectionLoader, CollectionState, LoadError};
pub use model::{CandidateSubmission, Cursor, FileBlob, ImageResource, Page};
pub use submission::{SubmissionError, SubmissionPipeline};
pub use surface::{CancelToken, SurfaceLifetime};
