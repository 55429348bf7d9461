//! Backend collaborators: contracts and their HTTP implementation.

mod client;
mod error;
mod traits;

pub use client::{GalleryClient, TimeoutConfig};
pub use error::ApiError;
pub use traits::{ImageStager, ImageUploader, PageSource};
