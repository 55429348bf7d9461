//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (load more, submit) or the outcome of
/// an I/O step (page arrived, upload failed).
pub trait Intent: Send + 'static {}
