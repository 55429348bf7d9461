//! Base trait for state snapshots.

/// Marker trait for state objects.
///
/// States are cloned out to readers as snapshots, so they must be cheap
/// to compare and self-contained.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
