use thiserror::Error;

use crate::api::ApiError;

/// Why a load did not produce a page.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Another load is still unresolved; no fetch was issued.
    #[error("A load is already in progress")]
    InFlight,

    /// The collection has no further pages; no fetch was issued.
    #[error("The collection has no more pages")]
    Exhausted,

    /// The fetch collaborator failed. Existing items are kept.
    #[error("Failed to fetch page: {cause}")]
    FetchFailed {
        #[source]
        cause: ApiError,
    },

    /// The gallery surface closed before the page arrived.
    #[error("Load cancelled")]
    Cancelled,
}
