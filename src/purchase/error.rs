/// Errors returned by a [`PurchaseApi`](super::PurchaseApi).
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    /// The checkout endpoint refused the order.
    #[error("purchase rejected ({status}): {message}")]
    Rejected {
        /// Status code reported by the endpoint.
        status: u16,
        /// Reason given by the endpoint.
        message: String,
    },

    /// The request never reached the endpoint or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be encoded or the response could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
