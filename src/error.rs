use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColuError {
    // Transport errors
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Api returned status {status} for {endpoint}/{param}")]
    Api {
        status: u16,
        endpoint: String,
        param: String,
    },

    #[error("Unexpected response shape from {endpoint}/{param}: {source}")]
    UnexpectedShape {
        endpoint: String,
        param: String,
        source: serde_json::Error,
    },

    // Integrity errors
    #[error("Identity mismatch: requested {requested}, response carried {received}")]
    IdentityMismatch { requested: String, received: String },

    #[error("No UTXO available for asset {0}")]
    NoUtxoAvailable(String),

    // Storage errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ColuError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ColuError::Transport(_) => true,
            ColuError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            ColuError::Transport(_) | ColuError::Api { .. } => "transport",
            ColuError::UnexpectedShape { .. } => "shape",
            ColuError::IdentityMismatch { .. } | ColuError::NoUtxoAvailable(_) => "integrity",
            ColuError::Io(_) | ColuError::Serialization(_) => "storage",
        }
    }
}

// Result type alias for convenience
pub type ColuResult<T> = Result<T, ColuError>;
