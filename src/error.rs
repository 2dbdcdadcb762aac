use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

/// Config loading and validation failures.
///
/// Library callers match on these; the binary wraps them in `anyhow` context.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to save config: {0}")]
    Save(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Store errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dish {0} not found")]
    UnknownDish(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("row decode failed: {0}")]
    Decode(String),

    #[error("backend not available: {0}")]
    Unavailable(String),

    #[error("sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the failure is caused by the caller's input rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownDish(_) | Self::InvalidInput(_))
    }
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("gateway: {0}")]
    Gateway(String),

    #[error("websocket send failed: {0}")]
    WebSocket(String),
}
