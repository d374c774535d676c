use thiserror::Error;

/// Rejected processor or decay settings. Raised before any pool is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("seeded multiplier must be at least 1, got {0}")]
    SeededMultiplier(u32),

    #[error("mixed multiplier must be at least 1, got {0}")]
    MixedMultiplier(u32),

    #[error("total decay days must be at least 1, got {0}")]
    TotalDecayDays(u32)
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RatingError {
    #[error("rating update is numerically unstable (w = {w})")]
    Unstable { w: f64 }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("invalid stored value in column {column}: {value}")]
    InvalidValue { column: &'static str, value: String }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("leaderboard '{0}' does not exist")]
    UnknownLeaderboard(String),

    #[error(transparent)]
    Store(#[from] StoreError)
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error)
}
