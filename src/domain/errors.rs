// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// True when the failure comes from what the user asked for (bad symbol,
    /// not enough data) rather than from the system itself.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            AppError::Provider(ProviderError::InvalidSymbol(_))
                | AppError::Provider(ProviderError::NoData(_))
                | AppError::Analysis(AnalysisError::InsufficientData(_))
                | AppError::Analysis(AnalysisError::InsufficientHistory { .. })
                | AppError::Config(_)
        )
    }
}

/// Failures surfaced by a price or news provider. Never retried.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("{0}")]
    NoData(String),

    #[error("Data parse error: {0}")]
    Parse(String),
}

impl From<hyper::Error> for ProviderError {
    fn from(err: hyper::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data for analysis: {0}")]
    InsufficientData(String),

    #[error("Insufficient history: need at least {required} observations, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Indicator calculation error: {0}")]
    Computation(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type ProviderResult<T> = Result<T, ProviderError>;
pub type AnalysisResult<T> = Result<T, AnalysisError>;
