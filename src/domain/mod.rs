// src/domain/mod.rs
pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

// Re-export common types for convenience
pub use errors::{
    AnalysisError, AnalysisResult, AppError, AppResult, ProviderError, ProviderResult,
};
pub use models::{
    Bar, IndicatorRow, IndicatorSeries, KeyMetrics, NewsItem, PriceSeries, Recommendation,
    RecommendationReport, SignalKind,
};
