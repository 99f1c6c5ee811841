// src/domain/repository/mod.rs
// Repository interfaces for the external data sources

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::errors::ProviderResult;
use crate::domain::models::{NewsItem, PriceSeries};

/// Source of daily OHLCV bars.
#[async_trait]
pub trait PriceSeriesRepository {
    /// Daily bars for `symbol` from `start` (inclusive) to `end` (exclusive).
    async fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> ProviderResult<PriceSeries>;
}

/// Source of news headlines for a symbol.
#[async_trait]
pub trait NewsRepository {
    async fn fetch_news(&self, symbol: &str) -> ProviderResult<Vec<NewsItem>>;
}
