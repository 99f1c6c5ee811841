// src/application/dto/mod.rs
// Wire formats of the Yahoo Finance chart and search endpoints

pub mod parser;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartMeta {
    pub symbol: String,
    /// Seconds east of UTC for the listing exchange
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented OHLCV; Yahoo leaves `null` holes on halted days.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub news: Vec<NewsArticle>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub publisher: Option<String>,
    pub link: Option<String>,
    #[serde(rename = "providerPublishTime")]
    pub provider_publish_time: i64,
    pub summary: Option<String>,
}
