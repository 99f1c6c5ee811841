// src/application/usecase/analysis_usecase.rs
// Stock analysis use case: fetch, indicators, recommendation, metrics

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::models::{IndicatorSeries, KeyMetrics, RecommendationReport};
use crate::domain::repository::PriceSeriesRepository;
use crate::domain::service::{RecommendationService, TechnicalAnalysisService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub start: NaiveDate,
    /// Exclusive
    pub end: NaiveDate,
}

impl AnalysisRequest {
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            start,
            end,
        }
    }

    /// The `days` calendar days leading up to `end`.
    pub fn trailing(symbol: &str, end: NaiveDate, days: i64) -> AppResult<Self> {
        let start = Duration::try_days(days)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                AppError::Config(format!("Lookback of {} days from {} is out of range", days, end))
            })?;
        Ok(Self::new(symbol, start, end))
    }

    fn validate(&self) -> AppResult<()> {
        if self.symbol.is_empty() {
            return Err(AppError::Config("No stock symbol given".to_string()));
        }
        if self.start >= self.end {
            return Err(AppError::Config(format!(
                "Start date {} must be before end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Everything computed for one symbol in one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub series: IndicatorSeries,
    pub recommendation: RecommendationReport,
    pub metrics: KeyMetrics,
}

#[async_trait]
pub trait StockAnalysisUseCase {
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport>;
}

pub struct StockAnalysisProcessor {
    price_repository: Arc<dyn PriceSeriesRepository + Send + Sync>,
    analysis_service: Arc<dyn TechnicalAnalysisService + Send + Sync>,
    recommendation_service: Arc<dyn RecommendationService + Send + Sync>,
}

impl StockAnalysisProcessor {
    pub fn new(
        price_repository: Arc<dyn PriceSeriesRepository + Send + Sync>,
        analysis_service: Arc<dyn TechnicalAnalysisService + Send + Sync>,
        recommendation_service: Arc<dyn RecommendationService + Send + Sync>,
    ) -> Self {
        Self {
            price_repository,
            analysis_service,
            recommendation_service,
        }
    }
}

#[async_trait]
impl StockAnalysisUseCase for StockAnalysisProcessor {
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport> {
        request.validate()?;

        let prices = self
            .price_repository
            .fetch(&request.symbol, request.start, request.end)
            .await?;

        let series = self.analysis_service.calculate_indicators(&prices)?;
        let recommendation = self.recommendation_service.recommend(&series)?;
        let metrics = KeyMetrics::from_series(&series)?;

        log::info!(
            "Analysis of {} complete: {} over {} bars",
            request.symbol,
            recommendation.recommendation,
            series.len()
        );

        Ok(AnalysisReport {
            symbol: request.symbol.clone(),
            series,
            recommendation,
            metrics,
        })
    }
}
