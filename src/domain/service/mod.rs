// src/domain/service/mod.rs
// Domain service interfaces

use crate::domain::errors::AnalysisResult;
use crate::domain::models::{IndicatorSeries, PriceSeries, RecommendationReport};

pub trait TechnicalAnalysisService {
    /// Augment a price series with SMA, RSI, MACD and Bollinger columns
    fn calculate_indicators(&self, series: &PriceSeries) -> AnalysisResult<IndicatorSeries>;
}

pub trait RecommendationService {
    /// Vote on the last two rows of an indicator series
    fn recommend(&self, series: &IndicatorSeries) -> AnalysisResult<RecommendationReport>;
}
