// src/infrastructure/analysis/mod.rs
// Implementation of the technical analysis service

pub mod indicators;

use crate::domain::errors::{AnalysisError, AnalysisResult};
use crate::domain::models::{IndicatorRow, IndicatorSeries, PriceSeries};
use crate::domain::service::TechnicalAnalysisService;

use indicators::{calculate_bollinger_bands, calculate_macd, calculate_rsi, calculate_sma};

/// Lookback windows used by the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSettings {
    pub sma_short_period: usize,
    pub sma_long_period: usize,
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_short_period: 20,
            sma_long_period: 50,
            rsi_period: 14,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
        }
    }
}

pub struct TechnicalAnalysisImpl {
    settings: IndicatorSettings,
}

impl TechnicalAnalysisImpl {
    pub fn new(settings: IndicatorSettings) -> Self {
        Self { settings }
    }
}

impl Default for TechnicalAnalysisImpl {
    fn default() -> Self {
        Self::new(IndicatorSettings::default())
    }
}

impl TechnicalAnalysisService for TechnicalAnalysisImpl {
    fn calculate_indicators(&self, series: &PriceSeries) -> AnalysisResult<IndicatorSeries> {
        if series.is_empty() {
            return Err(AnalysisError::InsufficientData(format!(
                "No price data for {}",
                series.symbol()
            )));
        }

        let s = &self.settings;
        if series.len() < s.sma_long_period {
            log::warn!(
                "{}: only {} bars, indicators will be partially undefined (need {})",
                series.symbol(),
                series.len(),
                s.sma_long_period
            );
        }

        let prices = series.close_prices();

        let sma_short = calculate_sma(&prices, s.sma_short_period);
        let sma_long = calculate_sma(&prices, s.sma_long_period);
        let rsi = calculate_rsi(&prices, s.rsi_period);
        let (macd, signal_line) = calculate_macd(
            &prices,
            s.macd_fast_period,
            s.macd_slow_period,
            s.macd_signal_period,
        );
        let (bb_upper, _, bb_lower) =
            calculate_bollinger_bands(&prices, s.bollinger_period, s.bollinger_std_dev);

        let rows = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                bar: *bar,
                sma_20: sma_short[i],
                sma_50: sma_long[i],
                rsi: rsi[i],
                macd: macd[i],
                signal_line: signal_line[i],
                bb_upper: bb_upper[i],
                bb_lower: bb_lower[i],
            })
            .collect::<Vec<_>>();

        for row in &rows {
            check_finite(row)?;
        }

        log::debug!(
            "{}: computed indicators over {} bars",
            series.symbol(),
            rows.len()
        );

        Ok(IndicatorSeries {
            symbol: series.symbol().to_string(),
            rows,
        })
    }
}

fn check_finite(row: &IndicatorRow) -> AnalysisResult<()> {
    let columns = [
        ("SMA_20", row.sma_20),
        ("SMA_50", row.sma_50),
        ("RSI", row.rsi),
        ("MACD", row.macd),
        ("Signal_Line", row.signal_line),
        ("BB_upper", row.bb_upper),
        ("BB_lower", row.bb_lower),
    ];

    match columns
        .iter()
        .find(|(_, value)| value.map_or(false, |v| !v.is_finite()))
    {
        Some((name, value)) => Err(AnalysisError::Computation(format!(
            "{} is {:?} on {}",
            name, value, row.bar.date
        ))),
        None => Ok(()),
    }
}
