// src/domain/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{AnalysisError, AnalysisResult};

/// One trading-day observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars for one symbol, ascending by date with unique dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicate dates and
    /// non-positive or non-finite prices. An empty series is allowed here;
    /// consumers decide whether they can work with it.
    pub fn new(symbol: &str, bars: Vec<Bar>) -> AnalysisResult<Self> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AnalysisError::InvalidSeries(format!(
                    "dates must be strictly increasing: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        if let Some(bar) = bars.iter().find(|b| {
            [b.open, b.high, b.low, b.close]
                .iter()
                .any(|p| !p.is_finite() || *p <= 0.0)
        }) {
            return Err(AnalysisError::InvalidSeries(format!(
                "non-positive or non-finite price on {}",
                bar.date
            )));
        }

        Ok(Self {
            symbol: symbol.to_string(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn close_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

/// A bar together with the indicator values computed for its date.
/// `None` marks a value inside the indicator's warm-up window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal_line: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

/// The price series augmented with indicator columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub symbol: String,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The previous and the latest row.
    pub fn last_two(&self) -> AnalysisResult<(&IndicatorRow, &IndicatorRow)> {
        match self.rows.as_slice() {
            [.., previous, latest] => Ok((previous, latest)),
            _ => Err(AnalysisError::InsufficientHistory {
                required: 2,
                available: self.rows.len(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four independent checks voted on by the recommendation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    RsiLevel,
    MacdCrossover,
    MaCrossover,
    BollingerPosition,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [
        SignalKind::RsiLevel,
        SignalKind::MacdCrossover,
        SignalKind::MaCrossover,
        SignalKind::BollingerPosition,
    ];
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignalKind::RsiLevel => write!(f, "RSI level"),
            SignalKind::MacdCrossover => write!(f, "MACD crossover"),
            SignalKind::MaCrossover => write!(f, "MA crossover"),
            SignalKind::BollingerPosition => write!(f, "Bollinger position"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub recommendation: Recommendation,
    /// Percentage in [0, 100].
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub total_signals: usize,
    /// Signals that could not vote because an input indicator was still
    /// inside its warm-up window.
    pub unavailable: Vec<SignalKind>,
}

/// Headline numbers shown next to the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub current_price: f64,
    pub daily_change_pct: f64,
    pub volume: u64,
    pub rsi: Option<f64>,
}

impl KeyMetrics {
    pub fn from_series(series: &IndicatorSeries) -> AnalysisResult<Self> {
        let (previous, latest) = series.last_two()?;

        let daily_change_pct =
            (latest.bar.close - previous.bar.close) / previous.bar.close * 100.0;

        Ok(Self {
            current_price: latest.bar.close,
            daily_change_pct,
            volume: latest.bar.volume,
            rsi: latest.rsi,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: Option<String>,
    pub link: Option<String>,
    pub published_at: DateTime<Utc>,
    pub description: Option<String>,
}
