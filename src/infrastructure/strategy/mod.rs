// src/infrastructure/strategy/mod.rs
// Rule-based recommendation strategy

use crate::domain::errors::AnalysisResult;
use crate::domain::models::{
    IndicatorRow, IndicatorSeries, Recommendation, RecommendationReport, SignalKind,
};
use crate::domain::service::RecommendationService;

const NEUTRAL_REASON: &str = "Technical indicators are neutral";
const HOLD_CONFIDENCE: f64 = 50.0;

/// Outcome of a single signal check.
#[derive(Debug, Clone, PartialEq)]
enum Vote {
    Buy(String),
    Sell(String),
    Abstain,
    /// An input was still inside its warm-up window.
    Unavailable,
}

/// Direction of a crossover between two lines over consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Cross {
    Above,
    Below,
    Flat,
}

/// Votes RSI level, MACD crossover, MA crossover and Bollinger position
/// with equal weight and picks the strict majority.
pub struct RuleBasedStrategy {
    rsi_overbought: f64,
    rsi_oversold: f64,
}

impl RuleBasedStrategy {
    pub fn new(rsi_overbought: f64, rsi_oversold: f64) -> Self {
        Self {
            rsi_overbought,
            rsi_oversold,
        }
    }

    fn evaluate(&self, kind: SignalKind, previous: &IndicatorRow, latest: &IndicatorRow) -> Vote {
        match kind {
            SignalKind::RsiLevel => match latest.rsi {
                None => Vote::Unavailable,
                Some(rsi) if rsi < self.rsi_oversold => {
                    Vote::Buy(format!("RSI is oversold ({:.2})", rsi))
                }
                Some(rsi) if rsi > self.rsi_overbought => {
                    Vote::Sell(format!("RSI is overbought ({:.2})", rsi))
                }
                Some(_) => Vote::Abstain,
            },
            SignalKind::MacdCrossover => match crossover(
                (previous.macd, previous.signal_line),
                (latest.macd, latest.signal_line),
            ) {
                None => Vote::Unavailable,
                Some(Cross::Above) => Vote::Buy("MACD crossed above signal line".to_string()),
                Some(Cross::Below) => Vote::Sell("MACD crossed below signal line".to_string()),
                Some(Cross::Flat) => Vote::Abstain,
            },
            SignalKind::MaCrossover => match crossover(
                (previous.sma_20, previous.sma_50),
                (latest.sma_20, latest.sma_50),
            ) {
                None => Vote::Unavailable,
                Some(Cross::Above) => {
                    Vote::Buy("Short-term MA crossed above long-term MA".to_string())
                }
                Some(Cross::Below) => {
                    Vote::Sell("Short-term MA crossed below long-term MA".to_string())
                }
                Some(Cross::Flat) => Vote::Abstain,
            },
            SignalKind::BollingerPosition => match (latest.bb_lower, latest.bb_upper) {
                (Some(lower), Some(upper)) => {
                    let close = latest.bar.close;
                    if close < lower {
                        Vote::Buy("Price below lower Bollinger Band".to_string())
                    } else if close > upper {
                        Vote::Sell("Price above upper Bollinger Band".to_string())
                    } else {
                        Vote::Abstain
                    }
                }
                _ => Vote::Unavailable,
            },
        }
    }
}

impl Default for RuleBasedStrategy {
    fn default() -> Self {
        Self::new(70.0, 30.0)
    }
}

impl RecommendationService for RuleBasedStrategy {
    fn recommend(&self, series: &IndicatorSeries) -> AnalysisResult<RecommendationReport> {
        let (previous, latest) = series.last_two()?;

        let mut reasons = Vec::new();
        let mut unavailable = Vec::new();
        let mut buy_signals = 0;
        let mut sell_signals = 0;
        let mut total_signals = 0;

        for kind in SignalKind::ALL {
            match self.evaluate(kind, previous, latest) {
                Vote::Buy(reason) => {
                    buy_signals += 1;
                    reasons.push(reason);
                }
                Vote::Sell(reason) => {
                    sell_signals += 1;
                    reasons.push(reason);
                }
                Vote::Abstain => {}
                Vote::Unavailable => {
                    log::warn!(
                        "{}: {} skipped, indicator undefined on {}",
                        series.symbol,
                        kind,
                        latest.bar.date
                    );
                    unavailable.push(kind);
                }
            }
            total_signals += 1;
        }

        let (recommendation, confidence) = if buy_signals > sell_signals {
            (
                Recommendation::Buy,
                buy_signals as f64 / total_signals as f64 * 100.0,
            )
        } else if sell_signals > buy_signals {
            (
                Recommendation::Sell,
                sell_signals as f64 / total_signals as f64 * 100.0,
            )
        } else {
            reasons.push(NEUTRAL_REASON.to_string());
            (Recommendation::Hold, HOLD_CONFIDENCE)
        };

        log::info!(
            "{}: {} ({}% confidence, {} buy / {} sell of {})",
            series.symbol,
            recommendation,
            confidence,
            buy_signals,
            sell_signals,
            total_signals
        );

        Ok(RecommendationReport {
            recommendation,
            confidence,
            reasons,
            buy_signals,
            sell_signals,
            total_signals,
            unavailable,
        })
    }
}

/// `None` when any of the four values is undefined.
fn crossover(
    previous: (Option<f64>, Option<f64>),
    latest: (Option<f64>, Option<f64>),
) -> Option<Cross> {
    let (prev_line, prev_ref) = (previous.0?, previous.1?);
    let (line, reference) = (latest.0?, latest.1?);

    Some(if line > reference && prev_line <= prev_ref {
        Cross::Above
    } else if line < reference && prev_line >= prev_ref {
        Cross::Below
    } else {
        Cross::Flat
    })
}
