// src/adapter/report.rs
// Plain-text rendering of a dashboard

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::adapter::coordinator::Dashboard;
use crate::config::Config;
use crate::domain::models::{IndicatorRow, NewsItem};

/// Number of trailing indicator rows printed.
const RECENT_ROWS: usize = 5;
const DEFAULT_PUBLISHER: &str = "Yahoo Finance";
const NO_DESCRIPTION: &str = "No description available";

pub fn render(dashboard: &Dashboard, config: &Config) -> String {
    ReportView { dashboard, config }.to_string()
}

struct ReportView<'a> {
    dashboard: &'a Dashboard,
    config: &'a Config,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let report = &self.dashboard.report;
        let recommendation = &report.recommendation;
        let metrics = &report.metrics;

        let title = format!(
            "{} - {} Price",
            report.symbol,
            self.config.display_name(&report.symbol)
        );
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        writeln!(f)?;

        writeln!(f, "Recommendation: {}", recommendation.recommendation)?;
        writeln!(f, "Confidence: {}%", recommendation.confidence)?;
        writeln!(f)?;

        writeln!(f, "Analysis Breakdown")?;
        for reason in &recommendation.reasons {
            writeln!(f, "  • {}", reason)?;
        }
        if !recommendation.unavailable.is_empty() {
            let skipped: Vec<String> = recommendation
                .unavailable
                .iter()
                .map(|kind| kind.to_string())
                .collect();
            writeln!(f, "  (not enough history for: {})", skipped.join(", "))?;
        }
        writeln!(f)?;

        writeln!(f, "Key Metrics")?;
        writeln!(f, "  Current Price  {}", format_currency(metrics.current_price))?;
        writeln!(f, "  Daily Change   {}", format_percent(metrics.daily_change_pct))?;
        writeln!(f, "  Volume         {}", group_thousands(&metrics.volume.to_string()))?;
        writeln!(f, "  RSI            {}", format_optional(metrics.rsi))?;
        writeln!(f)?;

        writeln!(f, "Recent Indicators")?;
        writeln!(
            f,
            "  {:<10} {:>10} {:>10} {:>10} {:>7} {:>8} {:>8} {:>10} {:>10}",
            "Date", "Close", "SMA_20", "SMA_50", "RSI", "MACD", "Signal", "BB_upper", "BB_lower"
        )?;
        let rows = &report.series.rows;
        for row in &rows[rows.len().saturating_sub(RECENT_ROWS)..] {
            write_indicator_row(f, row)?;
        }
        writeln!(f)?;

        writeln!(f, "Latest Financial News")?;
        if self.dashboard.news.is_empty() {
            writeln!(f, "  No recent news available.")?;
        }
        for item in &self.dashboard.news {
            write_news_item(f, item)?;
        }

        Ok(())
    }
}

fn write_indicator_row(f: &mut fmt::Formatter, row: &IndicatorRow) -> fmt::Result {
    writeln!(
        f,
        "  {:<10} {:>10.2} {:>10} {:>10} {:>7} {:>8} {:>8} {:>10} {:>10}",
        row.bar.date.format("%Y-%m-%d").to_string(),
        row.bar.close,
        format_optional(row.sma_20),
        format_optional(row.sma_50),
        format_optional(row.rsi),
        format_optional(row.macd),
        format_optional(row.signal_line),
        format_optional(row.bb_upper),
        format_optional(row.bb_lower),
    )
}

fn write_news_item(f: &mut fmt::Formatter, item: &NewsItem) -> fmt::Result {
    writeln!(f, "  {}", item.title)?;
    writeln!(
        f,
        "    Source: {}",
        item.publisher.as_deref().unwrap_or(DEFAULT_PUBLISHER)
    )?;
    writeln!(
        f,
        "    Published: {}",
        item.published_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(
        f,
        "    {}",
        item.description.as_deref().unwrap_or(NO_DESCRIPTION)
    )?;
    if let Some(link) = &item.link {
        writeln!(f, "    Read more: {}", link)?;
    }
    Ok(())
}

/// `$1,234.57`; half-cent values round away from zero.
pub fn format_currency(value: f64) -> String {
    let Some(amount) = Decimal::from_f64(value) else {
        return "n/a".to_string();
    };
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

/// Insert a comma every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
