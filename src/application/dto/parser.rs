// src/application/dto/parser.rs
// Parsers from Yahoo payloads to domain models

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use super::{ChartEnvelope, NewsArticle, Quote, SearchResponse};
use crate::domain::errors::{ProviderError, ProviderResult};
use crate::domain::models::{Bar, NewsItem, PriceSeries};

pub const NO_DATA_MESSAGE: &str = "No data found for this symbol";

/// Parse a chart payload into a daily price series.
///
/// Rows with a missing value or a non-positive price are dropped; when two rows
/// land on the same calendar date the later one wins.
pub fn parse_chart_response(symbol: &str, body: &str) -> ProviderResult<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.chart.error {
        return Err(ProviderError::InvalidSymbol(format!(
            "{}: {} ({})",
            symbol, error.description, error.code
        )));
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ProviderError::NoData(NO_DATA_MESSAGE.to_string()))?;
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let mut bars = BTreeMap::new();
    for (i, &timestamp) in result.timestamp.iter().enumerate() {
        let Some(bar) = bar_at(&quote, i, timestamp + offset)? else {
            log::debug!("{}: skipping incomplete row at {}", symbol, timestamp);
            continue;
        };
        if [bar.open, bar.high, bar.low, bar.close].iter().any(|p| *p <= 0.0) {
            log::debug!("{}: skipping non-positive price on {}", symbol, bar.date);
            continue;
        }
        bars.insert(bar.date, bar);
    }

    if bars.is_empty() {
        return Err(ProviderError::NoData(NO_DATA_MESSAGE.to_string()));
    }

    PriceSeries::new(&result.meta.symbol, bars.into_values().collect())
        .map_err(|e| ProviderError::Parse(e.to_string()))
}

fn bar_at(quote: &Quote, i: usize, local_seconds: i64) -> ProviderResult<Option<Bar>> {
    let value = |column: &[Option<f64>]| column.get(i).copied().flatten();

    let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
        value(&quote.open),
        value(&quote.high),
        value(&quote.low),
        value(&quote.close),
        quote.volume.get(i).copied().flatten(),
    ) else {
        return Ok(None);
    };

    Ok(Some(Bar {
        date: trading_date(local_seconds)?,
        open,
        high,
        low,
        close,
        volume,
    }))
}

fn trading_date(local_seconds: i64) -> ProviderResult<NaiveDate> {
    DateTime::from_timestamp(local_seconds, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ProviderError::Parse(format!("Invalid timestamp: {}", local_seconds)))
}

/// Parse a search payload into news items, in payload order.
pub fn parse_news_response(body: &str) -> ProviderResult<Vec<NewsItem>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    response.news.into_iter().map(news_item).collect()
}

fn news_item(article: NewsArticle) -> ProviderResult<NewsItem> {
    let published_at = DateTime::from_timestamp(article.provider_publish_time, 0).ok_or_else(|| {
        ProviderError::Parse(format!(
            "Invalid publish time for {:?}: {}",
            article.title, article.provider_publish_time
        ))
    })?;

    Ok(NewsItem {
        title: article.title,
        publisher: article.publisher,
        link: article.link,
        published_at,
        description: article.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -14400 },
                "timestamp": [1717162200, 1717421400, 1717507800, 1717594200, 1717594300],
                "indicators": { "quote": [{
                    "open":   [191.44, 192.90, null,   195.69, 195.70],
                    "high":   [192.57, 194.99, 195.32, 196.50, 196.60],
                    "low":    [189.91, 192.52, 193.03, 194.17, 194.20],
                    "close":  [192.25, 194.03, 194.35, 195.87, 196.00],
                    "volume": [75158300, 50080500, 47471400, 54156800, 100]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn chart_rows_become_daily_bars() {
        let series = parse_chart_response("aapl", CHART).unwrap();

        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(
            series.dates(),
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            ]
        );
        // Same-day duplicate keeps the later row
        let last = series.bars().last().unwrap();
        assert_eq!(last.close, 196.00);
        assert_eq!(last.volume, 100);
    }

    #[test]
    fn rows_with_a_zero_price_are_skipped() {
        let body = r#"{"chart":{"result":[{
            "meta": { "symbol": "AAPL", "gmtoffset": 0 },
            "timestamp": [1717372800, 1717459200, 1717545600],
            "indicators": { "quote": [{
                "open":   [192.90, 194.64, 194.00],
                "high":   [194.99, 195.32, 196.50],
                "low":    [192.52, 0.0,    193.90],
                "close":  [194.03, 194.35, 195.87],
                "volume": [50080500, 47471400, 54156800]
            }]}
        }],"error":null}}"#;
        let series = parse_chart_response("AAPL", body).unwrap();

        assert_eq!(
            series.dates(),
            vec![
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            ]
        );
    }

    #[test]
    fn chart_error_is_invalid_symbol() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("ZZZZ", body).unwrap_err();

        match err {
            ProviderError::InvalidSymbol(message) => {
                assert!(message.starts_with("ZZZZ: No data found"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_chart_is_no_data() {
        let body = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL"},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let err = parse_chart_response("AAPL", body).unwrap_err();

        assert_eq!(err.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_chart_response("AAPL", "<html>"),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn news_articles_are_mapped() {
        let body = r#"{
            "news": [
                {
                    "uuid": "a1",
                    "title": "Apple unveils new chips",
                    "publisher": "Reuters",
                    "link": "https://example.com/a1",
                    "providerPublishTime": 1717594200,
                    "type": "STORY"
                },
                { "title": "Markets wrap", "providerPublishTime": 1717500000 }
            ]
        }"#;
        let news = parse_news_response(body).unwrap();

        assert_eq!(news.len(), 2);
        assert_eq!(news[0].title, "Apple unveils new chips");
        assert_eq!(news[0].publisher.as_deref(), Some("Reuters"));
        assert_eq!(news[0].published_at.timestamp(), 1717594200);
        assert!(news[1].publisher.is_none());
        assert!(news[1].description.is_none());
    }

    #[test]
    fn missing_news_field_is_empty() {
        assert!(parse_news_response(r#"{"count": 0}"#).unwrap().is_empty());
    }
}
