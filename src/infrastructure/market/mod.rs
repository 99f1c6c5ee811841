// src/infrastructure/market/mod.rs
// Yahoo Finance price series repository

use async_trait::async_trait;
use chrono::NaiveDate;
use url::Url;

use crate::application::dto::parser::parse_chart_response;
use crate::domain::errors::{ProviderError, ProviderResult};
use crate::domain::models::PriceSeries;
use crate::domain::repository::PriceSeriesRepository;
use crate::infrastructure::http::{parse_base_url, HttpClient, HttpResponse};

pub struct YahooPriceRepository {
    http: HttpClient,
    base_url: String,
}

impl YahooPriceRepository {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> ProviderResult<Url> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Network(format!("Cannot extend URL {}", self.base_url)))?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("period1", &epoch_seconds(start).to_string())
            .append_pair("period2", &epoch_seconds(end).to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }
}

#[async_trait]
impl PriceSeriesRepository for YahooPriceRepository {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<PriceSeries> {
        if symbol.trim().is_empty() {
            return Err(ProviderError::InvalidSymbol("empty symbol".to_string()));
        }

        log::info!("Fetching {} daily bars from {} to {}", symbol, start, end);
        let url = self.chart_url(symbol, start, end)?;
        let response = self.http.get(&url).await?;

        let series = interpret_chart(symbol, response)?;
        log::info!("Fetched {} bars for {}", series.len(), symbol);
        Ok(series)
    }
}

/// Map a chart response to a series. A chart error wins over the status
/// code since unknown symbols come back as a 404 with an error object.
fn interpret_chart(symbol: &str, response: HttpResponse) -> ProviderResult<PriceSeries> {
    match parse_chart_response(symbol, &response.body) {
        Ok(series) => Ok(series),
        Err(err @ ProviderError::InvalidSymbol(_)) => Err(err),
        Err(err) if response.is_success() => Err(err),
        Err(_) => Err(response.into_error()),
    }
}

fn epoch_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .timestamp()
}
