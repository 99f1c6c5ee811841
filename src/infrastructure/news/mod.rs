// src/infrastructure/news/mod.rs
// Yahoo Finance news repository

use async_trait::async_trait;

use crate::application::dto::parser::parse_news_response;
use crate::domain::errors::ProviderResult;
use crate::domain::models::NewsItem;
use crate::domain::repository::NewsRepository;
use crate::infrastructure::http::{parse_base_url, HttpClient};

pub struct YahooNewsRepository {
    http: HttpClient,
    base_url: String,
    news_count: usize,
}

impl YahooNewsRepository {
    pub fn new(http: HttpClient, base_url: &str, news_count: usize) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            news_count,
        }
    }
}

#[async_trait]
impl NewsRepository for YahooNewsRepository {
    async fn fetch_news(&self, symbol: &str) -> ProviderResult<Vec<NewsItem>> {
        let mut url = parse_base_url(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("q", symbol)
            .append_pair("quotesCount", "0")
            .append_pair("newsCount", &self.news_count.to_string());

        let response = self.http.get(&url).await?;
        if !response.is_success() {
            return Err(response.into_error());
        }

        let news = parse_news_response(&response.body)?;
        log::debug!("{} news items for {}", news.len(), symbol);
        Ok(news)
    }
}
