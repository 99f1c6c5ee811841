// src/application/usecase/news_usecase.rs
// Financial news feed use case

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::ProviderResult;
use crate::domain::models::NewsItem;
use crate::domain::repository::NewsRepository;

/// S&P 500, Dow Jones and NASDAQ, used for general market news.
pub const MARKET_INDICES: [&str; 3] = ["^GSPC", "^DJI", "^IXIC"];

#[async_trait]
pub trait NewsFeedUseCase {
    /// Latest unique headlines for `symbols`, newest first. Never fails:
    /// provider errors are logged and give an empty feed.
    async fn latest_news(&self, symbols: &[String]) -> Vec<NewsItem>;
}

pub struct NewsFeedProcessor {
    news_repository: Arc<dyn NewsRepository + Send + Sync>,
    limit: usize,
}

impl NewsFeedProcessor {
    pub fn new(news_repository: Arc<dyn NewsRepository + Send + Sync>, limit: usize) -> Self {
        Self {
            news_repository,
            limit,
        }
    }

    async fn collect(&self, symbols: &[String]) -> ProviderResult<Vec<NewsItem>> {
        let mut items = Vec::new();
        for symbol in symbols {
            items.extend(self.news_repository.fetch_news(symbol).await?);
        }
        Ok(items)
    }
}

#[async_trait]
impl NewsFeedUseCase for NewsFeedProcessor {
    async fn latest_news(&self, symbols: &[String]) -> Vec<NewsItem> {
        let symbols: Vec<String> = if symbols.is_empty() {
            MARKET_INDICES.iter().map(|s| s.to_string()).collect()
        } else {
            symbols.to_vec()
        };

        let items = match self.collect(&symbols).await {
            Ok(items) => items,
            Err(e) => {
                log::error!("Error fetching news: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut news: Vec<NewsItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.title.clone()))
            .collect();
        news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        news.truncate(self.limit);
        news
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ProviderError;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn item(title: &str, published: i64) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            publisher: Some("Reuters".to_string()),
            link: None,
            published_at: DateTime::<Utc>::from_timestamp(published, 0).unwrap(),
            description: None,
        }
    }

    #[derive(Default)]
    struct StubNews {
        by_symbol: HashMap<String, Vec<NewsItem>>,
        failing: Option<String>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NewsRepository for StubNews {
        async fn fetch_news(&self, symbol: &str) -> ProviderResult<Vec<NewsItem>> {
            self.requested.lock().unwrap().push(symbol.to_string());
            if self.failing.as_deref() == Some(symbol) {
                return Err(ProviderError::Network("timed out".to_string()));
            }
            Ok(self.by_symbol.get(symbol).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn deduplicates_sorts_and_limits() {
        let mut stub = StubNews::default();
        stub.by_symbol.insert(
            "AAPL".to_string(),
            vec![item("old", 100), item("shared", 300), item("new", 500)],
        );
        stub.by_symbol.insert(
            "MSFT".to_string(),
            vec![item("shared", 900), item("middle", 400)],
        );
        let feed = NewsFeedProcessor::new(Arc::new(stub), 3);

        let news = feed
            .latest_news(&["AAPL".to_string(), "MSFT".to_string()])
            .await;
        let titles: Vec<&str> = news.iter().map(|n| n.title.as_str()).collect();

        assert_eq!(titles, vec!["new", "middle", "shared"]);
        // First occurrence of a duplicate title wins
        assert_eq!(news[2].published_at.timestamp(), 300);
    }

    #[tokio::test]
    async fn no_symbols_means_market_news() {
        let stub = Arc::new(StubNews::default());
        let feed = NewsFeedProcessor::new(stub.clone(), 10);

        assert!(feed.latest_news(&[]).await.is_empty());
        assert_eq!(
            *stub.requested.lock().unwrap(),
            vec!["^GSPC".to_string(), "^DJI".to_string(), "^IXIC".to_string()]
        );
    }

    #[tokio::test]
    async fn provider_failure_gives_empty_feed() {
        let mut stub = StubNews::default();
        stub.by_symbol.insert("AAPL".to_string(), vec![item("kept?", 1)]);
        stub.failing = Some("TSLA".to_string());
        let feed = NewsFeedProcessor::new(Arc::new(stub), 10);

        let news = feed
            .latest_news(&["AAPL".to_string(), "TSLA".to_string()])
            .await;

        assert!(news.is_empty());
    }
}
