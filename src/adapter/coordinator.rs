// src/adapter/coordinator.rs
// Wires the repositories, services and use cases for one analysis request

use std::sync::Arc;

use crate::application::usecase::{
    AnalysisReport, AnalysisRequest, NewsFeedProcessor, NewsFeedUseCase,
    StockAnalysisProcessor, StockAnalysisUseCase,
};
use crate::config::Config;
use crate::domain::errors::AppResult;
use crate::domain::models::NewsItem;
use crate::infrastructure::analysis::TechnicalAnalysisImpl;
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::market::YahooPriceRepository;
use crate::infrastructure::news::YahooNewsRepository;
use crate::infrastructure::strategy::RuleBasedStrategy;

/// What the presentation layer shows for one request.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub report: AnalysisReport,
    pub news: Vec<NewsItem>,
}

pub struct AnalysisCoordinator {
    analysis: Arc<dyn StockAnalysisUseCase + Send + Sync>,
    news_feed: Arc<dyn NewsFeedUseCase + Send + Sync>,
}

impl AnalysisCoordinator {
    pub fn new(
        analysis: Arc<dyn StockAnalysisUseCase + Send + Sync>,
        news_feed: Arc<dyn NewsFeedUseCase + Send + Sync>,
    ) -> Self {
        Self {
            analysis,
            news_feed,
        }
    }

    /// Coordinator backed by Yahoo Finance and the default rule set.
    pub fn from_config(config: &Config) -> Self {
        let http = HttpClient::new(&config.provider.user_agent);

        let prices = Arc::new(YahooPriceRepository::new(
            http.clone(),
            &config.provider.chart_base_url,
        ));
        let news = Arc::new(YahooNewsRepository::new(
            http,
            &config.provider.news_base_url,
            config.analysis.news_limit,
        ));

        let analysis = StockAnalysisProcessor::new(
            prices,
            Arc::new(TechnicalAnalysisImpl::default()),
            Arc::new(RuleBasedStrategy::default()),
        );
        let news_feed = NewsFeedProcessor::new(news, config.analysis.news_limit);

        Self::new(Arc::new(analysis), Arc::new(news_feed))
    }

    /// Run the analysis, then fetch news for the symbol. A failed analysis
    /// aborts the request before any news is fetched.
    pub async fn run(&self, request: &AnalysisRequest) -> AppResult<Dashboard> {
        log::info!(
            "Analyzing {} from {} to {}",
            request.symbol,
            request.start,
            request.end
        );

        let report = self.analysis.analyze(request).await?;
        let news = self
            .news_feed
            .latest_news(std::slice::from_ref(&request.symbol))
            .await;

        Ok(Dashboard { report, news })
    }
}
