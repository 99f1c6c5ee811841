pub mod analysis_usecase;
pub mod news_usecase;

// Re-export public API
pub use analysis_usecase::{
    AnalysisReport, AnalysisRequest, StockAnalysisProcessor, StockAnalysisUseCase,
};
pub use news_usecase::{NewsFeedProcessor, NewsFeedUseCase, MARKET_INDICES};
