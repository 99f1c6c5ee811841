// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Stock advisor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Market data and news endpoints
    pub provider: ProviderConfig,

    /// Analysis defaults
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Symbols offered for selection, with display names
    pub suggestions: Vec<SymbolSuggestion>,
}

/// Market data provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Chart endpoint; the symbol is appended as a path segment
    pub chart_base_url: String,

    /// News search endpoint
    pub news_base_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Symbol analysed when none is given on the command line
    pub default_symbol: String,

    /// Calendar days of history to fetch
    pub lookback_days: i64,

    /// Maximum number of news items shown
    pub news_limit: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSuggestion {
    pub symbol: String,
    pub name: String,
}

/// Upper bound for LOOKBACK_DAYS, one hundred years.
const MAX_LOOKBACK_DAYS: i64 = 36_500;

const DEFAULT_SUGGESTIONS: [(&str, &str); 15] = [
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("JPM", "JPMorgan Chase & Co."),
    ("BAC", "Bank of America Corp."),
    ("WMT", "Walmart Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("PG", "Procter & Gamble Co."),
    ("HD", "Home Depot Inc."),
    ("DIS", "Walt Disney Co."),
    ("NFLX", "Netflix Inc."),
];

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let provider_config = ProviderConfig {
            chart_base_url: env::var("CHART_BASE_URL")
                .unwrap_or(defaults.provider.chart_base_url),
            news_base_url: env::var("NEWS_BASE_URL").unwrap_or(defaults.provider.news_base_url),
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.provider.user_agent),
        };

        let analysis_config = AnalysisConfig {
            default_symbol: env::var("ANALYSIS_SYMBOL")
                .unwrap_or(defaults.analysis.default_symbol)
                .to_uppercase(),
            lookback_days: parse_var("LOOKBACK_DAYS", defaults.analysis.lookback_days)?,
            news_limit: parse_var("NEWS_LIMIT", defaults.analysis.news_limit)?,
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.logging.level),
            to_file: parse_var("LOG_TO_FILE", defaults.logging.to_file)?,
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        let config = Config {
            provider: provider_config,
            analysis: analysis_config,
            logging: logging_config,
            suggestions: defaults.suggestions,
        };
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path).map_err(|e| {
            AppError::Config(format!("Failed to open config file: {}", e))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents).map_err(|e| {
            AppError::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        let days = self.analysis.lookback_days;
        if days <= 0 || days > MAX_LOOKBACK_DAYS {
            return Err(AppError::Config(format!(
                "LOOKBACK_DAYS must be between 1 and {}, got {}",
                MAX_LOOKBACK_DAYS, days
            )));
        }
        if self.logging.to_file && self.logging.file_path.is_none() {
            return Err(AppError::Config(
                "LOG_TO_FILE is set but LOG_FILE_PATH is missing".to_string(),
            ));
        }
        Ok(())
    }

    /// Display name for a symbol, "Stock" when it is not in the table.
    pub fn display_name(&self, symbol: &str) -> &str {
        self.suggestions
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .map(|s| s.name.as_str())
            .unwrap_or("Stock")
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path).map_err(|e| {
                    AppError::Config(format!("Failed to create log file: {}", e))
                })?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        builder.try_init().map_err(|e| {
            AppError::Config(format!("Failed to initialize logger: {}", e))
        })?;

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} {:?}: {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig {
                chart_base_url: "https://query1.finance.yahoo.com/v8/finance/chart/".to_string(),
                news_base_url: "https://query2.finance.yahoo.com/v1/finance/search".to_string(),
                user_agent: concat!("stock_advisor/", env!("CARGO_PKG_VERSION")).to_string(),
            },
            analysis: AnalysisConfig {
                default_symbol: "AAPL".to_string(),
                lookback_days: 365,
                news_limit: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
            suggestions: DEFAULT_SUGGESTIONS
                .iter()
                .map(|(symbol, name)| SymbolSuggestion {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}
