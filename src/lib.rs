pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod scraper;
pub mod validation;

use std::sync::Arc;
use config::Config;
use error::Result;
use crate::scraper::Fetcher;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: Fetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.fetch)?;
        Ok(AppState {
            config: Arc::new(config),
            fetcher,
        })
    }
}
