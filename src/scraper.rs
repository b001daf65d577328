use reqwest::{Client, ClientBuilder, header::CONTENT_TYPE};
use url::Url;
use crate::config::FetchSettings;
use crate::error::{AppError, Result};

pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// A page retrieved with a 2xx status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// Single-attempt page retrieval with a fixed identity and a hard deadline.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        // The client is shared so connections are pooled across requests
        let client = ClientBuilder::new()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .no_proxy()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Fetcher { client })
    }

    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamHttp {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let body = response.text().await?;

        Ok(FetchedPage {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
