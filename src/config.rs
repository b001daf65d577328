use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_EXCEL_PATH: &str = "public/excel/Product.xlsx";

/// Settings for the outbound page request.
#[derive(Clone, Debug)]
pub struct FetchSettings {
    /// Deadline for the whole exchange, measured from dispatch.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub fetch: FetchSettings,
    pub excel_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            fetch: FetchSettings::default(),
            excel_path: PathBuf::from(DEFAULT_EXCEL_PATH),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let timeout = match env::var("FETCH_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_FETCH_TIMEOUT,
        };
        let user_agent = env::var("FETCH_USER_AGENT")
            .ok()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let excel_path = env::var("EXCEL_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXCEL_PATH));
        attachment_name(&excel_path)?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            fetch: FetchSettings { timeout, user_agent },
            excel_path,
        })
    }
}

/// File name sent in the download's `Content-Disposition`.
pub fn attachment_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::ConfigError(format!("Excel path has no file name: {}", path.display())))
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| AppError::ConfigError(format!("Invalid fetch timeout: {}", e)))?;
    if secs == 0 {
        return Err(AppError::ConfigError("Fetch timeout must be at least one second".to_string()));
    }
    Ok(Duration::from_secs(secs))
}
