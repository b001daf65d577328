use url::Url;
use crate::error::{AppError, Result};

/// Checks the caller-supplied locator before anything touches the network.
///
/// An absent or empty value is a missing parameter. Otherwise the value must
/// parse as an absolute URL whose scheme is exactly `http` or `https`.
pub fn validate_url(raw: Option<&str>) -> Result<Url> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AppError::MissingParameter("url")),
    };

    let url = Url::parse(raw).map_err(|e| AppError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::UnsupportedScheme(other.to_string())),
    }
}
