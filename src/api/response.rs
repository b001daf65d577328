use chrono::{SecondsFormat, Utc};

use crate::api::models::{ExtractedElement, Outcome, ScrapeResult};
use crate::extract::SelectorError;
use crate::scraper::FetchedPage;

/// Builds the result for a fetched page.
///
/// `extraction` is `None` when no selector was given, in which case the whole
/// document is returned.
pub fn compose(
    url: &str,
    page: FetchedPage,
    extraction: Option<(&str, Result<Vec<ExtractedElement>, SelectorError>)>,
) -> ScrapeResult {
    let outcome = match extraction {
        None => Outcome::Document { html: page.body },
        Some((selector, Ok(elements))) => Outcome::Extracted {
            selector: selector.to_string(),
            elements_found: elements.len(),
            extracted_content: elements,
        },
        Some((selector, Err(err))) => Outcome::Failed {
            selector: selector.to_string(),
            error: err.to_string(),
        },
    };

    ScrapeResult {
        success: outcome.is_success(),
        url: url.to_string(),
        outcome,
        content_type: page.content_type,
        status: page.status,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
