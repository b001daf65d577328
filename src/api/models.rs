use serde::{Deserialize, Serialize};

/// Raw query parameters of `GET /api/scrape`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScrapeQuery {
    pub url: Option<String>,
    pub selector: Option<String>,
}

impl ScrapeQuery {
    /// Reads `url` and `selector` from a query string. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut query = ScrapeQuery::default();
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match &*key {
                "url" => &mut query.url,
                "selector" => &mut query.selector,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    /// An empty selector means "no selector".
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedElement {
    pub text: String,
    pub html: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Document {
        html: String,
    },
    Extracted {
        selector: String,
        #[serde(rename = "elementsFound")]
        elements_found: usize,
        #[serde(rename = "extractedContent")]
        extracted_content: Vec<ExtractedElement>,
    },
    Failed {
        selector: String,
        error: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub success: bool,
    pub url: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub content_type: String,
    pub status: u16,
    pub timestamp: String,
}
