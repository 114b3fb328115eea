use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of search results handed to the model
pub const MAX_SEARCH_RESULTS: usize = 3;

/// Number of FAQ entries a generated document must carry
pub const FAQ_COUNT: usize = 5;

/// One organic search hit, projected to the fields the prompt needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// SEO content package produced by the language model.
///
/// Field names follow the camelCase JSON shape the model is asked to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDocument {
    pub seo_title: String,
    pub meta_description: String,
    pub seo_keywords: Vec<String>,
    pub product_description: String,
    pub suggested_pricing: String,
    pub faq: Vec<FaqEntry>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("model output is not a valid SEO document: {0}")]
    Schema(String),

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("expected {expected} FAQ entries, got {actual}")]
    FaqCount { expected: usize, actual: usize },
}

impl SeoDocument {
    /// Parse and validate the model's raw text.
    ///
    /// Field presence and types are checked by deserialization; the title and
    /// FAQ cardinality are checked afterwards. Length targets for the meta and
    /// product descriptions are left to the prompt.
    pub fn from_model_output(raw: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(strip_code_fence(raw))
            .map_err(|e| DocumentError::InvalidJson(e.to_string()))?;
        let document: SeoDocument =
            serde_json::from_value(value).map_err(|e| DocumentError::Schema(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.seo_title.trim().is_empty() {
            return Err(DocumentError::EmptyField("seoTitle"));
        }
        if self.faq.len() != FAQ_COUNT {
            return Err(DocumentError::FaqCount {
                expected: FAQ_COUNT,
                actual: self.faq.len(),
            });
        }
        Ok(())
    }
}

/// Remove a surrounding Markdown code fence, if the model added one
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop any language tag such as `json` or `JSON`
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Result of running the pipeline for one keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeoOutcome {
    /// The search API answered but had no hits for the keyword
    NoSearchResults,
    /// The search API could not be queried
    SearchUnavailable { reason: String },
    /// The model call failed or its output did not validate
    SynthesisFailed { reason: String },
    /// The flow itself failed before producing an outcome
    WorkflowFailed { reason: String },
    Generated { seo_data: SeoDocument },
}

/// Body of `POST /generate-seo`, accepted as JSON or as a form
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GenerateSeoRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

impl GenerateSeoRequest {
    /// The trimmed keyword, or `None` when it is absent or blank
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
