use serde::Serialize;

use crate::models::{SeoDocument, SeoOutcome};

pub const KEYWORD_REQUIRED: &str = "Keyword is required";
pub const SEARCH_FAILED: &str = "Failed to fetch search results";
pub const SYNTHESIS_FAILED: &str = "Error generating SEO content";
pub const WORKFLOW_FAILED: &str = "Failed to generate SEO content";

/// Everything the page template needs for one render
#[derive(Debug, Default, Clone, Serialize)]
pub struct PageView {
    pub keyword: Option<String>,
    pub error: Option<String>,
    /// Secondary line under the error explaining what went wrong
    pub detail: Option<String>,
    pub seo_data: Option<SeoDocument>,
}

impl PageView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn missing_keyword() -> Self {
        Self {
            error: Some(KEYWORD_REQUIRED.to_string()),
            ..Self::default()
        }
    }

    pub fn from_outcome(keyword: &str, outcome: SeoOutcome) -> Self {
        let keyword = Some(keyword.to_string());
        let failure = |error: &str, detail: String| Self {
            keyword: keyword.clone(),
            error: Some(error.to_string()),
            detail: Some(detail),
            seo_data: None,
        };

        match outcome {
            SeoOutcome::NoSearchResults => failure(
                SEARCH_FAILED,
                "The search returned no results for this keyword.".to_string(),
            ),
            SeoOutcome::SearchUnavailable { .. } => failure(
                SEARCH_FAILED,
                "The search service could not be reached. Please try again later.".to_string(),
            ),
            SeoOutcome::SynthesisFailed { reason } => failure(SYNTHESIS_FAILED, reason),
            SeoOutcome::WorkflowFailed { reason } => failure(WORKFLOW_FAILED, reason),
            SeoOutcome::Generated { seo_data } => Self {
                keyword: keyword.clone(),
                error: None,
                detail: None,
                seo_data: Some(seo_data),
            },
        }
    }
}

/// Escape text for safe use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the single page of the app as a complete HTML document
pub fn render_page(view: &PageView) -> String {
    let keyword = view.keyword.as_deref().map(escape_html).unwrap_or_default();

    let error = match &view.error {
        Some(error) => {
            let detail = view
                .detail
                .as_deref()
                .map(|d| format!("<p class=\"detail\">{}</p>", escape_html(d)))
                .unwrap_or_default();
            format!(
                "<div class=\"error\" role=\"alert\"><p>{}</p>{}</div>",
                escape_html(error),
                detail
            )
        }
        None => String::new(),
    };

    let results = view
        .seo_data
        .as_ref()
        .map(render_document)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>SEO Content Generator</title>
<link rel="stylesheet" href="/styles.css">
</head>
<body>
<main>
<h1>SEO Content Generator</h1>
<form method="post" action="/generate-seo">
<label for="keyword">Keyword</label>
<input type="text" id="keyword" name="keyword" value="{keyword}" placeholder="e.g. wireless mouse">
<button type="submit">Generate</button>
</form>
{error}{results}
</main>
</body>
</html>
"#
    )
}

fn render_document(doc: &SeoDocument) -> String {
    let keywords = doc
        .seo_keywords
        .iter()
        .map(|k| format!("<li>{}</li>", escape_html(k)))
        .collect::<String>();

    let faq = doc
        .faq
        .iter()
        .map(|entry| {
            format!(
                "<div class=\"faq-item\"><dt>{}</dt><dd>{}</dd></div>",
                escape_html(&entry.question),
                escape_html(&entry.answer)
            )
        })
        .collect::<String>();

    let description = doc
        .product_description
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p.trim())))
        .collect::<String>();

    format!(
        r#"<section class="seo-result">
<h2>SEO Title</h2>
<p class="seo-title">{title}</p>
<h2>Meta Description</h2>
<p class="meta-description">{meta}</p>
<h2>SEO Keywords</h2>
<ul class="seo-keywords">{keywords}</ul>
<h2>Product Description</h2>
<div class="product-description">{description}</div>
<h2>Suggested Pricing</h2>
<p class="suggested-pricing">{pricing}</p>
<h2>FAQ</h2>
<dl class="faq">{faq}</dl>
</section>
"#,
        title = escape_html(&doc.seo_title),
        meta = escape_html(&doc.meta_description),
        pricing = escape_html(&doc.suggested_pricing),
    )
}
