use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::generator::ContentGenerator;
use crate::models::{DocumentError, FAQ_COUNT, SearchResult, SeoDocument};

pub const SEO_ANALYST_PERSONA: &str = "You are a highly advanced and experienced SEO analyst.";

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("content generation failed: {0}")]
    Generation(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Builds the SEO prompt, calls the generator and validates what comes back
#[derive(Clone)]
pub struct ContentSynthesizer {
    generator: Arc<dyn ContentGenerator>,
}

impl ContentSynthesizer {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    pub async fn synthesize(
        &self,
        results: &[SearchResult],
        keyword: &str,
    ) -> Result<SeoDocument, SynthesisError> {
        let prompt = build_seo_prompt(results, keyword);

        let raw = self
            .generator
            .generate(SEO_ANALYST_PERSONA, &prompt)
            .await
            .map_err(|e| SynthesisError::Generation(e.to_string()))?;

        let document = SeoDocument::from_model_output(&raw)?;
        info!(
            keyword = %keyword,
            keywords = document.seo_keywords.len(),
            faq = document.faq.len(),
            "SEO document generated"
        );
        Ok(document)
    }
}

/// Render the instruction sent to the model for `keyword` and its search results
pub fn build_seo_prompt(results: &[SearchResult], keyword: &str) -> String {
    let results_text = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "({}) Title: {}\nSnippet: {}\nLink: {}\n",
                i + 1,
                r.title,
                r.snippet,
                r.link
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let faq_shape = (1..=FAQ_COUNT)
        .map(|i| {
            format!(
                "    {{\n      \"question\": \"FAQ Question {i}\",\n      \"answer\": \"FAQ Answer {i}\"\n    }}"
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"You are an SEO expert. Based on the following search results, generate an **SEO-optimized product listing** for the keyword "{keyword}" in **JSON format**. Ensure the structure includes all necessary fields for SEO content.

### Search Results:
{results_text}
### Your Task:
Analyze the search results and generate an **SEO-optimized product listing** with the following elements in **JSON format**:

1. **SEO Title**: A compelling, high-ranking title for the product/service.
2. **Meta Description**: A concise and engaging description (250 characters).
3. **SEO Keywords**: A list of high-ranking keywords related to the product/service.
4. **Product Description**: A detailed, engaging, and SEO-friendly description with specs and details (about 300 words).
5. **Suggested Pricing**: A price range based on market data.
6. **FAQ Section**: {FAQ_COUNT} commonly asked questions with answers related to the product.

The JSON structure should be as follows:

{{
  "seoTitle": "SEO Title Example",
  "metaDescription": "SEO Meta Description Example",
  "seoKeywords": ["keyword1", "keyword2", "keyword3"],
  "productDescription": "Detailed product description here.",
  "suggestedPricing": "$100 - $200",
  "faq": [
{faq_shape}
  ]
}}

Make sure the output is well-structured and contains **valid JSON**. Ensure the content is **unique, human-like**, and highly optimized for search engines."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubGenerator, sample_document_json, sample_results};

    #[test]
    fn prompt_lists_each_result_as_numbered_block() {
        let prompt = build_seo_prompt(&sample_results(3), "wireless mouse");

        assert!(prompt.contains(r#"for the keyword "wireless mouse""#));
        for i in 1..=3 {
            assert!(prompt.contains(&format!(
                "({i}) Title: Result {i}\nSnippet: Snippet {i}\nLink: https://example.com/{i}"
            )));
        }
        assert!(!prompt.contains("(4) Title"));
    }

    #[test]
    fn prompt_spells_out_the_json_shape() {
        let prompt = build_seo_prompt(&[], "desk lamp");
        for field in [
            "\"seoTitle\"",
            "\"metaDescription\"",
            "\"seoKeywords\"",
            "\"productDescription\"",
            "\"suggestedPricing\"",
            "\"faq\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert_eq!(prompt.matches("\"question\"").count(), FAQ_COUNT);
        assert_eq!(prompt.matches("\"answer\"").count(), FAQ_COUNT);
    }

    #[tokio::test]
    async fn returns_document_for_valid_json() {
        let generator = Arc::new(StubGenerator::replying(
            sample_document_json(FAQ_COUNT).to_string(),
        ));
        let synthesizer = ContentSynthesizer::new(generator.clone());

        let document = synthesizer
            .synthesize(&sample_results(3), "wireless mouse")
            .await
            .unwrap();

        assert_eq!(document.faq.len(), FAQ_COUNT);
        assert!(!document.seo_title.is_empty());

        let (system, prompt) = generator.last_call().unwrap();
        assert_eq!(system, SEO_ANALYST_PERSONA);
        assert!(prompt.contains("(3) Title: Result 3"));
    }

    #[tokio::test]
    async fn invalid_json_becomes_an_error() {
        let generator = Arc::new(StubGenerator::replying("Here is your listing: ..."));
        let synthesizer = ContentSynthesizer::new(generator);

        let err = synthesizer
            .synthesize(&sample_results(1), "wireless mouse")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::Document(DocumentError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn generator_failure_becomes_an_error() {
        let generator = Arc::new(StubGenerator::failing("upstream 500"));
        let synthesizer = ContentSynthesizer::new(generator);

        let err = synthesizer
            .synthesize(&sample_results(2), "wireless mouse")
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::Generation(msg) if msg.contains("upstream 500")));
    }

    #[tokio::test]
    async fn wrong_faq_count_is_rejected() {
        let generator = Arc::new(StubGenerator::replying(sample_document_json(4).to_string()));
        let synthesizer = ContentSynthesizer::new(generator);

        let err = synthesizer
            .synthesize(&sample_results(3), "wireless mouse")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::Document(DocumentError::FaqCount { actual: 4, .. })
        ));
    }
}
