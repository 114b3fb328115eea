use async_trait::async_trait;
use seo_flow::{Context, GraphError, NextAction, Result, Task, TaskResult};
use tracing::{error, info};

use crate::models::{SearchResult, SeoOutcome};
use crate::synthesizer::ContentSynthesizer;
use crate::tasks::session_keys;

/// Turns the collected search results into an SEO document
pub struct ContentSynthesizerTask {
    synthesizer: ContentSynthesizer,
}

impl ContentSynthesizerTask {
    pub fn new(synthesizer: ContentSynthesizer) -> Self {
        Self { synthesizer }
    }
}

#[async_trait]
impl Task for ContentSynthesizerTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let keyword: String = context
            .get(session_keys::KEYWORD)
            .await
            .ok_or_else(|| GraphError::ContextError("keyword not found in context".to_string()))?;

        let results: Vec<SearchResult> = context
            .get(session_keys::SEARCH_RESULTS)
            .await
            .ok_or_else(|| {
                GraphError::ContextError("search_results not found in context".to_string())
            })?;

        info!(keyword = %keyword, results = results.len(), "Generating SEO content");

        let outcome = match self.synthesizer.synthesize(&results, &keyword).await {
            Ok(seo_data) => SeoOutcome::Generated { seo_data },
            Err(e) => {
                error!(keyword = %keyword, error = %e, "Error generating SEO content");
                SeoOutcome::SynthesisFailed {
                    reason: e.to_string(),
                }
            }
        };

        let status = match &outcome {
            SeoOutcome::Generated { .. } => "SEO content generated",
            _ => "SEO content generation failed",
        };
        context.set(session_keys::OUTCOME, outcome).await?;

        Ok(TaskResult::new_with_status(
            None,
            NextAction::End,
            Some(status.to_string()),
        ))
    }
}
