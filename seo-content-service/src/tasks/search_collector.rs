use std::sync::Arc;

use async_trait::async_trait;
use seo_flow::{Context, GraphError, NextAction, Result, Task, TaskResult};
use tracing::{error, info, warn};

use crate::models::{MAX_SEARCH_RESULTS, SeoOutcome};
use crate::search::SearchProvider;
use crate::tasks::session_keys;

/// Fetches the top search results for the keyword in context.
///
/// Results land under `search_results` only when there is at least one, so the
/// edge to the synthesizer can key off their presence. Failures are recorded
/// as the outcome and never abort the flow.
pub struct SearchCollectorTask {
    provider: Arc<dyn SearchProvider>,
}

impl SearchCollectorTask {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Task for SearchCollectorTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let keyword: String = context
            .get(session_keys::KEYWORD)
            .await
            .ok_or_else(|| GraphError::ContextError("keyword not found in context".to_string()))?;

        info!(keyword = %keyword, "Collecting search results");

        match self.provider.fetch_results(&keyword).await {
            Ok(results) if results.is_empty() => {
                warn!(keyword = %keyword, "Search returned no results");
                context
                    .set(session_keys::OUTCOME, SeoOutcome::NoSearchResults)
                    .await?;
                Ok(TaskResult::new_with_status(
                    None,
                    NextAction::Continue,
                    Some("No search results".to_string()),
                ))
            }
            Ok(mut results) => {
                results.truncate(MAX_SEARCH_RESULTS);
                let count = results.len();
                info!(keyword = %keyword, count = count, "Search results ready");
                context.set(session_keys::SEARCH_RESULTS, &results).await?;
                Ok(TaskResult::new_with_status(
                    None,
                    NextAction::Continue,
                    Some(format!("Collected {count} search results")),
                ))
            }
            Err(e) => {
                error!(keyword = %keyword, error = %e, "Error fetching search results");
                context
                    .set(
                        session_keys::OUTCOME,
                        SeoOutcome::SearchUnavailable {
                            reason: e.to_string(),
                        },
                    )
                    .await?;
                Ok(TaskResult::new_with_status(
                    None,
                    NextAction::Continue,
                    Some("Search unavailable".to_string()),
                ))
            }
        }
    }
}
