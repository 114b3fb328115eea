use std::sync::Arc;

use seo_flow::{Context, Graph, GraphBuilder, Task};
use tracing::{error, info};

use crate::generator::ContentGenerator;
use crate::models::SeoOutcome;
use crate::search::SearchProvider;
use crate::synthesizer::ContentSynthesizer;
use crate::tasks::{ContentSynthesizerTask, SearchCollectorTask, session_keys};

/// search collector → (only when results were found) → content synthesizer
pub fn build_seo_workflow(
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn ContentGenerator>,
) -> Graph {
    let search_task = Arc::new(SearchCollectorTask::new(search));
    let search_id = search_task.id().to_string();

    let synthesizer_task = Arc::new(ContentSynthesizerTask::new(ContentSynthesizer::new(
        generator,
    )));
    let synthesizer_id = synthesizer_task.id().to_string();

    GraphBuilder::new("seo_workflow")
        .add_task(search_task)
        .add_task(synthesizer_task)
        .add_conditional_edge(&search_id, &synthesizer_id, |ctx: &Context| {
            ctx.contains_key(session_keys::SEARCH_RESULTS)
        })
        .set_start_task(&search_id)
        .build()
}

/// Runs the SEO graph once per keyword, with a fresh context each time
#[derive(Clone)]
pub struct SeoWorkflow {
    graph: Arc<Graph>,
}

impl SeoWorkflow {
    pub fn new(search: Arc<dyn SearchProvider>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            graph: Arc::new(build_seo_workflow(search, generator)),
        }
    }

    /// `keyword` must already be validated as non-blank
    pub async fn run(&self, keyword: &str) -> SeoOutcome {
        let context = Context::new();
        if let Err(e) = context.set(session_keys::KEYWORD, keyword).await {
            return workflow_failed(keyword, &e);
        }

        match self.graph.run(context.clone()).await {
            Ok(result) => {
                info!(
                    keyword = %keyword,
                    tasks = ?result.visited,
                    status = ?result.status_message,
                    "SEO workflow finished"
                );
                context
                    .get::<SeoOutcome>(session_keys::OUTCOME)
                    .await
                    .unwrap_or_else(|| SeoOutcome::WorkflowFailed {
                        reason: "workflow finished without an outcome".to_string(),
                    })
            }
            Err(e) => workflow_failed(keyword, &e),
        }
    }
}

fn workflow_failed(keyword: &str, e: &seo_flow::GraphError) -> SeoOutcome {
    error!(keyword = %keyword, error = %e, "SEO workflow failed");
    SeoOutcome::WorkflowFailed {
        reason: e.to_string(),
    }
}
