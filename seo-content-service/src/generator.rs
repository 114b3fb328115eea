use async_trait::async_trait;
use rig::completion::Prompt;
use tracing::debug;

use crate::tasks::utils::get_json_llm_agent;

pub const DEFAULT_GENERATION_MODEL: &str = "openai/gpt-4.1";

/// Text-generation backend. Returns the model's raw reply.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String>;
}

/// `ContentGenerator` backed by rig's OpenRouter provider in JSON mode
#[derive(Clone)]
pub struct RigContentGenerator {
    api_key: String,
    model: String,
}

impl RigContentGenerator {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ContentGenerator for RigContentGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "LLM generation request");

        let agent = get_json_llm_agent(&self.api_key, &self.model, system);
        let response = agent.prompt(prompt).await?;

        debug!(model = %self.model, response_len = response.len(), "LLM generation response");
        Ok(response)
    }
}
