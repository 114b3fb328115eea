use rig::{agent::Agent, client::CompletionClient, providers::openrouter};
use serde_json::json;

/// Build an OpenRouter agent that is asked to answer with a JSON object
pub fn get_json_llm_agent(
    api_key: &str,
    model: &str,
    preamble: &str,
) -> Agent<openrouter::CompletionModel> {
    let client = openrouter::Client::new(api_key);
    client
        .agent(model)
        .preamble(preamble)
        .additional_params(json!({ "response_format": { "type": "json_object" } }))
        .build()
}
