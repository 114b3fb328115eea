pub mod content_synthesizer;
pub mod search_collector;

// Shared modules
pub mod types;
pub mod utils;

pub use content_synthesizer::ContentSynthesizerTask;
pub use search_collector::SearchCollectorTask;

pub use types::session_keys;
