pub mod config;
pub mod generator;
pub mod models;
pub mod search;
pub mod service;
pub mod synthesizer;
pub mod tasks;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod view;
pub mod workflow;

pub use config::{AppConfig, ConfigError};
pub use service::{AppState, build_router, create_app};
pub use workflow::{SeoWorkflow, build_seo_workflow};
pub use models::*;
