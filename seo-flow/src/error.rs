use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Graph has no start task: {0}")]
    MissingStartTask(String),

    #[error("Context error: {0}")]
    ContextError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
