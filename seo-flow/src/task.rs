use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{context::Context, error::Result};

/// Result of a task execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Short human-readable response produced by the task
    pub response: Option<String>,
    /// Next action to take
    pub next_action: NextAction,
    /// Status line describing where the flow stands
    pub status_message: Option<String>,
    /// ID of the task that produced this result, filled in by the graph
    #[serde(default)]
    pub task_id: String,
}

impl TaskResult {
    pub fn new(response: Option<String>, next_action: NextAction) -> Self {
        Self {
            response,
            next_action,
            status_message: None,
            task_id: String::new(),
        }
    }

    pub fn new_with_status(
        response: Option<String>,
        next_action: NextAction,
        status_message: Option<String>,
    ) -> Self {
        Self {
            response,
            next_action,
            status_message,
            task_id: String::new(),
        }
    }
}

/// Defines what should happen after a task completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NextAction {
    /// Continue to the next task along the first matching edge.
    /// Execution stops when no edge matches.
    Continue,
    /// Go to a specific task by ID
    GoTo(String),
    /// End the graph execution
    End,
}

/// Core trait that all tasks must implement
#[async_trait]
pub trait Task: Send + Sync {
    /// Unique identifier for this task
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Execute the task with the given context
    async fn run(&self, context: Context) -> Result<TaskResult>;
}
