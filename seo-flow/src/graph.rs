use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    context::Context,
    error::{GraphError, Result},
    task::{NextAction, Task, TaskResult},
};

/// Type alias for edge condition functions
pub type EdgeCondition = Arc<dyn Fn(&Context) -> bool + Send + Sync>;

/// Edge between tasks in the graph
#[derive(Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub condition: Option<EdgeCondition>,
}

/// A graph of tasks that can be executed
pub struct Graph {
    pub id: String,
    tasks: HashMap<String, Arc<dyn Task>>,
    edges: Vec<Edge>,
    start_task_id: Option<String>,
}

impl Graph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tasks: HashMap::new(),
            edges: Vec::new(),
            start_task_id: None,
        }
    }

    /// Add a task to the graph. The first task added becomes the start task.
    pub fn add_task(&mut self, task: Arc<dyn Task>) -> &mut Self {
        let task_id = task.id().to_string();
        if self.tasks.is_empty() {
            self.start_task_id = Some(task_id.clone());
        }
        self.tasks.insert(task_id, task);
        self
    }

    /// Set the starting task
    pub fn set_start_task(&mut self, task_id: impl Into<String>) -> &mut Self {
        let task_id = task_id.into();
        if self.tasks.contains_key(&task_id) {
            self.start_task_id = Some(task_id);
        }
        self
    }

    /// Add an edge between tasks
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            condition: None,
        });
        self
    }

    /// Add a conditional edge between tasks
    pub fn add_conditional_edge<F>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: F,
    ) -> &mut Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            condition: Some(Arc::new(condition)),
        });
        self
    }

    /// Run the graph from its start task until a task ends it or no edge matches.
    pub async fn run(&self, context: Context) -> Result<ExecutionResult> {
        let start = self
            .start_task_id
            .clone()
            .ok_or_else(|| GraphError::MissingStartTask(self.id.clone()))?;
        self.execute(&start, context).await
    }

    /// Execute the graph starting from a specific task
    pub async fn execute(&self, task_id: &str, context: Context) -> Result<ExecutionResult> {
        let mut current = task_id.to_string();
        let mut visited = Vec::new();

        loop {
            let result = self.execute_single_task(&current, context.clone()).await?;
            visited.push(current.clone());

            let next = match &result.next_action {
                NextAction::Continue => self.find_next_task(&current, &context),
                NextAction::GoTo(target_id) => {
                    if !self.tasks.contains_key(target_id) {
                        return Err(GraphError::TaskNotFound(target_id.clone()));
                    }
                    Some(target_id.clone())
                }
                NextAction::End => None,
            };

            match next {
                Some(next_task_id) => {
                    debug!(graph = %self.id, from = %current, to = %next_task_id, "Following edge");
                    current = next_task_id;
                }
                None => {
                    info!(graph = %self.id, last_task = %current, "Graph execution finished");
                    return Ok(ExecutionResult {
                        response: result.response,
                        status_message: result.status_message,
                        last_task_id: result.task_id,
                        visited,
                    });
                }
            }
        }
    }

    /// Execute a single task without following its next action
    async fn execute_single_task(&self, task_id: &str, context: Context) -> Result<TaskResult> {
        let task = self
            .tasks
            .get(task_id)
            .ok_or_else(|| GraphError::TaskNotFound(task_id.to_string()))?;

        let mut result = task.run(context).await?;
        result.task_id = task_id.to_string();

        Ok(result)
    }

    /// Find the next task based on edges and conditions. Edges are checked in
    /// insertion order and the first match wins.
    pub fn find_next_task(&self, current_task_id: &str, context: &Context) -> Option<String> {
        self.edges
            .iter()
            .filter(|edge| edge.from == current_task_id)
            .find(|edge| match &edge.condition {
                Some(condition) => condition(context),
                None => true,
            })
            .map(|edge| edge.to.clone())
    }
}

/// Builder for creating graphs
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(id),
        }
    }

    pub fn add_task(mut self, task: Arc<dyn Task>) -> Self {
        self.graph.add_task(task);
        self
    }

    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.graph.add_edge(from, to);
        self
    }

    pub fn add_conditional_edge<F>(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: F,
    ) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        self.graph.add_conditional_edge(from, to, condition);
        self
    }

    pub fn set_start_task(mut self, task_id: impl Into<String>) -> Self {
        self.graph.set_start_task(task_id);
        self
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}

/// Outcome of running a graph to completion
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub response: Option<String>,
    pub status_message: Option<String>,
    pub last_task_id: String,
    /// Task IDs in the order they ran
    pub visited: Vec<String>,
}
