use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;

/// Context for sharing data between tasks in a graph execution
///
/// Values are stored as JSON so any serializable type can be handed from one
/// task to the next. Cloning a context is cheap and every clone sees the same
/// data.
#[derive(Clone, Debug)]
pub struct Context {
    data: Arc<DashMap<String, Value>>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: impl serde::Serialize) -> Result<()> {
        self.set_sync(key, value)
    }

    pub fn set_sync(&self, key: impl Into<String>, value: impl serde::Serialize) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.data.insert(key.into(), value);
        Ok(())
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_sync(key)
    }

    /// Synchronous read, usable from edge conditions
    pub fn get_sync<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
