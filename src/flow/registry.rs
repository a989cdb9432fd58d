use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::definition::Flow;
use crate::error::{MindflowError, Result};
use crate::llm::DynGenerationClient;
use crate::schema::Schema;

/// Immutable name-to-flow table, built once at startup and passed by
/// reference. Concurrent invocations share it without coordination.
#[derive(Default)]
pub struct FlowRegistry {
    flows: HashMap<String, Flow>,
}

/// One row of the registry catalog, as exported by the CLI.
#[derive(Clone, Debug, Serialize)]
pub struct FlowCatalogEntry {
    pub name: String,
    pub input: Schema,
    pub output: Schema,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self {
            flows: HashMap::new(),
        }
    }

    /// Flow names are unique within a registry.
    pub fn register(&mut self, flow: Flow) -> Result<()> {
        let name = flow.name().to_string();
        if self.flows.contains_key(&name) {
            return Err(MindflowError::DuplicateFlow(name));
        }
        self.flows.insert(name, flow);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Flow> {
        self.flows
            .get(name)
            .ok_or_else(|| MindflowError::FlowNotRegistered(name.to_string()))
    }

    pub async fn invoke(
        &self,
        name: &str,
        client: &DynGenerationClient,
        input: Value,
    ) -> Result<Value> {
        self.get(name)?.invoke(client, input).await
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn catalog(&self) -> Vec<FlowCatalogEntry> {
        let mut entries: Vec<FlowCatalogEntry> = self
            .flows
            .values()
            .map(|flow| FlowCatalogEntry {
                name: flow.name().to_string(),
                input: flow.input_schema().clone(),
                output: flow.output_schema().clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
