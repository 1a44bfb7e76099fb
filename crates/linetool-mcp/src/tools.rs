use std::collections::HashMap;
use std::sync::Arc;

use linetool_core::{Tool, ToolDescriptor, ToolSummary};

use crate::builtin::{AntiGaslight, Gaslight};

/// Registry of the tools a server exposes, keyed by name.
///
/// Filled during startup and only read while serving.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the bundled tools.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("gaslight", Arc::new(Gaslight), None);
        registry.register("anti_gaslight", Arc::new(AntiGaslight), None);
        registry
    }

    /// Register a tool under `name`.
    ///
    /// Re-registering a name replaces the earlier handler and description but
    /// keeps its place in the listing.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn Tool>,
        description: Option<String>,
    ) {
        let descriptor = ToolDescriptor::new(name, handler, description);

        if let Some(&slot) = self.index.get(&descriptor.name) {
            tracing::debug!(tool = %descriptor.name, "replacing registered tool");
            self.entries[slot] = descriptor;
        } else {
            self.index
                .insert(descriptor.name.clone(), self.entries.len());
            self.entries.push(descriptor);
        }
    }

    /// Return the `{name, description}` pairs for `tools/list`, in
    /// registration order.
    #[must_use]
    pub fn list(&self) -> Vec<ToolSummary> {
        self.entries.iter().map(ToolDescriptor::summary).collect()
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
