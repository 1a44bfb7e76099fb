use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::traits::Tool;

/// A registered tool: its unique name, the handler behind it, and the
/// description shown by `tools/list`.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub handler: Arc<dyn Tool>,
}

impl ToolDescriptor {
    /// Build a descriptor, resolving the description in order: the explicit
    /// one, the handler's own, then `"Tool: <name>"`.
    pub fn new(
        name: impl Into<String>,
        handler: Arc<dyn Tool>,
        description: Option<String>,
    ) -> Self {
        let name = name.into();
        let description = description
            .or_else(|| handler.description().map(str::to_string))
            .unwrap_or_else(|| format!("Tool: {name}"));

        Self {
            name,
            description,
            handler,
        }
    }

    #[must_use]
    pub fn summary(&self) -> ToolSummary {
        ToolSummary {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// One entry of a `tools/list` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
}

/// String-keyed, string-valued arguments passed to a tool handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolArguments(BTreeMap<String, String>);

impl ToolArguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert the `arguments` member of a `tools/call` request.
    ///
    /// Strings are taken as-is; other JSON values are rendered as their JSON
    /// text. Anything other than an object is rejected.
    pub fn from_json(tool: &str, value: &Value) -> Result<Self, Error> {
        let Value::Object(map) = value else {
            return Err(Error::InvalidArguments {
                tool: tool.to_string(),
                found: json_type_name(value).to_string(),
            });
        };

        let args = map
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect();

        Ok(Self(args))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Fetch a required argument, failing with [`Error::MissingArgument`].
    pub fn require(&self, tool: &str, key: &str) -> Result<&str, Error> {
        self.get(key).ok_or_else(|| Error::MissingArgument {
            tool: tool.to_string(),
            argument: key.to_string(),
        })
    }

    /// Check these arguments against a tool's declared parameters.
    ///
    /// Unexpected names are reported before missing ones.
    pub fn bind(&self, tool: &str, parameters: &[&str]) -> Result<(), Error> {
        if let Some(extra) = self.0.keys().find(|k| !parameters.contains(&k.as_str())) {
            return Err(Error::UnexpectedArgument {
                tool: tool.to_string(),
                argument: extra.clone(),
            });
        }

        for param in parameters {
            self.require(tool, param)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ToolArguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
