use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool call request parsed from a model response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// The function name as emitted by the model
    pub name: String,
    /// The decoded JSON argument object
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new ToolCall with the given name and arguments
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}
