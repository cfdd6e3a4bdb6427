//! Tool schema provider.
//!
//! The schema file is a JSON array of OpenAI-style function declarations,
//! with one extension: a parameter may carry an `"index"` key, marking it as a
//! bare positional argument of the companion program at that position.
//! Parameters without an index are passed as `--name value` flag pairs.
//!
//! ```json
//! [{"type": "function",
//!   "function": {"name": "list_files",
//!                "description": "List files under a directory",
//!                "parameters": {"type": "object",
//!                               "required": ["path"],
//!                               "properties": {"path": {"type": "string", "index": 0},
//!                                              "recursive": {"type": "boolean"}}}}}]
//! ```
//!
//! The document is parsed once at startup into typed descriptors for the
//! marshaller, and the original value is kept so the exact same declaration
//! can be sent to the chat API.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("tool schema must be a JSON array of function declarations")]
    NotAnArray,

    #[error("tool declaration #{0} has no function name")]
    MissingName(usize),

    #[error("tool '{tool}': parameter '{param}' has a non-integer positional index")]
    InvalidIndex { tool: String, param: String },

    #[error("tool '{tool}': positional index {index} is declared twice")]
    DuplicateIndex { tool: String, index: usize },

    #[error("tool '{tool}': positional indices must be dense and zero-based, got {indices:?}")]
    SparseIndices { tool: String, indices: Vec<usize> },
}

/// How one declared parameter is bound on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamBinding {
    /// A bare token at a fixed zero-based position
    Positional { index: usize },
    /// A `--name value` pair, omitted when the model does not supply it
    Flag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub binding: ParamBinding,
}

/// One tool descriptor: a function name plus its parameters in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    pub fn positional_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| matches!(p.binding, ParamBinding::Positional { .. }))
            .count()
    }
}

/// The full set of tool descriptors, loaded once per process.
#[derive(Debug, Clone)]
pub struct ToolSet {
    specs: Vec<ToolSpec>,
    wire: Vec<Value>,
}

impl ToolSet {
    /// Read and validate a schema file. Any failure here is fatal at startup.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tool schema file {}", path.display()))?;
        let doc: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Tool schema file {} is not valid JSON", path.display()))?;
        let toolset = Self::from_value(doc)
            .with_context(|| format!("Invalid tool schema in {}", path.display()))?;
        tracing::debug!(tools = toolset.specs.len(), "loaded tool schema");
        Ok(toolset)
    }

    /// Parse a schema document, validating every positional index set.
    pub fn from_value(doc: Value) -> std::result::Result<Self, SchemaError> {
        let entries = doc.as_array().ok_or(SchemaError::NotAnArray)?;

        let mut specs = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let function = &entry["function"];
            let name = function["name"]
                .as_str()
                .ok_or(SchemaError::MissingName(position))?
                .to_string();

            // serde_json is built with preserve_order, so iterating the
            // properties object follows the declaration order in the file.
            let mut params = Vec::new();
            if let Some(properties) = function["parameters"]["properties"].as_object() {
                for (param_name, meta) in properties {
                    let binding = match meta.get("index") {
                        Some(index) => {
                            let index =
                                index.as_u64().ok_or_else(|| SchemaError::InvalidIndex {
                                    tool: name.clone(),
                                    param: param_name.clone(),
                                })? as usize;
                            ParamBinding::Positional { index }
                        }
                        None => ParamBinding::Flag,
                    };
                    params.push(ParamSpec {
                        name: param_name.clone(),
                        binding,
                    });
                }
            }

            validate_positional_indices(&name, &params)?;
            specs.push(ToolSpec { name, params });
        }

        Ok(Self {
            specs,
            wire: entries.clone(),
        })
    }

    /// Locate the descriptor for a model-requested function name.
    pub fn find(&self, name: &str) -> Option<&ToolSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// The schema document as loaded, for the chat API's tools declaration.
    pub fn wire_spec(&self) -> &[Value] {
        &self.wire
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Positional indices must form exactly 0..n, with no duplicates. The original
/// file format never guaranteed this, so a malformed set refuses to load
/// rather than producing a shifted argument vector at dispatch time.
fn validate_positional_indices(
    tool: &str,
    params: &[ParamSpec],
) -> std::result::Result<(), SchemaError> {
    let mut indices: Vec<usize> = params
        .iter()
        .filter_map(|p| match p.binding {
            ParamBinding::Positional { index } => Some(index),
            ParamBinding::Flag => None,
        })
        .collect();
    indices.sort_unstable();

    for pair in indices.windows(2) {
        if pair[0] == pair[1] {
            return Err(SchemaError::DuplicateIndex {
                tool: tool.to_string(),
                index: pair[0],
            });
        }
    }
    if indices.iter().enumerate().any(|(expected, &got)| expected != got) {
        return Err(SchemaError::SparseIndices {
            tool: tool.to_string(),
            indices,
        });
    }
    Ok(())
}
