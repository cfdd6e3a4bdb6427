//! Argument marshalling: a model-supplied JSON argument object plus a tool
//! descriptor becomes an ordered argv fragment for the companion program.

use serde_json::Value;

use crate::errors::{ToolError, ToolResult};
use crate::schema::{ParamBinding, ToolSpec};

/// Build the argument tokens for one tool call.
///
/// Declared parameters drive the walk, in declaration order: positionals are
/// placed at their index (ascending index order in the output, whatever the
/// declaration order), flags present in the argument object append `--name`
/// and the stringified value. The schema acts as an allow-list: argument
/// names the schema does not declare are silently dropped, and declared flags
/// the model did not supply are omitted. A positional parameter missing from
/// the arguments is an error; indices never shift silently.
pub fn marshal_arguments(spec: &ToolSpec, arguments: &Value) -> ToolResult<Vec<String>> {
    let supplied = arguments.as_object().ok_or_else(|| {
        ToolError::InvalidParameters(format!(
            "arguments for '{}' must be a JSON object, got {arguments}",
            spec.name
        ))
    })?;

    let mut positionals: Vec<Option<String>> = vec![None; spec.positional_count()];
    let mut flags = Vec::new();

    for param in &spec.params {
        match param.binding {
            ParamBinding::Positional { index } => {
                let value = supplied.get(&param.name).ok_or_else(|| {
                    ToolError::MissingArgument(format!(
                        "'{}' requires positional argument '{}'",
                        spec.name, param.name
                    ))
                })?;
                positionals[index] = Some(stringify(value));
            }
            ParamBinding::Flag => {
                if let Some(value) = supplied.get(&param.name) {
                    flags.push(format!("--{}", param.name));
                    flags.push(stringify(value));
                }
            }
        }
    }

    // The schema loader guarantees dense indices, so every slot is filled.
    let mut tokens: Vec<String> = positionals.into_iter().flatten().collect();
    tokens.extend(flags);
    Ok(tokens)
}

/// Render a JSON value as a single command-line token.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
