//! Tool dispatch: a model-requested function name becomes an invocation of the
//! companion program.
//!
//! The function name doubles as the subcommand path: `list_files` runs
//! `<program> list files <args...>`. Underscores are the model-safe spelling
//! of the space-separated verb tokens.

use std::path::PathBuf;

use crate::command::{run_command, CommandOutput};
use crate::errors::{ToolError, ToolResult};
use crate::marshal::marshal_arguments;
use crate::models::tool::ToolCall;
use crate::schema::ToolSet;

pub struct Dispatcher {
    toolset: ToolSet,
    program: PathBuf,
}

impl Dispatcher {
    pub fn new(toolset: ToolSet, program: impl Into<PathBuf>) -> Self {
        Self {
            toolset,
            program: program.into(),
        }
    }

    pub fn toolset(&self) -> &ToolSet {
        &self.toolset
    }

    /// Resolve one tool call and return the text handed back to the model.
    ///
    /// Schema lookup and marshalling failures, and a program that cannot be
    /// started, are errors that abort the current turn. A program that runs
    /// and fails is not: its output comes back as the tool result, tagged
    /// with the exit status, so the model can react to it conversationally.
    pub fn dispatch(&self, call: &ToolCall) -> ToolResult<String> {
        let spec = self
            .toolset
            .find(&call.name)
            .ok_or_else(|| ToolError::ToolNotFound(call.name.clone()))?;

        let mut argv: Vec<String> = call.name.split('_').map(str::to_string).collect();
        argv.extend(marshal_arguments(spec, &call.arguments)?);

        tracing::info!(tool = %call.name, ?argv, "dispatching tool call");
        let output = run_command(&self.program, &argv).map_err(|e| {
            ToolError::ExecutionError(format!(
                "could not start {}: {e}",
                self.program.display()
            ))
        })?;

        Ok(render_output(&output))
    }
}

/// Stdout then stderr; a failed exit gets a trailing status line so the model
/// sees the failure explicitly instead of inferring it from merged text.
fn render_output(output: &CommandOutput) -> String {
    let mut text = output.combined();
    if !output.success() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        match output.status {
            Some(code) => text.push_str(&format!("(command exited with status {code})")),
            None => text.push_str("(command terminated by signal)"),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ToolSet;
    use serde_json::json;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    fn toolset() -> ToolSet {
        ToolSet::from_value(json!([{
            "function": {
                "name": "list_files",
                "parameters": {"properties": {
                    "path": {"type": "string", "index": 0},
                    "recursive": {"type": "boolean"}
                }}
            }
        }]))
        .unwrap()
    }

    /// A stand-in companion program that echoes its argument vector.
    fn echo_program(body: &str) -> tempfile::TempPath {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#!/bin/sh\n{body}").unwrap();
        let path = file.into_temp_path();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn splits_name_into_verbs_and_appends_marshalled_args() {
        let program = echo_program(r#"echo "$@""#);
        let dispatcher = Dispatcher::new(toolset(), program.to_path_buf());

        let output = dispatcher
            .dispatch(&ToolCall::new(
                "list_files",
                json!({"path": "/tmp", "recursive": true}),
            ))
            .unwrap();

        assert_eq!(output, "list files /tmp --recursive true\n");
    }

    #[test]
    fn failed_exit_is_tagged_not_raised() {
        let program = echo_program("echo out; echo err >&2; exit 2");
        let dispatcher = Dispatcher::new(toolset(), program.to_path_buf());

        let output = dispatcher
            .dispatch(&ToolCall::new("list_files", json!({"path": "/tmp"})))
            .unwrap();

        assert_eq!(output, "out\nerr\n(command exited with status 2)");
    }

    #[test]
    fn unknown_function_name_is_tool_not_found() {
        let program = echo_program(r#"echo "$@""#);
        let dispatcher = Dispatcher::new(toolset(), program.to_path_buf());

        let err = dispatcher
            .dispatch(&ToolCall::new("delete_files", json!({})))
            .unwrap_err();
        assert_eq!(err, ToolError::ToolNotFound("delete_files".to_string()));
    }

    #[test]
    fn marshalling_failure_propagates() {
        let program = echo_program(r#"echo "$@""#);
        let dispatcher = Dispatcher::new(toolset(), program.to_path_buf());

        let err = dispatcher
            .dispatch(&ToolCall::new("list_files", json!({"recursive": true})))
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(_)));
    }

    #[test]
    fn unstartable_program_is_execution_error() {
        let dispatcher = Dispatcher::new(toolset(), "/nonexistent/companion");

        let err = dispatcher
            .dispatch(&ToolCall::new("list_files", json!({"path": "/tmp"})))
            .unwrap_err();
        assert!(matches!(err, ToolError::ExecutionError(_)));
    }
}
