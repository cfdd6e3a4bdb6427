use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Tool loop exceeded {0} rounds")]
    LoopLimitReached(usize),
}

pub type ToolResult<T> = Result<T, ToolError>;
