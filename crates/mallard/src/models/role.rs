use serde::{Deserialize, Serialize};

/// Who authored a message in the conversation history.
///
/// The system prompt is carried out-of-band by the agent and prepended by the
/// provider on every request, so it never appears in the history itself. Tool
/// results are user-role messages with `ToolResponse` content; the wire layer
/// emits them with role `tool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}
