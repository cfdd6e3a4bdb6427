//! These models represent the objects passed around by the agent
//!
//! The conversation history is a vector of [`message::Message`]s owned by the
//! session; it is append-only and resent in full on every chat API call. Tool
//! calls requested by the model travel as [`message::ToolRequest`] content on
//! assistant messages, and the dispatcher's textual results travel back as
//! [`message::ToolResponse`] content, tagged with the originating call id and
//! function name. The wire format conversion lives in `providers::utils`.
pub mod message;
pub mod role;
pub mod tool;
