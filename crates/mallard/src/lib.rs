//! mallard drives a companion command-line tool from a chat model.
//!
//! The model declares which functions it wants to call, the dispatcher turns
//! each call into an invocation of the companion program, and the agent loop
//! feeds the captured output back into the conversation until the model
//! produces a plain answer. The tool schema file is the single source of truth:
//! it is parsed into typed descriptors for argument marshalling and sent
//! verbatim to the chat API as the available-tools declaration.
pub mod agent;
pub mod command;
pub mod dispatch;
pub mod errors;
pub mod marshal;
pub mod models;
pub mod providers;
pub mod schema;
