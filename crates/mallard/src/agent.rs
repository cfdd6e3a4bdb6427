//! The conversation loop.
//!
//! One user turn is one call to [`Agent::reply`]: the full ordered history
//! goes to the provider, and every returned tool call is resolved through the
//! dispatcher before the provider is called again with the extended history.
//! The loop ends when an assistant response carries no tool calls, or fails
//! closed once the round budget is spent.

use anyhow::Result;
use futures::stream::BoxStream;

use crate::dispatch::Dispatcher;
use crate::errors::ToolError;
use crate::models::message::{Message, ToolRequest};
use crate::providers::base::Provider;

/// Tool-resolution rounds allowed per user turn before failing closed.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// Agent pairs a chat provider with the dispatcher for the companion program
pub struct Agent {
    provider: Box<dyn Provider>,
    dispatcher: Dispatcher,
    system_prompt: String,
    max_tool_rounds: usize,
}

impl Agent {
    pub fn new(
        provider: Box<dyn Provider>,
        dispatcher: Dispatcher,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            dispatcher,
            system_prompt: system_prompt.into(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    /// Create a stream that yields each message as the turn unfolds: the
    /// assistant response for every round, and one user-role message carrying
    /// the tool responses of that round. The caller owns the history; it
    /// appends whatever the stream yields.
    ///
    /// Nothing is retried. A tool call that failed to parse, a schema miss,
    /// and a companion program that cannot start all abort the turn as a
    /// stream error; messages yielded before the failure stand.
    pub async fn reply(&self, messages: &[Message]) -> Result<BoxStream<'_, Result<Message>>> {
        let mut messages = messages.to_vec();
        let tools = self.dispatcher.toolset().wire_spec().to_vec();

        Ok(Box::pin(async_stream::try_stream! {
            let mut rounds = 0;
            loop {
                let (response, usage) = self.provider.complete(
                    &self.system_prompt,
                    &messages,
                    &tools,
                ).await?;
                tracing::debug!(total_tokens = ?usage.total_tokens, "completion received");

                messages.push(response.clone());
                yield response.clone();

                // Ensure the message above is delivered before the potentially
                // long-running commands start processing
                tokio::task::yield_now().await;

                let tool_requests: Vec<ToolRequest> =
                    response.tool_requests().into_iter().cloned().collect();

                if tool_requests.is_empty() {
                    // No more tool calls, the response is terminal
                    break;
                }

                check_round_budget(rounds, self.max_tool_rounds)?;
                rounds += 1;

                let mut tool_message = Message::user();
                for request in &tool_requests {
                    // A request that failed to parse aborts here, uncaught
                    let call = request.tool_call.clone()?;
                    let output = self.dispatcher.dispatch(&call)?;
                    tool_message =
                        tool_message.with_tool_response(request.id.clone(), call.name, output);
                }

                messages.push(tool_message.clone());
                yield tool_message;
            }
        }))
    }
}

/// Fail closed once the per-turn budget is spent, instead of letting a model
/// that keeps requesting tools recurse forever.
fn check_round_budget(rounds: usize, max_tool_rounds: usize) -> Result<(), ToolError> {
    if rounds >= max_tool_rounds {
        return Err(ToolError::LoopLimitReached(max_tool_rounds));
    }
    Ok(())
}
