//! The interactive session: one line of input per turn, the final assistant
//! text per turn, tool activity shown as dim one-liners in between.

use anyhow::Result;
use cliclack::input;
use console::style;
use futures::StreamExt;

use mallard::agent::Agent;
use mallard::models::message::{Message, MessageContent};

/// Owns the conversation history for the lifetime of the process.
pub struct Session {
    agent: Agent,
    messages: Vec<Message>,
}

impl Session {
    pub fn new(agent: Agent) -> Self {
        Session {
            agent,
            messages: Vec::new(),
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        println!(
            "mallard {}",
            style("- type \"exit\" to end the session").dim()
        );
        println!();

        loop {
            let message_text: String = input("Message:").placeholder("").interact()?;

            if message_text.trim().eq_ignore_ascii_case("exit") {
                break;
            }
            if message_text.trim().is_empty() {
                continue;
            }

            self.messages.push(Message::user().with_text(&message_text));
            self.process_turn().await;
        }
        Ok(())
    }

    /// Run one turn. Every yielded message joins the history; a stream error
    /// aborts the turn but keeps whatever was appended before the failure.
    async fn process_turn(&mut self) {
        let mut stream = match self.agent.reply(&self.messages).await {
            Ok(stream) => stream,
            Err(e) => {
                eprintln!("{} {e:#}", style("error:").red().bold());
                return;
            }
        };

        while let Some(response) = stream.next().await {
            match response {
                Ok(message) => {
                    self.messages.push(message.clone());
                    render(&message);
                }
                Err(e) => {
                    eprintln!("{} {e:#}", style("error:").red().bold());
                    break;
                }
            }
        }
    }
}

fn render(message: &Message) {
    for content in &message.content {
        match content {
            MessageContent::Text(text) => {
                if !text.text.is_empty() {
                    println!("{}", text.text);
                }
            }
            MessageContent::ToolRequest(request) => {
                if let Ok(call) = &request.tool_call {
                    println!(
                        "{}",
                        style(format!("⚙ {} {}", call.name, call.arguments)).dim()
                    );
                }
            }
            MessageContent::ToolResponse(response) => {
                println!("{}", style(format!("✓ {}", response.name)).dim());
            }
        }
    }
}
