//! Startup configuration.
//!
//! One TOML file declares the credential, the system prompt, and where to find
//! the tool schema and the companion program. A missing or malformed file is a
//! fatal startup error; nothing is defaulted silently except the endpoint
//! host, the model, and the round budget.
//!
//! ```toml
//! [openai]
//! api_key = "sk-..."                 # optional, falls back to OPENAI_API_KEY
//! host = "https://api.openai.com"    # default
//! model = "gpt-4o"                   # default
//!
//! [agent]
//! system_prompt = "You are the assistant for ..."
//! tools_file = "tools-spec.json"
//! program = "./companion-cli"
//! max_tool_rounds = 8                # default
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use mallard::agent::DEFAULT_MAX_TOOL_ROUNDS;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    pub system_prompt: String,
    pub tools_file: PathBuf,
    pub program: PathBuf,
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

fn default_host() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tool_rounds() -> usize {
    DEFAULT_MAX_TOOL_ROUNDS
}

pub fn load_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("Config file {} is not valid", path.display()))?;
    Ok(config)
}

impl OpenAiConfig {
    /// The configured key, or the OPENAI_API_KEY environment variable.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| env::var("OPENAI_API_KEY").ok())
            .context(
                "API key must be provided via [openai].api_key or the OPENAI_API_KEY environment variable",
            )
    }
}
