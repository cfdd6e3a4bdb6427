use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mallard::agent::Agent;
use mallard::dispatch::Dispatcher;
use mallard::providers::configs::OpenAiProviderConfig;
use mallard::providers::openai::OpenAiProvider;
use mallard::schema::ToolSet;

mod config;
mod session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Model to use, overriding the configuration file
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Any failure up to here is fatal: no config, no schema, no session
    let config = config::load_config(&cli.config)?;
    let api_key = config.openai.resolve_api_key()?;
    let toolset = ToolSet::load(&config.agent.tools_file)?;

    let provider = OpenAiProvider::new(OpenAiProviderConfig::new(
        config.openai.host,
        api_key,
        cli.model.unwrap_or(config.openai.model),
    ))?;

    let dispatcher = Dispatcher::new(toolset, config.agent.program);
    let agent = Agent::new(Box::new(provider), dispatcher, config.agent.system_prompt)
        .with_max_tool_rounds(config.agent.max_tool_rounds);

    session::Session::new(agent).start().await
}
