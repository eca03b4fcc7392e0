use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dunbot::config::AppConfig;
use dunbot::errors::AppError;
use dunbot::models::TemplateTable;
use dunbot::roster;
use dunbot::services::classifier::ollama::OllamaProvider;
use dunbot::services::classifier::openai::OpenAiProvider;
use dunbot::services::classifier::LlmProvider;
use dunbot::services::dispatch;
use dunbot::services::messaging::console::ConsoleSink;
use dunbot::services::responder;

#[derive(Debug, Parser)]
#[command(name = "dunbot", about = "Billing reminder bot with LLM-backed reply handling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run scheduled dispatch over the roster
    Dispatch {
        /// Override "today" (YYYY-MM-DD); defaults to the local date
        #[arg(long)]
        today: Option<NaiveDate>,
        /// JSON roster file; defaults to the built-in demo roster
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Classify one customer message and dispatch the reply
    Classify {
        /// Roster customer the message came from
        #[arg(long)]
        customer: String,
        /// The customer's message text
        #[arg(long)]
        text: String,
        /// JSON roster file; defaults to the built-in demo roster
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Command::Dispatch { today, roster: roster_path } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let customers = match roster_path {
                Some(path) => roster::load(&path)?,
                None => roster::demo_roster(today),
            };

            let templates = TemplateTable::defaults();
            templates.validate()?;

            tracing::info!(today = %today, customers = customers.len(), "running scheduled dispatch");
            dispatch::run_dispatch(&customers, today, &templates, &ConsoleSink).await?;
        }
        Command::Classify { customer: customer_name, text, roster: roster_path } => {
            let today = Local::now().date_naive();
            let customers = match roster_path {
                Some(path) => roster::load(&path)?,
                None => roster::demo_roster(today),
            };
            let customer = roster::find(&customers, &customer_name)
                .ok_or_else(|| AppError::UnknownCustomer(customer_name.clone()))?;

            let llm = build_provider(&config)?;
            responder::handle_reply(llm.as_ref(), &ConsoleSink, customer, &text).await?;
        }
    }

    Ok(())
}

fn build_provider(config: &AppConfig) -> anyhow::Result<Box<dyn LlmProvider>> {
    match config.classifier_provider.as_str() {
        "ollama" => {
            tracing::info!("using Ollama classifier (url: {})", config.ollama_url);
            Ok(Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            )))
        }
        _ => {
            anyhow::ensure!(
                !config.openai_api_key.is_empty(),
                "OPENAI_API_KEY must be set when CLASSIFIER_PROVIDER=openai"
            );
            tracing::info!("using OpenAI classifier (model: {})", config.openai_model);
            Ok(Box::new(OpenAiProvider::new(
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            )))
        }
    }
}
