use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, builder::styling};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tabula_cli::document::{load_attachment, load_context, render_dataset, write_dataset};
use tabula_cli::normalize_dashes;
use tabula_cli::session::ChatSession;
use tabula_client::{TabulaClientConfig, TabulaService};
use tabula_core::contracts::{TabulaExtractRequest, TabulaGenerationConfig};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tabula: turn documents into tables with Gemini",
    long_about = "Extracts structured rows from documents through Vertex AI Gemini, or chats about them.\n\nReads VERTEXAI_API_URL, VERTEXAI_SA_PATH or VERTEXAI_SA_JSON, and TABULA_MODEL from the environment.",
    styles = STYLES
)]
struct Args {
    #[arg(short, long, global = true, help = "The model to use (defaults to TABULA_MODEL or gemini-2.5-flash)")]
    model: Option<String>,

    #[arg(short, long, global = true, help = "Sampling temperature between 0 and 1")]
    temperature: Option<f32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract rows from a document
    Extract {
        #[arg(help = "The document to extract from (PDF, image or text)")]
        file: PathBuf,

        #[arg(short, long, help = "What to extract and in which shape")]
        instruction: String,

        #[arg(short, long, help = "Write the rows as JSON to this path instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Chat about documents and notes
    Chat {
        #[arg(short, long, help = "Text file used as grounding context")]
        context_file: Option<PathBuf>,

        #[arg(short, long = "attach", help = "Attachment sent with the first message; repeatable")]
        attachments: Vec<PathBuf>,
    },
}

struct App {
    service: TabulaService,
    model: String,
    temperature: Option<f32>,
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

impl App {
    fn new(model: Option<String>, temperature: Option<f32>) -> Result<Self> {
        let config = TabulaClientConfig::from_env()?;
        let service = TabulaService::new(config)?;
        let model = model.unwrap_or_else(|| service.default_model().to_string());
        Ok(Self { service, model, temperature })
    }

    fn generation_config(&self) -> Option<TabulaGenerationConfig> {
        self.temperature.map(|t| TabulaGenerationConfig {
            temperature: Some(t),
            max_output_tokens: None,
        })
    }

    fn clear_screen() {
        if cfg!(windows) {
            let _ = Command::new("cmd").args(["/c", "cls"]).status();
        } else {
            let _ = Command::new("clear").status();
        }
    }

    async fn extract(&self, file: PathBuf, instruction: String, output: Option<PathBuf>) -> Result<()> {
        let document = load_attachment(&file)?;
        let request = TabulaExtractRequest {
            model: self.model.clone(),
            correlation_id: Some(Uuid::new_v4().to_string()),
            document: Some(document),
            instruction,
            generation_config: self.generation_config(),
        };

        let pb = spinner("Extracting...")?;
        let response = self.service.extract(request).await;
        pb.finish_and_clear();
        let response = response.map_err(|e| anyhow!("{}", e))?;

        eprintln!(
            "{} {} rows via {:?} ({} tokens)",
            "✅".bright_green(),
            response.rows.len().to_string().bold(),
            response.strategy,
            response.usage.total_tokens
        );

        match output {
            Some(path) => {
                write_dataset(&path, &response.rows)?;
                eprintln!("{} Wrote {}", "📄".bright_cyan(), path.display().to_string().bold());
            }
            None => println!("{}", render_dataset(&response.rows)?),
        }
        Ok(())
    }

    async fn chat(&mut self, context_file: Option<PathBuf>, attachments: Vec<PathBuf>) -> Result<()> {
        let context = context_file.as_deref().map(load_context).transpose()?;
        let attachments = attachments
            .iter()
            .map(|path| load_attachment(path))
            .collect::<Result<Vec<_>>>()?;
        let mut session = ChatSession::new(context, attachments, Uuid::new_v4().to_string());

        println!("{}", "✨ Welcome to tabula chat.".bright_cyan().bold());
        if session.pending_attachments() > 0 {
            println!("{} {} attachment(s) will be sent with your first message.", "📎".bright_blue(), session.pending_attachments());
        }
        println!("{}", "Type '/help' for a list of commands, or '/exit' to quit.\n".dimmed());

        loop {
            print!("{}", "> ".bright_blue().bold());
            io::stdout().flush()?;
            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            if input == "/exit" {
                println!("{}", "👋 Goodbye!".bright_yellow());
                break;
            }
            if input == "/help" {
                println!("{}", "\nAvailable commands:".bright_green().bold());
                println!("  {} - Display this help message", "/help".cyan());
                println!("  {} - Display the current model", "/model".cyan());
                println!("  {} {{model}} - Switch to a different model", "/model".cyan());
                println!("  {} - Reset the conversation history", "/clear".cyan());
                println!("  {} - Clear the terminal screen", "/cls".cyan());
                println!("  {} - Quit the interactive session\n", "/exit".cyan());
                continue;
            }
            if input == "/cls" {
                Self::clear_screen();
                continue;
            }
            if input == "/clear" {
                session.clear(Uuid::new_v4().to_string());
                println!("{}", "🧹 History cleared.".bright_cyan());
                continue;
            }
            if input == "/model" {
                println!("{} Current model: {}", "🤖".bright_blue(), self.model.bright_magenta().bold());
                continue;
            }
            if let Some(new_model) = input.strip_prefix("/model ") {
                let new_model = new_model.trim();
                if new_model.is_empty() {
                    println!("{} Please specify a model name. Usage: /model {{model_name}}", "⚠️".bright_yellow());
                } else {
                    self.model = new_model.to_string();
                    println!("{} Model changed to: {}", "✅".bright_green(), self.model.bright_magenta().bold());
                }
                continue;
            }

            let request = session.next_request(input, &self.model, self.generation_config());
            let pb = spinner("Thinking...")?;
            let response = self.service.chat(request).await;
            pb.finish_and_clear();

            match response {
                Ok(response) => {
                    println!("{}\n", response.reply);
                    session.record_reply(&response.reply);
                }
                Err(e) => {
                    session.discard_last_prompt();
                    eprintln!("{} {}", "❌".bright_red(), e.to_string().red());
                }
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse_from(normalize_dashes(std::env::args()));
    let mut app = App::new(args.model, args.temperature)?;

    match args.command {
        Commands::Extract { file, instruction, output } => app.extract(file, instruction, output).await,
        Commands::Chat { context_file, attachments } => app.chat(context_file, attachments).await,
    }
}
