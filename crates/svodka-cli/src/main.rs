use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use svodka_core::{
    ArtifactStore, Config, OpenAiClient, Pipeline, PipelineEvent, ProgressSink, ReportGenerator,
    SvodkaError, YtDlpSource, resolve_api_key,
};

#[derive(Parser)]
#[command(name = "svodka")]
#[command(
    about = "Pull a YouTube video's subtitles and generate an AI-written report, chunking long transcripts"
)]
struct Cli {
    /// Video URL
    url: String,

    /// Config file path. When omitted, ./config.toml is used if present,
    /// built-in defaults otherwise.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// LLM API key. Priority: this flag > LLM_API_KEY env > config file > prompt
    #[arg(long)]
    api_key: Option<String>,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Renders pipeline progress as spinners and ✓ lines.
struct CliProgress {
    active: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            active: Mutex::new(None),
        })
    }

    fn start(&self, msg: &str) {
        let mut active = self.active.lock().unwrap();
        if let Some(spinner) = active.take() {
            spinner.finish_and_clear();
        }
        *active = Some(create_spinner(msg));
    }

    fn finish(&self, msg: String) {
        let mut active = self.active.lock().unwrap();
        match active.take() {
            Some(spinner) => spinner.finish_with_message(msg),
            None => println!("{}", msg),
        }
    }
}

fn cached_mark(cached: bool) -> String {
    if cached {
        format!(" {}", style("(cached)").dim())
    } else {
        String::new()
    }
}

impl ProgressSink for CliProgress {
    fn event(&self, event: &PipelineEvent) {
        match *event {
            PipelineEvent::TranscriptReady { chars, cached } => {
                self.finish(format!(
                    "{} Transcript ready: {} chars{}",
                    style("✓").green().bold(),
                    chars,
                    cached_mark(cached)
                ));
            }
            PipelineEvent::DirectPath => {
                self.start("Generating report...");
            }
            PipelineEvent::ChunkingStarted { total } => {
                println!(
                    "{} Transcript too long, summarizing {} chunks",
                    style("→").cyan().bold(),
                    total
                );
                self.start(&format!("Summarizing chunk 1/{}...", total));
            }
            PipelineEvent::ChunkReady {
                index,
                total,
                cached,
            } => {
                self.finish(format!(
                    "{} Chunk {}/{} summarized{}",
                    style("✓").green().bold(),
                    index + 1,
                    total,
                    cached_mark(cached)
                ));
                if index + 1 < total {
                    self.start(&format!("Summarizing chunk {}/{}...", index + 2, total));
                }
            }
            PipelineEvent::CombiningSummaries { .. } => {
                self.start("Generating final report from combined summaries...");
            }
            PipelineEvent::ReportReady { cached } => {
                self.finish(format!(
                    "{} Report generated{}",
                    style("✓").green().bold(),
                    cached_mark(cached)
                ));
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            let default_path = PathBuf::from("config.toml");
            if default_path.exists() {
                Ok(Config::load(&default_path)?)
            } else {
                println!(
                    "{}",
                    style("No config.toml found, using built-in defaults").dim()
                );
                let config = Config::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}

/// Interactive fallback for the API key, only on an attended terminal.
fn prompt_for_api_key() -> Result<String, SvodkaError> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(SvodkaError::MissingApiKey);
    }
    eprint!("Enter your LLM API key: ");
    let key = term.read_line().map_err(SvodkaError::IoError)?;
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(SvodkaError::MissingApiKey);
    }
    Ok(key)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Resolve the API key before any network or subprocess work
    let api_key = match resolve_api_key(cli.api_key.as_deref(), &config) {
        Ok(key) => key,
        Err(SvodkaError::MissingApiKey) => match prompt_for_api_key() {
            Ok(key) => key,
            Err(e) => {
                eprintln!("{} {}", style("Error:").red().bold(), e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    println!(
        "\n{}  {}\n",
        style("svodka").cyan().bold(),
        style("Video Report Generator").dim()
    );

    let store = ArtifactStore::new(&config.output.reports_dir, &config.output.format);
    let subtitles = Arc::new(YtDlpSource::new(config.subtitle.clone()));
    let client = match OpenAiClient::new(&config.llm, api_key) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    let generator = ReportGenerator::new(config.prompts.clone(), client);

    let progress = CliProgress::new();
    let pipeline =
        Pipeline::new(config, store, subtitles, generator).with_progress(progress.clone());

    progress.start("Fetching subtitles...");
    let outcome = match pipeline.run(&cli.url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.finish(format!("{} Job failed", style("✗").red().bold()));
            eprintln!("\n{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    println!(
        "\n{} {}\n",
        style("Saved:").dim(),
        style(outcome.report_path.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", outcome.preview);

    Ok(())
}
