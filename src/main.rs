// NLPiffy: tokenization, entities, sentiment and summaries from the terminal or a browser
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use termcolor::{ColorChoice, StandardStream};
use tracing::info;

mod dispatch;
mod error;
mod input;
mod logging;
mod nlp;
mod present;
mod web;

use dispatch::{dispatch, AnalysisRequest, Feature, Services};
use nlp::SummarizerKind;

#[derive(Parser)]
#[command(
    name = "nlpiffy",
    version,
    about = "Your modern Natural Language Processing playground"
)]
struct Cli {
    /// Log filter, e.g. "nlpiffy=debug"
    #[arg(long, global = true, env = "RUST_LOG", default_value = logging::DEFAULT_FILTER)]
    log_level: String,
    /// JSON file of extra named entities: {"ORG": ["Initech"], "GPE": [...]}
    #[arg(long, global = true, env = "NLPIFFY_GAZETTEER")]
    gazetteer: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one analysis and print the result
    Analyze {
        #[arg(short, long, value_enum, default_value_t = Feature::Tokenize)]
        feature: Feature,
        #[arg(short, long, value_enum, default_value_t = SummarizerKind::LexRank)]
        summarizer: SummarizerKind,
        /// Text to analyze; reads stdin when neither --text nor --file is given
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,
        /// .txt, .md, .csv, .json or .pdf file to analyze
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the web UI
    Serve {
        #[arg(short, long, env = "NLPIFFY_ADDR", default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => input::read_file(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => input::read_stdin().context("failed to read stdin"),
    }
}

fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.set_message("Processing your text...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn run_analysis(services: &Services, request: &AnalysisRequest, json: bool) -> Result<()> {
    let pb = spinner()?;
    let outcome = dispatch(services, request);
    pb.finish_and_clear();
    let outcome = outcome?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        present::terminal::render(&mut stdout, &outcome)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let services = Services::load(cli.gazetteer.as_deref())
        .context("failed to load the language model")?;

    match cli.command {
        Commands::Analyze {
            feature,
            summarizer,
            text,
            file,
            json,
        } => {
            let request = AnalysisRequest {
                text: read_input(text, file)?,
                feature,
                summarizer,
            };
            run_analysis(&services, &request, json)?;
        }
        Commands::Serve { addr } => {
            info!("starting web UI");
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::serve(addr, services))?;
        }
    }
    Ok(())
}
