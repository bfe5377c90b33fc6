use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use pdfchat_core::{Config, Credentials, IngestEvent, Session};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfchat")]
#[command(about = "Chat with a PDF from your terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[arg(help = "PDF to index on startup")]
    pdf: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);

    // Credentials are resolved before anything else is built; a missing key
    // aborts here with a clear diagnostic.
    let credentials = Credentials::from_env()
        .context("cannot start without provider credentials")?;

    let session = Session::new(config, &credentials);

    if let Some(path) = cli.pdf {
        ingest(&session, path).await;
    }

    println!(
        "{}",
        "Type a question, /load <file.pdf> to index a document, /quit to exit.".dimmed()
    );

    let stdin = std::io::stdin();
    loop {
        print!("{} ", ">".bold().green());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }
        if let Some(path) = line.strip_prefix("/load ") {
            ingest(&session, PathBuf::from(path.trim())).await;
            continue;
        }

        match session.ask_question(line).await {
            Ok(answer) => println!("\n{answer}\n"),
            Err(_) => println!("{} the answer task was dropped", "✗".red().bold()),
        }
    }

    Ok(())
}

async fn ingest(session: &Session, path: PathBuf) {
    println!("{} {}", "Indexing".bold(), path.display());

    let mut events = session.load_document(path);
    while let Some(event) = events.recv().await {
        match event {
            IngestEvent::Stage(stage) => println!("  {} {}", "…".dimmed(), stage),
            IngestEvent::Finished(Ok(summary)) => println!(
                "{} indexed {} pages into {} chunks",
                "✓".green().bold(),
                summary.pages,
                summary.chunks
            ),
            IngestEvent::Finished(Err(e)) => {
                println!("{} {}", "✗".red().bold(), e);
            }
        }
    }
}
