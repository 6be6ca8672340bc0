use std::io;
use std::sync::Arc;

use quiz_core::model::QuestionBank;
use services::{Clock, QuizLoopService};
use storage::bank::load_bank_from_path;
use storage::repository::Storage;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod console;

use cli::{Args, ArgsError, Command, print_usage};
use console::Console;

fn init_tracing() {
    // Logs go to stderr so the quiz itself owns stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Open the high-score store. A broken store never blocks the quiz: fall back
/// to memory and keep going.
async fn open_storage(db_url: Option<&str>) -> Storage {
    let Some(db_url) = db_url else {
        return Storage::in_memory();
    };
    if let Err(err) = prepare_sqlite_file(db_url) {
        warn!(db_url, error = %err, "high score file unavailable; using memory");
        return Storage::in_memory();
    }
    match Storage::sqlite(db_url).await {
        Ok(storage) => storage,
        Err(err) => {
            warn!(db_url, error = %err, "high score database unavailable; using memory");
            Storage::in_memory()
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let command = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;
    let args = match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let bank = match &args.bank_path {
        Some(path) => load_bank_from_path(path)?,
        None => QuestionBank::builtin(),
    };
    info!(questions = bank.len(), "question bank loaded");

    let storage = open_storage(args.db_url.as_deref()).await;
    let svc = QuizLoopService::new(Clock::System, Arc::new(bank), storage.high_scores);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.run(&svc, args.seed, args.feedback_delay).await
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
