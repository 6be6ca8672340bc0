use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use quiz_core::model::Seed;

pub const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
pub const DEFAULT_FEEDBACK_MS: u64 = 700;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidFeedbackMs { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidFeedbackMs { raw } => {
                write!(f, "invalid --feedback-ms value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Args),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub seed: Option<Seed>,
    pub bank_path: Option<PathBuf>,
    /// `None` keeps the high score in memory only.
    pub db_url: Option<String>,
    pub feedback_delay: Duration,
}

impl Args {
    /// Parse command-line arguments, falling back to `QUIZ_*` environment variables.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut seed = env("QUIZ_SEED").and_then(|raw| Seed::from_input(&raw));
        let mut bank_path = env("QUIZ_BANK")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        let mut db_url = Some(
            env("QUIZ_DB_URL")
                .filter(|raw| !raw.trim().is_empty())
                .map_or_else(|| DEFAULT_DB_URL.to_owned(), normalize_sqlite_url),
        );
        let mut feedback_ms = match env("QUIZ_FEEDBACK_MS") {
            Some(raw) => parse_feedback_ms(raw)?,
            None => DEFAULT_FEEDBACK_MS,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    seed = Seed::from_input(&value);
                }
                "--bank" => {
                    bank_path = Some(PathBuf::from(require_value(&mut args, "--bank")?));
                }
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(normalize_sqlite_url(value));
                }
                "--no-persist" => db_url = None,
                "--feedback-ms" => {
                    feedback_ms = parse_feedback_ms(require_value(&mut args, "--feedback-ms")?)?;
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Run(Self {
            seed,
            bank_path,
            db_url,
            feedback_delay: Duration::from_millis(feedback_ms),
        }))
    }
}

fn parse_feedback_ms(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidFeedbackMs { raw })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--seed <seed>] [--bank <file.json>] [--db <sqlite_url> | --no-persist]");
    eprintln!("       [--feedback-ms <ms>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --feedback-ms {DEFAULT_FEEDBACK_MS}");
    eprintln!("  built-in question bank, random order");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SEED, QUIZ_BANK, QUIZ_DB_URL, QUIZ_FEEDBACK_MS, RUST_LOG");
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
