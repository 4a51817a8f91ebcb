use std::fmt;

use storage::repository::Storage;
use storage::word_list::load_word_list;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    words_path: String,
    struggling: u32,
    mastered: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidStruggling { raw: String },
    InvalidMastered { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidStruggling { raw } => write!(f, "invalid --struggling value: {raw}"),
            ArgsError::InvalidMastered { raw } => write!(f, "invalid --mastered value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("SPELLING_DB_URL")
            .unwrap_or_else(|_| "sqlite://spelling.sqlite3?mode=rwc".into());
        let mut words_path =
            std::env::var("SPELLING_WORDS").unwrap_or_else(|_| "words.json".into());
        let mut struggling = 15;
        let mut mastered = 0;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--words" => {
                    words_path = require_value(&mut args, "--words")?;
                }
                "--struggling" => {
                    let value = require_value(&mut args, "--struggling")?;
                    struggling = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidStruggling { raw: value.clone() })?;
                }
                "--mastered" => {
                    let value = require_value(&mut args, "--mastered")?;
                    mastered = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidMastered { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            words_path,
            struggling,
            mastered,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite://spelling.sqlite3?mode=rwc)");
    eprintln!("  --words <path>            Word list JSON (default: words.json)");
    eprintln!("  --struggling <n>          Words to mark with two failures (default: 15)");
    eprintln!("  --mastered <n>            Following words to mark with two successes (default: 0)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SPELLING_DB_URL, SPELLING_WORDS");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let words = load_word_list(&args.words_path)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let repo = storage.stats();
    let mut stats = repo.load().await?;

    let struggling = args.struggling as usize;
    let mastered = args.mastered as usize;
    for entry in words.iter().take(struggling) {
        stats.record_failure(&entry.word);
        stats.record_failure(&entry.word);
    }
    for entry in words.iter().skip(struggling).take(mastered) {
        stats.record_success(&entry.word);
        stats.record_success(&entry.word);
    }
    repo.save(&stats).await?;

    println!(
        "Seeded {} struggling and {} mastered words ({} tracked) into {}",
        struggling.min(words.len()),
        mastered.min(words.len().saturating_sub(struggling)),
        stats.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
