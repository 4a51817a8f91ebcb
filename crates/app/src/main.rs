use std::fmt;

use services::{NoticeService, WordProgressTracker};
use spelling_core::{TrackerConfig, UnlockPolicy};
use storage::repository::Storage;
use storage::word_list::load_word_list;
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidPolicy { raw: String },
    MissingWord,
    ResetNotConfirmed,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPolicy { raw } => write!(
                f,
                "invalid --policy value: {raw} (expected failed-words or attempted-words)"
            ),
            ArgsError::MissingWord => write!(f, "add requires a word"),
            ArgsError::ResetNotConfirmed => {
                write!(f, "reset erases all progress; pass --yes to confirm")
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- quiz  [--db <sqlite_url>] [--words <path>] [--policy <name>]");
    eprintln!("  cargo run -p app -- stats [--db <sqlite_url>] [--policy <name>]");
    eprintln!("  cargo run -p app -- reset --yes [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- add <word> [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:spelling.sqlite3");
    eprintln!("  --words words.json");
    eprintln!("  --policy failed-words   (unlock practice after 15 missed words)");
    eprintln!("           attempted-words (unlock practice after 50 attempted words)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SPELLING_DB_URL, SPELLING_WORDS, SPELLING_UNLOCK_POLICY, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    Stats,
    Reset,
    Add,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "stats" => Some(Self::Stats),
            "reset" => Some(Self::Reset),
            "add" => Some(Self::Add),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    words_path: String,
    policy: UnlockPolicy,
    confirmed: bool,
    word: Option<String>,
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("SPELLING_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("spelling.sqlite3".into()), normalize_sqlite_url);
        let mut words_path =
            std::env::var("SPELLING_WORDS").unwrap_or_else(|_| "words.json".into());
        let mut policy = match std::env::var("SPELLING_UNLOCK_POLICY") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ArgsError::InvalidPolicy { raw: raw.clone() })?,
            Err(_) => UnlockPolicy::default(),
        };
        let mut confirmed = false;
        let mut word = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--words" => {
                    words_path = require_value(args, "--words")?;
                }
                "--policy" => {
                    let value = require_value(args, "--policy")?;
                    policy = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPolicy { raw: value.clone() })?;
                }
                "--yes" | "-y" => confirmed = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if cmd == Command::Add && !arg.starts_with('-') && word.is_none() => {
                    word = Some(arg);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            words_path,
            policy,
            confirmed,
            word,
        })
    }

    fn config(&self) -> TrackerConfig {
        TrackerConfig::default().with_unlock_policy(self.policy)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
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
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means quiz.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Quiz,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Quiz,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(cmd, &mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if cmd == Command::Reset && !parsed.confirmed {
        return Err(ArgsError::ResetNotConfirmed.into());
    }

    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let mut tracker = WordProgressTracker::load(storage.stats(), parsed.config()).await?;

    match cmd {
        Command::Quiz => {
            let words = load_word_list(&parsed.words_path)?;
            let notice = NoticeService::new(storage.kv.clone());
            repl::run_quiz(tracker, words, notice).await
        }
        Command::Stats => {
            repl::print_stats(&tracker);
            Ok(())
        }
        Command::Reset => {
            tracker.reset_all().await?;
            println!("All progress cleared.");
            Ok(())
        }
        Command::Add => {
            let word = parsed.word.ok_or(ArgsError::MissingWord)?;
            if tracker.manually_add_to_practice(&word).await? {
                println!("Added \"{word}\" to practice.");
            } else {
                println!("\"{word}\" already has progress; nothing changed.");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_for(cmd: Command, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(cmd, &mut iter)
    }

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        parse_for(Command::Quiz, args)
    }

    #[test]
    fn parses_flags_and_positional_word() {
        let args = parse_for(Command::Add, &[
            "--db",
            "sqlite://tmp/test.sqlite3",
            "--policy",
            "attempted-words",
            "rhythm",
        ])
        .unwrap();
        assert_eq!(args.db_url, "sqlite://tmp/test.sqlite3");
        assert_eq!(args.policy, UnlockPolicy::attempted_words());
        assert_eq!(args.word.as_deref(), Some("rhythm"));
        assert!(!args.confirmed);
    }

    #[test]
    fn positional_word_is_only_taken_by_add() {
        for cmd in [Command::Quiz, Command::Stats, Command::Reset] {
            let err = parse_for(cmd, &["rhythm"]).err().unwrap();
            assert!(matches!(err, ArgsError::UnknownArg(ref arg) if arg == "rhythm"));
        }
        let args = parse_for(Command::Add, &["rhythm"]).unwrap();
        assert_eq!(args.word.as_deref(), Some("rhythm"));
    }

    #[test]
    fn add_takes_a_single_word() {
        let err = parse_for(Command::Add, &["rhythm", "island"]).err().unwrap();
        assert!(matches!(err, ArgsError::UnknownArg(ref arg) if arg == "island"));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = parse(&["--policy", "sometimes"]).err().unwrap();
        assert!(matches!(err, ArgsError::InvalidPolicy { .. }));
    }

    #[test]
    fn flag_without_value_is_an_error() {
        let err = parse(&["--words"]).err().unwrap();
        assert!(matches!(err, ArgsError::MissingValue { flag: "--words" }));
    }

    #[test]
    fn relative_db_path_becomes_absolute_url() {
        let url = normalize_sqlite_url("sqlite:data/spelling.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/spelling.sqlite3"));
    }
}
