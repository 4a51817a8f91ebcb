//! Line-oriented quiz loop on stdin/stdout.

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard};

use services::{
    NoticeService, QuizError, QuizSession, SpeechCue, SpeechRequest, Speaker, WordProgressTracker,
};
use spelling_core::model::{Mode, WordEntry};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Hands speech requests to an external text-to-speech command, if one is
/// configured. A new request stops the utterance still playing.
struct CommandSpeaker {
    program: Option<String>,
    playing: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    fn from_env() -> Self {
        let program = std::env::var("SPELLING_TTS")
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::new(program)
    }

    fn new(program: Option<String>) -> Self {
        Self {
            program,
            playing: Mutex::new(None),
        }
    }

    fn playing(&self) -> MutexGuard<'_, Option<Child>> {
        self.playing
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Kill `child` if it still runs, then reap it.
fn stop(mut child: Child) {
    if let Ok(None) = child.try_wait() {
        if let Err(err) = child.kill() {
            tracing::debug!(error = %err, "text-to-speech already exited");
        }
    }
    if let Err(err) = child.wait() {
        tracing::warn!(error = %err, "failed to reap text-to-speech process");
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, request: &SpeechRequest) {
        let Some(program) = self.program.as_deref() else {
            return;
        };
        let mut playing = self.playing();
        if let Some(previous) = playing.take() {
            stop(previous);
        }
        match Command::new(program)
            .arg(&request.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => *playing = Some(child),
            Err(err) => tracing::warn!(program, error = %err, "failed to start text-to-speech"),
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        if let Some(child) = self.playing().take() {
            stop(child);
        }
    }
}

const HELP: &str = "\
Type your spelling and press Enter to check it. Commands:
  :next                  pick another word (an empty line does the same)
  :say [word|slow|sentence|definition]
  :mode easy|hard|practice
  :add                   put the current word on the practice list
  :stats                 show progress
  :reset                 clear all progress (asks for confirmation)
  :dismiss               hide the welcome notice next time
  :help, :quit";

const NOTICE: &str = "\
Welcome! Words you miss are remembered. Miss enough different words and
practice mode unlocks to drill the ones you struggle with.";

pub async fn run_quiz(
    tracker: WordProgressTracker,
    words: Vec<WordEntry>,
    notice: NoticeService,
) -> Result<(), Box<dyn std::error::Error>> {
    if !notice.is_dismissed().await? {
        println!("{NOTICE}\n");
    }
    println!("{HELP}\n");

    let mut quiz = QuizSession::new(tracker, words, Arc::new(CommandSpeaker::from_env()));
    announce(&mut quiz, |q| q.next_word().map(|_| ()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut confirming_reset = false;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        if confirming_reset {
            confirming_reset = false;
            if input.eq_ignore_ascii_case("yes") {
                match quiz.reset().await {
                    Ok(()) => println!("All progress cleared. Back to easy mode."),
                    Err(err) => println!("Progress cleared for this session only: {err}"),
                }
                announce(&mut quiz, |q| q.next_word().map(|_| ()));
            } else {
                println!("Reset cancelled.");
            }
            continue;
        }

        let Some(command) = input.strip_prefix(':') else {
            if input.is_empty() {
                announce(&mut quiz, |q| q.next_word().map(|_| ()));
            } else {
                check(&mut quiz, input).await;
            }
            continue;
        };

        let mut parts = command.split_whitespace();
        match (parts.next().unwrap_or_default(), parts.next()) {
            ("next" | "n", _) => announce(&mut quiz, |q| q.next_word().map(|_| ())),
            ("say" | "s", cue) => say(&quiz, cue),
            ("mode" | "m", Some(raw)) => match raw.parse::<Mode>() {
                Ok(mode) => announce(&mut quiz, |q| q.select_mode(mode).map(|_| ())),
                Err(err) => println!("{err}"),
            },
            ("add", _) => match quiz.add_current_to_practice().await {
                Ok(true) => println!("Added to practice."),
                Ok(false) => println!("This word already has progress."),
                Err(err) => report(&err),
            },
            ("stats", _) => print_stats(quiz.tracker()),
            ("reset", _) => {
                println!("This erases all progress. Type \"yes\" to confirm.");
                confirming_reset = true;
            }
            ("dismiss", _) => {
                match notice.dismiss().await {
                    Ok(()) => println!("Notice dismissed."),
                    Err(err) => println!("Could not remember the dismissal: {err}"),
                }
            }
            ("help" | "h", _) => println!("{HELP}"),
            ("quit" | "q", _) => break,
            _ => println!("Unknown command. Type :help for the list."),
        }
    }

    Ok(())
}

/// Run a pick step and report the new word or why there is none.
fn announce(
    quiz: &mut QuizSession,
    step: impl FnOnce(&mut QuizSession) -> Result<(), QuizError>,
) {
    match step(quiz) {
        Ok(()) => {
            println!("[{}] Spell the word you hear.", quiz.mode());
            say(quiz, None);
        }
        Err(err) => report(&err),
    }
}

async fn check(quiz: &mut QuizSession, guess: &str) {
    let outcome = match quiz.check_answer(guess).await {
        Ok(outcome) => outcome,
        Err(QuizError::NoCurrentWord) => {
            println!("No word yet. Type :next to get one.");
            return;
        }
        Err(err) => {
            report(&err);
            return;
        }
    };

    if outcome.correct {
        println!("✅ Correct!");
    } else {
        println!("❌ Incorrect. The word was: {}", outcome.word);
    }
    if outcome.relocked {
        println!(
            "Fewer than {} words left to practice, switching back to easy mode.",
            quiz.tracker().config().relock_below
        );
    }
    if !outcome.saved {
        println!("(progress could not be saved, it is kept for this session)");
    }
}

fn say(quiz: &QuizSession, cue: Option<&str>) {
    let cue = match cue.unwrap_or("word") {
        "word" | "w" => SpeechCue::Word,
        "slow" => SpeechCue::Slow,
        "sentence" => SpeechCue::Sentence,
        "definition" | "def" => SpeechCue::Definition,
        other => {
            println!("Unknown speech cue: {other}");
            return;
        }
    };
    if let Err(err) = quiz.say(cue) {
        report(&err);
        return;
    }
    if let Some(current) = quiz.current() {
        println!("  🔊 {}", transcript(current, cue));
    }
}

/// What the learner may read of a spoken cue without seeing the spelling.
fn transcript(entry: &WordEntry, cue: SpeechCue) -> String {
    match cue {
        SpeechCue::Word | SpeechCue::Slow => format!("({} letters)", entry.len()),
        SpeechCue::Sentence => mask_word(&entry.sentence, &entry.word),
        SpeechCue::Definition => mask_word(&entry.definition, &entry.word),
    }
}

fn mask_word(text: &str, word: &str) -> String {
    let target = word.to_lowercase();
    text.split(' ')
        .map(|token| {
            let core: String = token.chars().filter(|c| c.is_alphabetic()).collect();
            if core.to_lowercase() == target {
                token
                    .chars()
                    .map(|c| if c.is_alphabetic() { '_' } else { c })
                    .collect()
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn report(err: &QuizError) {
    println!("{err}");
}

pub fn print_stats(tracker: &WordProgressTracker) {
    println!("{}", tracker.progress());
    println!(
        "{} words tracked, {} with a miss, {} struggling",
        tracker.stats().len(),
        tracker.count_words_with_any_failure(),
        tracker.count_struggling_words()
    );
    for (word, stat) in tracker.stats().iter() {
        let marker = if tracker.is_struggling(word) { "*" } else { " " };
        println!(
            "  {marker} {word:<20} {:>3} missed {:>3} correct",
            stat.failures, stat.successes
        );
    }
}
