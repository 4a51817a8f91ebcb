use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use spelling_core::PracticeProgress;
use spelling_core::model::{Mode, WordEntry, WordStat};

use crate::error::QuizError;
use crate::speech::{SpeechCue, SpeechRequest, Speaker};
use crate::tracker::WordProgressTracker;

use super::picker::pick_next;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of checking a typed answer against the current word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub word: String,
    pub correct: bool,
    pub stat: WordStat,
    /// Practice mode was left for easy mode because too few words struggle.
    pub relocked: bool,
    /// The updated stats reached storage.
    pub saved: bool,
}

/// Why no word could be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPoolReason {
    /// Practice was requested but the unlock policy is not met yet.
    PracticeLocked(PracticeProgress),
    /// Practice is unlocked but no listed word is currently struggling.
    NoStrugglingWords,
    /// The word list has no words for this mode.
    NoWords(Mode),
}

impl fmt::Display for EmptyPoolReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PracticeLocked(progress) => write!(f, "no words available: {progress}"),
            Self::NoStrugglingWords => f.write_str("no struggling words to practice, nice work"),
            Self::NoWords(mode) => write!(f, "no {mode} words available"),
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's quiz: active mode, current word and the tracker behind it.
///
/// Mode changes only happen through `select_mode`, except for the automatic
/// fall back from practice to easy after an answer leaves too few struggling
/// words, or when practice is requested while locked.
pub struct QuizSession {
    tracker: WordProgressTracker,
    words: Vec<WordEntry>,
    mode: Mode,
    current: Option<WordEntry>,
    previous_word: Option<String>,
    speaker: Arc<dyn Speaker>,
    rng: StdRng,
}

impl QuizSession {
    #[must_use]
    pub fn new(
        tracker: WordProgressTracker,
        words: Vec<WordEntry>,
        speaker: Arc<dyn Speaker>,
    ) -> Self {
        Self {
            tracker,
            words,
            mode: Mode::Easy,
            current: None,
            previous_word: None,
            speaker,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed random source, for deterministic picks in tests.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn current(&self) -> Option<&WordEntry> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    #[must_use]
    pub fn tracker(&self) -> &WordProgressTracker {
        &self.tracker
    }

    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        self.tracker.progress()
    }

    /// Switch modes and pick a word from the new pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::PracticeLocked` (mode unchanged) when practice is
    /// requested before it unlocks, or `QuizError::EmptyPool` when the new
    /// pool has no words.
    pub fn select_mode(&mut self, mode: Mode) -> Result<&WordEntry, QuizError> {
        if mode.is_practice() && !self.tracker.is_practice_unlocked() {
            let progress = self.tracker.progress();
            tracing::info!(%progress, "practice mode rejected");
            return Err(QuizError::PracticeLocked { progress });
        }
        if mode != self.mode {
            tracing::info!(from = %self.mode, to = %mode, "mode changed");
            self.mode = mode;
        }
        self.next_word()
    }

    /// Pick the next word for the active mode, avoiding an immediate repeat.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` if the pool is empty; the current word
    /// is cleared in that case.
    pub fn next_word(&mut self) -> Result<&WordEntry, QuizError> {
        let selection = self.tracker.select_pool(self.mode, &self.words);
        let (requested, effective) = (selection.requested, selection.effective);
        let picked = pick_next(
            &selection.words,
            self.previous_word.as_deref(),
            &mut self.rng,
        )
        .cloned();

        if effective != requested {
            tracing::info!(from = %requested, to = %effective, "practice locked, using easy pool");
            self.mode = effective;
        }

        let Some(picked) = picked else {
            self.current = None;
            let reason = match (requested, effective) {
                (Mode::Practice, Mode::Practice) => EmptyPoolReason::NoStrugglingWords,
                (Mode::Practice, _) => EmptyPoolReason::PracticeLocked(self.tracker.progress()),
                (mode, _) => EmptyPoolReason::NoWords(mode),
            };
            return Err(QuizError::EmptyPool(reason));
        };

        tracing::debug!(word = %picked.word, mode = %self.mode, "picked word");
        self.previous_word = Some(picked.word.clone());
        let current: &WordEntry = self.current.insert(picked);
        Ok(current)
    }

    /// Compare `guess` with the current word and record the result.
    ///
    /// A failed save does not undo the answer: the in-memory counters and the
    /// relock check still apply, and `AnswerOutcome::saved` is `false`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCurrentWord` before the first pick.
    pub async fn check_answer(&mut self, guess: &str) -> Result<AnswerOutcome, QuizError> {
        let current = self.current.as_ref().ok_or(QuizError::NoCurrentWord)?;
        let word = current.word.clone();
        let correct = current.matches_answer(guess);

        let recorded = if correct {
            self.tracker.record_success(&word).await
        } else {
            self.tracker.record_failure(&word).await
        };
        let saved = match recorded {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(word = %word, error = %err, "answer recorded but not saved");
                false
            }
        };
        let stat = self.tracker.stat(&word).unwrap_or_default();

        let relocked = self.tracker.should_relock(self.mode);
        if relocked {
            tracing::info!(
                struggling = self.tracker.count_struggling_words(),
                "too few struggling words, leaving practice mode"
            );
            self.mode = Mode::Easy;
        }

        Ok(AnswerOutcome {
            word,
            correct,
            stat,
            relocked,
            saved,
        })
    }

    /// Put the current word on the practice list if it has no record yet.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCurrentWord` before the first pick, or a tracker
    /// error if the stats cannot be persisted.
    pub async fn add_current_to_practice(&mut self) -> Result<bool, QuizError> {
        let word = self
            .current
            .as_ref()
            .map(|entry| entry.word.clone())
            .ok_or(QuizError::NoCurrentWord)?;
        Ok(self.tracker.manually_add_to_practice(&word).await?)
    }

    /// Clear all progress and return to easy mode.
    ///
    /// The session is reset even when the cleared stats cannot be saved.
    ///
    /// # Errors
    ///
    /// Returns a tracker error if the cleared stats cannot be persisted.
    pub async fn reset(&mut self) -> Result<(), QuizError> {
        let cleared = self.tracker.reset_all().await;
        self.mode = Mode::Easy;
        self.current = None;
        self.previous_word = None;
        Ok(cleared?)
    }

    /// Read part of the current word aloud.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCurrentWord` before the first pick.
    pub fn say(&self, cue: SpeechCue) -> Result<(), QuizError> {
        let current = self.current.as_ref().ok_or(QuizError::NoCurrentWord)?;
        self.speaker.speak(&SpeechRequest::for_cue(current, cue));
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
