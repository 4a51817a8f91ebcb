use spelling_core::model::WordEntry;

/// Speaking rate used for every prompt.
pub const DEFAULT_RATE: f32 = 0.85;
/// Preferred voice language.
pub const DEFAULT_VOICE_LANG: &str = "en-US";

/// Which part of the current word to read aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechCue {
    Word,
    Slow,
    Sentence,
    Definition,
}

/// A single utterance handed to a `Speaker`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub rate: f32,
    pub voice_lang: String,
}

impl SpeechRequest {
    #[must_use]
    pub fn for_cue(entry: &WordEntry, cue: SpeechCue) -> Self {
        let text = match cue {
            SpeechCue::Word | SpeechCue::Slow => entry.word.clone(),
            SpeechCue::Sentence => entry.sentence.clone(),
            SpeechCue::Definition => entry.definition.clone(),
        };
        Self {
            text,
            rate: DEFAULT_RATE,
            voice_lang: DEFAULT_VOICE_LANG.to_string(),
        }
    }
}

/// Speech synthesis collaborator. Fire-and-forget: any previous utterance is
/// expected to be cancelled and nothing waits for completion.
pub trait Speaker: Send + Sync {
    fn speak(&self, request: &SpeechRequest);
}

/// Speaker that drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, request: &SpeechRequest) {
        tracing::trace!(text = %request.text, "speech disabled");
    }
}
