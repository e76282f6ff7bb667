//! Speech recognition boundary.
//!
//! Recognition itself happens outside this crate. What arrives here is a
//! stream of transcript chunks, each flagged interim or final, in one of the
//! supported locales. Only final text is ever parsed as a command.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Recognition language offered to the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-IN")]
    EnglishIndia,
    #[serde(rename = "en-US")]
    EnglishUs,
    #[serde(rename = "hi-IN")]
    HindiIndia,
}

impl Locale {
    pub const ALL: &'static [Locale] = &[Locale::EnglishIndia, Locale::EnglishUs, Locale::HindiIndia];

    /// BCP 47 tag handed to the recognizer.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnglishIndia => "en-IN",
            Locale::EnglishUs => "en-US",
            Locale::HindiIndia => "hi-IN",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::EnglishIndia => "English (India)",
            Locale::EnglishUs => "English (US)",
            Locale::HindiIndia => "हिंदी (भारत)",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .iter()
            .copied()
            .find(|l| l.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnsupportedLocale(s.to_string()))
    }
}

/// One transcript chunk from the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechEvent {
    pub text: String,
    #[serde(default)]
    pub is_final: bool,
}

impl SpeechEvent {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// Join the final chunks of a batch into one utterance.
///
/// Returns `None` when the batch holds no final text.
pub fn final_text(events: &[SpeechEvent]) -> Option<String> {
    let text = events
        .iter()
        .filter(|e| e.is_final)
        .map(|e| e.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!text.is_empty()).then_some(text)
}

/// The live transcript shown to the speaker.
///
/// Final chunks accumulate; the latest interim chunk is shown after them
/// until a final chunk replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    committed: String,
    interim: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &SpeechEvent) {
        let chunk = event.text.trim();
        if event.is_final {
            self.interim = None;
            if !chunk.is_empty() {
                if !self.committed.is_empty() {
                    self.committed.push(' ');
                }
                self.committed.push_str(chunk);
            }
        } else {
            self.interim = (!chunk.is_empty()).then(|| chunk.to_string());
        }
    }

    pub fn text(&self) -> String {
        match &self.interim {
            Some(interim) if self.committed.is_empty() => interim.clone(),
            Some(interim) => format!("{} {}", self.committed, interim),
            None => self.committed.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.interim.is_none()
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.interim = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip() {
        assert_eq!("en-US".parse::<Locale>(), Ok(Locale::EnglishUs));
        assert_eq!("HI-in".parse::<Locale>(), Ok(Locale::HindiIndia));
        assert_eq!(Locale::default().tag(), "en-IN");
        assert_eq!(
            "fr-FR".parse::<Locale>(),
            Err(ConfigError::UnsupportedLocale("fr-FR".to_string()))
        );
    }

    #[test]
    fn test_locale_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&Locale::HindiIndia).unwrap(),
            "\"hi-IN\""
        );
    }

    #[test]
    fn test_final_text_ignores_interim_chunks() {
        let events = vec![
            SpeechEvent::finalized("add two"),
            SpeechEvent::interim("app"),
            SpeechEvent::finalized(" apples"),
        ];
        assert_eq!(final_text(&events), Some("add two apples".to_string()));
        assert_eq!(final_text(&[SpeechEvent::interim("add")]), None);
    }

    #[test]
    fn test_transcript_shows_interim_after_committed_text() {
        let mut transcript = Transcript::new();
        transcript.apply(&SpeechEvent::interim("add"));
        assert_eq!(transcript.text(), "add");

        transcript.apply(&SpeechEvent::finalized("add milk"));
        transcript.apply(&SpeechEvent::interim("rem"));
        transcript.apply(&SpeechEvent::interim("remove"));
        assert_eq!(transcript.text(), "add milk remove");

        transcript.apply(&SpeechEvent::finalized("remove eggs"));
        assert_eq!(transcript.text(), "add milk remove eggs");

        transcript.clear();
        assert!(transcript.is_empty());
    }
}
