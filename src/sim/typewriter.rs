//! Typewriter text effect for the hero tagline
//!
//! Cycles through phrases: type one character at a time, hold the full
//! phrase, delete it, pause on the empty line, then move to the next phrase.
//! [`Typewriter::tick`] returns how long to wait before the next tick, so
//! the driver only ever has one pending timer.

use serde::Serialize;

use crate::settings::TypewriterSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
    Pausing,
}

#[derive(Debug, Clone, Serialize)]
pub struct Typewriter {
    phrases: Vec<String>,
    index: usize,
    /// Visible characters (Unicode scalars) of the current phrase
    visible: usize,
    phase: TypewriterPhase,
    #[serde(skip)]
    timings: TypewriterSettings,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, timings: TypewriterSettings) -> Self {
        Self {
            phrases,
            index: 0,
            visible: 0,
            phase: TypewriterPhase::Typing,
            timings,
        }
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    fn phrase_len(&self) -> usize {
        self.phrases
            .get(self.index)
            .map(|p| p.chars().count())
            .unwrap_or(0)
    }

    /// Currently visible text
    pub fn text(&self) -> &str {
        let Some(phrase) = self.phrases.get(self.index) else {
            return "";
        };
        match phrase.char_indices().nth(self.visible) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    /// Advance one step; returns the delay in milliseconds before the next tick
    pub fn tick(&mut self) -> u32 {
        if self.phrases.is_empty() {
            return self.timings.pause_ms;
        }

        match self.phase {
            TypewriterPhase::Typing => {
                let len = self.phrase_len();
                self.visible = (self.visible + 1).min(len);
                if self.visible >= len {
                    self.phase = TypewriterPhase::Holding;
                    self.timings.hold_ms
                } else {
                    self.timings.type_ms
                }
            }
            TypewriterPhase::Holding | TypewriterPhase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.phase = TypewriterPhase::Pausing;
                    self.timings.pause_ms
                } else {
                    self.phase = TypewriterPhase::Deleting;
                    self.timings.delete_ms
                }
            }
            TypewriterPhase::Pausing => {
                self.index = (self.index + 1) % self.phrases.len();
                self.phase = TypewriterPhase::Typing;
                self.timings.type_ms
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(
            phrases.iter().map(|p| p.to_string()).collect(),
            TypewriterSettings {
                type_ms: 10,
                delete_ms: 5,
                hold_ms: 100,
                pause_ms: 50,
            },
        )
    }

    #[test]
    fn test_full_cycle() {
        let mut tw = writer(&["hi", "yo"]);
        assert_eq!(tw.text(), "");

        assert_eq!(tw.tick(), 10);
        assert_eq!(tw.text(), "h");
        assert_eq!(tw.tick(), 100);
        assert_eq!(tw.text(), "hi");
        assert_eq!(tw.phase(), TypewriterPhase::Holding);

        assert_eq!(tw.tick(), 5);
        assert_eq!(tw.text(), "h");
        assert_eq!(tw.phase(), TypewriterPhase::Deleting);
        assert_eq!(tw.tick(), 50);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.phase(), TypewriterPhase::Pausing);

        assert_eq!(tw.tick(), 10);
        assert_eq!(tw.phrase_index(), 1);
        tw.tick();
        assert_eq!(tw.text(), "y");
    }

    #[test]
    fn test_wraps_to_first_phrase() {
        let mut tw = writer(&["a"]);
        // type, delete, pause -> back to phrase 0
        tw.tick();
        tw.tick();
        tw.tick();
        assert_eq!(tw.phrase_index(), 0);
        assert_eq!(tw.phase(), TypewriterPhase::Typing);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut tw = writer(&["héllo ✨"]);
        tw.tick();
        tw.tick();
        assert_eq!(tw.text(), "hé");
        for _ in 0..5 {
            tw.tick();
        }
        assert_eq!(tw.text(), "héllo ✨");
    }

    #[test]
    fn test_empty_phrase_list_is_inert() {
        let mut tw = writer(&[]);
        assert_eq!(tw.tick(), 50);
        assert_eq!(tw.text(), "");
    }
}
