//! Interface state of a reader: tab, speech rate and card flip

use serde::{Deserialize, Serialize};

pub const MIN_SPEECH_RATE: f32 = 0.5;
pub const MAX_SPEECH_RATE: f32 = 2.0;

/// Which part of the reader is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    Story,
    Vocabulary,
    Review,
}

/// Interface state of one reader session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderContext {
    pub tab: Tab,
    pub speech_rate: f32,
    /// Whether the current flashcard shows its back (meaning and example)
    pub card_flipped: bool,
}

impl Default for ReaderContext {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            speech_rate: 1.0,
            card_flipped: false,
        }
    }
}

impl ReaderContext {
    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.card_flipped = false;
        }
    }

    /// Set the speech rate, clamped to the supported range
    pub fn set_speech_rate(&mut self, rate: f32) {
        self.speech_rate = if rate.is_finite() {
            rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
        } else {
            1.0
        };
    }

    /// Toggle the current card and return whether it now shows its back
    pub fn flip_card(&mut self) -> bool {
        self.card_flipped = !self.card_flipped;
        self.card_flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_rate_is_clamped() {
        let mut context = ReaderContext::default();
        context.set_speech_rate(3.0);
        assert_eq!(context.speech_rate, MAX_SPEECH_RATE);
        context.set_speech_rate(0.1);
        assert_eq!(context.speech_rate, MIN_SPEECH_RATE);
        context.set_speech_rate(f32::NAN);
        assert_eq!(context.speech_rate, 1.0);
    }

    #[test]
    fn test_switching_tab_unflips_card() {
        let mut context = ReaderContext::default();
        context.set_tab(Tab::Review);
        assert!(context.flip_card());

        context.set_tab(Tab::Review);
        assert!(context.card_flipped);

        context.set_tab(Tab::Story);
        assert!(!context.card_flipped);
    }
}
