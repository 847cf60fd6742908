//! Text-to-speech playback
//!
//! Speech is best-effort: callers log failures and carry on.

use std::process::Command;

use thiserror::Error;

use crate::config::SpeechConfig;

/// Words per minute at rate 1.0 (espeak's default)
pub const BASE_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech program not available: {0}")]
    ProgramNotFound(String),

    #[error("Speech program exited with {0}")]
    Failed(std::process::ExitStatus),
}

pub trait Speaker {
    /// Speak `text` at `rate` (1.0 is normal speed) and return when done
    fn speak(&self, text: &str, rate: f32) -> Result<(), SpeechError>;
}

/// Speaker that stays quiet
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _text: &str, _rate: f32) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Speaker backed by an external program such as `espeak` or `say`
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    fn build_command(&self, text: &str, rate: f32) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.arg("-s").arg(words_per_minute(rate).to_string());
        cmd.arg(text);
        cmd
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str, rate: f32) -> Result<(), SpeechError> {
        let status = self
            .build_command(text, rate)
            .status()
            .map_err(|e| SpeechError::ProgramNotFound(format!("{}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed(status))
        }
    }
}

/// Speaker selected by the configuration
pub fn speaker_from_config(config: &SpeechConfig) -> Box<dyn Speaker> {
    if config.enabled {
        Box::new(CommandSpeaker::from_config(config))
    } else {
        Box::new(SilentSpeaker)
    }
}

fn words_per_minute(rate: f32) -> u32 {
    (BASE_WORDS_PER_MINUTE * rate).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_per_minute() {
        assert_eq!(words_per_minute(1.0), 175);
        assert_eq!(words_per_minute(0.5), 88);
        assert_eq!(words_per_minute(0.0), 1);
    }

    #[test]
    fn test_command_arguments() {
        let speaker = CommandSpeaker {
            program: "espeak".to_string(),
            args: vec!["-v".to_string(), "en-us".to_string()],
        };
        let cmd = speaker.build_command("hello", 2.0);
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["-v", "en-us", "-s", "350", "hello"]);
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let speaker = CommandSpeaker::new("wordhoard-no-such-speech-program");
        assert!(matches!(
            speaker.speak("hi", 1.0),
            Err(SpeechError::ProgramNotFound(_))
        ));
    }

    #[test]
    fn test_silent_speaker() {
        assert!(SilentSpeaker.speak("anything", 1.0).is_ok());
    }
}
