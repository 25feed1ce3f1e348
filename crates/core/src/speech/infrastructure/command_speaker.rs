use std::process::Command;
use std::thread;

use crossbeam_channel::{unbounded, Sender};

use crate::speech::domain::speaker::Speaker;

/// Text-to-speech via the platform's speech command (`say` on macOS,
/// `espeak` on Linux, PowerShell's synthesizer on Windows).
///
/// A worker thread drains an unbounded queue so `speak` returns
/// immediately; synthesis failures are logged and swallowed, never
/// surfaced to the frame loop.
pub struct CommandSpeaker {
    tx: Sender<String>,
}

impl CommandSpeaker {
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<String>();
        thread::spawn(move || {
            for text in rx {
                if let Err(e) = speak_blocking(&text) {
                    log::warn!("TTS failed for {text:?}: {e}");
                }
            }
        });
        Self { tx }
    }
}

impl Default for CommandSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) {
        if self.tx.send(text.to_string()).is_err() {
            log::warn!("TTS worker is gone; dropping {text:?}");
        }
    }
}

#[cfg(target_os = "macos")]
fn speak_blocking(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    run_speech_command(Command::new("say").arg(text))
}

#[cfg(target_os = "windows")]
fn speak_blocking(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Single-quoted PowerShell string; double embedded quotes to escape.
    let escaped = text.replace('\'', "''");
    let script = format!(
        "Add-Type -AssemblyName System.Speech; \
         (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{escaped}')"
    );
    run_speech_command(Command::new("powershell").args(["-NoProfile", "-Command", &script]))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn speak_blocking(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    run_speech_command(Command::new("espeak").arg(text))
}

fn run_speech_command(command: &mut Command) -> Result<(), Box<dyn std::error::Error>> {
    let status = command.status()?;
    if !status.success() {
        return Err(format!("speech command exited with {status}").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speak_does_not_block_or_panic() {
        // The worker may fail to synthesize in CI; speak itself must
        // still return instantly and quietly.
        let speaker = CommandSpeaker::new();
        speaker.speak("hello");
        speaker.speak("world");
    }

    #[test]
    fn test_run_speech_command_reports_failure() {
        let mut command = Command::new("false");
        assert!(run_speech_command(&mut command).is_err());
    }
}
