use crate::guidance::domain::zone::Zone;

use super::listener::{CommandListener, Transcription};
use super::speaker::Speaker;

const OPTIONS_LINE: &str =
    "Your options are: top left, top right, bottom left, bottom right, or center.";

/// Asks the user where their face should end up and listens for one of the
/// five zone names.
///
/// Runs once, before the frame loop. Every listening round is handled by
/// explicit branches on the [`Transcription`] variant; after `max_attempts`
/// failed rounds the target falls back to center.
pub fn elicit_target(
    listener: &mut dyn CommandListener,
    speaker: &dyn Speaker,
    max_attempts: u32,
) -> Zone {
    speaker.speak("Welcome to the selfie app!");
    speaker.speak("Where would you like your face to appear?");
    speaker.speak(OPTIONS_LINE);

    let mut attempts = 0;
    while attempts < max_attempts {
        match listener.listen() {
            Transcription::Heard(command) => {
                if let Some(zone) = Zone::match_in(&command) {
                    speaker.speak(&format!(
                        "Got it! {} has been set as the position.",
                        zone.spoken_name()
                    ));
                    return zone;
                }
                speaker.speak(
                    "I didn't understand that position. Please choose from: \
                     top left, top right, bottom left, bottom right, or center.",
                );
            }
            Transcription::Timeout | Transcription::Unrecognized => {
                speaker.speak("I didn't catch that. Please try again.");
            }
            Transcription::ServiceError(message) => {
                log::warn!("speech recognition failed: {message}");
                speaker.speak("I didn't catch that. Please try again.");
            }
        }
        attempts += 1;
    }

    speaker.speak("Too many attempts. Setting the position as center by default!");
    Zone::Center
}
