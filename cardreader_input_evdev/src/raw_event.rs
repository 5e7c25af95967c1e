use cardreader_core::{KeyEvent, KeyState};
use evdev::{InputEvent, InputEventKind};

/// Converts a raw device event into a key event. Anything that is not a key (sync reports, scan
/// codes, LEDs, ...) has no key event
pub fn parse_raw(raw: &InputEvent) -> Option<KeyEvent> {
    match raw.kind() {
        InputEventKind::Key(key) => {
            let state = KeyState::from_value(raw.value())?;
            Some(KeyEvent::new(&format!("{:?}", key), state))
        }
        _ => None,
    }
}
