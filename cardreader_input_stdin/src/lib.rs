use cardreader_core::{KeyEvent, KeyState, Machine};
use log::warn;
use std::{error::Error, io, io::BufRead};

/// Reads key events as text, one per line: a key code optionally followed by `down`, `up`, or
/// `hold` (ex: "KEY_4 up"). A key code alone is a key press.
pub struct StdinMachine<R: BufRead> {
    reader: R,
}

impl StdinMachine<io::BufReader<io::Stdin>> {
    pub fn new() -> Self {
        Self::with_reader(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> StdinMachine<R> {
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Machine for StdinMachine<R> {
    fn read(&mut self) -> Result<Option<KeyEvent>, Box<dyn Error>> {
        let mut input = String::new();

        // keep reading until a line holds a valid event
        loop {
            input.clear();
            // blocks until input is read
            if self.reader.read_line(&mut input)? == 0 {
                return Ok(None);
            }

            match parse_line(&input) {
                Ok(Some(event)) => return Ok(Some(event)),
                Ok(None) => {}
                Err(word) => warn!("ignoring {:?}: unknown key state {:?}", input.trim(), word),
            }
        }
    }
}

/// Parses a line into an event. Blank lines have no event. Returns the offending word if the key
/// state is not recognized
fn parse_line(line: &str) -> Result<Option<KeyEvent>, &str> {
    let mut words = line.split_whitespace();
    let code = match words.next() {
        Some(code) => code,
        None => return Ok(None),
    };

    let state = match words.next() {
        None | Some("down") => KeyState::Pressed,
        Some("up") => KeyState::Released,
        Some("hold") => KeyState::Held,
        Some(other) => return Err(other),
    };

    Ok(Some(KeyEvent::new(code, state)))
}
