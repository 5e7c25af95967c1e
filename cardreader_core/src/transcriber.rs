use crate::{KeyEvent, ENTER};
use log::{debug, trace};
use std::{error::Error, io, io::Write};

/// Collects the keys pressed on a card reader into lines.
///
/// Every pressed key adds its token to the pending entry. The ENTER key writes the pending entry
/// as one line to the sink, flushes it, and starts a new entry. Released and held keys are ignored.
pub struct Transcriber<W: Write> {
    buffer: Vec<String>,
    sink: W,
}

impl<W: Write> Transcriber<W> {
    pub fn new(sink: W) -> Self {
        Self {
            buffer: vec![],
            sink,
        }
    }

    /// Handles a single key event
    pub fn handle(&mut self, event: &KeyEvent) -> io::Result<()> {
        if !event.is_pressed() {
            return Ok(());
        }

        let token = event.token();
        trace!("{:?} => {:?}", event.code(), token);
        if token == ENTER {
            self.emit()
        } else {
            self.buffer.push(token.to_string());
            Ok(())
        }
    }

    /// Handles events until there are no more of them.
    ///
    /// Stops at the first error, either from the events or from writing to the sink. Whatever
    /// entry is still pending at that point is dropped.
    pub fn run<I, E>(&mut self, events: I) -> Result<(), Box<dyn Error>>
    where
        I: IntoIterator<Item = Result<KeyEvent, E>>,
        E: Into<Box<dyn Error>>,
    {
        for event in events {
            let event = event.map_err(Into::into)?;
            self.handle(&event)?;
        }

        if !self.buffer.is_empty() {
            debug!(
                "events ended, dropping incomplete entry of {} keys",
                self.buffer.len()
            );
        }
        Ok(())
    }

    /// Tokens of the entry that has not been written yet
    pub fn pending(&self) -> &[String] {
        &self.buffer
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn emit(&mut self) -> io::Result<()> {
        let line = self.buffer.concat();
        debug!("entry complete ({} keys)", self.buffer.len());
        self.buffer.clear();

        writeln!(self.sink, "{}", line)?;
        // the reader is often piped into another process that wants each line right away
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyState;

    fn press(t: &mut Transcriber<Vec<u8>>, code: &str) {
        t.handle(&KeyEvent::pressed(code)).unwrap();
    }

    fn output(t: Transcriber<Vec<u8>>) -> String {
        String::from_utf8(t.into_sink()).unwrap()
    }

    #[test]
    fn handle_basic() {
        let mut t = Transcriber::new(vec![]);
        press(&mut t, "KEY_4");
        press(&mut t, "KEY_2");
        assert_eq!(t.pending(), &["4".to_string(), "2".to_string()]);

        press(&mut t, "KEY_ENTER");
        assert!(t.pending().is_empty());
        assert_eq!(output(t), "42\n");
    }

    #[test]
    fn handle_no_enter() {
        let mut t = Transcriber::new(vec![]);
        for code in &["KEY_1", "KEY_2", "KEY_SEMICOLON", "KEY_A"] {
            press(&mut t, code);
        }
        assert_eq!(t.pending().len(), 4);
        assert_eq!(output(t), "");
    }

    #[test]
    fn handle_ignore_released_and_held() {
        let mut t = Transcriber::new(vec![]);
        t.handle(&KeyEvent::released("KEY_1")).unwrap();
        t.handle(&KeyEvent::new("KEY_2", KeyState::Held)).unwrap();
        t.handle(&KeyEvent::released("KEY_ENTER")).unwrap();
        assert!(t.pending().is_empty());
        assert_eq!(output(t), "");
    }

    #[test]
    fn handle_empty_entry() {
        let mut t = Transcriber::new(vec![]);
        press(&mut t, "KEY_7");
        press(&mut t, "KEY_ENTER");
        press(&mut t, "KEY_ENTER");
        assert_eq!(output(t), "7\n\n");
    }

    #[test]
    fn handle_code_without_delimiter() {
        let mut t = Transcriber::new(vec![]);
        press(&mut t, "X");
        assert_eq!(t.pending(), &["X".to_string()]);
        press(&mut t, "ENTER");
        assert_eq!(output(t), "X\n");
    }

    #[test]
    fn handle_keypad_enter() {
        let mut t = Transcriber::new(vec![]);
        press(&mut t, "KEY_KP5");
        press(&mut t, "KEY_KPENTER");
        press(&mut t, "KEY_KP_ENTER");
        assert_eq!(output(t), "KP5KPENTER\n");
    }

    /// Sink that counts flushes and fails writes once closed
    struct Pipe {
        written: Vec<u8>,
        flushes: usize,
        closed: bool,
    }

    impl Write for Pipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.closed {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn flush_after_each_line() {
        let mut t = Transcriber::new(Pipe {
            written: vec![],
            flushes: 0,
            closed: false,
        });
        press_pipe(&mut t, "KEY_1");
        assert_eq!(t.sink.flushes, 0);
        press_pipe(&mut t, "KEY_ENTER");
        assert_eq!(t.sink.flushes, 1);
        press_pipe(&mut t, "KEY_ENTER");
        assert_eq!(t.sink.flushes, 2);
        assert_eq!(t.sink.written, b"1\n\n");
    }

    #[test]
    fn closed_sink_is_an_error() {
        let mut t = Transcriber::new(Pipe {
            written: vec![],
            flushes: 0,
            closed: true,
        });
        press_pipe(&mut t, "KEY_1");
        let err = t.handle(&KeyEvent::pressed("KEY_ENTER")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    fn press_pipe(t: &mut Transcriber<Pipe>, code: &str) {
        t.handle(&KeyEvent::pressed(code)).unwrap();
    }
}
