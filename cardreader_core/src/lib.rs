use std::error::Error;

mod key_event;
mod transcriber;

pub use key_event::token;
pub use key_event::KeyEvent;
pub use key_event::KeyState;
pub use key_event::ENTER;
pub use transcriber::Transcriber;

/// A card reader (or anything else that produces key events)
pub trait Machine {
    /// Waits until a new key event is read. Returns `None` once the machine will not produce any
    /// more events
    fn read(&mut self) -> Result<Option<KeyEvent>, Box<dyn Error>>;

    /// Iterate over the events of this machine until it runs out or fails
    fn events(&mut self) -> Events<'_, Self>
    where
        Self: Sized,
    {
        Events { machine: self }
    }
}

impl<M: Machine + ?Sized> Machine for Box<M> {
    fn read(&mut self) -> Result<Option<KeyEvent>, Box<dyn Error>> {
        (**self).read()
    }
}

/// Blocking iterator over the events read from a machine
pub struct Events<'a, M: ?Sized> {
    machine: &'a mut M,
}

impl<'a, M: Machine + ?Sized> Iterator for Events<'a, M> {
    type Item = Result<KeyEvent, Box<dyn Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.machine.read().transpose()
    }
}
