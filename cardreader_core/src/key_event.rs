/// Token that ends an entry
pub const ENTER: &str = "ENTER";

/// Separator between the prefix and the suffix of a symbolic key code (ex: "KEY_4")
const CODE_DELIMITER: char = '_';

/// Whether a key went down, came back up, or is being auto-repeated by the kernel
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum KeyState {
    Pressed,
    Released,
    Held,
}

impl KeyState {
    /// Converts the value of a raw key event (0 = up, 1 = down, 2 = repeat)
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Released),
            1 => Some(Self::Pressed),
            2 => Some(Self::Held),
            _ => None,
        }
    }
}

/// A single key event read from a machine
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct KeyEvent {
    code: String,
    state: KeyState,
}

impl KeyEvent {
    pub fn new(code: &str, state: KeyState) -> Self {
        Self {
            code: String::from(code),
            state,
        }
    }

    pub fn pressed(code: &str) -> Self {
        Self::new(code, KeyState::Pressed)
    }

    pub fn released(code: &str) -> Self {
        Self::new(code, KeyState::Released)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }

    /// The token this key contributes to an entry
    pub fn token(&self) -> &str {
        token(&self.code)
    }
}

/// Gets the part of a key code after the last delimiter ("KEY_4" => "4").
///
/// A code without any delimiter is returned whole.
pub fn token(code: &str) -> &str {
    match code.rfind(CODE_DELIMITER) {
        Some(i) => &code[i + CODE_DELIMITER.len_utf8()..],
        None => code,
    }
}
