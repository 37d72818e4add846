use crate::constants::KEY_COUNT;

/// # Keypad
/// Pressed state of the 16 hexadecimal keys 0..F.
///
/// The host decides which physical inputs map to which key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codes outside 0..16 are ignored.
    pub fn set_key(&mut self, code: u8, pressed: bool) {
        match self.keys.get_mut(usize::from(code)) {
            Some(key) => *key = pressed,
            None => log::warn!("ignoring key code {:#04X}; keys are 0x0..=0xF", code),
        }
    }

    /// Codes outside 0..16 read as released.
    pub fn is_pressed(&self, code: u8) -> bool {
        self.keys.get(usize::from(code)).copied().unwrap_or(false)
    }

    pub fn any_pressed(&self) -> bool {
        self.keys.iter().any(|&key| key)
    }

    /// The lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&key| key).map(|code| code as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.set_key(0xA, true);
        assert!(keypad.is_pressed(0xA) && keypad.any_pressed());
        keypad.set_key(0xA, false);
        assert!(!keypad.is_pressed(0xA) && !keypad.any_pressed());
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.set_key(0xC, true);
        keypad.set_key(0x3, true);
        assert_eq!(keypad.first_pressed(), Some(0x3));
    }

    #[test]
    fn test_out_of_range_codes() {
        let mut keypad = Keypad::new();
        keypad.set_key(0x10, true);
        assert!(!keypad.any_pressed());
        assert!(!keypad.is_pressed(0xFF));
    }
}
