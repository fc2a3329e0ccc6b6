/// The state of the 16 key hexadecimal keypad, as supplied by the host
/// before each cycle. Keys outside `0x0..=0xF` are never pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad([bool; 16]);

impl Keypad {

    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn press(&mut self, key: u8) {
        if let Some(state) = self.0.get_mut(key as usize) {
            *state = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(state) = self.0.get_mut(key as usize) {
            *state = false;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.0.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest numbered key that is down, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.0.iter().position(|pressed| *pressed).map(|key| key as u8)
    }
}

impl From<[bool; 16]> for Keypad {
    fn from(keys: [bool; 16]) -> Self {
        Keypad(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xA);
        keypad.press(0x3);
        assert!(keypad.is_pressed(0xA));
        assert_eq!(keypad.first_pressed(), Some(0x3));
        keypad.release(0x3);
        assert_eq!(keypad.first_pressed(), Some(0xA));
    }

    #[test]
    fn keys_out_of_range_are_ignored() {
        let mut keypad = Keypad::from([true; 16]);
        keypad.release(0x10);
        assert!(!keypad.is_pressed(0x10));
        assert!(!keypad.is_pressed(0xFF));
    }
}
