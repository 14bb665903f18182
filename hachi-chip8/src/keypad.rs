pub const KEY_COUNT: usize = 16;

/// Latches for the sixteen hexadecimal keys. Written by the host between
/// steps, read by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chip8Keypad {
    keys: [bool; KEY_COUNT],
}

impl Chip8Keypad {
    pub fn new() -> Self {
        Default::default()
    }

    /// Latches `key` as pressed or released. Returns `false` for keys
    /// outside 0x0 - 0xF, which are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) -> bool {
        match self.keys.get_mut(key as usize) {
            Some(latch) => {
                *latch = pressed;
                true
            }
            None => false,
        }
    }

    /// Keys outside 0x0 - 0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// Lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|k| k as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

/// Maps a QWERTY host key onto the hexadecimal keypad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// Q W E R  =>  4 5 6 D
/// A S D F      7 8 9 E
/// Z X C V      A 0 B F
/// ```
pub fn keymap(host_key: char) -> Option<u8> {
    let key = match host_key.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_release() {
        let mut keypad = Chip8Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        assert!(keypad.set(0x9, true));
        assert!(keypad.set(0x3, true));
        assert!(keypad.is_pressed(0x9));
        assert_eq!(keypad.first_pressed(), Some(0x3));
        keypad.set(0x3, false);
        assert_eq!(keypad.first_pressed(), Some(0x9));
        keypad.release_all();
        assert_eq!(keypad.first_pressed(), None);
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let mut keypad = Chip8Keypad::new();
        assert!(!keypad.set(0x10, true));
        assert!(!keypad.is_pressed(0x10));
        assert!(!keypad.is_pressed(0xFF));
        assert_eq!(keypad.first_pressed(), None);
    }

    #[test]
    fn keymap_covers_all_keys() {
        let mut seen = [false; KEY_COUNT];
        for host_key in "1234qwerasdfzxcv".chars() {
            let key = keymap(host_key).unwrap();
            assert!(!seen[key as usize], "duplicate mapping for {}", host_key);
            seen[key as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(keymap('Q'), Some(0x4));
        assert_eq!(keymap('p'), None);
    }
}
