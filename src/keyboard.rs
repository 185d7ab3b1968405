/// The sixteen hex keys, laid out on the original pad as
///
/// ```text
/// 1 2 3 C
/// 4 5 6 D
/// 7 8 9 E
/// A 0 B F
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VKeys {
    Key0 = 0x0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
}

impl VKeys {
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Key state, written by the host between steps and only read by the
/// executor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keyboard {
    keys: [bool; 16],
}

impl Keyboard {
    pub fn new() -> Self {
        Self { keys: [false; 16] }
    }

    pub fn reset(&mut self) {
        self.keys = [false; 16];
    }

    /// Keys above 0xF are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(state) = self.keys.get_mut(key as usize) {
            *state = pressed;
        }
    }

    pub fn press(&mut self, key: VKeys) {
        self.set(key.index(), true);
    }

    pub fn release(&mut self, key: VKeys) {
        self.set(key.index(), false);
    }

    /// `None` when `key` does not name one of the 16 keys.
    pub fn is_pressed(&self, key: u8) -> Option<bool> {
        self.keys.get(key as usize).copied()
    }

    /// Lowest numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|k| k as u8)
    }
}
