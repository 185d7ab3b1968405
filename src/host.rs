use std::time::Duration;

use emuchip::{FrameBuffer, Keyboard, VKeys, HEIGHT, WIDTH};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

/// minifb window plus the QWERTY to hex keypad mapping.
pub struct Host {
    window: Window,
}

impl Host {
    pub fn new(scale: Scale) -> minifb::Result<Self> {
        let mut window = Window::new(
            "emuchip - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale,
                ..WindowOptions::default()
            },
        )?;
        window.set_position(500, 300);
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(Duration::from_micros(16600)));
        Ok(Self { window })
    }

    pub fn is_running(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::Yes)
    }

    /// Mirrors the currently held keys into the keypad.
    pub fn poll_keys(&self, keypad: &mut Keyboard) {
        keypad.reset();
        for key in self.window.get_keys() {
            if let Some(vkey) = key_to_vkey(key) {
                keypad.press(vkey);
            }
        }
    }

    pub fn present(&mut self, fb: &FrameBuffer) -> minifb::Result<()> {
        self.window.update_with_buffer(&fb.to_argb(), WIDTH, HEIGHT)
    }

    /// Pumps window events when there is no new frame to show.
    pub fn idle(&mut self) {
        self.window.update();
    }
}

pub fn scale_from(factor: u32) -> Option<Scale> {
    match factor {
        1 => Some(Scale::X1),
        2 => Some(Scale::X2),
        4 => Some(Scale::X4),
        8 => Some(Scale::X8),
        16 => Some(Scale::X16),
        32 => Some(Scale::X32),
        _ => None,
    }
}

// 1 2 3 4      1 2 3 C
// Q W E R  ->  4 5 6 D
// A S D F      7 8 9 E
// Z X C V      A 0 B F
fn key_to_vkey(key: Key) -> Option<VKeys> {
    match key {
        Key::Key1 => Some(VKeys::Key1),
        Key::Key2 => Some(VKeys::Key2),
        Key::Key3 => Some(VKeys::Key3),
        Key::Key4 => Some(VKeys::KeyC),
        Key::Q => Some(VKeys::Key4),
        Key::W => Some(VKeys::Key5),
        Key::E => Some(VKeys::Key6),
        Key::R => Some(VKeys::KeyD),
        Key::A => Some(VKeys::Key7),
        Key::S => Some(VKeys::Key8),
        Key::D => Some(VKeys::Key9),
        Key::F => Some(VKeys::KeyE),
        Key::Z => Some(VKeys::KeyA),
        Key::X => Some(VKeys::Key0),
        Key::C => Some(VKeys::KeyB),
        Key::V => Some(VKeys::KeyF),
        _ => None,
    }
}
