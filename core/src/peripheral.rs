use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The display, keypad and buzzer a `Cpu` drives.
///
/// Hosts implement this to put the machine on a screen; the CPU never knows which one it talks to.
pub trait Peripheral {
    /// Turns every pixel off.
    fn clear_display(&mut self);

    /// XORs `value` into the pixel at (x, y).
    /// Returns true when a lit pixel was turned off (a collision).
    fn draw_pixel(&mut self, x: usize, y: usize, value: bool) -> bool;

    /// Bit n is set while key n is held.
    fn keys(&self) -> u16;

    /// The most recently pressed key, reported once per press.
    fn wait_key(&mut self) -> Option<u8>;

    fn enable_sound(&mut self);

    fn disable_sound(&mut self);
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Board
/// An in-memory peripheral: a 64x32 frame buffer plus keypad and buzzer state.
///
/// Hosts feed it key presses and read back the frame buffer when `take_dirty` says it changed.
/// Tests use it as is.
pub struct Board {
    frame_buffer: FrameBuffer,
    dirty: bool,
    keys: u16,
    last_pressed: Option<u8>,
    sound: bool,
}

impl Board {
    pub fn new() -> Self {
        Board {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
            keys: 0,
            last_pressed: None,
            sound: false,
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y][x] == 1
    }

    /// Returns whether the frame buffer changed since the last call, and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex keypad digit 0..F that was pressed
    pub fn press(&mut self, key: u8) {
        if key < 16 {
            self.keys |= 1 << key;
            self.last_pressed = Some(key);
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex keypad digit 0..F that was released
    pub fn release(&mut self, key: u8) {
        if key < 16 {
            self.keys &= !(1 << key);
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Peripheral for Board {
    fn clear_display(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    fn draw_pixel(&mut self, x: usize, y: usize, value: bool) -> bool {
        let pixel = &mut self.frame_buffer[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let value = u8::from(value);
        let collision = *pixel & value == 1;
        *pixel ^= value;
        self.dirty |= value == 1;
        collision
    }

    fn keys(&self) -> u16 {
        self.keys
    }

    fn wait_key(&mut self) -> Option<u8> {
        self.last_pressed.take()
    }

    fn enable_sound(&mut self) {
        self.sound = true;
    }

    fn disable_sound(&mut self) {
        self.sound = false;
    }
}
