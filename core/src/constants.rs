/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Address ROMs are loaded at and execution starts from.
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// The last address a whole opcode can be fetched from.
pub const LAST_OPCODE_ADDRESS: u16 = (MEMORY_SIZE - 2) as u16;

/// Nested subroutine calls the stack can hold.
pub const STACK_SIZE: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Instructions executed per second by the default driver.
pub const CLOCK_SPEED_HZ: u32 = 500;

/// Rate at which the delay and sound timers count down.
pub const TIMER_SPEED_HZ: u32 = 60;

/// Height in bytes of each built-in hex digit sprite.
pub const GLYPH_HEIGHT: u16 = 5;

/// # Sprite sheet
/// Sprites for the hex digits 0..F, 4 pixels wide and 5 tall.
/// They live at 0x000..0x050 so `LD F, Vx` can point I at `Vx * 5`.
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
