use std::ops::Range;

use crate::constants::{LAST_OPCODE_ADDRESS, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, STACK_SIZE};
use crate::error::Chip8Error;
use crate::opcode::Opcode;

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Stack
/// - 16 return addresses
/// - (sp) the number of addresses currently on the stack; 0 when empty
///
/// Timers
/// - 2 8-bit timers (delay & sound), counted down by `Cpu::tick`
/// - `sound_enabled` tracks whether the peripheral was last told to play sound
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - 0x000..0x050 hold the hex digit sprite sheet
/// - ROMs are loaded at 0x200
///
/// The display and keypad belong to the peripheral, not to the state.
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub sound_enabled: bool,
    pub memory: [u8; MEMORY_SIZE],
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            sound_enabled: false,
            memory,
        }
    }

    /// Reads the opcode at the program counter.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16, Chip8Error> {
        if self.pc > LAST_OPCODE_ADDRESS {
            return Err(Chip8Error::MemoryOutOfBounds {
                address: usize::from(self.pc),
            });
        }
        let pc = usize::from(self.pc);
        Ok(u16::from_bytes(self.memory[pc], self.memory[pc + 1]))
    }

    /// The `len` bytes of memory starting at I, if they all exist.
    pub fn span_from_i(&self, len: usize) -> Result<Range<usize>, Chip8Error> {
        let start = usize::from(self.i);
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds {
                address: end.saturating_sub(1).max(start),
            });
        }
        Ok(start..end)
    }

    /// Pushes a return address.
    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        let depth = usize::from(self.sp);
        if depth == STACK_SIZE {
            return Err(Chip8Error::StackOverflow);
        }
        self.stack[depth] = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[usize::from(self.sp)])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
