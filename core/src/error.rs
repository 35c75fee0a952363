/// Faults raised while loading or running a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("illegal instruction {opcode:#06x}")]
    IllegalInstruction { opcode: u16 },

    #[error("stack underflow: returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("stack overflow: subroutine calls nested deeper than the stack")]
    StackOverflow,

    #[error("memory access out of bounds at address {address:#06x}")]
    MemoryOutOfBounds { address: usize },

    #[error("no font glyph for digit {digit:#04x}")]
    InvalidDigit { digit: u8 },

    #[error("the machine is halted; load a ROM to resume")]
    AlreadyHalted,

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },
}

impl Chip8Error {
    /// Whether the fault leaves the machine halted.
    ///
    /// `AlreadyHalted` and `RomTooLarge` are caller mistakes; everything else is
    /// raised by the running program and stops it.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Chip8Error::AlreadyHalted | Chip8Error::RomTooLarge { .. }
        )
    }
}
