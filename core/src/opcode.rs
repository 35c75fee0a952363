/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian in memory.
/// Which instruction an opcode encodes is decided by its fixed bits; the rest carry operands:
/// - `[_x__]` a register Vx, or the upper bound of the register range V0..Vx
/// - `[__y_]` a register Vy
/// - `[___n]` a 4-bit immediate
/// - `[__kk]` an 8-bit immediate
/// - `[_adr]` a 12-bit address
///
/// Instructions are described by `(mask, pattern)` pairs and operands by `(mask, shift)` pairs,
/// see `instruction::INSTRUCTION_SET`.
pub trait Opcode {
    /// Builds an opcode from the two bytes it occupies in memory.
    fn from_bytes(high: u8, low: u8) -> Self
    where
        Self: Sized;

    /// Whether the opcode's bits under `mask` equal `pattern`.
    fn matches(&self, mask: u16, pattern: u16) -> bool;

    /// The bits under `mask`, shifted down by `shift`.
    fn field(&self, mask: u16, shift: u8) -> u16;
}

impl Opcode for u16 {
    fn from_bytes(high: u8, low: u8) -> Self {
        u16::from(high) << 8 | u16::from(low)
    }

    fn matches(&self, mask: u16, pattern: u16) -> bool {
        self & mask == pattern
    }

    fn field(&self, mask: u16, shift: u8) -> u16 {
        (self & mask) >> shift
    }
}

/// Pairs a byte stream into opcodes. A trailing odd byte is padded with 0x00.
pub fn words(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks(2)
        .map(|pair| u16::from_bytes(pair[0], pair.get(1).copied().unwrap_or(0)))
        .collect()
}
