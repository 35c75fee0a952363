use std::fmt;

use crate::constants::PROGRAM_START;
use crate::error::Chip8Error;
use crate::instruction::{lookup, Id, InstructionDef, Operand};
use crate::opcode::{words, Opcode};

/// # Disassembler
/// An opcode resolved against the instruction set, along with the operand values it carries.
///
/// Arguments are ordered as the instruction's `arguments`; symbolic operands read as 0.
/// `Display` renders it as assembly, e.g. `DRW V1, V2, 0x05`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub def: &'static InstructionDef,
    pub opcode: u16,
    pub args: Vec<u16>,
}

impl Instruction {
    pub fn id(&self) -> Id {
        self.def.id
    }

    /// The value of the operand at `position`.
    pub fn arg(&self, position: usize) -> u16 {
        self.args[position]
    }
}

/// Decodes a single opcode.
///
/// Fails with `IllegalInstruction` when no entry of the instruction set matches.
pub fn disassemble(opcode: u16) -> Result<Instruction, Chip8Error> {
    let def = lookup(opcode).ok_or(Chip8Error::IllegalInstruction { opcode })?;
    let args = def
        .arguments
        .iter()
        .map(|arg| opcode.field(arg.mask, arg.shift))
        .collect();
    Ok(Instruction { def, opcode, args })
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.def.name)?;
        for (position, (arg, value)) in self.def.arguments.iter().zip(&self.args).enumerate() {
            f.write_str(if position == 0 { " " } else { ", " })?;
            match arg.operand {
                Operand::Register => write!(f, "V{:x}", value)?,
                Operand::Byte | Operand::Nibble => write!(f, "0x{:02x}", value)?,
                Operand::Address => write!(f, "0x{:03x}", value)?,
                Operand::Literal(token) => f.write_str(token)?,
            }
        }
        Ok(())
    }
}

/// Renders a decoded instruction as assembly text.
pub fn format(instruction: &Instruction) -> String {
    instruction.to_string()
}

/// Lists a sequence of opcodes, one per line, with addresses counted from 0.
///
/// Each line reads `AAAAAA  OOOO  INSTRUCTION`. Words that decode to nothing (sprite data,
/// usually) are listed as `DW` data words.
pub fn dump(opcodes: &[u16]) -> String {
    listing(opcodes, 0)
}

/// Lists a ROM image with the addresses it occupies once loaded at `PROGRAM_START`.
pub fn dump_rom(rom: &[u8]) -> String {
    listing(&words(rom), usize::from(PROGRAM_START))
}

/// Hex dump of raw ROM bytes, eight to a line, each line led by the offset into the image.
pub fn dump_bytes(rom: &[u8]) -> String {
    rom.chunks(8)
        .enumerate()
        .map(|(line, block)| {
            let hex: Vec<String> = block.iter().map(|b| format!("{:02x}", b)).collect();
            format!("{:06x} {}", line * 8, hex.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn listing(opcodes: &[u16], base: usize) -> String {
    opcodes
        .iter()
        .enumerate()
        .map(|(index, &opcode)| {
            let text = match disassemble(opcode) {
                Ok(instruction) => instruction.to_string(),
                Err(_) => format!("DW 0x{:04x}", opcode),
            };
            format!("{:06x}  {:04x}  {}", base + index * 2, opcode, text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
