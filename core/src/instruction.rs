//! # Instruction set
//!
//! Every Chip-8 instruction is identified by a `(mask, pattern)` pair: an opcode belongs to an
//! instruction when `opcode & mask == pattern`. The table is scanned top to bottom and the first
//! match wins, so entries with more fixed bits must sit above the broader ones they overlap
//! (`CLS` and `RET` before `SYS`).
//!
//! Each instruction lists its operands in the order they are written in assembly. Symbolic
//! operands such as `I` or `DT` take a position too, with an empty mask, so the numeric operands
//! keep the index they are rendered at (`LD I, 0x123` carries its address as argument 1).

/// Identity of an instruction, one per table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Cls,
    Ret,
    SysAddr,
    JpAddr,
    CallAddr,
    SeVxNn,
    SneVxNn,
    SeVxVy,
    LdVxNn,
    AddVxNn,
    LdVxVy,
    OrVxVy,
    AndVxVy,
    XorVxVy,
    AddVxVy,
    SubVxVy,
    ShrVxVy,
    SubnVxVy,
    ShlVxVy,
    SneVxVy,
    LdIAddr,
    JpV0Addr,
    RndVxNn,
    DrwVxVyN,
    SkpVx,
    SknpVx,
    LdVxDt,
    LdVxK,
    LdDtVx,
    LdStVx,
    AddIVx,
    LdFVx,
    LdBVx,
    LdIVx,
    LdVxI,
}

/// How an operand is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `V` followed by the register's hex digit
    Register,
    /// 8-bit immediate
    Byte,
    /// 4-bit immediate
    Nibble,
    /// 12-bit address
    Address,
    /// A symbol that never varies, e.g. `DT` or `[I]`
    Literal(&'static str),
}

/// Where an operand lives inside the opcode and how to print it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument {
    pub mask: u16,
    pub shift: u8,
    pub operand: Operand,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InstructionDef {
    pub id: Id,
    pub name: &'static str,
    pub mask: u16,
    pub pattern: u16,
    pub arguments: &'static [Argument],
}

const VX: Argument = Argument {
    mask: 0x0F00,
    shift: 8,
    operand: Operand::Register,
};

const VY: Argument = Argument {
    mask: 0x00F0,
    shift: 4,
    operand: Operand::Register,
};

const NN: Argument = Argument {
    mask: 0x00FF,
    shift: 0,
    operand: Operand::Byte,
};

const N: Argument = Argument {
    mask: 0x000F,
    shift: 0,
    operand: Operand::Nibble,
};

const NNN: Argument = Argument {
    mask: 0x0FFF,
    shift: 0,
    operand: Operand::Address,
};

const fn literal(token: &'static str) -> Argument {
    Argument {
        mask: 0x0000,
        shift: 0,
        operand: Operand::Literal(token),
    }
}

const V0: Argument = literal("V0");
const I: Argument = literal("I");
const I_INDIRECT: Argument = literal("[I]");
const DT: Argument = literal("DT");
const ST: Argument = literal("ST");
const K: Argument = literal("K");
const F: Argument = literal("F");
const B: Argument = literal("B");

const fn def(
    id: Id,
    name: &'static str,
    mask: u16,
    pattern: u16,
    arguments: &'static [Argument],
) -> InstructionDef {
    InstructionDef {
        id,
        name,
        mask,
        pattern,
        arguments,
    }
}

/// The full instruction set in match order.
#[rustfmt::skip]
pub static INSTRUCTION_SET: [InstructionDef; 35] = [
    def(Id::Cls,      "CLS",  0xFFFF, 0x00E0, &[]),
    def(Id::Ret,      "RET",  0xFFFF, 0x00EE, &[]),
    def(Id::SysAddr,  "SYS",  0xF000, 0x0000, &[NNN]),
    def(Id::JpAddr,   "JP",   0xF000, 0x1000, &[NNN]),
    def(Id::CallAddr, "CALL", 0xF000, 0x2000, &[NNN]),
    def(Id::SeVxNn,   "SE",   0xF000, 0x3000, &[VX, NN]),
    def(Id::SneVxNn,  "SNE",  0xF000, 0x4000, &[VX, NN]),
    def(Id::SeVxVy,   "SE",   0xF00F, 0x5000, &[VX, VY]),
    def(Id::LdVxNn,   "LD",   0xF000, 0x6000, &[VX, NN]),
    def(Id::AddVxNn,  "ADD",  0xF000, 0x7000, &[VX, NN]),
    def(Id::LdVxVy,   "LD",   0xF00F, 0x8000, &[VX, VY]),
    def(Id::OrVxVy,   "OR",   0xF00F, 0x8001, &[VX, VY]),
    def(Id::AndVxVy,  "AND",  0xF00F, 0x8002, &[VX, VY]),
    def(Id::XorVxVy,  "XOR",  0xF00F, 0x8003, &[VX, VY]),
    def(Id::AddVxVy,  "ADD",  0xF00F, 0x8004, &[VX, VY]),
    def(Id::SubVxVy,  "SUB",  0xF00F, 0x8005, &[VX, VY]),
    def(Id::ShrVxVy,  "SHR",  0xF00F, 0x8006, &[VX, VY]),
    def(Id::SubnVxVy, "SUBN", 0xF00F, 0x8007, &[VX, VY]),
    def(Id::ShlVxVy,  "SHL",  0xF00F, 0x800E, &[VX, VY]),
    def(Id::SneVxVy,  "SNE",  0xF00F, 0x9000, &[VX, VY]),
    def(Id::LdIAddr,  "LD",   0xF000, 0xA000, &[I, NNN]),
    def(Id::JpV0Addr, "JP",   0xF000, 0xB000, &[V0, NNN]),
    def(Id::RndVxNn,  "RND",  0xF000, 0xC000, &[VX, NN]),
    def(Id::DrwVxVyN, "DRW",  0xF000, 0xD000, &[VX, VY, N]),
    def(Id::SkpVx,    "SKP",  0xF0FF, 0xE09E, &[VX]),
    def(Id::SknpVx,   "SKNP", 0xF0FF, 0xE0A1, &[VX]),
    def(Id::LdVxDt,   "LD",   0xF0FF, 0xF007, &[VX, DT]),
    def(Id::LdVxK,    "LD",   0xF0FF, 0xF00A, &[VX, K]),
    def(Id::LdDtVx,   "LD",   0xF0FF, 0xF015, &[DT, VX]),
    def(Id::LdStVx,   "LD",   0xF0FF, 0xF018, &[ST, VX]),
    def(Id::AddIVx,   "ADD",  0xF0FF, 0xF01E, &[I, VX]),
    def(Id::LdFVx,    "LD",   0xF0FF, 0xF029, &[F, VX]),
    def(Id::LdBVx,    "LD",   0xF0FF, 0xF033, &[B, VX]),
    def(Id::LdIVx,    "LD",   0xF0FF, 0xF055, &[I_INDIRECT, VX]),
    def(Id::LdVxI,    "LD",   0xF0FF, 0xF065, &[VX, I_INDIRECT]),
];

/// Finds the first instruction whose fixed bits match `opcode`.
pub fn lookup(opcode: u16) -> Option<&'static InstructionDef> {
    use crate::opcode::Opcode;

    INSTRUCTION_SET
        .iter()
        .find(|def| opcode.matches(def.mask, def.pattern))
}
