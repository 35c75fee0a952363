pub use cpu::{Cpu, Flow};
pub use disassembler::{disassemble, dump, dump_bytes, dump_rom, Instruction};
pub use error::Chip8Error;
pub use peripheral::{FrameBuffer, Peripheral, Board};

pub mod constants;
mod cpu;
pub mod disassembler;
mod error;
pub mod instruction;
mod opcode;
mod operations;
mod peripheral;
pub mod state;
