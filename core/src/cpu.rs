use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::disassembler::{disassemble, Instruction};
use crate::error::Chip8Error;
use crate::operations::execute;
use crate::peripheral::Peripheral;
use crate::state::State;

/// How an executed instruction moved the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// PC += 2
    Next,
    /// PC += 4
    Skip,
    /// PC = address
    Jump(u16),
    /// PC unchanged; the same instruction runs again on the next step
    Wait,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether it is `halted`
///  - the `peripheral` it draws to, reads keys from and beeps through
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - halting
///
/// A new machine starts halted; `load` starts it. Any fault raised by the running program
/// halts it again until the next `load`.
pub struct Cpu<P: Peripheral> {
    state: State,
    peripheral: P,
    rng: StdRng,
    halted: bool,
}

impl<P: Peripheral> Cpu<P> {
    pub fn new(peripheral: P) -> Self {
        Self::with_rng(peripheral, StdRng::from_entropy())
    }

    /// A machine whose `RND` results are reproducible.
    pub fn with_seed(peripheral: P, seed: u64) -> Self {
        Self::with_rng(peripheral, StdRng::seed_from_u64(seed))
    }

    fn with_rng(peripheral: P, rng: StdRng) -> Self {
        Cpu {
            state: State::new(),
            peripheral,
            rng,
            halted: true,
        }
    }

    /// Resets the machine and loads a rom at 0x200, leaving it running.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        self.reset();
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        self.halted = false;
        info!("loaded {} byte rom", rom.len());
        Ok(())
    }

    /// Clears memory, registers, stack and timers and reseeds the sprite sheet.
    /// The machine is left halted.
    pub fn reset(&mut self) {
        if self.state.sound_enabled {
            self.peripheral.disable_sound();
        }
        self.state = State::new();
        self.halted = true;
    }

    /// Stops execution until the next `load`. Halting twice is harmless.
    pub fn halt(&mut self) {
        if !self.halted {
            info!("halted at {:#05x}", self.state.pc);
        }
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at the program counter
    /// - decodes it
    /// - executes it and moves the program counter
    ///
    /// A key wait returns `Flow::Wait` without moving the program counter; keep stepping.
    pub fn step(&mut self) -> Result<Flow, Chip8Error> {
        if self.halted {
            return Err(Chip8Error::AlreadyHalted);
        }

        let pc = self.state.pc;
        let result = self
            .state
            .fetch()
            .and_then(disassemble)
            .and_then(|instruction| {
                trace!("{:04x}  {:04x}  {}", pc, instruction.opcode, instruction);
                execute(
                    &instruction,
                    &mut self.state,
                    &mut self.peripheral,
                    &mut self.rng,
                )
            });

        match result {
            Ok(flow) => {
                self.advance(flow);
                Ok(flow)
            }
            Err(err) => {
                self.halted = true;
                error!("{} at {:#05x}", err, pc);
                Err(err)
            }
        }
    }

    fn advance(&mut self, flow: Flow) {
        match flow {
            Flow::Next => self.state.pc += 0x2,
            Flow::Skip => self.state.pc += 0x4,
            Flow::Jump(address) => self.state.pc = address,
            Flow::Wait => {}
        }
    }

    /// Counts both timers down by one. Call at a fixed rate, independent of `step`.
    /// Sound is switched off once, when the sound timer runs out.
    pub fn tick(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }

        if self.state.sound_timer == 0 && self.state.sound_enabled {
            debug!("sound timer expired");
            self.state.sound_enabled = false;
            self.peripheral.disable_sound();
        }
    }

    /// Decodes the instruction at the program counter without running it.
    pub fn current_instruction(&self) -> Result<Instruction, Chip8Error> {
        self.state.fetch().and_then(disassemble)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    pub fn peripheral_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }
}
