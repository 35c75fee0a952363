use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_HEIGHT};
use crate::cpu::Flow;
use crate::disassembler::Instruction;
use crate::error::Chip8Error;
use crate::instruction::Id;
use crate::peripheral::Peripheral;
use crate::state::State;

/// Carries out a decoded instruction against the state and the peripheral.
///
/// Returns how the program counter should move; the caller applies it.
pub fn execute(
    instruction: &Instruction,
    state: &mut State,
    io: &mut dyn Peripheral,
    rng: &mut dyn RngCore,
) -> Result<Flow, Chip8Error> {
    let reg = |position: usize| usize::from(instruction.arg(position) as u8);
    let byte = |position: usize| instruction.arg(position) as u8;

    match instruction.id() {
        Id::Cls => Ok(clr(io)),
        Id::Ret => rts(state),
        Id::JpAddr => Ok(Flow::Jump(instruction.arg(0))),
        Id::CallAddr => call(instruction.arg(0), state),
        Id::SeVxNn => Ok(skip_if(state.v[reg(0)] == byte(1))),
        Id::SneVxNn => Ok(skip_if(state.v[reg(0)] != byte(1))),
        Id::SeVxVy => Ok(skip_if(state.v[reg(0)] == state.v[reg(1)])),
        Id::SneVxVy => Ok(skip_if(state.v[reg(0)] != state.v[reg(1)])),
        Id::LdVxNn => Ok(load(reg(0), byte(1), state)),
        Id::AddVxNn => Ok(add(reg(0), byte(1), state)),
        Id::LdVxVy => Ok(load(reg(0), state.v[reg(1)], state)),
        Id::OrVxVy => Ok(or(reg(0), reg(1), state)),
        Id::AndVxVy => Ok(and(reg(0), reg(1), state)),
        Id::XorVxVy => Ok(xor(reg(0), reg(1), state)),
        Id::AddVxVy => Ok(addr(reg(0), reg(1), state)),
        Id::SubVxVy => Ok(sub(reg(0), reg(1), state)),
        Id::ShrVxVy => Ok(shr(reg(0), state)),
        Id::SubnVxVy => Ok(subn(reg(0), reg(1), state)),
        Id::ShlVxVy => Ok(shl(reg(0), state)),
        Id::LdIAddr => Ok(loadi(instruction.arg(1), state)),
        Id::JpV0Addr => Ok(Flow::Jump(u16::from(state.v[0x0]) + instruction.arg(1))),
        Id::RndVxNn => Ok(rand(reg(0), byte(1), state, rng)),
        Id::DrwVxVyN => draw(reg(0), reg(1), usize::from(byte(2)), state, io),
        Id::SkpVx => Ok(skip_if(pressed(io.keys(), state.v[reg(0)]))),
        Id::SknpVx => Ok(skip_if(!pressed(io.keys(), state.v[reg(0)]))),
        Id::LdVxDt => Ok(load(reg(0), state.delay_timer, state)),
        Id::LdVxK => Ok(keyd(reg(0), state, io)),
        Id::LdDtVx => Ok(loadd(reg(1), state)),
        Id::LdStVx => Ok(loads(reg(1), state, io)),
        Id::AddIVx => Ok(addi(reg(1), state)),
        Id::LdFVx => ldspr(reg(1), state),
        Id::LdBVx => bcd(reg(1), state),
        Id::LdIVx => stor(reg(1), state),
        Id::LdVxI => read(reg(0), state),
        Id::SysAddr => Err(Chip8Error::IllegalInstruction {
            opcode: instruction.opcode,
        }),
    }
}

fn skip_if(condition: bool) -> Flow {
    if condition {
        Flow::Skip
    } else {
        Flow::Next
    }
}

/// Whether `key` is held in the keypad mask; values past 0xF never are.
fn pressed(keys: u16, key: u8) -> bool {
    1u16.checked_shl(u32::from(key))
        .map_or(false, |bit| keys & bit != 0)
}

/// clear
fn clr(io: &mut dyn Peripheral) -> Flow {
    io.clear_display();
    Flow::Next
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<Flow, Chip8Error> {
    Ok(Flow::Jump(state.pop()?))
}

/// STACK.push(PC + 2); PC = addr
fn call(address: u16, state: &mut State) -> Result<Flow, Chip8Error> {
    state.push(state.pc + 0x2)?;
    Ok(Flow::Jump(address))
}

/// Vx = kk
fn load(x: usize, value: u8, state: &mut State) -> Flow {
    state.v[x] = value;
    Flow::Next
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
fn add(x: usize, value: u8, state: &mut State) -> Flow {
    state.v[x] = state.v[x].wrapping_add(value);
    Flow::Next
}

/// Vx |= Vy
fn or(x: usize, y: usize, state: &mut State) -> Flow {
    state.v[x] |= state.v[y];
    Flow::Next
}

/// Vx &= Vy
fn and(x: usize, y: usize, state: &mut State) -> Flow {
    state.v[x] &= state.v[y];
    Flow::Next
}

/// Vx ^= Vy
fn xor(x: usize, y: usize, state: &mut State) -> Flow {
    state.v[x] ^= state.v[y];
    Flow::Next
}

/// VF = overflow; Vx += Vy
/// The flag is written first, so with x = F the sum lands on top of it.
fn addr(x: usize, y: usize, state: &mut State) -> Flow {
    state.v[0xF] = u8::from(state.v[x].checked_add(state.v[y]).is_none());
    state.v[x] = state.v[x].wrapping_add(state.v[y]);
    Flow::Next
}

/// VF = Vx > Vy; Vx -= Vy
/// The flag compares the operands rather than testing the borrow, so equal operands clear it.
fn sub(x: usize, y: usize, state: &mut State) -> Flow {
    state.v[0xF] = u8::from(state.v[x] > state.v[y]);
    state.v[x] = state.v[x].wrapping_sub(state.v[y]);
    Flow::Next
}

/// VF = Vy > Vx; Vx = Vy - Vx
fn subn(x: usize, y: usize, state: &mut State) -> Flow {
    state.v[0xF] = u8::from(state.v[y] > state.v[x]);
    state.v[x] = state.v[y].wrapping_sub(state.v[x]);
    Flow::Next
}

/// VF = lsb; Vx >>= 1
fn shr(x: usize, state: &mut State) -> Flow {
    state.v[0xF] = state.v[x] & 0x1;
    state.v[x] >>= 1;
    Flow::Next
}

/// VF = msb; Vx <<= 1
fn shl(x: usize, state: &mut State) -> Flow {
    state.v[0xF] = state.v[x] >> 7;
    state.v[x] <<= 1;
    Flow::Next
}

/// I = addr
fn loadi(address: u16, state: &mut State) -> Flow {
    state.i = address;
    Flow::Next
}

/// Vx = rand_byte & kk
fn rand(x: usize, mask: u8, state: &mut State, rng: &mut dyn RngCore) -> Flow {
    let rand_byte: u8 = rng.gen();
    state.v[x] = rand_byte & mask;
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the display with wrapping.
/// Sets VF if any pixels were erased
fn draw(
    x: usize,
    y: usize,
    rows: usize,
    state: &mut State,
    io: &mut dyn Peripheral,
) -> Result<Flow, Chip8Error> {
    let span = state.span_from_i(rows)?;
    let (origin_x, origin_y) = (usize::from(state.v[x]), usize::from(state.v[y]));

    let mut collision = false;
    for (row, line) in state.memory[span].iter().enumerate() {
        let py = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let value = (line >> (7 - bit)) & 1 == 1;
            collision |= io.draw_pixel(px, py, value);
        }
    }

    state.v[0xF] = u8::from(collision);
    Ok(Flow::Next)
}

/// await keypress for Vx
/// Leaves the program counter in place until the peripheral reports a key.
fn keyd(x: usize, state: &mut State, io: &mut dyn Peripheral) -> Flow {
    match io.wait_key() {
        Some(key) => {
            state.v[x] = key;
            Flow::Next
        }
        None => Flow::Wait,
    }
}

/// DT = Vx
fn loadd(x: usize, state: &mut State) -> Flow {
    state.delay_timer = state.v[x];
    Flow::Next
}

/// ST = Vx
/// Turns sound on when the timer starts running and it isn't on already.
fn loads(x: usize, state: &mut State, io: &mut dyn Peripheral) -> Flow {
    state.sound_timer = state.v[x];
    if state.sound_timer > 0 && !state.sound_enabled {
        state.sound_enabled = true;
        io.enable_sound();
    }
    Flow::Next
}

/// I += Vx
fn addi(x: usize, state: &mut State) -> Flow {
    state.i = state.i.wrapping_add(u16::from(state.v[x]));
    Flow::Next
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
fn ldspr(x: usize, state: &mut State) -> Result<Flow, Chip8Error> {
    let digit = state.v[x];
    if digit > 0xF {
        return Err(Chip8Error::InvalidDigit { digit });
    }
    state.i = u16::from(digit) * GLYPH_HEIGHT;
    Ok(Flow::Next)
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
fn bcd(x: usize, state: &mut State) -> Result<Flow, Chip8Error> {
    let span = state.span_from_i(3)?;
    let vx = state.v[x];
    state.memory[span].copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
/// Fill memory starting at address i with V0..Vx+1
fn stor(x: usize, state: &mut State) -> Result<Flow, Chip8Error> {
    let span = state.span_from_i(x + 1)?;
    state.memory[span].copy_from_slice(&state.v[..=x]);
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
/// Fill V0..Vx+1 with memory starting at address i
fn read(x: usize, state: &mut State) -> Result<Flow, Chip8Error> {
    let span = state.span_from_i(x + 1)?;
    state.v[..=x].copy_from_slice(&state.memory[span]);
    Ok(Flow::Next)
}

#[cfg(test)]
mod test_operations {
    use super::*;
    use crate::disassembler::disassemble;
    use crate::peripheral::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Bench {
        state: State,
        board: Board,
        rng: StdRng,
    }

    impl Bench {
        fn new() -> Self {
            Bench {
                state: State::new(),
                board: Board::new(),
                rng: StdRng::seed_from_u64(8),
            }
        }

        fn run(&mut self, op: u16) -> Result<Flow, Chip8Error> {
            let instruction = disassemble(op)?;
            execute(
                &instruction,
                &mut self.state,
                &mut self.board,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn test_00e0_cls() {
        let mut bench = Bench::new();
        bench.board.draw_pixel(0, 0, true);
        assert_eq!(bench.run(0x00E0), Ok(Flow::Next));
        assert!(!bench.board.pixel(0, 0));
    }

    #[test]
    fn test_00ee_ret() {
        let mut bench = Bench::new();
        bench.state.push(0xABC).unwrap();
        assert_eq!(bench.run(0x00EE), Ok(Flow::Jump(0xABC)));
        assert_eq!(bench.state.sp, 0);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0x00EE), Err(Chip8Error::StackUnderflow));
    }

    #[test]
    fn test_0nnn_sys_is_not_executable() {
        let mut bench = Bench::new();
        assert_eq!(
            bench.run(0x0123),
            Err(Chip8Error::IllegalInstruction { opcode: 0x0123 })
        );
    }

    #[test]
    fn test_1nnn_jp() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0x1ABC), Ok(Flow::Jump(0xABC)));
    }

    #[test]
    fn test_2nnn_call() {
        let mut bench = Bench::new();
        bench.state.pc = 0x0ABC;
        assert_eq!(bench.run(0x2123), Ok(Flow::Jump(0x123)));
        assert_eq!(bench.state.sp, 1);
        assert_eq!(bench.state.stack[0], 0x0ABE);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x11;
        assert_eq!(bench.run(0x3111), Ok(Flow::Skip));
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0x3111), Ok(Flow::Next));
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0x4111), Ok(Flow::Skip));
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x11;
        bench.state.v[0x2] = 0x11;
        assert_eq!(bench.run(0x5120), Ok(Flow::Skip));
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x11;
        bench.state.v[0x2] = 0x11;
        assert_eq!(bench.run(0x9120), Ok(Flow::Next));
    }

    #[test]
    fn test_6xkk_ld() {
        let mut bench = Bench::new();
        bench.run(0x6122).unwrap();
        assert_eq!(bench.state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0xFF;
        bench.state.v[0xF] = 0x7;
        bench.run(0x7102).unwrap();
        assert_eq!(bench.state.v[0x1], 0x01);
        assert_eq!(bench.state.v[0xF], 0x7);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut bench = Bench::new();
        bench.state.v[0x2] = 0x1;
        bench.run(0x8120).unwrap();
        assert_eq!(bench.state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x6;
        bench.state.v[0x2] = 0x3;
        bench.run(0x8121).unwrap();
        assert_eq!(bench.state.v[0x1], 0x7);
        bench.run(0x8122).unwrap();
        assert_eq!(bench.state.v[0x1], 0x3);
        bench.run(0x8123).unwrap();
        assert_eq!(bench.state.v[0x1], 0x0);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0xEE;
        bench.state.v[0x2] = 0x11;
        bench.run(0x8124).unwrap();
        assert_eq!(bench.state.v[0x1], 0xFF);
        assert_eq!(bench.state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0xFF;
        bench.state.v[0x2] = 0x01;
        bench.run(0x8124).unwrap();
        assert_eq!(bench.state.v[0x1], 0x00);
        assert_eq!(bench.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x05;
        bench.state.v[0x2] = 0x03;
        bench.run(0x8125).unwrap();
        assert_eq!(bench.state.v[0x1], 0x02);
        assert_eq!(bench.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x03;
        bench.state.v[0x2] = 0x05;
        bench.run(0x8125).unwrap();
        assert_eq!(bench.state.v[0x1], 0xFE);
        assert_eq!(bench.state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy5_sub_equal_clears_flag() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x05;
        bench.state.v[0x2] = 0x05;
        bench.run(0x8125).unwrap();
        assert_eq!(bench.state.v[0x1], 0x00);
        assert_eq!(bench.state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x5;
        bench.run(0x8106).unwrap();
        assert_eq!(bench.state.v[0x1], 0x2);
        assert_eq!(bench.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x11;
        bench.state.v[0x2] = 0x33;
        bench.run(0x8127).unwrap();
        assert_eq!(bench.state.v[0x1], 0x22);
        assert_eq!(bench.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x12;
        bench.state.v[0x2] = 0x11;
        bench.run(0x8127).unwrap();
        assert_eq!(bench.state.v[0x1], 0xFF);
        assert_eq!(bench.state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0xFF;
        bench.run(0x810E).unwrap();
        assert_eq!(bench.state.v[0x1], 0xFE);
        assert_eq!(bench.state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy4_add_into_vf_overwrites_flag() {
        let mut bench = Bench::new();
        bench.state.v[0xF] = 0xFF;
        bench.state.v[0x1] = 0x02;
        bench.run(0x8F14).unwrap();
        assert_eq!(bench.state.v[0xF], 0x03);
    }

    #[test]
    fn test_8xy5_sub_into_vf_overwrites_flag() {
        let mut bench = Bench::new();
        bench.state.v[0xF] = 0x05;
        bench.state.v[0x1] = 0x03;
        bench.run(0x8F15).unwrap();
        assert_eq!(bench.state.v[0xF], 0xFE);
    }

    #[test]
    fn test_8xy6_shr_into_vf_overwrites_flag() {
        let mut bench = Bench::new();
        bench.state.v[0xF] = 0x03;
        bench.run(0x8F06).unwrap();
        assert_eq!(bench.state.v[0xF], 0x00);
    }

    #[test]
    fn test_8xy7_subn_into_vf_overwrites_flag() {
        let mut bench = Bench::new();
        bench.state.v[0xF] = 0x02;
        bench.state.v[0x1] = 0x07;
        bench.run(0x8F17).unwrap();
        assert_eq!(bench.state.v[0xF], 0x06);
    }

    #[test]
    fn test_8xye_shl_into_vf_overwrites_flag() {
        let mut bench = Bench::new();
        bench.state.v[0xF] = 0x81;
        bench.run(0x8F0E).unwrap();
        assert_eq!(bench.state.v[0xF], 0x02);
    }

    #[test]
    fn test_annn_ld() {
        let mut bench = Bench::new();
        bench.run(0xAABC).unwrap();
        assert_eq!(bench.state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut bench = Bench::new();
        bench.state.v[0x0] = 0x2;
        assert_eq!(bench.run(0xBABC), Ok(Flow::Jump(0xABE)));
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut bench = Bench::new();
        for _ in 0..32 {
            bench.run(0xC10F).unwrap();
            assert_eq!(bench.state.v[0x1] & 0xF0, 0);
        }
        bench.run(0xC100).unwrap();
        assert_eq!(bench.state.v[0x1], 0);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut bench = Bench::new();
        bench.state.v[0x0] = 0x1;
        // Draw the 0x0 sprite with a 1x 1y offset
        bench.run(0xD005).unwrap();
        let mut expected = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert!(bench
            .board
            .frame_buffer()
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| a[..] == b[..]));
        assert_eq!(bench.state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_twice_erases_and_collides() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x10;
        bench.state.v[0x2] = 0x08;
        bench.run(0xD125).unwrap();
        assert_eq!(bench.state.v[0xF], 0x0);
        bench.run(0xD125).unwrap();
        assert_eq!(bench.state.v[0xF], 0x1);
        assert!(bench.board.frame_buffer().iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_dxyn_drw_wraps() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 62;
        bench.state.v[0x2] = 31;
        // Top row of the 0 glyph: 1111 from x=62 runs off the right edge
        bench.run(0xD121).unwrap();
        assert!(bench.board.pixel(62, 31));
        assert!(bench.board.pixel(63, 31));
        assert!(bench.board.pixel(0, 31));
        assert!(bench.board.pixel(1, 31));
        assert!(!bench.board.pixel(2, 31));
    }

    #[test]
    fn test_dxyn_drw_out_of_bounds() {
        let mut bench = Bench::new();
        bench.state.i = 0xFFE;
        assert_eq!(
            bench.run(0xD003),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut bench = Bench::new();
        bench.board.press(0xE);
        bench.state.v[0x1] = 0xE;
        assert_eq!(bench.run(0xE19E), Ok(Flow::Skip));
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0xE19E), Ok(Flow::Next));
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0xE1A1), Ok(Flow::Skip));
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut bench = Bench::new();
        bench.board.press(0xE);
        bench.state.v[0x1] = 0xE;
        assert_eq!(bench.run(0xE1A1), Ok(Flow::Next));
    }

    #[test]
    fn test_ex9e_skp_key_past_keypad() {
        let mut bench = Bench::new();
        bench.board.press(0x0);
        bench.state.v[0x1] = 0x40;
        assert_eq!(bench.run(0xE19E), Ok(Flow::Next));
    }

    #[test]
    fn test_fx07_ld() {
        let mut bench = Bench::new();
        bench.state.delay_timer = 0xF;
        bench.run(0xF107).unwrap();
        assert_eq!(bench.state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_waits() {
        let mut bench = Bench::new();
        assert_eq!(bench.run(0xF10A), Ok(Flow::Wait));
        bench.board.press(0x7);
        assert_eq!(bench.run(0xF10A), Ok(Flow::Next));
        assert_eq!(bench.state.v[0x1], 0x7);
    }

    #[test]
    fn test_fx15_ld() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0xF;
        bench.run(0xF115).unwrap();
        assert_eq!(bench.state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld_enables_sound() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0xF;
        bench.run(0xF118).unwrap();
        assert_eq!(bench.state.sound_timer, 0xF);
        assert!(bench.state.sound_enabled);
        assert!(bench.board.sound_enabled());
    }

    #[test]
    fn test_fx18_ld_zero_stays_silent() {
        let mut bench = Bench::new();
        bench.run(0xF118).unwrap();
        assert!(!bench.state.sound_enabled);
        assert!(!bench.board.sound_enabled());
    }

    #[test]
    fn test_fx1e_add() {
        let mut bench = Bench::new();
        bench.state.i = 0x1;
        bench.state.v[0x1] = 0x1;
        bench.run(0xF11E).unwrap();
        assert_eq!(bench.state.i, 0x2);
    }

    #[test]
    fn test_fx29_ld() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x2;
        bench.run(0xF129).unwrap();
        assert_eq!(bench.state.i, 0xA);
    }

    #[test]
    fn test_fx29_ld_invalid_digit() {
        let mut bench = Bench::new();
        bench.state.v[0x1] = 0x10;
        assert_eq!(
            bench.run(0xF129),
            Err(Chip8Error::InvalidDigit { digit: 0x10 })
        );
    }

    #[test]
    fn test_fx33_ld() {
        let mut bench = Bench::new();
        // 0x7B -> 123
        bench.state.v[0x1] = 0x7B;
        bench.state.i = 0x200;
        bench.run(0xF133).unwrap();
        assert_eq!(bench.state.memory[0x200..0x203], [0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_fx33_ld_out_of_bounds() {
        let mut bench = Bench::new();
        bench.state.i = 0xFFE;
        assert_eq!(
            bench.run(0xF133),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_fx55_ld() {
        let mut bench = Bench::new();
        bench.state.i = 0x200;
        bench.state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        bench.run(0xF455).unwrap();
        assert_eq!(bench.state.memory[0x200..0x205], [0x1, 0x2, 0x3, 0x4, 0x5]);
        assert_eq!(bench.state.memory[0x205], 0x0);
    }

    #[test]
    fn test_fx55_ld_up_to_last_byte() {
        let mut bench = Bench::new();
        bench.state.i = 0xFFF;
        bench.state.v[0x0] = 0xAB;
        bench.run(0xF055).unwrap();
        assert_eq!(bench.state.memory[0xFFF], 0xAB);
        assert!(bench.run(0xF155).is_err());
    }

    #[test]
    fn test_fx65_ld() {
        let mut bench = Bench::new();
        bench.state.i = 0x200;
        bench.state.memory[0x200..0x205].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        bench.run(0xF465).unwrap();
        assert_eq!(bench.state.v[0x0..0x5], [0x1, 0x2, 0x3, 0x4, 0x5]);
    }

    #[test]
    fn test_fx65_ld_out_of_bounds() {
        let mut bench = Bench::new();
        bench.state.i = 0xFFC;
        assert_eq!(
            bench.run(0xFF65),
            Err(Chip8Error::MemoryOutOfBounds { address: 0x100B })
        );
    }
}
