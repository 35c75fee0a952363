use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::keyboard::Keycode;

use chip8_core::{Peripheral, Board};

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The keypad layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// `KEYPAD[n]` is the keyboard key standing in for keypad digit n.
const KEYPAD: [Keycode; 16] = [
    Keycode::X,
    Keycode::Num1,
    Keycode::Num2,
    Keycode::Num3,
    Keycode::Q,
    Keycode::W,
    Keycode::E,
    Keycode::A,
    Keycode::S,
    Keycode::D,
    Keycode::Z,
    Keycode::C,
    Keycode::Num4,
    Keycode::R,
    Keycode::F,
    Keycode::V,
];

/// The keypad digit a keyboard key stands in for, if any.
pub fn keymap(key: Keycode) -> Option<u8> {
    KEYPAD.iter().position(|&k| k == key).map(|digit| digit as u8)
}

const BUZZER_PITCH_HZ: f32 = 440.0;
const BUZZER_VOLUME: f32 = 0.25;

/// A square wave, played while the sound timer runs.
pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Host
/// The peripheral the CPU runs against in a window.
///
/// Pixels and keys live in a `Board`, which the driver renders and feeds keyboard events to.
/// Sound goes to an SDL audio device unless muted.
pub struct SdlHost {
    board: Board,
    buzzer: Option<AudioDevice<SquareWave>>,
}

impl SdlHost {
    pub fn new(sdl: &sdl2::Sdl, mute: bool) -> Result<Self, String> {
        let buzzer = if mute { None } else { Some(open_buzzer(sdl)?) };
        Ok(SdlHost {
            board: Board::new(),
            buzzer,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

fn open_buzzer(sdl: &sdl2::Sdl) -> Result<AudioDevice<SquareWave>, String> {
    let audio = sdl.audio()?;
    let desired = AudioSpecDesired {
        freq: Some(44_100),
        channels: Some(1),
        samples: None,
    };
    audio.open_playback(None, &desired, |spec| SquareWave {
        phase_inc: BUZZER_PITCH_HZ / spec.freq as f32,
        phase: 0.0,
        volume: BUZZER_VOLUME,
    })
}

impl Peripheral for SdlHost {
    fn clear_display(&mut self) {
        self.board.clear_display();
    }

    fn draw_pixel(&mut self, x: usize, y: usize, value: bool) -> bool {
        self.board.draw_pixel(x, y, value)
    }

    fn keys(&self) -> u16 {
        self.board.keys()
    }

    fn wait_key(&mut self) -> Option<u8> {
        self.board.wait_key()
    }

    fn enable_sound(&mut self) {
        self.board.enable_sound();
        if let Some(buzzer) = &self.buzzer {
            buzzer.resume();
        }
    }

    fn disable_sound(&mut self) {
        self.board.disable_sound();
        if let Some(buzzer) = &self.buzzer {
            buzzer.pause();
        }
    }
}
