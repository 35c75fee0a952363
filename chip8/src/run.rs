use std::error::Error;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::{CLOCK_SPEED_HZ, TIMER_SPEED_HZ};
use chip8_core::Cpu;
use chip8_display::Display;

use crate::host::{keymap, SdlHost};

/// Settings for running a rom in a window.
#[derive(clap::Args, Debug)]
pub struct Config {
    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock_hz: u32,

    /// Delay and sound timer decrements per second
    #[arg(long, default_value_t = TIMER_SPEED_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    pub timer_hz: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Don't open an audio device
    #[arg(long)]
    pub mute: bool,
}

/// Runs a rom until the window closes or the program faults.
///
/// Space fast-forwards while held and Escape quits. Timers tick on wall-clock time, separately
/// from instruction steps.
pub fn run(rom: &[u8], config: &Config) -> Result<(), Box<dyn Error>> {
    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump()?;

    let mut cpu = Cpu::new(SdlHost::new(&sdl, config.mute)?);
    cpu.load(rom)?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / config.clock_hz;
    let tick_time = Duration::from_secs(1) / config.timer_hz;
    let mut last_cycle = Instant::now();
    let mut last_tick = last_cycle;

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(digit)) => cpu.peripheral_mut().board_mut().press(digit),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(digit)) => cpu.peripheral_mut().board_mut().release(digit),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        cpu.step()?;

        let now = Instant::now();
        while now.duration_since(last_tick) >= tick_time {
            cpu.tick();
            last_tick += tick_time;
        }

        // Render whatever the last instructions drew
        if cpu.peripheral_mut().board_mut().take_dirty() {
            display.render(cpu.peripheral().board().frame_buffer())?;
        }

        // Handle timing
        let elapsed_cycle_time = now - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    cpu.halt();
    info!("window closed");
    Ok(())
}
