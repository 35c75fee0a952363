use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

mod host;
mod run;

#[derive(Parser, Debug)]
#[command(name = "chip8", version, about = "A Chip-8 interpreter and disassembler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a rom in a window
    Run {
        /// Path to the rom image
        rom: PathBuf,

        #[command(flatten)]
        config: run::Config,
    },
    /// Print a disassembly listing of a rom
    Disasm {
        /// Path to the rom image
        rom: PathBuf,
    },
    /// Print the raw bytes of a rom in hex
    Hexdump {
        /// Path to the rom image
        rom: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { rom, config } => {
            let bytes = fs::read(&rom)?;
            info!("running {}", rom.display());
            run::run(&bytes, &config)
        }
        Command::Disasm { rom } => {
            let bytes = fs::read(&rom)?;
            println!("{}", chip8_core::dump_rom(&bytes));
            Ok(())
        }
        Command::Hexdump { rom } => {
            let bytes = fs::read(&rom)?;
            println!("{}", chip8_core::dump_bytes(&bytes));
            Ok(())
        }
    }
}
