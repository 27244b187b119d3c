use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use vip8::constants::{DEFAULT_FRAME_RATE, DEFAULT_TICKS_PER_UPDATE};
use vip8::{Config, FaultPolicy};
use vip8_display::DEFAULT_SCALE;

mod input;
mod keymap;
mod run;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OnFault {
    /// Stop the machine at the first fault.
    Halt,
    /// Log the fault and carry on with the next instruction.
    Skip,
}

impl From<OnFault> for FaultPolicy {
    fn from(on_fault: OnFault) -> Self {
        match on_fault {
            OnFault::Halt => FaultPolicy::Halt,
            OnFault::Skip => FaultPolicy::Skip,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Run a CHIP-8 ROM in a window.")]
struct Args {
    /// ROM image to run.
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Instructions executed per frame.
    #[arg(long, default_value_t = DEFAULT_TICKS_PER_UPDATE)]
    ticks: u32,

    /// Frames per second (0 = as fast as possible).
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    fps: u32,

    /// What to do when the program faults.
    #[arg(long, value_enum, default_value_t = OnFault::Halt)]
    on_fault: OnFault,

    /// Seed for the random number generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Window pixels per CHIP-8 pixel.
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let rom = match std::fs::read(&args.rom) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("error: could not read ROM {}: {}", args.rom.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let config = Config {
        ticks_per_update: args.ticks,
        frame_rate: args.fps,
        fault_policy: args.on_fault.into(),
        rng_seed: args.seed,
    };

    match run::run(&rom, config, args.scale) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
