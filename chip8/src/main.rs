use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use emu8::constants::TIMER_FREQUENCY;
use emu8::{Config, CLOCK_SPEED};

mod keymap;
mod run;

/// Runs a Chip-8 ROM in an SDL2 window
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = CLOCK_SPEED)]
    clock_speed: u32,

    /// Delay and sound timer decrements per second
    #[arg(short, long, default_value_t = TIMER_FREQUENCY)]
    timer_frequency: u32,

    /// Size multiplier for each pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Seed for RND; random if omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        clock_speed: args.clock_speed,
        timer_frequency: args.timer_frequency,
        seed: args.seed,
    };
    run::run(&args.rom, config, args.scale)
}
