mod command;
mod shell;

use std::{io, path::PathBuf};

use anyhow::Context;
use chip::{chip8::ChipSet, resources::Rom};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::shell::Shell;

/// Headless CHIP-8 debugger
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Filepath to the Chip-8 ROM file that will be debugged
    #[arg(index = 1)]
    rom: PathBuf,

    /// PRNG seed, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = Rom::from_file(&args.rom)
        .with_context(|| format!("Failed to read ROM file {}", args.rom.display()))?;
    let mut chip = ChipSet::new(rom)?;
    if let Some(seed) = args.seed {
        chip = chip.with_rng(StdRng::seed_from_u64(seed));
    }
    log::info!("loaded rom {}", chip.get_name());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(chip, stdin.lock(), stdout.lock()).run()
}
