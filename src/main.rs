// Host front-end: reads the rom, owns the window and decides how many steps
// to run per 60 Hz frame.
//
// CPU: --ips instructions per second (700 by default)
// Display: 60 times per second, only redrawn after a sprite was drawn

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use emuchip::Emulator;
use log::{info, warn};

use host::Host;

mod host;

const FRAMES_PER_SECOND: u32 = 60;

#[derive(Parser, Debug)]
#[command(version, about = "CHIP-8 interpreter", long_about = None)]
struct Args {
    /// Path to the rom file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = 700)]
    ips: u32,

    /// Window scale: 1, 2, 4, 8, 16 or 32
    #[arg(long, default_value_t = 16)]
    scale: u32,

    /// Seed for CXNN, random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Stop on the first engine error instead of logging it
    #[arg(long)]
    halt_on_error: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("emuchip=info"))
        .init();
    let args = Args::parse();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("reading rom {}", args.rom.display()))?;
    let scale = host::scale_from(args.scale)
        .ok_or_else(|| anyhow!("unsupported window scale {}", args.scale))?;

    let mut emu = match args.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::default(),
    };
    emu.load_rom(&rom)?;
    info!("running {} ({} bytes)", args.rom.display(), rom.len());

    let mut host = Host::new(scale)?;
    let steps_per_frame = (args.ips / FRAMES_PER_SECOND).max(1);

    while host.is_running() {
        host.poll_keys(&mut emu.keypad);
        for _ in 0..steps_per_frame {
            if let Err(err) = emu.step() {
                if args.halt_on_error {
                    return Err(err.into());
                }
                warn!("{err}");
            }
        }
        match emu.take_frame() {
            Some(fb) => host.present(fb)?,
            None => host.idle(),
        }
    }
    Ok(())
}
