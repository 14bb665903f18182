use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hachi_chip8::{Chip8Config, Chip8Cpu, Chip8Machine, Quirks};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::driver::{parse_key, Driver, DEFAULT_IPS};
use crate::renderer::{FrameStyle, TextRenderer};

mod driver;
mod renderer;

#[derive(Parser, Debug)]
#[command(version, about = "Runs a CHIP-8 program and draws its screen as text", long_about = None)]
struct Args {
    /// Program image to load at 0x200
    rom: PathBuf,

    /// Instruction-set dialect: chip8, superchip or xochip
    #[arg(long, default_value_t = Quirks::Chip8)]
    quirks: Quirks,

    /// Instructions per second
    #[arg(long, default_value_t = DEFAULT_IPS)]
    ips: u64,

    /// Stop after this many 60 Hz ticks instead of running until a fault
    #[arg(long)]
    frames: Option<u64>,

    /// Seed for CXNN, making runs reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Hold a key down for the whole run, as a QWERTY key or 0x0-0xF
    #[arg(long, value_parser = parse_key)]
    press: Vec<u8>,

    #[arg(long, default_value_t = '#')]
    on_char: char,

    #[arg(long, default_value_t = ' ')]
    off_char: char,

    #[arg(long)]
    no_outline: bool,

    /// Characters per pixel in each direction
    #[arg(long, default_value_t = 1)]
    scale: usize,

    /// Draw 16 rows for DXY0
    #[arg(long)]
    tall_sprites: bool,

    /// Run ticks back to back without sleeping
    #[arg(long)]
    unpaced: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_format)
        .init();

    tracing::info!("loading program {}", args.rom.display());
    let mut rom = fs::File::open(&args.rom)
        .with_context(|| format!("failed to open {}", args.rom.display()))?;
    let config = Chip8Config::new(args.quirks).with_tall_zero_height_sprites(args.tall_sprites);
    let machine = Chip8Machine::from_reader(&mut rom, config)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;

    let cpu = args.seed.map_or_else(Chip8Cpu::new, Chip8Cpu::with_seed);
    let style = FrameStyle {
        on: args.on_char,
        off: args.off_char,
        outline: !args.no_outline,
        scale: args.scale,
    };
    let renderer = TextRenderer::new(io::stdout().lock());

    let mut driver = Driver::new(cpu, machine, renderer, style)
        .with_ips(args.ips)
        .with_pacing(!args.unpaced);
    driver.hold_keys(&args.press);
    driver.run(args.frames)?;
    tracing::info!(
        "final state: PC 0x{:04X}, I 0x{:04X}",
        driver.machine().registers().PC,
        driver.machine().registers().VI
    );
    Ok(())
}
