use std::io;
use std::time::{Duration, Instant};

use hachi_chip8::{keymap, Chip8Cpu, Chip8Machine, Fault};
use thiserror::Error;

use crate::renderer::{FrameStyle, Renderer};

pub const TICK_HZ: u64 = 60;
pub const DEFAULT_IPS: u64 = 700;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("machine faulted")]
    Fault(#[from] Fault),
    #[error("failed to draw frame")]
    Render(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is neither a mapped host key nor a hex digit (use 0x0-0xF for hex)")]
pub struct ParseKeyError(String);

/// Parses a `--press` argument. Single characters go through the QWERTY
/// keymap first and fall back to a hex digit; `0x` forces hex.
pub fn parse_key(arg: &str) -> Result<u8, ParseKeyError> {
    let invalid = || ParseKeyError(String::from(arg));

    if let Some(hex) = arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        return match u8::from_str_radix(hex, 16) {
            Ok(key) if key <= 0xF => Ok(key),
            _ => Err(invalid()),
        };
    }

    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => keymap(c)
            .or_else(|| c.to_digit(16).map(|d| d as u8))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Instructions executed per 60 Hz tick for a target instruction rate.
pub fn steps_per_tick(ips: u64) -> usize {
    (ips / TICK_HZ).max(1) as usize
}

/// Sleeps until successive tick deadlines, measured from a fixed start so
/// that oversleeping one tick shortens the next.
#[derive(Debug)]
struct Pacer {
    period: Duration,
    start: Instant,
    ticks: u32,
}

impl Pacer {
    fn new(frequency_hz: u64) -> Self {
        let period = Duration::from_secs_f64(1.0 / frequency_hz as f64);
        tracing::info!("pacing ticks every {}ns", period.as_nanos());
        Self {
            period,
            start: Instant::now(),
            ticks: 0,
        }
    }

    fn wait(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
        let deadline = self.period * self.ticks;
        let elapsed = self.start.elapsed();
        match deadline.checked_sub(elapsed) {
            Some(remaining) => std::thread::sleep(remaining),
            None => tracing::trace!(
                "tick {} is {}us late",
                self.ticks,
                (elapsed - deadline).as_micros()
            ),
        }
    }
}

/// Owns a session and drives it at a fixed tick rate: a batch of steps,
/// one timer decay, and a redraw whenever the machine asks for one.
pub struct Driver<R: Renderer> {
    cpu: Chip8Cpu,
    machine: Chip8Machine,
    renderer: R,
    style: FrameStyle,
    steps_per_tick: usize,
    paced: bool,
    tone: bool,
}

impl<R: Renderer> Driver<R> {
    pub fn new(cpu: Chip8Cpu, machine: Chip8Machine, renderer: R, style: FrameStyle) -> Self {
        Self {
            cpu,
            machine,
            renderer,
            style,
            steps_per_tick: steps_per_tick(DEFAULT_IPS),
            paced: true,
            tone: false,
        }
    }

    pub fn with_ips(mut self, ips: u64) -> Self {
        self.steps_per_tick = steps_per_tick(ips);
        self
    }

    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    /// Holds `keys` down for the rest of the session.
    pub fn hold_keys(&mut self, keys: &[u8]) {
        for key in keys {
            if !self.machine.set_key(*key, true) {
                tracing::warn!("ignoring key 0x{:X} outside the keypad", key);
            }
        }
    }

    pub fn machine(&self) -> &Chip8Machine {
        &self.machine
    }

    /// Runs one tick.
    pub fn tick(&mut self) -> Result<(), DriverError> {
        let gate = self.cpu.run_tick(&mut self.machine, self.steps_per_tick)?;
        if gate != self.tone {
            tracing::info!("tone {}", if gate { "on" } else { "off" });
            self.tone = gate;
        }

        if self.machine.draw_flag() {
            self.renderer
                .draw(&self.style.view(self.machine.framebuffer()))?;
            self.machine.clear_draw_flag();
        }
        Ok(())
    }

    /// Runs `frames` ticks, or until a fault when `frames` is `None`.
    /// Returns the number of ticks completed.
    pub fn run(&mut self, frames: Option<u64>) -> Result<u64, DriverError> {
        tracing::info!(
            "running {} steps per tick, {}",
            self.steps_per_tick,
            if self.paced { "paced" } else { "unpaced" }
        );
        let mut pacer = self.paced.then(|| Pacer::new(TICK_HZ));
        let mut ticks = 0;
        while frames.map_or(true, |limit| ticks < limit) {
            if let Err(err) = self.tick() {
                tracing::error!("stopped after {} ticks: {}", ticks, err);
                return Err(err);
            }
            ticks += 1;
            if let Some(pacer) = pacer.as_mut() {
                pacer.wait();
            }
        }
        tracing::info!("finished {} ticks", ticks);
        Ok(ticks)
    }
}
