use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Fault;
use crate::font::GLYPH_BYTES;
use crate::instructions::Chip8Instruction;
use crate::machine::Chip8Machine;
use crate::registers::{Chip8Registers, VF};
use crate::stack::{StackError, STACK_CAPACITY};

pub type Result<T> = std::result::Result<T, Fault>;

/// Rows drawn by `DXY0` when tall zero-height sprites are enabled.
const TALL_SPRITE_ROWS: usize = 16;

/// The instruction engine. Holds everything execution needs besides the
/// machine itself, which is the random source for `CXNN`.
pub struct Chip8Cpu {
    rng: StdRng,
}

impl fmt::Debug for Chip8Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chip8Cpu").finish()
    }
}

impl Default for Chip8Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8Cpu {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// An engine whose `CXNN` results are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fetches, decodes and executes exactly one instruction.
    ///
    /// PC is advanced past the instruction before it executes, so jumps
    /// assign it and skips add two more.
    pub fn step(&mut self, machine: &mut Chip8Machine) -> Result<()> {
        let pc = machine.regs.PC;
        let opcode = machine.fetch(pc).map_err(|fault| {
            tracing::warn!("fetch at 0x{:04X} failed: {}", pc, fault);
            fault
        })?;
        machine.regs.PC = pc.wrapping_add(Chip8Instruction::LEN_BYTES);

        let instruction = Chip8Instruction::decode(opcode);
        tracing::trace!(
            "0x{:04X}: {:?} | {:?} | VI: 0x{:04X}",
            pc,
            opcode,
            instruction,
            machine.regs.VI
        );

        self.execute(machine, pc, instruction).map_err(|fault| {
            tracing::warn!("{:?} at 0x{:04X} faulted: {}", instruction, pc, fault);
            fault
        })
    }

    /// Runs `steps` instructions followed by one timer decay, stopping at
    /// the first fault. Returns the audio gate from [`Self::decay_timers`].
    pub fn run_tick(&mut self, machine: &mut Chip8Machine, steps: usize) -> Result<bool> {
        for _ in 0..steps {
            self.step(machine)?;
        }
        Ok(Self::decay_timers(machine))
    }

    /// Counts both timers down by one toward zero. Returns whether the sound
    /// timer is still running, i.e. whether a tone should be playing.
    pub fn decay_timers(machine: &mut Chip8Machine) -> bool {
        let regs = &mut machine.regs;
        regs.DT = regs.DT.saturating_sub(1);
        regs.ST = regs.ST.saturating_sub(1);
        regs.ST != 0
    }

    fn execute(
        &mut self,
        machine: &mut Chip8Machine,
        pc: u16,
        instruction: Chip8Instruction,
    ) -> Result<()> {
        use Chip8Instruction::*;

        let quirks = machine.quirks();
        let tall_sprites = machine.config().tall_zero_height_sprites;
        let regs = &mut machine.regs;
        match instruction {
            ClearScreen => {
                machine.display.clear();
                machine.draw_flag = true;
            }
            Return => {
                regs.PC = machine
                    .stack
                    .pop()
                    .map_err(|_| Fault::StackUnderflow { pc })?;
            }
            // Machine-code routines only ran on the original hardware.
            ExecuteMachineSubroutine { .. } => {}
            Jump { addr } => regs.PC = addr,
            Call { addr } => {
                machine.stack.push(regs.PC).map_err(|err| match err {
                    StackError::Overflow => Fault::StackOverflow {
                        pc,
                        capacity: STACK_CAPACITY,
                    },
                    StackError::Underflow => Fault::StackUnderflow { pc },
                })?;
                regs.PC = addr;
            }
            SkipIfEqual { vx_idx, value } => {
                if regs.V[vx_idx] == value {
                    skip(regs);
                }
            }
            SkipIfNotEqual { vx_idx, value } => {
                if regs.V[vx_idx] != value {
                    skip(regs);
                }
            }
            SkipIfRegEqual { vx_idx, vy_idx } => {
                if regs.V[vx_idx] == regs.V[vy_idx] {
                    skip(regs);
                }
            }
            SetReg { vx_idx, value } => regs.V[vx_idx] = value,
            AddReg { vx_idx, value } => regs.V[vx_idx] = regs.V[vx_idx].wrapping_add(value),
            SetRegReg { vx_idx, vy_idx } => regs.V[vx_idx] = regs.V[vy_idx],
            OrRegReg { vx_idx, vy_idx } => {
                regs.V[vx_idx] |= regs.V[vy_idx];
                if quirks.logic_resets_flag() {
                    regs.V[VF] = 0;
                }
            }
            AndRegReg { vx_idx, vy_idx } => {
                regs.V[vx_idx] &= regs.V[vy_idx];
                if quirks.logic_resets_flag() {
                    regs.V[VF] = 0;
                }
            }
            XorRegReg { vx_idx, vy_idx } => {
                regs.V[vx_idx] ^= regs.V[vy_idx];
                if quirks.logic_resets_flag() {
                    regs.V[VF] = 0;
                }
            }
            // The flag is written last, so it wins when VF is also the target.
            AddRegReg { vx_idx, vy_idx } => {
                let (sum, carry) = regs.V[vx_idx].overflowing_add(regs.V[vy_idx]);
                regs.V[vx_idx] = sum;
                regs.V[VF] = carry as u8;
            }
            SubRegReg { vx_idx, vy_idx } => {
                let (vx, vy) = (regs.V[vx_idx], regs.V[vy_idx]);
                regs.V[vx_idx] = vx.wrapping_sub(vy);
                regs.V[VF] = (vx >= vy) as u8;
            }
            ShiftRightReg { vx_idx, vy_idx } => {
                let source = if quirks.shift_reads_vy() {
                    regs.V[vy_idx]
                } else {
                    regs.V[vx_idx]
                };
                regs.V[vx_idx] = source >> 1;
                regs.V[VF] = source & 0x01;
            }
            // Stores into VY, not VX.
            SubRegRegReverse { vx_idx, vy_idx } => {
                let (vx, vy) = (regs.V[vx_idx], regs.V[vy_idx]);
                regs.V[vy_idx] = vy.wrapping_sub(vx);
                regs.V[VF] = (vy >= vx) as u8;
            }
            ShiftLeftReg { vx_idx, vy_idx } => {
                let source = if quirks.shift_reads_vy() {
                    regs.V[vy_idx]
                } else {
                    regs.V[vx_idx]
                };
                regs.V[vx_idx] = source << 1;
                regs.V[VF] = source >> 7;
            }
            SkipIfRegNotEqual { vx_idx, vy_idx } => {
                if regs.V[vx_idx] != regs.V[vy_idx] {
                    skip(regs);
                }
            }
            SetVI { addr } => regs.VI = addr,
            JumpPlusV0 { addr } => regs.PC = addr + regs.V[0] as u16,
            Random { vx_idx, mask } => regs.V[vx_idx] = self.rng.gen::<u8>() & mask,
            Draw {
                vx_idx,
                vy_idx,
                num_bytes,
            } => {
                let rows = match num_bytes {
                    0 if tall_sprites => TALL_SPRITE_ROWS,
                    n => n as usize,
                };
                let (x, y) = (regs.V[vx_idx] as usize, regs.V[vy_idx] as usize);
                let sprite = machine.memory.read(regs.VI as usize, rows)?;
                let collision = machine.display.xor_sprite(x, y, sprite);
                regs.V[VF] = collision as u8;
                machine.draw_flag = true;
            }
            SkipIfKeyPressed { vx_idx } => {
                if machine.keypad.is_pressed(regs.V[vx_idx]) {
                    skip(regs);
                }
            }
            SkipIfKeyNotPressed { vx_idx } => {
                if !machine.keypad.is_pressed(regs.V[vx_idx]) {
                    skip(regs);
                }
            }
            GetDelayTimer { vx_idx } => regs.V[vx_idx] = regs.DT,
            WaitForKey { vx_idx } => match machine.keypad.first_pressed() {
                Some(key) => {
                    tracing::debug!("key 0x{:X} latched into V{:X}", key, vx_idx);
                    regs.V[vx_idx] = key;
                }
                None => regs.PC = pc,
            },
            SetDelayTimer { vx_idx } => regs.DT = regs.V[vx_idx],
            SetSoundTimer { vx_idx } => regs.ST = regs.V[vx_idx],
            AddRegVI { vx_idx } => regs.VI = regs.VI.wrapping_add(regs.V[vx_idx] as u16),
            SetVIDigit { vx_idx } => regs.VI = regs.V[vx_idx] as u16 * GLYPH_BYTES as u16,
            StoreBCD { vx_idx } => {
                let value = regs.V[vx_idx];
                let digits = [value / 100, (value / 10) % 10, value % 10];
                machine.memory.write(regs.VI as usize, &digits)?;
            }
            StoreRegs { vx_idx } => {
                let count = vx_idx + 1;
                machine.memory.write(regs.VI as usize, &regs.V[..count])?;
                if quirks.transfer_increments_index() {
                    regs.VI = regs.VI.wrapping_add(count as u16);
                }
            }
            LoadRegs { vx_idx } => {
                let count = vx_idx + 1;
                let data = machine.memory.read(regs.VI as usize, count)?;
                regs.V[..count].copy_from_slice(data);
                if quirks.transfer_increments_index() {
                    regs.VI = regs.VI.wrapping_add(count as u16);
                }
            }
            Unknown { .. } => {}
        }
        Ok(())
    }
}

fn skip(regs: &mut Chip8Registers) {
    regs.PC = regs.PC.wrapping_add(Chip8Instruction::LEN_BYTES);
}
