use std::io::Read;

use hachi_core::{MonochromeDisplay, Opcode16, RAM};

use crate::config::{Chip8Config, Quirks};
use crate::error::{Fault, MachineError, Result};
use crate::font::FONT;
use crate::instructions::Chip8Instruction;
use crate::keypad::Chip8Keypad;
use crate::registers::Chip8Registers;
use crate::stack::Chip8Stack;

pub const MEMORY_SIZE: usize = 4096;
pub const ENTRY_POINT: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - ENTRY_POINT as usize;

pub type Chip8RAM = RAM<MEMORY_SIZE>;

/// Architectural state of one CHIP-8 session.
///
/// Only the engine in [`crate::cpu`] mutates registers, memory and the
/// framebuffer; the host writes key latches and clears the draw flag.
#[derive(Clone, Debug)]
pub struct Chip8Machine {
    config: Chip8Config,
    pub(crate) memory: Chip8RAM,
    pub(crate) regs: Chip8Registers,
    pub(crate) stack: Chip8Stack,
    pub(crate) display: MonochromeDisplay,
    pub(crate) keypad: Chip8Keypad,
    pub(crate) draw_flag: bool,
}

impl Chip8Machine {
    pub fn new(program: &[u8], quirks: Quirks) -> Result<Self> {
        Self::with_config(program, Chip8Config::new(quirks))
    }

    pub fn with_config(program: &[u8], config: Chip8Config) -> Result<Self> {
        check_program_size(program)?;
        check_display(&config)?;
        let mut machine = Chip8Machine {
            config,
            memory: Chip8RAM::new(),
            regs: Chip8Registers::new(ENTRY_POINT),
            stack: Chip8Stack::new(),
            display: MonochromeDisplay::new(config.display_width, config.display_height),
            keypad: Chip8Keypad::new(),
            draw_flag: false,
        };
        machine.load(program)?;
        tracing::info!(
            "created {} machine with {}-byte program, {}x{} display",
            config.quirks,
            program.len(),
            config.display_width,
            config.display_height
        );
        Ok(machine)
    }

    /// Reads a whole program image from `reader` and builds a machine from it.
    /// Stops reading one byte past the largest program that fits.
    pub fn from_reader(reader: &mut impl Read, config: Chip8Config) -> Result<Self> {
        let mut program = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)
            .map_err(MachineError::RomUnreadable)?;
        Self::with_config(&program, config)
    }

    /// Restarts the session with `program`, keeping the configuration.
    /// On error the machine is left untouched.
    pub fn reset(&mut self, program: &[u8]) -> Result<()> {
        check_program_size(program)?;
        self.memory.clear();
        self.regs = Chip8Registers::new(ENTRY_POINT);
        self.stack = Chip8Stack::new();
        self.display.clear();
        self.keypad.release_all();
        self.draw_flag = false;
        self.load(program)?;
        tracing::info!("reset machine with {}-byte program", program.len());
        Ok(())
    }

    fn load(&mut self, program: &[u8]) -> Result<()> {
        let entry = ENTRY_POINT as usize;
        self.memory
            .write(0, &FONT)
            .and_then(|_| self.memory.write(entry, program))
            .map_err(|_| MachineError::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            })
    }

    /// Reads the instruction word at `address`.
    pub(crate) fn fetch(&self, address: u16) -> std::result::Result<Opcode16, Fault> {
        let length = Chip8Instruction::LEN_BYTES as usize;
        let bytes = self.memory.read(address as usize, length)?;
        Opcode16::try_from_be_bytes(bytes).map_err(|_| Fault::MemoryOutOfRange {
            address: address as usize,
            length,
        })
    }

    pub fn config(&self) -> &Chip8Config {
        &self.config
    }

    pub fn quirks(&self) -> Quirks {
        self.config.quirks
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn registers(&self) -> &Chip8Registers {
        &self.regs
    }

    pub fn stack(&self) -> &Chip8Stack {
        &self.stack
    }

    pub fn framebuffer(&self) -> &MonochromeDisplay {
        &self.display
    }

    pub fn delay_timer(&self) -> u8 {
        self.regs.DT
    }

    pub fn sound_timer(&self) -> u8 {
        self.regs.ST
    }

    pub fn keypad(&self) -> &Chip8Keypad {
        &self.keypad
    }

    /// Latches a key as pressed or released; see [`Chip8Keypad::set`].
    pub fn set_key(&mut self, key: u8, pressed: bool) -> bool {
        self.keypad.set(key, pressed)
    }

    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    /// Called by the renderer once it has consumed a frame.
    pub fn clear_draw_flag(&mut self) {
        self.draw_flag = false;
    }
}

fn check_program_size(program: &[u8]) -> Result<()> {
    if program.len() > MAX_PROGRAM_SIZE {
        return Err(MachineError::RomTooLarge {
            size: program.len(),
            max: MAX_PROGRAM_SIZE,
        });
    }
    Ok(())
}

fn check_display(config: &Chip8Config) -> Result<()> {
    if config.display_width == 0 || config.display_height == 0 {
        return Err(MachineError::InvalidDisplay {
            width: config.display_width,
            height: config.display_height,
        });
    }
    Ok(())
}
