pub mod cpu;
pub mod instructions;
pub mod machine;

mod config;
mod error;
mod font;
mod keypad;
mod registers;
mod stack;

pub use crate::config::{
    Chip8Config, ParseQuirksError, Quirks, DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH,
};
pub use crate::cpu::Chip8Cpu;
pub use crate::error::{Fault, MachineError};
pub use crate::font::{FONT, GLYPH_BYTES};
pub use crate::keypad::{keymap, Chip8Keypad, KEY_COUNT};
pub use crate::machine::{Chip8Machine, ENTRY_POINT, MAX_PROGRAM_SIZE, MEMORY_SIZE};
pub use crate::registers::{Chip8Registers, VF};
pub use crate::stack::{Chip8Stack, StackError, STACK_CAPACITY};
