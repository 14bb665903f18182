use std::io;

use hachi_core::StorageError;
use thiserror::Error;

/// Raised while building or resetting a machine.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("program is {size} bytes but only {max} bytes fit above the entry point")]
    RomTooLarge { size: usize, max: usize },
    #[error("display must be at least 1x1, got {width}x{height}")]
    InvalidDisplay { width: usize, height: usize },
    #[error("failed to read program image")]
    RomUnreadable(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, MachineError>;

/// Raised by the engine while executing; fatal to the running session.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    #[error("call at 0x{pc:04X} overflows the {capacity}-entry call stack")]
    StackOverflow { pc: u16, capacity: usize },
    #[error("return at 0x{pc:04X} with an empty call stack")]
    StackUnderflow { pc: u16 },
    #[error("access of {length} bytes at 0x{address:04X} is outside memory")]
    MemoryOutOfRange { address: usize, length: usize },
}

impl From<StorageError> for Fault {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::OutOfRange {
                address, length, ..
            } => Fault::MemoryOutOfRange { address, length },
        }
    }
}
