mod display;
pub mod opcode;
mod storage;

pub use crate::display::MonochromeDisplay;
pub use crate::opcode::{Opcode, Opcode16, OpcodeError, OpcodeValue};
pub use crate::storage::{StorageError, RAM};
