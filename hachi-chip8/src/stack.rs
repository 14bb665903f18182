use std::fmt;

use thiserror::Error;

pub const STACK_CAPACITY: usize = 12;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("stack is full")]
    Overflow,
    #[error("stack is empty")]
    Underflow,
}

/// Return-address stack for `2NNN`/`00EE`.
#[derive(Clone, PartialEq, Eq)]
pub struct Chip8Stack {
    stack_pointer: usize,
    slots: [u16; STACK_CAPACITY],
}

impl fmt::Debug for Chip8Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots[..self.stack_pointer].iter().map(|a| format!("0x{:03X}", a)))
            .finish()
    }
}

impl Default for Chip8Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8Stack {
    pub fn new() -> Self {
        Chip8Stack {
            stack_pointer: 0,
            slots: [0; STACK_CAPACITY],
        }
    }

    pub fn depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn is_empty(&self) -> bool {
        self.stack_pointer == 0
    }

    pub fn pop(&mut self) -> Result<u16, StackError> {
        if self.stack_pointer == 0 {
            return Err(StackError::Underflow);
        }
        self.stack_pointer -= 1;
        let address = self.slots[self.stack_pointer];
        tracing::debug!("pop 0x{:03X}, depth {}", address, self.stack_pointer);
        Ok(address)
    }

    pub fn push(&mut self, address: u16) -> Result<(), StackError> {
        if self.stack_pointer == STACK_CAPACITY {
            return Err(StackError::Overflow);
        }
        self.slots[self.stack_pointer] = address;
        self.stack_pointer += 1;
        tracing::debug!("push 0x{:03X}, depth {}", address, self.stack_pointer);
        Ok(())
    }
}
