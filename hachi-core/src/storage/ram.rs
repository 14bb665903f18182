use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("access of {length} bytes at 0x{address:04X} exceeds {size}-byte storage")]
    OutOfRange {
        address: usize,
        length: usize,
        size: usize,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Byte-addressable read/write memory of a fixed size.
///
/// Every access is bounds-checked as a whole: a read or write that would
/// cross the end of the buffer fails without touching any byte.
#[derive(Clone, PartialEq, Eq)]
pub struct RAM<const N: usize> {
    buffer: [u8; N],
}

impl<const N: usize> fmt::Debug for RAM<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RAM<0x{:X}>", N)
    }
}

impl<const N: usize> Default for RAM<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RAM<N> {
    pub const SIZE: usize = N;

    pub fn new() -> Self {
        Self { buffer: [0; N] }
    }

    fn check(address: usize, length: usize) -> Result<()> {
        match address.checked_add(length) {
            Some(end) if end <= N => Ok(()),
            _ => Err(StorageError::OutOfRange {
                address,
                length,
                size: N,
            }),
        }
    }

    pub fn read(&self, address: usize, length: usize) -> Result<&[u8]> {
        Self::check(address, length)?;
        Ok(&self.buffer[address..address + length])
    }

    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<()> {
        Self::check(address, data.len())?;
        tracing::trace!(
            "writing 0x{:X} bytes to 0x{:04X} - 0x{:04X}",
            data.len(),
            address,
            address + data.len()
        );
        self.buffer[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Zeroes the whole buffer.
    pub fn clear(&mut self) {
        self.buffer = [0; N];
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn new_works() {
        let ram = RAM::<64>::new();
        assert!(ram.as_slice().iter().all(|b| *b == 0));
        assert_eq!(RAM::<64>::SIZE, 64);
    }

    #[test]
    fn write_then_read() {
        let mut ram = RAM::<1024>::new();
        let mut rng = StdRng::seed_from_u64(0x8);
        let mut data = [0u8; 32];
        rng.fill(&mut data);

        ram.write(0x100, &data).unwrap();
        assert_eq!(ram.read(0x100, 32).unwrap(), &data);
        assert_eq!(ram.read(0x0FF, 1).unwrap(), &[0]);
    }

    #[test]
    fn access_at_end_is_allowed() {
        let mut ram = RAM::<16>::new();
        ram.write(14, &[0xAA, 0xBB]).unwrap();
        assert_eq!(ram.read(14, 2).unwrap(), &[0xAA, 0xBB]);
        assert_eq!(ram.read(16, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn out_of_range_fails_without_partial_write() {
        let mut ram = RAM::<16>::new();
        let err = ram.write(15, &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            StorageError::OutOfRange {
                address: 15,
                length: 2,
                size: 16
            }
        );
        assert_eq!(ram.read(15, 1).unwrap(), &[0]);
        assert!(ram.read(usize::MAX, 2).is_err());
        assert!(ram.read(16, 1).is_err());
    }

    #[test]
    fn clear_zeroes() {
        let mut ram = RAM::<8>::new();
        ram.write(0, &[9; 8]).unwrap();
        ram.clear();
        assert_eq!(ram.as_slice(), &[0; 8]);
    }
}
