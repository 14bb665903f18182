use num_traits::{FromPrimitive, ToPrimitive, Unsigned};
use std::{fmt, ops};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpcodeError {
    #[error("{0} index {1} out of bounds, must be [0, {2})")]
    IndexOutOfBounds(&'static str, usize, usize),
    #[error("opcode needs {0} bytes, got {1}")]
    NotEnoughBytes(usize, usize),
}

pub type Result<T> = std::result::Result<T, OpcodeError>;

pub trait OpcodeValue:
    Copy
    + fmt::Debug
    + fmt::UpperHex
    + Unsigned
    + ToPrimitive
    + FromPrimitive
    + ops::BitAnd<Self, Output = Self>
    + ops::Shl<usize, Output = Self>
    + ops::Shr<usize, Output = Self>
{
    const MASK_BYTE: Self;
    const MASK_NYBBLE: Self;

    const WIDTH_BITS: usize = Self::WIDTH_BYTES * 8;
    const WIDTH_BYTES: usize = std::mem::size_of::<Self>();
    const WIDTH_NYBBLES: usize = Self::WIDTH_BYTES * 2;

    /// Assembles a value from the first `WIDTH_BYTES` bytes, most significant first.
    fn from_be_slice(bytes: &[u8]) -> Self;
}

impl OpcodeValue for u16 {
    const MASK_BYTE: Self = 0xFF;
    const MASK_NYBBLE: Self = 0x0F;

    fn from_be_slice(bytes: &[u8]) -> Self {
        u16::from_be_bytes([bytes[0], bytes[1]])
    }
}

/// A fixed-width instruction word with positional field extraction.
///
/// Indices count from the least significant end: nybble 0 of `0xD5A3` is
/// `0x3`, nybble 3 is `0xD`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode<T: OpcodeValue> {
    value: T,
}

impl<T: OpcodeValue> Opcode<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Reads an opcode stored big-endian at the start of `bytes`.
    pub fn try_from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < T::WIDTH_BYTES {
            return Err(OpcodeError::NotEnoughBytes(T::WIDTH_BYTES, bytes.len()));
        }
        Ok(Self {
            value: T::from_be_slice(bytes),
        })
    }

    fn extract(
        &self,
        idx_type: &'static str,
        idx: usize,
        width: usize,
        mask: T,
        shift: usize,
    ) -> Result<u8> {
        if idx >= width {
            return Err(OpcodeError::IndexOutOfBounds(idx_type, idx, width));
        }
        let mask = mask << shift;
        let result = (self.value & mask) >> shift;
        Ok(result.to_u8().unwrap_or_default())
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the lowest `count` bits of the opcode, e.g. the 12-bit
    /// address literal of a 16-bit word.
    pub fn low_bits(&self, count: usize) -> T {
        if count == 0 {
            return T::zero();
        }
        if count >= T::WIDTH_BITS {
            return self.value;
        }
        let shift = T::WIDTH_BITS - count;
        (self.value << shift) >> shift
    }

    /// # Panics
    ///
    /// Panics if `idx` is not a byte position within the opcode.
    pub fn get_byte(&self, idx: usize) -> u8 {
        self.try_get_byte(idx).unwrap_or_else(|err| panic!("{}", err))
    }

    /// # Panics
    ///
    /// Panics if `idx` is not a nybble position within the opcode.
    pub fn get_nybble(&self, idx: usize) -> u8 {
        self.try_get_nybble(idx)
            .unwrap_or_else(|err| panic!("{}", err))
    }

    pub fn try_get_byte(&self, idx: usize) -> Result<u8> {
        self.extract("byte", idx, T::WIDTH_BYTES, T::MASK_BYTE, idx * 8)
    }

    pub fn try_get_nybble(&self, idx: usize) -> Result<u8> {
        self.extract("nybble", idx, T::WIDTH_NYBBLES, T::MASK_NYBBLE, idx * 4)
    }
}

impl<T: OpcodeValue> From<T> for Opcode<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: OpcodeValue> fmt::Debug for Opcode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0width$X}", self.value, width = T::WIDTH_NYBBLES)
    }
}

pub type Opcode16 = Opcode<u16>;
