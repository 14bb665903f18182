use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which CHIP-8 dialect's behavior to follow where the variants disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Quirks {
    #[default]
    Chip8,
    SuperChip,
    XoChip,
}

impl Quirks {
    /// `8XY1`/`8XY2`/`8XY3` clear VF.
    pub fn logic_resets_flag(&self) -> bool {
        matches!(self, Quirks::Chip8)
    }

    /// `8XY6`/`8XYE` shift VY into VX instead of shifting VX in place.
    pub fn shift_reads_vy(&self) -> bool {
        matches!(self, Quirks::Chip8)
    }

    /// `FX55`/`FX65` leave I pointing past the last register transferred.
    pub fn transfer_increments_index(&self) -> bool {
        matches!(self, Quirks::Chip8)
    }
}

impl fmt::Display for Quirks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quirks::Chip8 => "chip8",
            Quirks::SuperChip => "superchip",
            Quirks::XoChip => "xochip",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown quirks mode '{0}', expected one of chip8, superchip, xochip")]
pub struct ParseQuirksError(String);

impl FromStr for Quirks {
    type Err = ParseQuirksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Quirks::Chip8),
            "superchip" | "schip" | "super-chip" => Ok(Quirks::SuperChip),
            "xochip" | "xo-chip" => Ok(Quirks::XoChip),
            _ => Err(ParseQuirksError(String::from(s))),
        }
    }
}

pub const DEFAULT_DISPLAY_WIDTH: usize = 64;
pub const DEFAULT_DISPLAY_HEIGHT: usize = 32;

/// Fixed-at-creation machine parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chip8Config {
    pub quirks: Quirks,
    pub display_width: usize,
    pub display_height: usize,
    /// Treat `DXY0` as a 16-row sprite instead of drawing nothing.
    pub tall_zero_height_sprites: bool,
}

impl Default for Chip8Config {
    fn default() -> Self {
        Self::new(Quirks::default())
    }
}

impl From<Quirks> for Chip8Config {
    fn from(quirks: Quirks) -> Self {
        Self::new(quirks)
    }
}

impl Chip8Config {
    pub fn new(quirks: Quirks) -> Self {
        Self {
            quirks,
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            tall_zero_height_sprites: false,
        }
    }

    pub fn with_display(mut self, width: usize, height: usize) -> Self {
        self.display_width = width;
        self.display_height = height;
        self
    }

    pub fn with_tall_zero_height_sprites(mut self, enabled: bool) -> Self {
        self.tall_zero_height_sprites = enabled;
        self
    }
}
