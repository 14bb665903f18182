/// Index of the flags register within `V`.
pub const VF: usize = 0xF;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(non_snake_case)]
pub struct Chip8Registers {
    /// General-purpose registers V0 - VF. VF doubles as the carry, borrow
    /// and collision flag.
    pub V: [u8; 16],
    pub VI: u16,
    pub PC: u16,

    /// Delay timer register.
    pub DT: u8,

    /// Sound timer register.
    pub ST: u8,
}

impl Chip8Registers {
    pub fn new(initial_pc: u16) -> Self {
        Chip8Registers {
            PC: initial_pc,
            ..Default::default()
        }
    }

    pub fn vf(&self) -> u8 {
        self.V[VF]
    }
}
