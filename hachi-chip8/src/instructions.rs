use hachi_core::Opcode16;

/// One decoded CHIP-8 instruction. Register operands are indices into `V`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chip8Instruction {
    ClearScreen, // 0x00E0
    Return,      // 0x00EE
    ExecuteMachineSubroutine {
        addr: u16,
    }, // 0x0NNN except 0x00E0 and 0x00EE
    Jump {
        addr: u16,
    }, // 0x1NNN
    Call {
        addr: u16,
    }, // 0x2NNN
    SkipIfEqual {
        vx_idx: usize,
        value: u8,
    }, // 0x3XNN
    SkipIfNotEqual {
        vx_idx: usize,
        value: u8,
    }, // 0x4XNN
    SkipIfRegEqual {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x5XY0
    SetReg {
        vx_idx: usize,
        value: u8,
    }, // 0x6XNN
    AddReg {
        vx_idx: usize,
        value: u8,
    }, // 0x7XNN
    SetRegReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY0
    OrRegReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY1
    AndRegReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY2
    XorRegReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY3
    AddRegReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY4
    SubRegReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY5
    ShiftRightReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY6
    SubRegRegReverse {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XY7
    ShiftLeftReg {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x8XYE
    SkipIfRegNotEqual {
        vx_idx: usize,
        vy_idx: usize,
    }, // 0x9XY0
    SetVI {
        addr: u16,
    }, // 0xANNN
    JumpPlusV0 {
        addr: u16,
    }, // 0xBNNN
    Random {
        vx_idx: usize,
        mask: u8,
    }, // 0xCXNN
    Draw {
        vx_idx: usize,
        vy_idx: usize,
        num_bytes: u8,
    }, // 0xDXYN
    SkipIfKeyPressed {
        vx_idx: usize,
    }, // 0xEX9E
    SkipIfKeyNotPressed {
        vx_idx: usize,
    }, // 0xEXA1
    GetDelayTimer {
        vx_idx: usize,
    }, // 0xFX07
    WaitForKey {
        vx_idx: usize,
    }, // 0xFX0A
    SetDelayTimer {
        vx_idx: usize,
    }, // 0xFX15
    SetSoundTimer {
        vx_idx: usize,
    }, // 0xFX18
    AddRegVI {
        vx_idx: usize,
    }, // 0xFX1E
    SetVIDigit {
        vx_idx: usize,
    }, // 0xFX29
    StoreBCD {
        vx_idx: usize,
    }, // 0xFX33
    StoreRegs {
        vx_idx: usize,
    }, // 0xFX55
    LoadRegs {
        vx_idx: usize,
    }, // 0xFX65
    Unknown {
        opcode: u16,
    },
}

impl Chip8Instruction {
    pub const LEN_BYTES: u16 = 2;

    /// Decodes any 16-bit word. Words that match no instruction come back
    /// as `Unknown` rather than an error.
    pub fn decode(opcode: Opcode16) -> Self {
        use Chip8Instruction::*;

        let addr = opcode.low_bits(12);
        let value = opcode.get_byte(0);
        let vx_idx = opcode.get_nybble(2) as usize;
        let vy_idx = opcode.get_nybble(1) as usize;
        let n = opcode.get_nybble(0);
        let unknown = Unknown {
            opcode: opcode.value(),
        };

        match opcode.get_nybble(3) {
            // 0? t-> 00E0
            //    f-> 00EE
            //    f-> 0nnn
            0x0 => match addr {
                0x0E0 => ClearScreen,
                0x0EE => Return,
                _ => ExecuteMachineSubroutine { addr },
            },
            0x1 => Jump { addr },
            0x2 => Call { addr },
            0x3 => SkipIfEqual { vx_idx, value },
            0x4 => SkipIfNotEqual { vx_idx, value },

            // 5? t-> xy0? t-> 5xy0
            //             f-> invalid
            0x5 => match n {
                0x0 => SkipIfRegEqual { vx_idx, vy_idx },
                _ => unknown,
            },
            0x6 => SetReg { vx_idx, value },
            0x7 => AddReg { vx_idx, value },
            0x8 => match n {
                0x0 => SetRegReg { vx_idx, vy_idx },
                0x1 => OrRegReg { vx_idx, vy_idx },
                0x2 => AndRegReg { vx_idx, vy_idx },
                0x3 => XorRegReg { vx_idx, vy_idx },
                0x4 => AddRegReg { vx_idx, vy_idx },
                0x5 => SubRegReg { vx_idx, vy_idx },
                0x6 => ShiftRightReg { vx_idx, vy_idx },
                0x7 => SubRegRegReverse { vx_idx, vy_idx },
                0xE => ShiftLeftReg { vx_idx, vy_idx },
                _ => unknown,
            },

            // 9? t-> xy0? t-> 9xy0
            //             f-> invalid
            0x9 => match n {
                0x0 => SkipIfRegNotEqual { vx_idx, vy_idx },
                _ => unknown,
            },
            0xA => SetVI { addr },
            0xB => JumpPlusV0 { addr },
            0xC => Random {
                vx_idx,
                mask: value,
            },
            0xD => Draw {
                vx_idx,
                vy_idx,
                num_bytes: n,
            },
            0xE => match value {
                0x9E => SkipIfKeyPressed { vx_idx },
                0xA1 => SkipIfKeyNotPressed { vx_idx },
                _ => unknown,
            },
            0xF => match value {
                0x07 => GetDelayTimer { vx_idx },
                0x0A => WaitForKey { vx_idx },
                0x15 => SetDelayTimer { vx_idx },
                0x18 => SetSoundTimer { vx_idx },
                0x1E => AddRegVI { vx_idx },
                0x29 => SetVIDigit { vx_idx },
                0x33 => StoreBCD { vx_idx },
                0x55 => StoreRegs { vx_idx },
                0x65 => LoadRegs { vx_idx },
                _ => unknown,
            },
            nybble => unreachable!("nybble 0x{:X} wider than 4 bits", nybble),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(opcode: u16) -> Chip8Instruction {
        Chip8Instruction::decode(Opcode16::new(opcode))
    }

    #[test]
    fn test_valid_opcodes_0x0nnn() {
        for opcode in 0x0000u16..=0x0FFFu16 {
            match decode(opcode) {
                Chip8Instruction::ClearScreen => assert_eq!(opcode, 0x00E0),
                Chip8Instruction::Return => assert_eq!(opcode, 0x00EE),
                Chip8Instruction::ExecuteMachineSubroutine { addr } => {
                    assert_eq!(addr, opcode);
                    assert_ne!(opcode, 0x00E0);
                    assert_ne!(opcode, 0x00EE);
                }
                other => panic!("unexpected instruction: {:?}", other),
            }
        }
    }

    #[test]
    fn test_address_families() {
        for opcode in 0x0000u16..=0x0FFFu16 {
            assert_eq!(decode(0x1000 | opcode), Chip8Instruction::Jump { addr: opcode });
            assert_eq!(decode(0x2000 | opcode), Chip8Instruction::Call { addr: opcode });
            assert_eq!(decode(0xA000 | opcode), Chip8Instruction::SetVI { addr: opcode });
            assert_eq!(
                decode(0xB000 | opcode),
                Chip8Instruction::JumpPlusV0 { addr: opcode }
            );
        }
    }

    #[test]
    fn test_register_fields() {
        assert_eq!(
            decode(0x3A42),
            Chip8Instruction::SkipIfEqual {
                vx_idx: 0xA,
                value: 0x42
            }
        );
        assert_eq!(
            decode(0x8BC4),
            Chip8Instruction::AddRegReg {
                vx_idx: 0xB,
                vy_idx: 0xC
            }
        );
        assert_eq!(
            decode(0xD125),
            Chip8Instruction::Draw {
                vx_idx: 0x1,
                vy_idx: 0x2,
                num_bytes: 0x5
            }
        );
        assert_eq!(
            decode(0xC7F0),
            Chip8Instruction::Random {
                vx_idx: 0x7,
                mask: 0xF0
            }
        );
        assert_eq!(decode(0xF955), Chip8Instruction::StoreRegs { vx_idx: 0x9 });
    }

    #[test]
    fn test_valid_opcodes_0x5xy0() {
        for opcode in 0x5000u16..=0x5FFFu16 {
            match decode(opcode) {
                Chip8Instruction::SkipIfRegEqual { vx_idx, vy_idx } => {
                    assert_eq!(opcode & 0x000F, 0x0);
                    assert_eq!(((opcode & 0x0F00) >> 8) as usize, vx_idx);
                    assert_eq!(((opcode & 0x00F0) >> 4) as usize, vy_idx);
                }
                Chip8Instruction::Unknown { opcode: raw } => {
                    assert_eq!(raw, opcode);
                    assert_ne!(opcode & 0x000F, 0x0);
                }
                other => panic!("unexpected instruction: {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_sub_opcodes() {
        for n in [0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF] {
            let opcode = 0x8120 | n;
            assert_eq!(decode(opcode), Chip8Instruction::Unknown { opcode });
        }
        for low in 0x00u16..=0xFF {
            let e = decode(0xE300 | low);
            let f = decode(0xF300 | low);
            match low {
                0x9E | 0xA1 => assert!(!matches!(e, Chip8Instruction::Unknown { .. })),
                _ => assert_eq!(e, Chip8Instruction::Unknown { opcode: 0xE300 | low }),
            }
            match low {
                0x07 | 0x0A | 0x15 | 0x18 | 0x1E | 0x29 | 0x33 | 0x55 | 0x65 => {
                    assert!(!matches!(f, Chip8Instruction::Unknown { .. }))
                }
                _ => assert_eq!(f, Chip8Instruction::Unknown { opcode: 0xF300 | low }),
            }
        }
        assert_eq!(decode(0x9AB1), Chip8Instruction::Unknown { opcode: 0x9AB1 });
    }
}
