use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A named bit range inside a 64-bit QPU instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub shift: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(name: &'static str, shift: u32, width: u32) -> Self {
        Self { name, shift, width }
    }

    pub const fn mask(self) -> u64 {
        (1u64 << self.width) - 1
    }

    #[inline]
    pub const fn extract(self, word: u64) -> u32 {
        ((word >> self.shift) & self.mask()) as u32
    }
}

#[inline]
pub const fn extract(word: u64, field: Field) -> u32 {
    field.extract(word)
}

pub mod fields {
    use super::Field;

    pub const SIG: Field = Field::new("SIG", 60, 4);
    pub const UNPACK: Field = Field::new("UNPACK", 57, 3);
    pub const PACK: Field = Field::new("PACK", 52, 4);
    pub const BRANCH_COND: Field = Field::new("BRANCH_COND", 52, 4);
    pub const COND_ADD: Field = Field::new("COND_ADD", 49, 3);
    pub const COND_MUL: Field = Field::new("COND_MUL", 46, 3);
    pub const WADDR_ADD: Field = Field::new("WADDR_ADD", 38, 6);
    pub const WADDR_MUL: Field = Field::new("WADDR_MUL", 32, 6);
    pub const OP_MUL: Field = Field::new("OP_MUL", 29, 3);
    pub const OP_ADD: Field = Field::new("OP_ADD", 24, 5);
    pub const RADDR_A: Field = Field::new("RADDR_A", 18, 6);
    pub const RADDR_B: Field = Field::new("RADDR_B", 12, 6);
    // Shares its bits with RADDR_B; only meaningful under the small-immediate signal.
    pub const SMALL_IMM: Field = Field::new("SMALL_IMM", 12, 6);
    pub const ADD_A: Field = Field::new("ADD_A", 9, 3);
    pub const ADD_B: Field = Field::new("ADD_B", 6, 3);
    pub const MUL_A: Field = Field::new("MUL_A", 3, 3);
    pub const MUL_B: Field = Field::new("MUL_B", 0, 3);
    pub const IMMEDIATE: Field = Field::new("IMMEDIATE", 0, 32);
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFlags: u64 {
const PM = 1 << 56; // pack/unpack applies to the MUL pipe
const SF = 1 << 45; // set flags
const WS = 1 << 44; // swap write files between pipes
}
}

impl WordFlags {
    pub fn of(word: u64) -> Self {
        Self::from_bits_truncate(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsnClass {
    Branch,
    LoadImm,
    Alu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub word: u64,
    pub sig: u32,
    pub class: InsnClass,
    pub flags: WordFlags,
}

impl Decoded {
    #[inline]
    pub fn field(&self, field: Field) -> u32 {
        field.extract(self.word)
    }

    /// Low 32 bits: the literal of a load-immediate, the offset of a branch.
    pub fn imm32(&self) -> u32 {
        self.field(fields::IMMEDIATE)
    }
}

/// Every 64-bit value is a decodable word, so unlike a byte-stream decoder
/// this never fails.
pub trait Decoder {
    fn decode(&self, word: u64) -> Decoded;
}
