use crate::decoder::{fields, Decoded, Decoder, Field, InsnClass, WordFlags};
use crate::instructions::{MnemonicTable, ADD_OPCODES, ADD_PACK, MUL_OPCODES, MUL_PACK};

pub mod sig {
    pub const NONE: u32 = 1;
    pub const PROG_END: u32 = 3;
    pub const SMALL_IMM: u32 = 13;
    pub const LOAD_IMM: u32 = 14;
    pub const BRANCH: u32 = 15;
}

pub mod waddr {
    pub const NOP: u32 = 39;
    pub const QUAD_XY: u32 = 41;
    pub const VPMVCD_SETUP: u32 = 49;
    pub const VPM_ADDR: u32 = 50;
}

pub mod raddr {
    /// Fragment payload: W through regfile A, Z through regfile B.
    pub const FRAG_PAYLOAD_ZW: u32 = 15;
    /// Shares its encoding with the write-side NOP.
    pub const NOP: u32 = 39;
}

pub const OP_ADD_NOP: u32 = 0;
pub const OP_MUL_NOP: u32 = 0;
pub const UNPACK_NOP: u32 = 0;

/// Addresses at or below this index name general-purpose registers.
pub const MAX_GENERAL_REG: u32 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegFile {
    A,
    B,
}

impl RegFile {
    pub fn letter(self) -> &'static str {
        match self {
            RegFile::A => "a",
            RegFile::B => "b",
        }
    }
}

/// One half of a dual-issue ALU word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipe {
    Add,
    Mul,
}

impl Pipe {
    pub const fn op_field(self) -> Field {
        match self {
            Pipe::Add => fields::OP_ADD,
            Pipe::Mul => fields::OP_MUL,
        }
    }

    pub const fn cond_field(self) -> Field {
        match self {
            Pipe::Add => fields::COND_ADD,
            Pipe::Mul => fields::COND_MUL,
        }
    }

    pub const fn waddr_field(self) -> Field {
        match self {
            Pipe::Add => fields::WADDR_ADD,
            Pipe::Mul => fields::WADDR_MUL,
        }
    }

    pub const fn mux_fields(self) -> (Field, Field) {
        match self {
            Pipe::Add => (fields::ADD_A, fields::ADD_B),
            Pipe::Mul => (fields::MUL_A, fields::MUL_B),
        }
    }

    pub const fn nop(self) -> u32 {
        match self {
            Pipe::Add => OP_ADD_NOP,
            Pipe::Mul => OP_MUL_NOP,
        }
    }

    pub fn opcodes(self) -> &'static MnemonicTable {
        match self {
            Pipe::Add => &ADD_OPCODES,
            Pipe::Mul => &MUL_OPCODES,
        }
    }

    pub fn pack_table(self) -> &'static MnemonicTable {
        match self {
            Pipe::Add => &ADD_PACK,
            Pipe::Mul => &MUL_PACK,
        }
    }

    /// The PM bit hands the PACK field to the MUL pipe; otherwise the ADD pipe owns it.
    pub fn owns_pack(self, flags: WordFlags) -> bool {
        match self {
            Pipe::Add => !flags.contains(WordFlags::PM),
            Pipe::Mul => flags.contains(WordFlags::PM),
        }
    }

    /// Only the ADD half renders the word-level flags and the unpack mode.
    pub const fn carries_extras(self) -> bool {
        matches!(self, Pipe::Add)
    }

    /// ADD writes regfile A and MUL writes regfile B unless WS swaps them.
    pub fn dest_file(self, flags: WordFlags) -> RegFile {
        let is_mul = matches!(self, Pipe::Mul);
        if is_mul == flags.contains(WordFlags::WS) {
            RegFile::A
        } else {
            RegFile::B
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Vc4Decoder;

impl Vc4Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Vc4Decoder {
    fn decode(&self, word: u64) -> Decoded {
        let code = fields::SIG.extract(word);
        let class = match code {
            sig::BRANCH => InsnClass::Branch,
            sig::LOAD_IMM => InsnClass::LoadImm,
            _ => InsnClass::Alu,
        };
        Decoded {
            word,
            sig: code,
            class,
            flags: WordFlags::of(word),
        }
    }
}
