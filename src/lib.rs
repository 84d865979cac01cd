pub mod decoder;
pub mod disasm;
pub mod instructions;
pub mod program;

pub mod isa {
    pub mod vc4; // VideoCore IV QPU
}

pub use decoder::{extract, Decoded, Decoder, Field, InsnClass, WordFlags};
pub use disasm::{disassemble, fmt_word, DisasmConfig, Disassembler, QpuInsn};
pub use isa::vc4::{Pipe, RegFile, Vc4Decoder};
pub use program::{Program, ProgramError};
