#![allow(dead_code)]

use vc4_qpu::decoder::{fields::*, Field, WordFlags};

// Packs field values into a word; tests only, no range checks.
pub fn set(word: u64, field: Field, value: u32) -> u64 {
    (word & !(field.mask() << field.shift)) | ((value as u64 & field.mask()) << field.shift)
}

pub fn word(parts: &[(Field, u32)]) -> u64 {
    parts.iter().fold(0, |w, &(f, v)| set(w, f, v))
}

/// A dual-ALU word with both pipes idle: nop writes, nop ops, no register reads.
pub fn alu_nop(sig: u32) -> u64 {
    word(&[
        (SIG, sig),
        (WADDR_ADD, 39),
        (WADDR_MUL, 39),
        (RADDR_A, 39),
        (RADDR_B, 39),
    ])
}

pub fn with_flags(word: u64, flags: WordFlags) -> u64 {
    word | flags.bits()
}
