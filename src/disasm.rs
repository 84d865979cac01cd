//! Text rendering of QPU instruction words.
//!
//! Every word renders as `{sig} ; {body}` where the body depends on the
//! signal: a branch condition and offset, a pair of `load32` writes, or an
//! ADD-pipe and a MUL-pipe operation separated by ` ; `.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::{fields, Decoded, Decoder, InsnClass, WordFlags};
use crate::instructions::{
    special_write, ALU_MUX, BRANCH_CONDITIONS, CONDITIONS, SIGNALS, SPECIAL_READ_A, SPECIAL_READ_B, UNPACK,
};
use crate::isa::vc4::{raddr, sig, Pipe, RegFile, Vc4Decoder, MAX_GENERAL_REG, UNPACK_NOP};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisasmConfig {
    pub indent: usize,      // leading spaces per line
    pub show_offsets: bool, // prefix with the byte offset of the word
    pub show_words: bool,   // prefix with the raw 64-bit word
}

impl DisasmConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Display adapter for the class-specific part of one word (everything after
/// the `{sig} ; ` prefix).
#[derive(Debug, Clone, Copy)]
pub struct QpuInsn(pub Decoded);

impl QpuInsn {
    pub fn new(word: u64) -> Self {
        Self(Vc4Decoder.decode(word))
    }
}

impl fmt::Display for QpuInsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        match d.class {
            InsnClass::Branch => {
                let cond = BRANCH_CONDITIONS.lookup(d.field(fields::BRANCH_COND));
                write!(f, "{} {}", cond, d.imm32() as i32)
            }
            InsnClass::LoadImm => {
                write_dest(f, d, Pipe::Add)?;
                f.write_str(" = load32")?;
                write_flags(f, d.flags)?;
                write_cond(f, d, Pipe::Add)?;
                write!(f, "(0x{:08x}) ; ", d.imm32())?;
                write_dest(f, d, Pipe::Mul)?;
                f.write_str(" = load32")?;
                write_cond(f, d, Pipe::Mul)?;
                f.write_str("() ;")
            }
            InsnClass::Alu => {
                write_alu_op(f, d, Pipe::Add)?;
                f.write_str(" ; ")?;
                write_alu_op(f, d, Pipe::Mul)?;
                f.write_str(" ;")
            }
        }
    }
}

fn write_dest(f: &mut fmt::Formatter<'_>, d: &Decoded, pipe: Pipe) -> fmt::Result {
    let file = pipe.dest_file(d.flags);
    let waddr = d.field(pipe.waddr_field());

    if waddr <= MAX_GENERAL_REG {
        write!(f, "{}{}", file.letter(), waddr)?;
    } else if let Some(name) = special_write(waddr, file) {
        f.write_str(name)?;
    } else {
        write!(f, "{}{}?", file.letter(), waddr)?;
    }

    if pipe.owns_pack(d.flags) {
        f.write_str(pipe.pack_table().lookup(d.field(fields::PACK)))?;
    }
    Ok(())
}

fn write_flags(f: &mut fmt::Formatter<'_>, flags: WordFlags) -> fmt::Result {
    if flags.contains(WordFlags::PM) {
        f.write_str(".pm")?;
    }
    if flags.contains(WordFlags::WS) {
        f.write_str(".ws")?;
    }
    if flags.contains(WordFlags::SF) {
        f.write_str(".sf")?;
    }
    Ok(())
}

// A pipe whose opcode is its own nop never shows a condition.
fn write_cond(f: &mut fmt::Formatter<'_>, d: &Decoded, pipe: Pipe) -> fmt::Result {
    if d.field(pipe.op_field()) == pipe.nop() {
        return Ok(());
    }
    f.write_str(CONDITIONS.lookup(d.field(pipe.cond_field())))
}

fn write_alu_op(f: &mut fmt::Formatter<'_>, d: &Decoded, pipe: Pipe) -> fmt::Result {
    write_dest(f, d, pipe)?;
    f.write_str(" = ")?;
    f.write_str(pipe.opcodes().lookup(d.field(pipe.op_field())))?;

    if pipe.carries_extras() {
        write_flags(f, d.flags)?;
        let unpack = d.field(fields::UNPACK);
        if unpack != UNPACK_NOP {
            write!(f, ".{}", UNPACK.lookup(unpack))?;
        }
    }
    write_cond(f, d, pipe)?;

    let (mux_a, mux_b) = pipe.mux_fields();
    write!(f, "({}, {}", ALU_MUX.lookup(d.field(mux_a)), ALU_MUX.lookup(d.field(mux_b)))?;

    // Register reads are shared by both pipes and listed whenever either is live.
    if d.field(fields::RADDR_A) != raddr::NOP || d.field(fields::RADDR_B) != raddr::NOP {
        write!(f, ", {}, {}", read_operand(d, RegFile::A), read_operand(d, RegFile::B))?;
    }
    f.write_str(")")
}

/// Operand text for the regfile-A or regfile-B read of `d`.
pub fn read_operand(d: &Decoded, file: RegFile) -> String {
    if file == RegFile::B && d.sig == sig::SMALL_IMM {
        return small_imm(d.field(fields::SMALL_IMM));
    }

    let addr = match file {
        RegFile::A => d.field(fields::RADDR_A),
        RegFile::B => d.field(fields::RADDR_B),
    };
    if addr <= MAX_GENERAL_REG {
        return match (file, addr) {
            (RegFile::A, raddr::FRAG_PAYLOAD_ZW) => "pay_w".to_string(),
            (RegFile::B, raddr::FRAG_PAYLOAD_ZW) => "pay_z".to_string(),
            _ => format!("{}{}", file.letter(), addr),
        };
    }

    let table = match file {
        RegFile::A => &SPECIAL_READ_A,
        RegFile::B => &SPECIAL_READ_B,
    };
    table.lookup(addr - (MAX_GENERAL_REG + 1)).to_string()
}

/// Text for a 6-bit small immediate: integers 0..=15 and -16..=-1 (written
/// with an `n` prefix), then two bands of paired power-of-two float forms.
pub fn small_imm(raw: u32) -> String {
    match raw {
        0..=15 => raw.to_string(),
        16..=31 => format!("n{}", 32 - raw),
        32..=39 => format!("{}_1", 1u32 << (raw - 32)),
        40..=47 => format!("1_{}", 1u32 << (48 - raw)),
        _ => format!("<bad immediate {raw}>"),
    }
}

/// Renders a sequence of words, one line each.
#[derive(Debug, Clone)]
pub struct Disassembler<D: Decoder = Vc4Decoder> {
    pub cfg: DisasmConfig,
    dec: D,
}

impl Disassembler<Vc4Decoder> {
    pub fn new(cfg: DisasmConfig) -> Self {
        Self { cfg, dec: Vc4Decoder }
    }
}

impl<D: Decoder> Disassembler<D> {
    pub fn with_decoder(cfg: DisasmConfig, dec: D) -> Self {
        Self { cfg, dec }
    }

    /// One word without any line terminator.
    pub fn write_word<W: Write>(&self, out: &mut W, index: usize, word: u64) -> fmt::Result {
        let d = self.dec.decode(word);
        trace!(index, word, class = ?d.class, "decode");

        write!(out, "{:indent$}", "", indent = self.cfg.indent)?;
        if self.cfg.show_offsets {
            write!(out, "0x{:04x}: ", index * 8)?;
        }
        if self.cfg.show_words {
            write!(out, "{word:016x}  ")?;
        }
        write!(out, "{} ; {}", SIGNALS.lookup(d.sig), QpuInsn(d))
    }

    /// Every word terminated by a newline, unless `words` holds exactly one
    /// word, which is left unterminated for inline use.
    pub fn write_listing<W: Write>(&self, out: &mut W, words: &[u64]) -> fmt::Result {
        debug!(count = words.len(), "disassembling");
        for (i, &word) in words.iter().enumerate() {
            self.write_word(out, i, word)?;
            if words.len() != 1 {
                out.write_char('\n')?;
            }
        }
        Ok(())
    }

    pub fn listing(&self, words: &[u64]) -> String {
        let mut buf = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_listing(&mut buf, words);
        buf
    }
}

pub fn disassemble(words: &[u64]) -> String {
    Disassembler::new(DisasmConfig::default()).listing(words)
}

/// Inline rendering of a single word.
pub fn fmt_word(word: u64) -> String {
    disassemble(&[word])
}
