use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::disasm::{DisasmConfig, Disassembler};

pub const WORD_BYTES: usize = 8;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ProgramError {
    #[error("Program length {len} is not a multiple of 8 bytes")]
    Truncated { len: usize },
    #[error("Invalid instruction word {text:?} on line {line}")]
    BadWord { line: usize, text: String },
}

/// An ordered QPU instruction stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub words: Vec<u64>,
}

impl Program {
    pub fn new(words: Vec<u64>) -> Self {
        Self { words }
    }

    /// Consecutive little-endian 64-bit words, as the hardware fetches them.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, ProgramError> {
        if bytes.len() % WORD_BYTES != 0 {
            return Err(ProgramError::Truncated { len: bytes.len() });
        }
        let words = bytes
            .chunks_exact(WORD_BYTES)
            .map(|c| {
                let mut b = [0u8; WORD_BYTES];
                b.copy_from_slice(c);
                u64::from_le_bytes(b)
            })
            .collect::<Vec<_>>();
        debug!(words = words.len(), "loaded binary program");
        Ok(Self { words })
    }

    /// Words written as hex literals, separated by whitespace or commas.
    /// `#` and `//` start a comment that runs to the end of the line.
    pub fn from_hex_text(text: &str) -> Result<Self, ProgramError> {
        let mut words = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = strip_comment(line);
            for tok in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if tok.is_empty() {
                    continue;
                }
                let word = parse_word(tok).ok_or_else(|| ProgramError::BadWord {
                    line: i + 1,
                    text: tok.to_string(),
                })?;
                words.push(word);
            }
        }
        debug!(words = words.len(), "loaded hex program");
        Ok(Self { words })
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn disassemble(&self, cfg: DisasmConfig) -> String {
        Disassembler::new(cfg).listing(&self.words)
    }
}

fn strip_comment(line: &str) -> &str {
    let end = [line.find('#'), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

/// Hex with or without a `0x` prefix, optionally carrying a `ull`/`u` suffix
/// as found in C initializer lists.
pub fn parse_word(tok: &str) -> Option<u64> {
    let tok = tok.trim();
    let tok = tok
        .strip_suffix("ull")
        .or_else(|| tok.strip_suffix("ULL"))
        .or_else(|| tok.strip_suffix('u'))
        .or_else(|| tok.strip_suffix('U'))
        .unwrap_or(tok);
    let hex = tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")).unwrap_or(tok);
    if hex.is_empty() || hex.starts_with('+') {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}
