use serde::Serialize;

use vc4_qpu::instructions::SIGNALS;
use vc4_qpu::isa::vc4::sig;
use vc4_qpu::{Decoder, InsnClass, Vc4Decoder};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub words: usize,
    pub alu: usize,
    pub load_imm: usize,
    pub branch: usize,
    /// Index of the first word carrying the program-end signal.
    pub first_end: Option<usize>,
    /// Signal name and count, in signal-code order, for signals that occur.
    pub signals: Vec<(String, usize)>,
}

pub fn summarize(words: &[u64]) -> Summary {
    let dec = Vc4Decoder::new();
    let mut per_sig = [0usize; 16];
    let mut s = Summary { words: words.len(), ..Default::default() };
    for (i, &w) in words.iter().enumerate() {
        let d = dec.decode(w);
        match d.class {
            InsnClass::Alu => s.alu += 1,
            InsnClass::LoadImm => s.load_imm += 1,
            InsnClass::Branch => s.branch += 1,
        }
        if d.sig == sig::PROG_END && s.first_end.is_none() {
            s.first_end = Some(i);
        }
        per_sig[d.sig as usize] += 1;
    }
    s.signals = per_sig
        .iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(code, &n)| (SIGNALS.lookup(code as u32).to_string(), n))
        .collect();
    s
}
