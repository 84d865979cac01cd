mod common;

use common::word;
use pretty_assertions::assert_eq;
use vc4_qpu::decoder::fields::*;
use vc4_qpu::{disassemble, fmt_word, DisasmConfig, Program};

fn two_word_program() -> Vec<u64> {
    vec![
        // a0 = 0x00000001, mul side writes nowhere
        word(&[(SIG, 14), (WADDR_ADD, 0), (WADDR_MUL, 39), (IMMEDIATE, 1)]),
        // a1 = a + b reading a2 and b3
        word(&[
            (SIG, 1),
            (OP_ADD, 12),
            (COND_ADD, 1),
            (WADDR_ADD, 1),
            (WADDR_MUL, 39),
            (RADDR_A, 2),
            (RADDR_B, 3),
            (ADD_A, 6),
            (ADD_B, 7),
        ]),
    ]
}

#[test]
fn load_then_add_listing() {
    let out = disassemble(&two_word_program());
    assert_eq!(
        out,
        "sig_load_imm ; a0 = load32(0x00000001) ; nop = load32() ;\n\
         sig_none ; a1 = add.always(a, b, a2, b3) ; nop = nop(r0, r0, a2, b3) ;\n"
    );
}

#[test]
fn single_word_batch_only_drops_line_break() {
    for w in two_word_program() {
        let alone = fmt_word(w);
        let listed = disassemble(&[w, w]);
        assert_eq!(listed, format!("{alone}\n{alone}\n"));
    }
}

#[test]
fn program_from_bytes_matches_words() {
    let words = two_word_program();
    let p = Program::new(words.clone());
    let again = Program::from_le_bytes(&p.to_le_bytes()).unwrap();
    assert_eq!(again.disassemble(DisasmConfig::default()), disassemble(&words));
}

#[test]
fn indented_listing_with_offsets() {
    let p = Program::new(two_word_program());
    let cfg = DisasmConfig { indent: 4, show_offsets: true, show_words: false };
    let out = p.disassemble(cfg);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "    0x0000: sig_load_imm ; a0 = load32(0x00000001) ; nop = load32() ;");
    assert!(lines[1].starts_with("    0x0008: sig_none ; a1 = add.always"));
}

#[test]
fn hex_listing_of_a_program_end() {
    // Typical fragment-shader tail: thread end followed by two delay-slot nops.
    let text = "0x300009e7009e7000\n0x100009e7009e7000\n0x100009e7009e7000\n";
    let p = Program::from_hex_text(text).unwrap();
    let out = p.disassemble(DisasmConfig::default());
    assert_eq!(
        out,
        "sig_end ; nop = nop(r0, r0) ; nop = nop(r0, r0) ;\n\
         sig_none ; nop = nop(r0, r0) ; nop = nop(r0, r0) ;\n\
         sig_none ; nop = nop(r0, r0) ; nop = nop(r0, r0) ;\n"
    );
}
