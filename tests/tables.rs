use vc4_qpu::instructions::*;
use vc4_qpu::isa::vc4::RegFile;

fn check(table: &MnemonicTable, expected: &[(u32, &str)]) {
    for &(code, text) in expected {
        assert_eq!(table.lookup(code), text, "{} code {code}", table.name);
    }
    let defined: Vec<u32> = expected.iter().map(|&(c, _)| c).collect();
    for code in 0..128 {
        if !defined.contains(&code) {
            assert_eq!(table.lookup(code), UNKNOWN, "{} code {code}", table.name);
        }
    }
}

#[test]
fn add_opcodes() {
    check(
        &ADD_OPCODES,
        &[
            (0, "nop"), (1, "fadd"), (2, "fsub"), (3, "fmin"), (4, "fmax"), (5, "fminabs"),
            (6, "fmaxabs"), (7, "ftoi"), (8, "itof"), (12, "add"), (13, "sub"), (14, "shr"),
            (15, "asr"), (16, "ror"), (17, "shl"), (18, "min"), (19, "max"), (20, "and"),
            (21, "or"), (22, "xor"), (23, "not"), (24, "clz"), (30, "v8adds"), (31, "v8subs"),
        ],
    );
}

#[test]
fn mul_opcodes() {
    check(
        &MUL_OPCODES,
        &[
            (0, "nop"), (1, "fmul"), (2, "mul24"), (3, "v8muld"),
            (4, "v8min"), (5, "v8max"), (6, "v8adds"), (7, "v8subs"),
        ],
    );
}

#[test]
fn signals_cover_the_field() {
    for code in 0..16 {
        assert_ne!(SIGNALS.lookup(code), UNKNOWN);
    }
    assert_eq!(SIGNALS.lookup(0), "sig_brk");
    assert_eq!(SIGNALS.lookup(3), "sig_end");
    assert_eq!(SIGNALS.lookup(13), "sig_small_imm");
    assert_eq!(SIGNALS.lookup(14), "sig_load_imm");
    assert_eq!(SIGNALS.lookup(15), "sig_branch");
    assert_eq!(SIGNALS.lookup(16), UNKNOWN);
}

#[test]
fn pack_tables() {
    check(
        &MUL_PACK,
        &[(0, ""), (3, "._8888"), (4, "._8a"), (5, "._8b"), (6, "._8c"), (7, "._8d")],
    );
    // Saturating variants sit eight slots above their plain forms.
    for code in 1..8 {
        let plain = ADD_PACK.lookup(code);
        assert_eq!(ADD_PACK.lookup(code + 8), format!("{plain}_sat"));
    }
    assert_eq!(ADD_PACK.lookup(0), "");
    assert_eq!(ADD_PACK.lookup(8), "._32_sat");
    assert_eq!(ADD_PACK.lookup(16), UNKNOWN);
}

#[test]
fn unpack_mux_and_conditions() {
    check(
        &UNPACK,
        &[(0, "nop"), (1, "_16a"), (2, "_16b"), (3, "_8d_rep"), (4, "_8a"), (5, "_8b"), (6, "_8c"), (7, "_8d")],
    );
    check(
        &ALU_MUX,
        &[(0, "r0"), (1, "r1"), (2, "r2"), (3, "r3"), (4, "r4"), (5, "r5"), (6, "a"), (7, "b")],
    );
    check(
        &CONDITIONS,
        &[(0, ".never"), (1, ".always"), (2, ".zs"), (3, ".zc"), (4, ".ns"), (5, ".nc"), (6, ".cs"), (7, ".cc")],
    );
}

#[test]
fn branch_conditions() {
    check(
        &BRANCH_CONDITIONS,
        &[
            (0, ".all_zs"), (1, ".all_zc"), (2, ".any_zs"), (3, ".any_zc"), (4, ".all_ns"),
            (5, ".all_nc"), (6, ".any_ns"), (7, ".any_nc"), (8, ".all_cs"), (9, ".all_cc"),
            (10, ".any_cs"), (11, ".any_cc"), (15, ""),
        ],
    );
}

#[test]
fn special_reads() {
    check(
        &SPECIAL_READ_A,
        &[
            (0, "uni"), (3, "vary"), (6, "elem"), (7, "nop"), (9, "x_pix"), (10, "ms_flags"),
            (16, "vpm_read"), (17, "vpm_ld_busy"), (18, "vpm_ld_wait"), (19, "mutex_acq"),
        ],
    );
    check(
        &SPECIAL_READ_B,
        &[
            (0, "uni"), (3, "vary"), (6, "qpu"), (7, "nop"), (9, "y_pix"), (10, "rev_flag"),
            (16, "vpm_read"), (17, "vpm_st_busy"), (18, "vpm_st_wait"), (19, "mutex_acq"),
        ],
    );
}

#[test]
fn special_writes() {
    let b_names = [
        "r0", "r1", "r2", "r3", "tmu_noswap", "r5", "host_int", "nop", "uniforms_addr", "quad_y",
        "ms_flags", "tlb_stencil_setup", "tlb_z", "tlb_color_ms", "tlb_color_all",
    ];
    for (i, name) in b_names.iter().enumerate() {
        assert_eq!(special_write(32 + i as u32, RegFile::B), Some(*name));
    }
    assert_eq!(special_write(47, RegFile::B), None);
    assert_eq!(special_write(48, RegFile::B), Some("vpm"));
    assert_eq!(special_write(55, RegFile::B), Some("sfu_log"));
    assert_eq!(special_write(59, RegFile::A), Some("tmu0_b"));
    assert_eq!(special_write(63, RegFile::A), Some("tmu1_b"));
    assert_eq!(special_write(64, RegFile::A), None);
    assert_eq!(special_write(31, RegFile::B), None);

    // Only three addresses differ between the files.
    let differing: Vec<u32> = (32..64)
        .filter(|&w| special_write(w, RegFile::A) != special_write(w, RegFile::B))
        .collect();
    assert_eq!(differing, vec![41, 49, 50]);
}
