use crate::isa::vc4::RegFile;

/// Rendered in place of any code a table does not define.
pub const UNKNOWN: &str = "???";

/// Code-to-text table for one QPU encoding field.
///
/// Reserved hardware codes are left as `None`, and indices below `base` or
/// past the end are treated the same way, so [`MnemonicTable::lookup`] is
/// defined for every `u32`.
#[derive(Debug, Clone, Copy)]
pub struct MnemonicTable {
    pub name: &'static str,
    pub base: u32,
    entries: &'static [Option<&'static str>],
}

impl MnemonicTable {
    pub const fn new(name: &'static str, entries: &'static [Option<&'static str>]) -> Self {
        Self { name, base: 0, entries }
    }

    pub const fn with_base(name: &'static str, base: u32, entries: &'static [Option<&'static str>]) -> Self {
        Self { name, base, entries }
    }

    pub fn get(&self, index: u32) -> Option<&'static str> {
        let slot = index.checked_sub(self.base)? as usize;
        self.entries.get(slot).copied().flatten()
    }

    pub fn lookup(&self, index: u32) -> &'static str {
        self.get(index).unwrap_or(UNKNOWN)
    }

    /// One past the highest index this table can hold.
    pub fn end(&self) -> u32 {
        self.base + self.entries.len() as u32
    }

    pub fn defined(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, &e)| e.map(|s| (self.base + i as u32, s)))
    }
}

pub const ADD_OPCODES: MnemonicTable = MnemonicTable::new(
    "add_op",
    &[
        Some("nop"),
        Some("fadd"),
        Some("fsub"),
        Some("fmin"),
        Some("fmax"),
        Some("fminabs"),
        Some("fmaxabs"),
        Some("ftoi"),
        Some("itof"),
        None,
        None,
        None,
        Some("add"),
        Some("sub"),
        Some("shr"),
        Some("asr"),
        Some("ror"),
        Some("shl"),
        Some("min"),
        Some("max"),
        Some("and"),
        Some("or"),
        Some("xor"),
        Some("not"),
        Some("clz"),
        None,
        None,
        None,
        None,
        None,
        Some("v8adds"),
        Some("v8subs"),
    ],
);

pub const MUL_OPCODES: MnemonicTable = MnemonicTable::new(
    "mul_op",
    &[
        Some("nop"),
        Some("fmul"),
        Some("mul24"),
        Some("v8muld"),
        Some("v8min"),
        Some("v8max"),
        Some("v8adds"),
        Some("v8subs"),
    ],
);

pub const SIGNALS: MnemonicTable = MnemonicTable::new(
    "sig",
    &[
        Some("sig_brk"),
        Some("sig_none"),
        Some("sig_thread_switch"),
        Some("sig_end"),
        Some("sig_wait_score"),
        Some("sig_unlock_score"),
        Some("sig_last_thread_switch"),
        Some("sig_coverage_load"),
        Some("sig_color_load"),
        Some("sig_color_load_end"),
        Some("sig_load_tmu0"),
        Some("sig_load_tmu1"),
        Some("sig_alpha_mask_load"),
        Some("sig_small_imm"),
        Some("sig_load_imm"),
        Some("sig_branch"),
    ],
);

pub const ALU_MUX: MnemonicTable = MnemonicTable::new(
    "mux",
    &[
        Some("r0"),
        Some("r1"),
        Some("r2"),
        Some("r3"),
        Some("r4"),
        Some("r5"),
        Some("a"),
        Some("b"),
    ],
);

pub const MUL_PACK: MnemonicTable = MnemonicTable::new(
    "pack_mul",
    &[
        Some(""),
        None,
        None,
        Some("._8888"),
        Some("._8a"),
        Some("._8b"),
        Some("._8c"),
        Some("._8d"),
    ],
);

/// Regfile-A pack modes. Entry `8 + n` is the saturating form of entry `n`,
/// with the no-op slot's counterpart being a plain 32-bit saturate.
pub const ADD_PACK: MnemonicTable = MnemonicTable::new(
    "pack_a",
    &[
        Some(""),
        Some("._16a"),
        Some("._16b"),
        Some("._8888"),
        Some("._8a"),
        Some("._8b"),
        Some("._8c"),
        Some("._8d"),
        Some("._32_sat"),
        Some("._16a_sat"),
        Some("._16b_sat"),
        Some("._8888_sat"),
        Some("._8a_sat"),
        Some("._8b_sat"),
        Some("._8c_sat"),
        Some("._8d_sat"),
    ],
);

// Regfile-A and r4 unpack share names; r4 variants only convert to float.
pub const UNPACK: MnemonicTable = MnemonicTable::new(
    "unpack",
    &[
        Some("nop"),
        Some("_16a"),
        Some("_16b"),
        Some("_8d_rep"),
        Some("_8a"),
        Some("_8b"),
        Some("_8c"),
        Some("_8d"),
    ],
);

pub const CONDITIONS: MnemonicTable = MnemonicTable::new(
    "cond",
    &[
        Some(".never"),
        Some(".always"),
        Some(".zs"),
        Some(".zc"),
        Some(".ns"),
        Some(".nc"),
        Some(".cs"),
        Some(".cc"),
    ],
);

pub const BRANCH_CONDITIONS: MnemonicTable = MnemonicTable::new(
    "cond_branch",
    &[
        Some(".all_zs"),
        Some(".all_zc"),
        Some(".any_zs"),
        Some(".any_zc"),
        Some(".all_ns"),
        Some(".all_nc"),
        Some(".any_ns"),
        Some(".any_nc"),
        Some(".all_cs"),
        Some(".all_cc"),
        Some(".any_cs"),
        Some(".any_cc"),
        None,
        None,
        None,
        Some(""),
    ],
);

/// Write-side names as seen from regfile B, indexed by the raw write address.
/// See [`special_write`] for the regfile-A renames.
pub const SPECIAL_WRITE: MnemonicTable = MnemonicTable::with_base(
    "special_write",
    32,
    &[
        Some("r0"),
        Some("r1"),
        Some("r2"),
        Some("r3"),
        Some("tmu_noswap"),
        Some("r5"),
        Some("host_int"),
        Some("nop"),
        Some("uniforms_addr"),
        Some("quad_y"),
        Some("ms_flags"),
        Some("tlb_stencil_setup"),
        Some("tlb_z"),
        Some("tlb_color_ms"),
        Some("tlb_color_all"),
        None,
        Some("vpm"),
        Some("vw_setup"),
        Some("vw_addr"),
        Some("mutex_release"),
        Some("sfu_recip"),
        Some("sfu_recipsqrt"),
        Some("sfu_exp"),
        Some("sfu_log"),
        Some("tmu0_s"),
        Some("tmu0_t"),
        Some("tmu0_r"),
        Some("tmu0_b"),
        Some("tmu1_s"),
        Some("tmu1_t"),
        Some("tmu1_r"),
        Some("tmu1_b"),
    ],
);

/// Read-side names for regfile A, indexed by `raddr - 32`.
pub const SPECIAL_READ_A: MnemonicTable = MnemonicTable::new(
    "special_read_a",
    &[
        Some("uni"),
        None,
        None,
        Some("vary"),
        None,
        None,
        Some("elem"),
        Some("nop"),
        None,
        Some("x_pix"),
        Some("ms_flags"),
        None,
        None,
        None,
        None,
        None,
        Some("vpm_read"),
        Some("vpm_ld_busy"),
        Some("vpm_ld_wait"),
        Some("mutex_acq"),
    ],
);

/// Read-side names for regfile B, indexed by `raddr - 32`.
pub const SPECIAL_READ_B: MnemonicTable = MnemonicTable::new(
    "special_read_b",
    &[
        Some("uni"),
        None,
        None,
        Some("vary"),
        None,
        None,
        Some("qpu"),
        Some("nop"),
        None,
        Some("y_pix"),
        Some("rev_flag"),
        None,
        None,
        None,
        None,
        None,
        Some("vpm_read"),
        Some("vpm_st_busy"),
        Some("vpm_st_wait"),
        Some("mutex_acq"),
    ],
);

/// Name of a special write address as seen from `file`.
pub fn special_write(waddr: u32, file: RegFile) -> Option<&'static str> {
    use crate::isa::vc4::waddr::*;

    if file == RegFile::A {
        match waddr {
            QUAD_XY => return Some("quad_x"),
            VPMVCD_SETUP => return Some("vr_setup"),
            VPM_ADDR => return Some("vr_addr"),
            _ => {}
        }
    }
    SPECIAL_WRITE.get(waddr)
}
