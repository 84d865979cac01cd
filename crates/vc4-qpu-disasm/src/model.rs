use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

use vc4_qpu::program::parse_word;
use vc4_qpu::{DisasmConfig, Disassembler, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Little-endian 64-bit words
    Raw,
    /// Hex words separated by whitespace or commas
    Hex,
    /// Compiled shader record with metadata
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") => InputFormat::Raw,
            Some("json") => InputFormat::Json,
            _ => InputFormat::Hex,
        }
    }
}

/// Per-shader facts the compiler reports alongside the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderMeta {
    pub stage: String,
    pub num_inputs: u32,
    pub num_outputs: u32,
    pub threaded: bool,
}

impl ShaderMeta {
    pub fn header(&self) -> String {
        let stage = if self.stage.is_empty() { "unknown" } else { self.stage.as_str() };
        format!(
            "# {stage} shader: {} inputs, {} outputs{}",
            self.num_inputs,
            self.num_outputs,
            if self.threaded { ", threaded" } else { "" }
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WordRepr {
    Int(u64),
    Hex(String),
}

#[derive(Debug, Clone, Deserialize)]
struct ShaderRecord {
    #[serde(flatten)]
    meta: ShaderMeta,
    words: Vec<WordRepr>,
}

#[derive(Debug, Clone)]
pub struct Image {
    pub program: Program,
    pub shader: Option<ShaderMeta>,
}

/// File listing: the shader header line when metadata is present, then one
/// line per word. Unlike the bare driver output, a one-word program still
/// ends its line.
pub fn render_listing(img: &Image, cfg: DisasmConfig) -> String {
    let mut buf = String::new();
    if let Some(meta) = &img.shader {
        buf.push_str(&meta.header());
        buf.push('\n');
    }
    buf.push_str(&Disassembler::new(cfg).listing(&img.program.words));
    if img.program.len() == 1 {
        buf.push('\n');
    }
    buf
}

pub fn load_input(path: &Path, format: Option<InputFormat>, skip: usize, len: Option<usize>) -> Result<Image> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    if format != InputFormat::Raw {
        anyhow::ensure!(
            skip == 0 && len.is_none(),
            "--skip/--len only apply to raw input, not {format:?}"
        );
    }
    match format {
        InputFormat::Raw => {
            let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let program = program_from_raw(&file, skip, len)?;
            Ok(Image { program, shader: None })
        }
        InputFormat::Hex => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(Image { program: Program::from_hex_text(&text)?, shader: None })
        }
        InputFormat::Json => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let (program, meta) = program_from_json(&text)?;
            Ok(Image { program, shader: Some(meta) })
        }
    }
}

pub fn program_from_raw(file: &[u8], skip: usize, len: Option<usize>) -> Result<Program> {
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    Ok(Program::from_le_bytes(payload)?)
}

pub fn program_from_json(text: &str) -> Result<(Program, ShaderMeta)> {
    let rec: ShaderRecord = serde_json::from_str(text)?;
    let mut words = Vec::with_capacity(rec.words.len());
    for (i, w) in rec.words.into_iter().enumerate() {
        let word = match w {
            WordRepr::Int(v) => v,
            WordRepr::Hex(s) => parse_word(&s).with_context(|| format!("word {i}: invalid hex {s:?}"))?,
        };
        words.push(word);
    }
    Ok((Program::new(words), rec.meta))
}
