use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vc4_qpu::program::parse_word;
use vc4_qpu::{DisasmConfig, Disassembler};
use vc4_qpu_disasm::{load_input, render_listing, summarize, InputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "VideoCore IV QPU disassembler CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input file path
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Input format (default: by extension, .bin raw, .json json, otherwise hex)
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,
    /// Skip N bytes at start of a raw file
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded from a raw file (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// JSON file with listing options; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Leading spaces per line
    #[arg(long)]
    indent: Option<usize>,
    /// Prefix each line with the word's byte offset
    #[arg(long)]
    show_offsets: bool,
    /// Prefix each line with the raw 64-bit word
    #[arg(long)]
    show_words: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble every word of a file
    Listing {
        #[command(flatten)]
        src: InputArgs,
        #[command(flatten)]
        style: StyleArgs,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Disassemble words given on the command line (hex)
    Word {
        #[arg(value_name = "WORD", num_args = 1.., required = true)]
        words: Vec<String>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Count instructions per class and per signal
    Summary {
        #[command(flatten)]
        src: InputArgs,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_u64(s: &str) -> Result<u64> {
    parse_word(s).with_context(|| format!("invalid hex word {s:?}"))
}

fn load_config(style: &StyleArgs) -> Result<DisasmConfig> {
    let mut cfg = match &style.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            DisasmConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DisasmConfig::default(),
    };
    if let Some(indent) = style.indent {
        cfg.indent = indent;
    }
    cfg.show_offsets |= style.show_offsets;
    cfg.show_words |= style.show_words;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Listing { src, style, out } => {
            let img = load_input(&src.input, src.input_format, src.skip, src.len)?;
            let cfg = load_config(&style)?;
            info!(words = img.program.len(), input = %src.input.display(), "listing");

            write_out(out.as_deref(), &render_listing(&img, cfg))?;
        }
        Command::Word { words, style } => {
            let cfg = load_config(&style)?;
            let mut v = Vec::with_capacity(words.len());
            for w in &words {
                v.push(parse_u64(w)?);
            }
            let text = Disassembler::new(cfg).listing(&v);
            if v.len() == 1 {
                println!("{text}");
            } else {
                print!("{text}");
            }
        }
        Command::Summary { src, format } => {
            let img = load_input(&src.input, src.input_format, src.skip, src.len)?;
            let s = summarize(&img.program.words);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&s)?),
                OutputFormat::Text => {
                    if let Some(meta) = &img.shader {
                        println!("{}", meta.header());
                    }
                    println!("Summary:");
                    println!("  words     : {}", s.words);
                    println!("  alu       : {}", s.alu);
                    println!("  load_imm  : {}", s.load_imm);
                    println!("  branch    : {}", s.branch);
                    match s.first_end {
                        Some(i) => println!("  end       : word {i} ({:#06x})", i * 8),
                        None => println!("  end       : none"),
                    }
                    println!("Signals:");
                    for (name, n) in &s.signals {
                        println!("  {name:<24} {n}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn write_out(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, text).with_context(|| format!("writing {}", p.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
