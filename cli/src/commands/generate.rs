use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use riscv_codegen::{generate, Backend, GenerateOptions, GeneratedBy};
use riscv_encoding::InstructionDictionary;
use tracing::info;

// Structure representing the `riscv-opcodes` command line.
#[derive(clap::Parser, Debug)]
#[command(name = "riscv-opcodes", author, version, about = "Generate RISC-V constants headers", long_about = None)]
pub struct RiscvOpcodes {
    /// Include pseudo-instructions
    #[clap(long)]
    pseudo: bool,

    /// Generate output for C
    #[clap(short = 'c', long = "c")]
    c: bool,

    /// Generate output for Chisel
    #[clap(long)]
    chisel: bool,

    /// Generate output for SpinalHDL
    #[clap(long)]
    spinalhdl: bool,

    /// Generate output for SystemVerilog
    #[clap(long)]
    sverilog: bool,

    /// Generate output for Rust
    #[clap(long)]
    rust: bool,

    /// Generate output for Go
    #[clap(long)]
    go: bool,

    /// Generate output for CoreDSL2
    #[clap(long)]
    coredsl: bool,

    /// Generate SystemVerilog encoder macros
    #[clap(long)]
    verilog_encoder: bool,

    /// Generate output for LaTeX
    #[clap(long)]
    latex: bool,

    /// Skip running gofmt/rustfmt on the generated files
    #[clap(long)]
    no_format: bool,

    /// Instruction table to read, in the instr_dict.json layout
    #[clap(short = 'i', long, env = "RISCV_OPCODES_INPUT", default_value = "instr_table.json")]
    input: PathBuf,

    /// Directory receiving the generated files
    #[clap(short = 'o', long, env = "RISCV_OPCODES_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Extensions to use. This is a glob of the extension names, e.g. 'rv*' will give all extensions.
    extensions: Vec<String>,
}

impl RiscvOpcodes {
    /// Backends requested on the command line
    pub fn backends(&self) -> Vec<Backend> {
        [
            (self.c, Backend::C),
            (self.chisel, Backend::Chisel),
            (self.spinalhdl, Backend::SpinalHdl),
            (self.sverilog, Backend::SystemVerilog),
            (self.rust, Backend::Rust),
            (self.go, Backend::Go),
            (self.coredsl, Backend::CoreDsl),
            (self.verilog_encoder, Backend::VerilogEncoder),
            (self.latex, Backend::Latex),
        ]
        .into_iter()
        .filter_map(|(enabled, backend)| enabled.then_some(backend))
        .collect()
    }

    pub fn run(&self) -> Result<()> {
        println!("Extensions selected : {:?}", self.extensions);

        let file = File::open(&self.input)
            .with_context(|| format!("Failed to open instruction table {}", self.input.display()))?;
        let table = InstructionDictionary::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to load instruction table {}", self.input.display()))?;
        info!("Loaded {} instructions from {}", table.len(), self.input.display());

        let options = GenerateOptions {
            extensions: self.extensions.clone(),
            include_pseudo: self.pseudo,
            backends: self.backends(),
            out_dir: self.out_dir.clone(),
            format: !self.no_format,
            generated_by: GeneratedBy::current_process(),
        };

        generate(&table, &options).context("Code generation failed")?;
        Ok(())
    }
}
