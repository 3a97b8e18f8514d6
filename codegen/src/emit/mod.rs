//! Backend emitters
//!
//! The set of backends is closed: each variant of [`Backend`] knows the file it writes, how
//! to render it and which external formatter, if any, tidies it up afterwards.
pub mod assembly;
pub mod c;
pub mod chisel;
pub mod coredsl;
pub mod go;
pub mod latex;
pub mod pattern;
pub mod rust;
pub mod sverilog;
pub mod verilog_encoder;

use std::fmt;

use riscv_encoding::InstructionDictionary;

use crate::error::CodegenError;
use crate::format::Formatter;
use crate::marker::GeneratedBy;

/// Output targets, declared in the order they run
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    /// C header with `MATCH_*`/`MASK_*` defines
    C,
    /// Chisel `BitPat` table
    Chisel,
    /// SpinalHDL `M"..."` table
    SpinalHdl,
    /// SystemVerilog package of `localparam`s
    SystemVerilog,
    /// Rust `MATCH_*`/`MASK_*` constants
    Rust,
    /// Go switch from opcode token to canonical fields
    Go,
    /// CoreDSL2 instruction descriptions
    CoreDsl,
    /// SystemVerilog encoder macros
    VerilogEncoder,
    /// LaTeX instruction table
    Latex,
}

impl Backend {
    pub const ALL: [Backend; 9] = [
        Backend::C,
        Backend::Chisel,
        Backend::SpinalHdl,
        Backend::SystemVerilog,
        Backend::Rust,
        Backend::Go,
        Backend::CoreDsl,
        Backend::VerilogEncoder,
        Backend::Latex,
    ];

    /// Name of the generated file
    pub const fn file_name(self) -> &'static str {
        match self {
            Backend::C => "encoding.out.h",
            Backend::Chisel => "inst.chisel",
            Backend::SpinalHdl => "inst.spinalhdl",
            Backend::SystemVerilog => "inst.sverilog",
            Backend::Rust => "inst.rs",
            Backend::Go => "inst.go",
            Backend::CoreDsl => "inst.core_desc",
            Backend::VerilogEncoder => "inst_encode.svh",
            Backend::Latex => "instr-table.tex",
        }
    }

    /// Formatter run on the written file
    pub const fn formatter(self) -> Option<Formatter> {
        match self {
            Backend::Rust => Some(Formatter::RustFmt),
            Backend::Go => Some(Formatter::GoFmt),
            _ => None,
        }
    }

    /// Render the whole file for `dictionary`
    pub fn render(
        self,
        dictionary: &InstructionDictionary,
        generated_by: &GeneratedBy,
    ) -> Result<String, CodegenError> {
        match self {
            Backend::C => c::render(dictionary, generated_by),
            Backend::Chisel => chisel::render(dictionary, generated_by, chisel::Flavor::Chisel),
            Backend::SpinalHdl => {
                chisel::render(dictionary, generated_by, chisel::Flavor::SpinalHdl)
            }
            Backend::SystemVerilog => sverilog::render(dictionary, generated_by),
            Backend::Rust => rust::render(dictionary, generated_by),
            Backend::Go => go::render(dictionary, generated_by),
            Backend::CoreDsl => coredsl::render(dictionary, generated_by),
            Backend::VerilogEncoder => verilog_encoder::render(dictionary, generated_by),
            Backend::Latex => latex::render(dictionary, generated_by),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::C => write!(f, "C"),
            Backend::Chisel => write!(f, "Chisel"),
            Backend::SpinalHdl => write!(f, "SpinalHDL"),
            Backend::SystemVerilog => write!(f, "SystemVerilog"),
            Backend::Rust => write!(f, "Rust"),
            Backend::Go => write!(f, "Go"),
            Backend::CoreDsl => write!(f, "CoreDSL2"),
            Backend::VerilogEncoder => write!(f, "SystemVerilog encoder"),
            Backend::Latex => write!(f, "LaTeX"),
        }
    }
}

/// Literal bits of an encoding with every variable position replaced by `placeholder`
pub(crate) fn bit_pattern(encoding: &str, placeholder: char) -> String {
    encoding.chars().map(|c| if c == '0' || c == '1' { c } else { placeholder }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_run_order() {
        let mut sorted = Backend::ALL;
        sorted.sort();
        assert_eq!(sorted, Backend::ALL);
    }

    #[test]
    fn test_file_names_are_distinct() {
        let mut names: Vec<_> = Backend::ALL.iter().map(|b| b.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Backend::ALL.len());
    }

    #[test]
    fn test_bit_pattern() {
        assert_eq!(bit_pattern("01--10", '?'), "01??10");
    }
}
