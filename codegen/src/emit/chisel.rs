//! Chisel and SpinalHDL instruction tables
//!
//! Both are Scala objects with one definition per instruction, they only differ in how a bit
//! pattern literal is spelled.
use std::fmt::Write;

use riscv_encoding::InstructionDictionary;

use super::bit_pattern;
use crate::error::CodegenError;
use crate::marker::GeneratedBy;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flavor {
    /// `BitPat("b0101??")`
    Chisel,
    /// `M"0101--"`
    SpinalHdl,
}

impl Flavor {
    fn literal(self, encoding: &str) -> String {
        match self {
            Flavor::Chisel => format!("BitPat(\"b{}\")", bit_pattern(encoding, '?')),
            Flavor::SpinalHdl => format!("M\"{}\"", bit_pattern(encoding, '-')),
        }
    }
}

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
    flavor: Flavor,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "// {}", generated_by.text())?;
    writeln!(out)?;
    writeln!(out, "object Instructions {{")?;
    for instruction in dictionary {
        writeln!(
            out,
            "  def {:<18} = {}",
            instruction.upper_name(),
            flavor.literal(&instruction.encoding)
        )?;
    }
    writeln!(out, "}}")?;

    Ok(out)
}
