//! SystemVerilog package with one `localparam` per instruction
use std::fmt::Write;

use riscv_encoding::{EncodingWidth, InstructionDictionary};

use super::bit_pattern;
use crate::error::CodegenError;
use crate::marker::GeneratedBy;

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "/* {} */", generated_by.text())?;
    writeln!(out, "package riscv_instr;")?;
    for instruction in dictionary {
        // Malformed encodings keep their own length
        let width = instruction
            .width()
            .map_or(instruction.encoding.len() as u32, EncodingWidth::bits);
        writeln!(
            out,
            "  localparam [{}:0] {:<18} = {}'b{};",
            width.saturating_sub(1),
            instruction.upper_name(),
            width,
            bit_pattern(&instruction.encoding, '?')
        )?;
    }
    writeln!(out, "endpackage")?;

    Ok(out)
}
