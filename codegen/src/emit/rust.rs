//! Rust `MATCH_*`/`MASK_*` constants
use std::fmt::Write;

use riscv_encoding::InstructionDictionary;

use crate::error::CodegenError;
use crate::marker::GeneratedBy;

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "// {}", generated_by.text())?;
    for instruction in dictionary {
        let (match_value, mask) = instruction.match_mask();
        let name = instruction.upper_name();
        writeln!(out, "pub const MATCH_{name}: u32 = {match_value:#x};")?;
        writeln!(out, "pub const MASK_{name}: u32 = {mask:#x};")?;
    }

    Ok(out)
}
