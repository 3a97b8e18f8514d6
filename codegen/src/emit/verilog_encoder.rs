//! SystemVerilog encoder macros
//!
//! `RV_ENCODE_<NAME>(fields...)` expands to the concatenation of the literal runs and the
//! field arguments, each argument cast to the width of its field:
//!
//! ```text
//! `define RV_ENCODE_ADD(rd, rs1, rs2) {7'b0000000, 5'(rs2), 5'(rs1), 3'b000, 5'(rd), 7'b0110011}
//! ```
use std::fmt::Write;

use itertools::Itertools;
use riscv_encoding::InstructionDictionary;

use super::pattern::{flatten, PatternToken};
use crate::error::CodegenError;
use crate::marker::GeneratedBy;

fn render_token(token: &PatternToken) -> String {
    match token {
        PatternToken::Literal(_) => token.to_string(),
        PatternToken::Field(field) => format!("{}'({})", field.width, field.name),
    }
}

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "// {}", generated_by.text())?;
    writeln!(out, "`ifndef RISCV_INST_ENCODE_SVH")?;
    writeln!(out, "`define RISCV_INST_ENCODE_SVH")?;

    for instruction in dictionary {
        let tokens = flatten(instruction)?;
        let arguments = tokens
            .iter()
            .filter_map(|token| match token {
                PatternToken::Field(field) => Some(field.name),
                PatternToken::Literal(_) => None,
            })
            .unique()
            .sorted_by_key(|name| instruction.variable_fields.iter().position(|f| f == name))
            .join(", ");
        let body = tokens.iter().map(render_token).join(", ");

        if arguments.is_empty() {
            writeln!(out, "`define RV_ENCODE_{} {{{body}}}", instruction.upper_name())?;
        } else {
            writeln!(out, "`define RV_ENCODE_{}({arguments}) {{{body}}}", instruction.upper_name())?;
        }
    }

    writeln!(out, "`endif")?;
    Ok(out)
}
