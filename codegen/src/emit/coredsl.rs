//! CoreDSL2 instruction descriptions
//!
//! Each instruction gets its flattened encoding, its assembly operand string and a behavior
//! stub that rejects register indices beyond the register file size (`RFS`).
use std::collections::BTreeSet;
use std::fmt::Write;

use itertools::Itertools;
use riscv_encoding::{Instruction, InstructionDictionary};

use super::assembly::assembly_operands;
use super::pattern::{flatten, PatternToken};
use crate::error::CodegenError;
use crate::marker::GeneratedBy;

/// Registers checked against the register file size, in check order
const CHECKED_REGISTERS: [&str; 3] = ["rd", "rs1", "rs2"];

/// CoreDSL name of an instruction, underscores are doubled so that `.` can map to `_`
pub fn identifier(instruction: &Instruction) -> String {
    instruction.name.to_uppercase().replace('_', "__").replace('.', "_")
}

fn render_token(token: &PatternToken) -> String {
    match token {
        PatternToken::Literal(_) => token.to_string(),
        PatternToken::Field(field) => field.hdl.to_string(),
    }
}

/// Operand names referenced by the encoding, e.g. `rd` for `rd[4:0]`
fn operands(tokens: &[PatternToken]) -> BTreeSet<&'static str> {
    tokens
        .iter()
        .filter_map(|token| match token {
            PatternToken::Field(field) => Some(field.hdl),
            PatternToken::Literal(_) => None,
        })
        .flat_map(|hdl| hdl.split(" :: "))
        .map(|slice| slice.split('[').next().unwrap_or(slice))
        .collect()
}

fn behavior(tokens: &[PatternToken]) -> String {
    let operands = operands(tokens);
    let checks: Vec<String> = CHECKED_REGISTERS
        .into_iter()
        .filter(|reg| operands.contains(reg))
        .map(|reg| format!("{reg} >= RFS"))
        .collect();

    let mut behavior = String::new();
    if !checks.is_empty() {
        behavior.push_str(&format!("if({}) raise(0, 2);\n", checks.join(" || ")));
        behavior.push_str("                      else ");
    }
    if operands.contains("rd") {
        behavior.push_str("if(rd != 0)");
    }
    behavior.push_str("{\n                      }");
    behavior
}

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "// {}", generated_by.text())?;
    writeln!(out)?;
    writeln!(out, "InstructionSet RISCVOpcodes {{")?;
    writeln!(out, "    instructions {{")?;

    for instruction in dictionary {
        let tokens = flatten(instruction)?;
        let assembly = assembly_operands(instruction)?;

        writeln!(out, "        {} {{", identifier(instruction))?;
        writeln!(out, "            encoding: {};", tokens.iter().map(render_token).join(" :: "))?;
        if !assembly.is_empty() {
            writeln!(out, "            assembly: \"{assembly}\";")?;
        }
        writeln!(out, "            behavior: {}", behavior(&tokens))?;
        writeln!(out, "        }}")?;
    }

    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    Ok(out)
}
