//! LaTeX instruction table: one row per instruction with its encoding diagram and operands
use std::fmt::Write;

use itertools::Itertools;
use riscv_encoding::{InstructionDictionary, VariableField};

use super::assembly::assembly_operands;
use super::pattern::{flatten, PatternToken};
use crate::error::CodegenError;
use crate::marker::GeneratedBy;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '_' | '{' | '}' | '&' | '#' | '%' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn field_label(field: &VariableField) -> String {
    if field.width == 1 {
        format!("{}[{}]", field.name, field.lsb())
    } else {
        format!("{}[{}:{}]", field.name, field.msb(), field.lsb())
    }
}

/// Encoding diagram such as `0000000 | rs2[24:20] | ... | 0110011`, not yet escaped
pub fn diagram(tokens: &[PatternToken]) -> String {
    tokens
        .iter()
        .map(|token| match token {
            PatternToken::Literal(bits) => bits.clone(),
            PatternToken::Field(field) => field_label(field),
        })
        .join(" | ")
}

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "% {}", generated_by.text())?;
    writeln!(out, "\\begin{{longtable}}{{|l|l|l|}}")?;
    writeln!(out, "\\hline")?;
    writeln!(out, "\\textbf{{Instruction}} & \\textbf{{Encoding}} & \\textbf{{Operands}} \\\\")?;
    writeln!(out, "\\hline")?;
    writeln!(out, "\\endhead")?;

    for instruction in dictionary {
        let tokens = flatten(instruction)?;
        let encoding = escape(&diagram(&tokens)).replace(" | ", " $\\vert$ ");
        writeln!(
            out,
            "{} & \\texttt{{{}}} & \\texttt{{{}}} \\\\",
            escape(&instruction.name),
            encoding,
            escape(&assembly_operands(instruction)?)
        )?;
        writeln!(out, "\\hline")?;
    }

    writeln!(out, "\\end{{longtable}}")?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riscv_encoding::Instruction;

    #[test]
    fn test_escape() {
        assert_eq!(escape("c_addi {imm}"), "c\\_addi \\{imm\\}");
    }

    #[test]
    fn test_diagram() {
        let sw = Instruction::new(
            "sw",
            "-----------------010-----0100011",
            &["imm12hi", "rs1", "rs2", "imm12lo"],
        );
        assert_eq!(
            diagram(&flatten(&sw).unwrap()),
            "imm12hi[31:25] | rs2[24:20] | rs1[19:15] | 010 | imm12lo[11:7] | 0100011"
        );
    }

    #[test]
    fn test_row() {
        let dictionary = InstructionDictionary::from_instructions([Instruction::new(
            "c_addi",
            "000-----------01",
            &["rd_rs1_n0", "c_nzimm6lo", "c_nzimm6hi"],
        )])
        .unwrap();
        let out = render(&dictionary, &GeneratedBy::new("test")).unwrap();
        assert!(out.contains(
            "c\\_addi & \\texttt{000 $\\vert$ c\\_nzimm6hi[12] $\\vert$ rd\\_rs1\\_n0[11:7] \
             $\\vert$ c\\_nzimm6lo[6:2] $\\vert$ 01} & \\texttt{\\{rs1[4:0]\\}, \\{imm[4:0]\\}, \
             \\{imm[5:5]\\}} \\\\"
        ));
    }
}
