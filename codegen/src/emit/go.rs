//! Go assembler encoding table
//!
//! Maps every `obj.As` opcode token to the canonical sub-fields of its `match` value. The
//! record always carries all six fields, whether the instruction uses them or not.
use std::fmt::Write;

use riscv_encoding::{Instruction, InstructionDictionary};

use crate::error::CodegenError;
use crate::marker::GeneratedBy;

const PRELUDE: &str = r#"package riscv

import "cmd/internal/obj"

type inst struct {
	opcode uint32
	funct3 uint32
	rs1    uint32
	rs2    uint32
	csr    int64
	funct7 uint32
}

func encode(a obj.As) *inst {
	switch a {
"#;

const EPILOGUE: &str = r#"	}
	return nil
}
"#;

/// Go opcode token, `fence.i` becomes `AFENCEI`
pub fn token(instruction: &Instruction) -> String {
    format!("A{}", instruction.name.to_uppercase().replace(['_', '.'], ""))
}

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "// {}", generated_by.text())?;
    out.push_str(PRELUDE);

    for instruction in dictionary {
        let fields = instruction.canonical_fields();
        writeln!(out, "\tcase {}:", token(instruction))?;
        writeln!(
            out,
            "\t\treturn &inst{{ {:#x}, {:#x}, {:#x}, {:#x}, {}, {:#x} }}",
            fields.opcode, fields.funct3, fields.rs1, fields.rs2, fields.csr, fields.funct7
        )?;
    }

    out.push_str(EPILOGUE);
    Ok(out)
}
