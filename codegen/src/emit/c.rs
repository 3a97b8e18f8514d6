//! C header: `MATCH_*`/`MASK_*` defines, field masks and the `DECLARE_INSN` list
use std::fmt::Write;

use riscv_encoding::{InstructionDictionary, VARIABLE_FIELDS};

use crate::error::CodegenError;
use crate::marker::GeneratedBy;

pub fn render(
    dictionary: &InstructionDictionary,
    generated_by: &GeneratedBy,
) -> Result<String, CodegenError> {
    let mut out = String::new();
    writeln!(out, "/* {} */", generated_by.text())?;
    writeln!(out)?;
    writeln!(out, "#ifndef RISCV_ENCODING_H")?;
    writeln!(out, "#define RISCV_ENCODING_H")?;

    for instruction in dictionary {
        let (match_value, mask) = instruction.match_mask();
        let name = instruction.upper_name();
        writeln!(out, "#define MATCH_{name} {match_value:#x}")?;
        writeln!(out, "#define MASK_{name} {mask:#x}")?;
    }

    writeln!(out)?;
    for field in VARIABLE_FIELDS {
        writeln!(out, "#define INSN_FIELD_{} {:#x}", field.name.to_uppercase(), field.mask())?;
    }

    writeln!(out, "#endif")?;
    writeln!(out, "#ifdef DECLARE_INSN")?;
    for instruction in dictionary {
        let name = instruction.upper_name();
        writeln!(
            out,
            "DECLARE_INSN({}, MATCH_{name}, MASK_{name})",
            instruction.name.replace('.', "_")
        )?;
    }
    writeln!(out, "#endif")?;

    Ok(out)
}
