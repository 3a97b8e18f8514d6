//! Assembly operand strings
use itertools::Itertools;
use riscv_encoding::{EncodingError, Instruction};

/// Operand list of `instruction` in assembly syntax, e.g. `{name(rd)}, {name(rs1)}, {imm}`
///
/// Fields are taken in declaration order. A field without an assembly rendering is the
/// silent half of a split operand and is skipped, along with its delimiter.
pub fn assembly_operands(instruction: &Instruction) -> Result<String, EncodingError> {
    Ok(instruction
        .fields()?
        .into_iter()
        .filter(|field| field.has_assembly())
        .map(|field| format!("{{{}}}", field.assembly))
        .join(", "))
}
