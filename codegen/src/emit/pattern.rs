//! Flattening an encoding into literal runs and field slots
//!
//! The encoding is scanned from the most significant bit. Contiguous literal bits accumulate
//! into one run; on reaching a variable position the run is flushed and, when the position
//! is the top bit of one of the instruction's declared fields, that field takes the slot.
//! Declared fields are tried in declaration order and the first match wins.
//!
//! For `add` this yields
//! `7'b0000000 :: rs2 :: rs1 :: 3'b000 :: rd :: 7'b0110011`.
use std::fmt;
use std::mem;

use riscv_encoding::{EncodingError, Instruction, VariableField};

/// One slot of a flattened encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Run of literal bits, most significant first
    Literal(String),
    /// Variable field occupying its full range
    Field(&'static VariableField),
}

impl PatternToken {
    /// Number of bits covered by this token
    pub fn width(&self) -> u32 {
        match self {
            PatternToken::Literal(bits) => bits.len() as u32,
            PatternToken::Field(field) => field.width as u32,
        }
    }
}

impl fmt::Display for PatternToken {
    /// Verilog-style sized literal for runs, field name otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Literal(bits) => write!(f, "{}'b{}", bits.len(), bits),
            PatternToken::Field(field) => write!(f, "{}", field.name),
        }
    }
}

/// Flatten the encoding of `instruction`
///
/// Fails when one of the declared variable fields is missing from the field table.
pub fn flatten(instruction: &Instruction) -> Result<Vec<PatternToken>, EncodingError> {
    let fields = instruction.fields()?;
    let len = instruction.encoding.len();

    let mut tokens = Vec::new();
    let mut literal = String::new();

    for (pos, c) in instruction.encoding.chars().enumerate() {
        if c == '0' || c == '1' {
            literal.push(c);
            continue;
        }

        if !literal.is_empty() {
            tokens.push(PatternToken::Literal(mem::take(&mut literal)));
        }

        let bit = (len - pos - 1) as u32;
        if let Some(field) = fields.iter().find(|field| field.msb() == bit) {
            tokens.push(PatternToken::Field(field));
        }
    }

    // A trailing empty run would be a zero-width literal, leave it out
    if !literal.is_empty() {
        tokens.push(PatternToken::Literal(literal));
    }

    Ok(tokens)
}
