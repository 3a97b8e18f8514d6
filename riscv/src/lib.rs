//! RISC-V instruction encoding model
//!
//! Every instruction in the opcode table is described by an encoding string with one
//! character per bit, most significant bit first. Literal bits are `0` or `1`, every other
//! character belongs to one of the instruction's variable fields.
//!
//! **Example**
//!
//! [0000000 | ----- | ----- | 000 | ----- | 0110011]
//! [funct7  | rs2   | rs1   |funct3| rd   | opcode ]
//!
//! - The literal bits give the `match` value `0x0000_0033`.
//! - Every literal position, zero or one, is set in the `mask` `0xfe00_707f`.
//! - `rd`, `rs1` and `rs2` are looked up in the variable field table to find where they live.
//!
//! The code generators only ever look at these three views of an instruction: the encoding
//! string, the derived `match`/`mask` pair, and the variable fields.
pub mod bits;
pub mod canonical;
pub mod dictionary;
pub mod error;
pub mod field;
pub mod instruction;

pub use canonical::CanonicalFields;
pub use dictionary::{InstructionDictionary, Selection, EMITTED_PSEUDO_OPS};
pub use error::EncodingError;
pub use field::{lookup_field, VariableField, VARIABLE_FIELDS};
pub use instruction::{derive_match_mask, EncodingWidth, Instruction};
