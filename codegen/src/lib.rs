//! Generators turning the RISC-V opcode table into source code and documentation
//!
//! Every backend renders one file from the sorted [`InstructionDictionary`]. Rendering is
//! pure, the [`pipeline`] is the only place that touches the file system.
//!
//! [`InstructionDictionary`]: riscv_encoding::InstructionDictionary
pub mod emit;
pub mod error;
pub mod format;
pub mod marker;
pub mod pipeline;

pub use emit::Backend;
pub use error::CodegenError;
pub use format::Formatter;
pub use marker::GeneratedBy;
pub use pipeline::{generate, GenerateOptions, INSTR_DICT_FILE};
