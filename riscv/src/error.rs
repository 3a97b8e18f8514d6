/// Encoding model errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown variable field: {0}")]
    UnknownField(String),

    #[error("Duplicate instruction: {0}")]
    DuplicateInstruction(String),

    #[error("Instruction {name} has an encoding of {len} bits, expected 16 or 32")]
    InvalidLength { name: String, len: usize },

    #[error("Field {field} of instruction {name} does not fit in its encoding")]
    FieldOutOfRange { name: String, field: String },

    #[error("Field {field} of instruction {name} overlaps a literal bit")]
    FieldOverlapsLiteral { name: String, field: String },

    #[error("Invalid extension pattern: {0}")]
    InvalidGlob(String),

    #[error("Invalid instruction table: {0}")]
    Json(#[from] serde_json::Error),
}
