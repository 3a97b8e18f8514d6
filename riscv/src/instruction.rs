//! Instruction records and match/mask derivation
use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalFields;
use crate::error::EncodingError;
use crate::field::{lookup_field, VariableField};

/// Width class of an encoding
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EncodingWidth {
    /// 16-bit compressed instruction
    Compressed,
    /// 32-bit standard instruction
    Standard,
}

impl EncodingWidth {
    /// Width class for an encoding of `len` characters
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(EncodingWidth::Compressed),
            32 => Some(EncodingWidth::Standard),
            _ => None,
        }
    }

    /// Number of bits in the encoding
    pub const fn bits(self) -> u32 {
        match self {
            EncodingWidth::Compressed => 16,
            EncodingWidth::Standard => 32,
        }
    }
}

/// One entry of the opcode table
///
/// The name is the dictionary key and is therefore not part of the serialized record.
/// `match` and `mask` are never stored, they are derived from `encoding` on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(skip)]
    pub name: String,

    /// One character per bit, most significant bit first
    pub encoding: String,

    /// Operand fields in declaration order
    #[serde(default)]
    pub variable_fields: Vec<String>,

    /// Extensions this instruction belongs to, e.g. `rv_i` or `rv64_zba`
    #[serde(default)]
    pub extension: Vec<String>,

    /// Base instruction this pseudo-instruction is an alias of
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudo_of: Option<String>,
}

impl Instruction {
    pub fn new(name: &str, encoding: &str, variable_fields: &[&str]) -> Self {
        Self {
            name: name.to_lowercase(),
            encoding: encoding.to_string(),
            variable_fields: variable_fields.iter().map(|f| f.to_string()).collect(),
            extension: Vec::new(),
            pseudo_of: None,
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension.push(extension.to_string());
        self
    }

    pub fn with_pseudo_of(mut self, base: &str) -> Self {
        self.pseudo_of = Some(base.to_string());
        self
    }

    pub fn is_pseudo(&self) -> bool {
        self.pseudo_of.is_some()
    }

    /// Width class, `None` when the encoding has neither 16 nor 32 positions
    pub fn width(&self) -> Option<EncodingWidth> {
        EncodingWidth::from_len(self.encoding.len())
    }

    /// Derived `(match, mask)` pair
    pub fn match_mask(&self) -> (u32, u32) {
        derive_match_mask(&self.encoding)
    }

    pub fn match_value(&self) -> u32 {
        self.match_mask().0
    }

    /// The six fixed sub-fields read straight out of `match`
    pub fn canonical_fields(&self) -> CanonicalFields {
        CanonicalFields::from_match(self.match_value())
    }

    /// Upper-case name with `.` turned into `_`, the form used for constants
    pub fn upper_name(&self) -> String {
        self.name.to_uppercase().replace('.', "_")
    }

    /// Resolve the declared variable fields against the field table
    pub fn fields(&self) -> Result<Vec<&'static VariableField>, EncodingError> {
        self.variable_fields.iter().map(|name| lookup_field(name)).collect()
    }

    /// Check the encoding against the declared fields
    ///
    /// Nothing in the generators depends on this: a malformed encoding still derives a
    /// `match`/`mask` pair, it is only wrong.
    pub fn validate(&self) -> Result<(), EncodingError> {
        let len = self.encoding.len();
        if self.width().is_none() {
            return Err(EncodingError::InvalidLength { name: self.name.clone(), len });
        }

        let encoding = self.encoding.as_bytes();
        for field in self.fields()? {
            if field.msb() as usize >= len {
                return Err(EncodingError::FieldOutOfRange {
                    name: self.name.clone(),
                    field: field.name.to_string(),
                });
            }
            let literal = (field.lsb()..=field.msb())
                .map(|bit| encoding[len - 1 - bit as usize])
                .any(|c| c == b'0' || c == b'1');
            if literal {
                return Err(EncodingError::FieldOverlapsLiteral {
                    name: self.name.clone(),
                    field: field.name.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Derive `(match, mask)` from an encoding string
///
/// The leftmost character is the most significant bit. `1` sets the bit in both values,
/// `0` only in the mask, and anything else belongs to a variable field and sets neither.
/// Positions beyond bit 31 cannot be represented and are ignored.
pub fn derive_match_mask(encoding: &str) -> (u32, u32) {
    let len = encoding.len();
    let mut match_value = 0u32;
    let mut mask = 0u32;

    for (i, c) in encoding.bytes().enumerate() {
        let Some(bit) = 1u32.checked_shl((len - 1 - i) as u32) else {
            continue;
        };
        match c {
            b'1' => {
                match_value |= bit;
                mask |= bit;
            }
            b'0' => mask |= bit,
            _ => {}
        }
    }

    (match_value, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD: &str = "0000000----------000-----0110011";
    const SW: &str = "-----------------010-----0100011";

    #[test]
    fn test_add_match_mask() {
        assert_eq!(derive_match_mask(ADD), (0x33, 0xfe00707f));
    }

    #[test]
    fn test_store_match_mask() {
        assert_eq!(derive_match_mask(SW), (0x2023, 0x707f));
    }

    #[test]
    fn test_compressed_match_mask() {
        // c.addi
        assert_eq!(derive_match_mask("000-----------01"), (0x1, 0xe003));
    }

    #[test]
    fn test_literal_and_variable_bits() {
        let encodings = [ADD, SW, "00110000001000000000000001110011", "000-----------01"];
        for encoding in encodings {
            let (match_value, mask) = derive_match_mask(encoding);
            assert_eq!(match_value & !mask, 0);

            let len = encoding.len();
            for (i, c) in encoding.chars().enumerate() {
                let bit = 1u32 << (len - 1 - i);
                match c {
                    '1' => {
                        assert_ne!(match_value & bit, 0);
                        assert_ne!(mask & bit, 0);
                    }
                    '0' => {
                        assert_eq!(match_value & bit, 0);
                        assert_ne!(mask & bit, 0);
                    }
                    _ => assert_eq!(mask & bit, 0),
                }
            }
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(derive_match_mask(ADD), derive_match_mask(ADD));
    }

    #[test]
    fn test_overlong_encoding_does_not_panic() {
        let (match_value, mask) = derive_match_mask(&format!("1{ADD}"));
        assert_eq!((match_value, mask), (0x33, 0xfe00707f));
    }

    #[test]
    fn test_validate() {
        let add = Instruction::new("add", ADD, &["rd", "rs1", "rs2"]);
        assert!(add.validate().is_ok());

        let short = Instruction::new("short", "0110011", &[]);
        assert!(matches!(short.validate(), Err(EncodingError::InvalidLength { len: 7, .. })));

        let overlap = Instruction::new("bad", ADD, &["rd", "rs1", "rs2", "funct3"]);
        assert!(matches!(overlap.validate(), Err(EncodingError::FieldOverlapsLiteral { .. })));

        let unknown = Instruction::new("bad", ADD, &["rd", "rx"]);
        assert!(matches!(unknown.validate(), Err(EncodingError::UnknownField(_))));

        let out_of_range = Instruction::new("c.bad", "----------------", &["rs2"]);
        assert!(matches!(out_of_range.validate(), Err(EncodingError::FieldOutOfRange { .. })));
    }

    #[test]
    fn test_upper_name() {
        let fence_i = Instruction::new("fence.i", "-----------------001-----0001111", &[]);
        assert_eq!(fence_i.upper_name(), "FENCE_I");
    }
}
