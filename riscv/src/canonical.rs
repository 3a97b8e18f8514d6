//! Canonical sub-fields of a 32-bit instruction word
//!
//! No matter the instruction format, a field that is present always sits at the same
//! position:
//!
//! ```text
//! --------------------------------------------------------
//! R-type | funct7 |  rs2 |  rs1 | funct3 |   rd  | opcode |
//!        | 31-25  |24-20 |19-15 | 14-12  | 11-7  | 6-0    |
//! --------------------------------------------------------
//! I-type |   imm[11:0]    |  rs1 | funct3 |   rd  | opcode |
//!        |   31-20        |19-15 | 14-12  | 11-7  | 6-0    |
//! --------------------------------------------------------
//! ```
//!
//! so the fields below are read from the same bits for every instruction, whether the
//! instruction declares them or not. For an instruction without `rs2` the extracted `rs2`
//! is simply whatever literal bits sit at [24:20].
use crate::bits::{extract, sign_extend};

/// Fixed sub-fields extracted from a `match` value
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalFields {
    /// Opcode field (bits [6:0])
    pub opcode: u32,

    /// Function code 3 (bits [14:12])
    pub funct3: u32,

    /// Source register 1 (bits [19:15])
    pub rs1: u32,

    /// Source register 2 (bits [24:20])
    pub rs2: u32,

    /// CSR / I-type immediate (bits [31:20]), sign-extended
    pub csr: i64,

    /// Function code 7 (bits [31:25])
    pub funct7: u32,
}

impl CanonicalFields {
    /// Extract every canonical field from `match`
    pub fn from_match(match_value: u32) -> Self {
        Self {
            opcode: extract(match_value, 0, 7),
            funct3: extract(match_value, 12, 3),
            rs1: extract(match_value, 15, 5),
            rs2: extract(match_value, 20, 5),
            csr: sign_extend(extract(match_value, 20, 12), 12) as i64,
            funct7: extract(match_value, 25, 7),
        }
    }
}
