//! Variable field table
//!
//! A variable field is a named range of the instruction word that carries an operand
//! (a register index, an immediate, a rounding mode...) instead of fixed opcode bits.
//! The table is shared by every code generator so they all agree on where each field lives.
//!
//! Some operands are split over several ranges. The 12-bit store immediate for example is
//! described by two disjoint entries, `imm12hi` (bits [31:25]) and `imm12lo` (bits [11:7]).
//! Only one half of such a pair carries an assembly rendering, the other one is left empty
//! so that the operand is printed once.
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::bits::field_mask;
use crate::error::EncodingError;

/// A named range of bits inside an instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableField {
    /// Field name as used in the opcode tables
    pub name: &'static str,
    /// Position of the least significant bit
    pub offset: u8,
    /// Number of bits
    pub width: u8,
    /// How the operand is shown in assembly syntax, empty for the silent half of a split field
    pub assembly: &'static str,
    /// How the operand is spelled in hardware description encodings, most significant slice first
    pub hdl: &'static str,
}

impl VariableField {
    /// Position of the most significant bit
    pub const fn msb(&self) -> u32 {
        self.offset as u32 + self.width as u32 - 1
    }

    /// Position of the least significant bit
    pub const fn lsb(&self) -> u32 {
        self.offset as u32
    }

    /// Mask selecting this field in place
    pub const fn mask(&self) -> u32 {
        field_mask(self.offset as u32, self.width as u32)
    }

    /// Whether this field shows up on its own in assembly syntax
    pub fn has_assembly(&self) -> bool {
        !self.assembly.is_empty()
    }
}

/// Builds a table entry from its `[msb:lsb]` range
const fn bits(
    name: &'static str,
    msb: u8,
    lsb: u8,
    assembly: &'static str,
    hdl: &'static str,
) -> VariableField {
    VariableField { name, offset: lsb, width: msb - lsb + 1, assembly, hdl }
}

/// Every variable field known to the generators
///
/// The order of this table is the order used whenever fields are listed, e.g. the
/// `INSN_FIELD_*` masks of the C header.
pub static VARIABLE_FIELDS: &[VariableField] = &[
    bits("rd", 11, 7, "name(rd)", "rd[4:0]"),
    bits("rt", 19, 15, "rt", "rt[4:0]"),
    bits("rs1", 19, 15, "name(rs1)", "rs1[4:0]"),
    bits("rs2", 24, 20, "name(rs2)", "rs2[4:0]"),
    bits("rs3", 31, 27, "rs3", "rs3[4:0]"),
    bits("aqrl", 26, 25, "aqrl", "aqrl[1:0]"),
    bits("aq", 26, 26, "aq[0:0]", "aq[0:0]"),
    bits("rl", 25, 25, "rl[0:0]", "rl[0:0]"),
    bits("fm", 31, 28, "fm[3:0]", "fm[3:0]"),
    bits("pred", 27, 24, "pred[3:0]", "pred[3:0]"),
    bits("succ", 23, 20, "succ[3:0]", "succ[3:0]"),
    bits("rm", 14, 12, "rm[2:0]", "rm[2:0]"),
    bits("funct3", 14, 12, "funct3", "funct3[2:0]"),
    bits("funct2", 26, 25, "funct2", "funct2[1:0]"),
    bits("imm20", 31, 12, "imm[31:12]", "imm[31:12]"),
    bits(
        "jimm20",
        31,
        12,
        "imm[20:20] :: imm[10:1] :: imm[11:11] :: imm[19:12]",
        "imm[20:20] :: imm[10:1] :: imm[11:11] :: imm[19:12]",
    ),
    bits("imm12", 31, 20, "imm", "imm[11:0]"),
    bits("csr", 31, 20, "csr", "csr[11:0]"),
    bits("imm12hi", 31, 25, "", "imm[11:5]"),
    bits("bimm12hi", 31, 25, "", "imm[12:12] :: imm[10:5]"),
    bits("imm12lo", 11, 7, "imm", "imm[4:0]"),
    bits("bimm12lo", 11, 7, "imm", "imm[4:1] :: imm[11:11]"),
    bits("shamtq", 26, 20, "shamtq", "shamt[6:0]"),
    bits("shamtd", 25, 20, "shamtd", "shamt[5:0]"),
    bits("shamtw", 24, 20, "shamtw", "shamt[4:0]"),
    bits("shamtw4", 23, 20, "shamtw4", "shamt[3:0]"),
    bits("bs", 31, 30, "bs", "bs[1:0]"),
    bits("rnum", 23, 20, "rnum", "rnum[3:0]"),
    bits("rc", 29, 25, "rc", "rc[4:0]"),
    bits("imm2", 21, 20, "imm[1:0]", "imm[1:0]"),
    bits("imm3", 22, 20, "imm[2:0]", "imm[2:0]"),
    bits("imm4", 23, 20, "imm[3:0]", "imm[3:0]"),
    bits("imm5", 24, 20, "imm[4:0]", "imm[4:0]"),
    bits("imm6", 25, 20, "imm[5:0]", "imm[5:0]"),
    bits("zimm", 19, 15, "zimm", "zimm[4:0]"),
    bits("opcode", 6, 0, "opcode", "opcode[6:0]"),
    bits("funct7", 31, 25, "funct7", "funct7[6:0]"),
    bits("vd", 11, 7, "vd", "vd[4:0]"),
    bits("vs3", 11, 7, "vs3", "vs3[4:0]"),
    bits("vs1", 19, 15, "vs1", "vs1[4:0]"),
    bits("vs2", 24, 20, "vs2", "vs2[4:0]"),
    bits("vm", 25, 25, "vm", "vm[0:0]"),
    bits("wd", 26, 26, "wd", "wd[0:0]"),
    bits("amoop", 31, 27, "amoop", "amoop[4:0]"),
    bits("nf", 31, 29, "nf", "nf[2:0]"),
    bits("simm5", 19, 15, "simm", "simm[4:0]"),
    bits("zimm5", 19, 15, "zimm", "zimm[4:0]"),
    bits("zimm10", 29, 20, "zimm", "zimm[9:0]"),
    bits("zimm11", 30, 20, "zimm", "zimm[10:0]"),
    bits("zimm6hi", 26, 26, "zimm6hi", "zimm[5:5]"),
    bits("zimm6lo", 19, 15, "zimm6lo", "zimm[4:0]"),
    bits(
        "c_nzuimm10",
        12,
        5,
        "imm[5:4] :: imm[9:6] :: imm[2:2] :: imm[3:3]",
        "imm[5:4] :: imm[9:6] :: imm[2:2] :: imm[3:3]",
    ),
    bits("c_uimm7lo", 6, 5, "uimm[2:2] :: uimm[6:6]", "uimm[2:2] :: uimm[6:6]"),
    bits("c_uimm7hi", 12, 10, "uimm[5:3]", "uimm[5:3]"),
    bits("c_uimm8lo", 6, 5, "c_uimm8lo", "uimm[7:6]"),
    bits("c_uimm8hi", 12, 10, "c_uimm8hi", "uimm[5:3]"),
    bits("c_uimm9lo", 6, 5, "c_uimm9lo", "c_uimm9lo[1:0]"),
    bits("c_uimm9hi", 12, 10, "c_uimm9hi", "c_uimm9hi[2:0]"),
    bits("c_nzimm6lo", 6, 2, "imm[4:0]", "imm[4:0]"),
    bits("c_nzimm6hi", 12, 12, "imm[5:5]", "imm[5:5]"),
    bits("c_imm6lo", 6, 2, "imm[4:0]", "imm[4:0]"),
    bits("c_imm6hi", 12, 12, "imm[5:5]", "imm[5:5]"),
    bits("c_nzimm10hi", 12, 12, "nzimm[9:9]", "nzimm[9:9]"),
    bits(
        "c_nzimm10lo",
        6,
        2,
        "nzimm[4:4] :: nzimm[6:6] :: nzimm[8:7] :: nzimm[5:5]",
        "nzimm[4:4] :: nzimm[6:6] :: nzimm[8:7] :: nzimm[5:5]",
    ),
    bits("c_nzimm18hi", 12, 12, "imm[17:17]", "imm[17:17]"),
    bits("c_nzimm18lo", 6, 2, "imm[16:12]", "imm[16:12]"),
    bits(
        "c_imm12",
        12,
        2,
        "imm[11:11] :: imm[4:4] :: imm[9:8] :: imm[10:10] :: imm[6:6] :: imm[7:7] :: imm[3:1] :: imm[5:5]",
        "imm[11:11] :: imm[4:4] :: imm[9:8] :: imm[10:10] :: imm[6:6] :: imm[7:7] :: imm[3:1] :: imm[5:5]",
    ),
    bits("c_bimm9lo", 6, 2, "imm[7:6] :: imm[2:1] :: imm[5:5]", "imm[7:6] :: imm[2:1] :: imm[5:5]"),
    bits("c_bimm9hi", 12, 10, "imm[8:8] :: imm[4:3]", "imm[8:8] :: imm[4:3]"),
    bits("c_nzuimm5", 6, 2, "c_nzuimm5", "c_nzuimm5[4:0]"),
    bits("c_nzuimm6lo", 6, 2, "c_nzuimm6lo", "c_nzuimm6lo[4:0]"),
    bits("c_nzuimm6hi", 12, 12, "c_nzuimm6hi", "c_nzuimm6hi[0:0]"),
    bits("c_uimm8splo", 6, 2, "uimm[4:2] :: uimm[7:6]", "uimm[4:2] :: uimm[7:6]"),
    bits("c_uimm8sphi", 12, 12, "uimm[5:5]", "uimm[5:5]"),
    bits("c_uimm8sp_s", 12, 7, "uimm[5:2] :: uimm[7:6]", "uimm[5:2] :: uimm[7:6]"),
    bits("c_uimm10splo", 6, 2, "c_uimm10splo", "c_uimm10splo[4:0]"),
    bits("c_uimm10sphi", 12, 12, "c_uimm10sphi", "c_uimm10sphi[0:0]"),
    bits("c_uimm9splo", 6, 2, "c_uimm9splo", "c_uimm9splo[4:0]"),
    bits("c_uimm9sphi", 12, 12, "c_uimm9sphi", "c_uimm9sphi[0:0]"),
    bits("c_uimm10sp_s", 12, 7, "c_uimm10sp_s", "c_uimm10sp_s[5:0]"),
    bits("c_uimm9sp_s", 12, 7, "c_uimm9sp_s", "c_uimm9sp_s[5:0]"),
    bits("c_uimm2", 6, 5, "uimm[0:0] :: uimm[1:1]", "uimm[0:0] :: uimm[1:1]"),
    bits("c_uimm1", 5, 5, "uimm[1:1]", "uimm[1:1]"),
    bits("c_rlist", 7, 4, "rlist[3:0]", "rlist[3:0]"),
    bits("c_spimm", 3, 2, "spimm[5:4]", "spimm[5:4]"),
    bits("c_index", 9, 2, "c_index", "index[7:0]"),
    bits("rs1_p", 9, 7, "rs1[2:0]", "rs1[2:0]"),
    bits("rs2_p", 4, 2, "rs2[2:0]", "rs2[2:0]"),
    bits("rd_p", 4, 2, "rd[2:0]", "rd[2:0]"),
    bits("rd_rs1_n0", 11, 7, "rs1[4:0]", "rd[4:0]"),
    bits("rd_rs1_p", 9, 7, "rd[2:0]", "rd[2:0]"),
    bits("rd_rs1", 11, 7, "rs1[4:0]", "rd[4:0]"),
    bits("rd_n2", 11, 7, "rd[4:0]", "rd[4:0]"),
    bits("rd_n0", 11, 7, "rd_n0", "rd[4:0]"),
    bits("rs1_n0", 11, 7, "rs1[4:0]", "rs1[4:0]"),
    bits("c_rs2_n0", 6, 2, "rs2[4:0]", "rs2[4:0]"),
    bits("c_rs1_n0", 11, 7, "rs1[4:0]", "rs1[4:0]"),
    bits("c_rs2", 6, 2, "rs2[4:0]", "rs2[4:0]"),
    bits("c_sreg1", 9, 7, "rs1[2:0]", "rs1[2:0]"),
    bits("c_sreg2", 4, 2, "rs2[2:0]", "rs2[2:0]"),
    bits("c_mop_t", 10, 8, "c_mop_t", "mop_t[2:0]"),
    bits("mop_r_t_30", 30, 30, "mop_r_t_30", "mop_r_t[4:4]"),
    bits("mop_r_t_27_26", 27, 26, "mop_r_t_27_26", "mop_r_t[3:2]"),
    bits("mop_r_t_21_20", 21, 20, "mop_r_t_21_20", "mop_r_t[1:0]"),
    bits("mop_rr_t_30", 30, 30, "mop_rr_t_30", "mop_rr_t[2:2]"),
    bits("mop_rr_t_27_26", 27, 26, "mop_rr_t_27_26", "mop_rr_t[1:0]"),
];

static FIELD_INDEX: LazyLock<HashMap<&'static str, &'static VariableField>> =
    LazyLock::new(|| VARIABLE_FIELDS.iter().map(|field| (field.name, field)).collect());

/// Look up a variable field by name
pub fn lookup_field(name: &str) -> Result<&'static VariableField, EncodingError> {
    FIELD_INDEX.get(name).copied().ok_or_else(|| EncodingError::UnknownField(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Width of an hdl rendering such as `imm[12:12] :: imm[10:5]`
    fn hdl_width(hdl: &str) -> u32 {
        hdl.split(" :: ")
            .map(|slice| {
                let range = slice.split_once('[').map(|(_, r)| r.trim_end_matches(']')).unwrap();
                let (hi, lo) = range.split_once(':').unwrap();
                hi.parse::<u32>().unwrap() - lo.parse::<u32>().unwrap() + 1
            })
            .sum()
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut seen = HashSet::new();
        for field in VARIABLE_FIELDS {
            assert!(seen.insert(field.name), "{} declared twice", field.name);
        }
    }

    #[test]
    fn test_table_fits_in_a_word() {
        for field in VARIABLE_FIELDS {
            assert!(field.width > 0, "{} has no bits", field.name);
            assert!(field.offset as u32 + field.width as u32 <= 32, "{} overflows", field.name);
        }
    }

    #[test]
    fn test_hdl_rendering_covers_field_width() {
        for field in VARIABLE_FIELDS {
            assert_eq!(hdl_width(field.hdl), field.width as u32, "{}", field.name);
        }
    }

    #[test]
    fn test_lookup() {
        let rd = lookup_field("rd").unwrap();
        assert_eq!((rd.msb(), rd.lsb()), (11, 7));
        assert_eq!(rd.mask(), 0xF80);

        let csr = lookup_field("csr").unwrap();
        assert_eq!(csr.mask(), 0xFFF0_0000);

        assert!(!lookup_field("imm12hi").unwrap().has_assembly());
        assert!(matches!(lookup_field("nope"), Err(EncodingError::UnknownField(name)) if name == "nope"));
    }
}
