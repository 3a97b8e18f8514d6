//! Bit field helpers shared by the encoding model and the code generators

/// Returns a mask with the low `width` bits set
pub const fn low_mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Extract `width` bits of `value` starting at bit `pos`
pub const fn extract(value: u32, pos: u32, width: u32) -> u32 {
    (value >> pos) & low_mask(width)
}

/// Mask covering bits `[pos + width - 1 : pos]` in place
pub const fn field_mask(pos: u32, width: u32) -> u32 {
    low_mask(width) << pos
}

/// Sign-extend a value of specified bit width to i32
///
/// `width` must be in `1..=32`.
pub fn sign_extend(value: u32, width: u8) -> i32 {
    debug_assert!((1..=32).contains(&width), "sign_extend width out of range: {width}");
    let sign_bit = 1u32 << (width - 1);
    let max_value = 1i64 << width;

    if (sign_bit & value) != 0 {
        (value as i64 - max_value) as i32
    } else {
        value as i32
    }
}
