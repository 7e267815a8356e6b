//! Range reduction primitives.

use crate::simd::math::consts::{
    EXPONENT_BIAS, EXPONENT_FIELD, FOPI, FRAC_2_PI, MIN_NORM_POS,
};
use crate::simd::{F32x8, I32x8};

/// `x - n * parts[0] - n * parts[1] - ...`, one rounded multiply and subtract per part.
///
/// Exact in the leading steps when `n` is small enough that `n * parts[0]` is
/// representable, which is why the high parts carry few significant bits.
#[inline(always)]
pub fn cody_waite<const N: usize>(x: F32x8, n: F32x8, parts: &[f32; N]) -> F32x8 {
    let mut r = x;
    for &part in parts {
        r = r - n * F32x8::splat(part);
    }
    r
}

/// [`cody_waite`] with each step as a single fused negate-multiply-add.
#[inline(always)]
pub fn cody_waite_fused<const N: usize>(x: F32x8, n: F32x8, parts: &[f32; N]) -> F32x8 {
    let mut r = x;
    for &part in parts {
        r = n.neg_mul_add(F32x8::splat(part), r);
    }
    r
}

/// Splits positive normal lanes into `m` in `[0.5, 1)` and `e` with `x = m * 2^e`.
///
/// Lanes must be positive and normal; callers clamp first.
#[inline(always)]
pub fn frexp(x: F32x8) -> (F32x8, I32x8) {
    let bits = x.to_bits();
    let e = bits
        .shr::<23>()
        .sub(I32x8::splat(EXPONENT_BIAS - 1));
    let m = bits
        .and_not(I32x8::splat(EXPONENT_FIELD))
        .or(F32x8::splat(0.5).to_bits());
    (F32x8::from_bits(m), e)
}

/// Smallest positive normal value, splatted.
#[inline(always)]
pub fn min_normal() -> F32x8 {
    F32x8::from_bits(I32x8::splat(MIN_NORM_POS))
}

/// Even octant index `j` of a non-negative `x` and its float value.
///
/// `j = (trunc(x * 4/π) + 1) & !1`, so `x - j * π/4` lies in `[-π/4, π/4]`.
#[inline(always)]
pub fn octant(x_abs: F32x8) -> (F32x8, I32x8) {
    let j = (x_abs * F32x8::splat(FOPI))
        .to_i32_trunc()
        .add(I32x8::splat(1))
        .and_not(I32x8::splat(1));
    (j.to_f32(), j)
}

/// Nearest quadrant `k = round(x * 2/π)`, both as float and as integer lanes.
#[inline(always)]
pub fn quadrant(x: F32x8) -> (F32x8, I32x8) {
    let kf = (x * F32x8::splat(FRAC_2_PI)).round();
    (kf, kf.to_i32_trunc())
}
