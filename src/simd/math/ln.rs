//! Natural logarithm kernels.
//!
//! `x = m * 2^e` is split through the bit fields, `log(m)` is approximated around 1
//! and `e * ln2` is added back in two parts. Zero, negative, infinite and NaN lanes
//! are fixed up by masks at the very end.

use crate::simd::math::consts::{
    LN_FUSED_LN2_HI, LN_FUSED_LN2_LO, LN_FUSED_OFFSET, LN_FUSED_POLY, LN_POLY, LN_Q1, LN_Q2,
    LN_SUBNORMAL_SCALE, LN_SUBNORMAL_SHIFT, MANTISSA_FIELD, SQRTHF,
};
use crate::simd::math::poly::{horner, horner_fused};
use crate::simd::math::reduce::{frexp, min_normal};
use crate::simd::{F32x8, I32x8};

#[inline(always)]
fn apply_edges(y: F32x8, x: F32x8) -> F32x8 {
    let zero = F32x8::zero();
    y.blend(F32x8::splat(f32::INFINITY), x.eq(F32x8::splat(f32::INFINITY)))
        .blend(F32x8::splat(f32::NEG_INFINITY), x.eq(zero))
        .blend(F32x8::splat(f32::NAN), x.lt(zero))
        .blend(x, x.is_nan())
}

/// `ln(x)`, Cephes scheme with the mantissa in `[sqrt(1/2), sqrt(2))`.
///
/// Positive subnormal inputs are treated as the smallest normal value.
#[inline(always)]
pub fn ln(x: F32x8) -> F32x8 {
    let zero = F32x8::zero();
    let one = F32x8::splat(1.0);

    let (m, e) = frexp(x.max(min_normal()));
    let mut e = e.to_f32();

    // m < sqrt(1/2): use 2m - 1 and e - 1
    let small = m.lt(F32x8::splat(SQRTHF));
    let tmp = zero.blend(m, small);
    let mut m = m - one;
    e = e - zero.blend(one, small);
    m = m + tmp;

    let z = m * m;
    let mut y = horner(m, &LN_POLY) * m * z;
    y = y + e * F32x8::splat(LN_Q1);
    y = y - z * F32x8::splat(0.5);
    m = m + y;
    m = m + e * F32x8::splat(LN_Q2);

    apply_edges(m, x)
}

/// `ln(x)`, fused scheme with the mantissa in `[2/3, 4/3)` and the `s = f / (2 + f)`
/// substitution.
///
/// Subnormal inputs are lifted by `2^25` first, so they get full accuracy.
#[inline(always)]
pub fn ln_fused(x: F32x8) -> F32x8 {
    let zero = F32x8::zero();

    let subnormal = x.lt(min_normal()).and(x.gt(zero));
    let xs = x.blend(x * F32x8::splat(LN_SUBNORMAL_SCALE), subnormal);
    let k_adjust = zero.blend(F32x8::splat(-LN_SUBNORMAL_SHIFT), subnormal);

    let offset = I32x8::splat(LN_FUSED_OFFSET);
    let ix = xs.to_bits().sub(offset);
    let k = ix.shr_arith::<23>();
    let m = F32x8::from_bits(ix.and(I32x8::splat(MANTISSA_FIELD)).add(offset));

    let f = m - F32x8::splat(1.0);
    let s = f / (F32x8::splat(2.0) + f);
    let z = s * s;
    let r = horner_fused(z, &LN_FUSED_POLY) * z;
    let hfsq = f * f * F32x8::splat(0.5);
    let dk = k.to_f32() + k_adjust;

    let y = s.mul_add(hfsq + r, dk * F32x8::splat(LN_FUSED_LN2_LO)) - hfsq + f;
    let y = dk.mul_add(F32x8::splat(LN_FUSED_LN2_HI), y);

    apply_edges(y, x)
}
