//! Recombining a polynomial value with its integer multiplier.

use crate::simd::math::consts::EXPONENT_BIAS;
use crate::simd::{F32x8, I32x8, Mask8};

/// `2^n` built directly in the exponent field. Valid for `n` in `[-126, 127]`.
#[inline(always)]
pub fn pow2i(n: I32x8) -> F32x8 {
    F32x8::from_bits(n.add(I32x8::splat(EXPONENT_BIAS)).shl::<23>())
}

/// `y * 2^n` as two exponent-field multiplies, `2^(n/2) * 2^(n - n/2)`.
///
/// Valid for `n` in `[-252, 254]`; the result overflows to infinity or rounds into
/// the subnormal range the way a single multiply would.
#[inline(always)]
pub fn scale_pow2(y: F32x8, n: I32x8) -> F32x8 {
    let half = n.shr_arith::<1>();
    let rest = n.sub(half);
    y * pow2i(half) * pow2i(rest)
}

/// `y * 2^n` by adding `n` to the exponent field of `y`.
///
/// Valid while the result stays normal.
#[inline(always)]
pub fn inject_exponent(y: F32x8, n: I32x8) -> F32x8 {
    F32x8::from_bits(y.to_bits().add(n.shl::<23>()))
}

/// XORs `sign` (only bit 31 expected set) into each lane.
#[inline(always)]
pub fn flip_sign(y: F32x8, sign: I32x8) -> F32x8 {
    F32x8::from_bits(y.to_bits().xor(sign))
}

/// Lanes of `x` that are NaN or infinite.
#[inline(always)]
pub fn non_finite(x: F32x8) -> Mask8 {
    x.abs().lt(F32x8::splat(f32::INFINITY)).not()
}

/// Final step shared by the trigonometric kernels: clamps to `[-1, 1]` (a NaN lane
/// becomes `-1`) and then forces NaN wherever the input was not finite.
#[inline(always)]
pub fn finish_trig(y: F32x8, x: F32x8) -> F32x8 {
    y.max(F32x8::splat(-1.0))
        .min(F32x8::splat(1.0))
        .blend(F32x8::splat(f32::NAN), non_finite(x))
}
