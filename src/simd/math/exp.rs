//! Exponential kernels.
//!
//! Both reduce `x = n * ln2 + r` with `|r| <= ln2 / 2`, approximate `e^r` with a
//! polynomial and rebuild `2^n * e^r` in the exponent field.

use crate::simd::math::consts::{
    EXP_FUSED_LN2_PARTS, EXP_FUSED_LO, EXP_FUSED_POLY, EXP_HI, EXP_LN2_PARTS, EXP_LO,
    EXP_POLY, LOG2EF,
};
use crate::simd::math::poly::{horner, horner_fused};
use crate::simd::math::reconstruct::{inject_exponent, scale_pow2};
use crate::simd::math::reduce::{cody_waite, cody_waite_fused};
use crate::simd::F32x8;

/// Overflow, underflow and NaN lanes, applied after the main computation.
#[inline(always)]
fn apply_edges(y: F32x8, x: F32x8, lo: f32) -> F32x8 {
    y.blend(F32x8::splat(f32::INFINITY), x.gt(F32x8::splat(EXP_HI)))
        .blend(F32x8::zero(), x.lt(F32x8::splat(lo)))
        .blend(x, x.is_nan())
}

/// `e^x`, Cephes scheme: `n = floor(x * log2(e) + 0.5)`, polynomial
/// `1 + r + r^2 * P(r)`, and a two-step power-of-two scale that stays exact into the
/// subnormal range.
#[inline(always)]
pub fn exp(x: F32x8) -> F32x8 {
    let one = F32x8::splat(1.0);

    let xc = x.min(F32x8::splat(EXP_HI)).max(F32x8::splat(EXP_LO));

    let fx = (xc * F32x8::splat(LOG2EF) + F32x8::splat(0.5)).floor();
    let r = cody_waite(xc, fx, &EXP_LN2_PARTS);

    let z = r * r;
    let y = horner(r, &EXP_POLY) * z + r + one;

    apply_edges(scale_pow2(y, fx.to_i32_trunc()), x, EXP_LO)
}

/// `e^x`, fused scheme: `n = round(x * log2(e))`, FMA Taylor polynomial and the
/// exponent added straight into the bits of the polynomial value.
///
/// Results that would be subnormal flush to zero.
#[inline(always)]
pub fn exp_fused(x: F32x8) -> F32x8 {
    let xc = x.min(F32x8::splat(EXP_HI)).max(F32x8::splat(EXP_FUSED_LO));

    let fx = (xc * F32x8::splat(LOG2EF)).round();
    let r = cody_waite_fused(xc, fx, &EXP_FUSED_LN2_PARTS);
    let p = horner_fused(r, &EXP_FUSED_POLY);

    // n == 128 does not fit the exponent field; inject 127 and double.
    let top = fx.gt(F32x8::splat(127.0));
    let n = fx.to_i32_trunc().add(top.to_bits());
    let y = inject_exponent(p, n) * F32x8::splat(1.0).blend(F32x8::splat(2.0), top);

    apply_edges(y, x, EXP_FUSED_LO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_interval(kernel: fn(F32x8) -> F32x8, lo: f32, hi: f32, rel_tol: f64) {
        let steps = 4096;
        for block in 0..steps / 8 {
            let xs: [f32; 8] = std::array::from_fn(|lane| {
                let t = (block * 8 + lane) as f32 / (steps - 1) as f32;
                lo + (hi - lo) * t
            });
            let out = kernel(F32x8::from_array(xs)).to_array();
            for (lane, &x) in xs.iter().enumerate() {
                let expected = (x as f64).exp();
                let rel = ((out[lane] as f64 - expected) / expected).abs();
                assert!(rel < rel_tol, "exp({x}) = {} expected {expected}", out[lane]);
            }
        }
    }

    mod cephes_tests {
        use super::*;

        #[test]
        fn test_unit_interval() {
            check_interval(exp, 0.0, 1.0, 2e-7);
        }

        #[test]
        fn test_wide_range() {
            check_interval(exp, -87.0, 88.7, 1e-6);
        }

        #[test]
        fn test_special_values() {
            let x = F32x8::from_array([
                0.0,
                -0.0,
                f32::INFINITY,
                f32::NEG_INFINITY,
                f32::NAN,
                200.0,
                -200.0,
                88.8,
            ]);
            let out = exp(x).to_array();
            assert_eq!(out[0], 1.0);
            assert_eq!(out[1], 1.0);
            assert_eq!(out[2], f32::INFINITY);
            assert_eq!(out[3], 0.0);
            assert!(out[4].is_nan());
            assert_eq!(out[5], f32::INFINITY);
            assert_eq!(out[6], 0.0);
            assert_eq!(out[7], f32::INFINITY);
        }

        #[test]
        fn test_subnormal_results() {
            let x = F32x8::splat(-95.0);
            let expected = (-95.0f64).exp();
            let out = exp(x).to_array()[0] as f64;
            assert!(out > 0.0);
            assert!((out - expected).abs() / expected < 1e-3);
        }
    }

    mod fused_tests {
        use super::*;

        #[test]
        fn test_unit_interval() {
            check_interval(exp_fused, 0.0, 1.0, 5e-7);
        }

        #[test]
        fn test_wide_range() {
            check_interval(exp_fused, -87.0, 88.7, 1e-6);
        }

        #[test]
        fn test_top_of_range() {
            let x = F32x8::from_array([88.0, 88.5, 88.6, 88.7, 88.72, 88.722, 10.0, -10.0]);
            let out = exp_fused(x).to_array();
            for (lane, &x) in x.to_array().iter().enumerate() {
                let expected = (x as f64).exp();
                assert!(out[lane].is_finite(), "lane {lane}");
                assert!(((out[lane] as f64 - expected) / expected).abs() < 1e-6, "lane {lane}");
            }
        }

        #[test]
        fn test_special_values() {
            let x = F32x8::from_array([
                0.0,
                -0.0,
                f32::INFINITY,
                f32::NEG_INFINITY,
                f32::NAN,
                200.0,
                -90.0,
                88.8,
            ]);
            let out = exp_fused(x).to_array();
            assert_eq!(out[0], 1.0);
            assert_eq!(out[1], 1.0);
            assert_eq!(out[2], f32::INFINITY);
            assert_eq!(out[3], 0.0);
            assert!(out[4].is_nan());
            assert_eq!(out[5], f32::INFINITY);
            assert_eq!(out[6], 0.0);
            assert_eq!(out[7], f32::INFINITY);
        }
    }
}
