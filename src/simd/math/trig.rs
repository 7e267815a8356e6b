//! Sine and cosine kernels.
//!
//! The argument is reduced to `r` in `[-π/4, π/4]` around a multiple `k` of π/4
//! (`Cephes`) or π/2 (`Fused`). Both polynomials are evaluated on `r`; the low bits of
//! `k` pick one per lane and decide the sign, which is XOR-ed into the result.

use crate::simd::math::consts::{
    COS_FUSED_POLY, COS_POLY, DP_PARTS, PIO2_PARTS, SIN_FUSED_POLY, SIN_POLY,
};
use crate::simd::math::poly::{horner, horner_fused};
use crate::simd::math::reconstruct::{finish_trig, flip_sign};
use crate::simd::math::reduce::{cody_waite, cody_waite_fused, octant, quadrant};
use crate::simd::{F32x8, I32x8, Mask8};

/// Octant reduction shared by the Cephes kernels.
struct Octant {
    /// Even octant index.
    j: I32x8,
    sin_poly: F32x8,
    cos_poly: F32x8,
    /// Lanes where the sine polynomial gives `sin(x)`.
    sin_lanes: Mask8,
}

#[inline(always)]
fn reduce_octant(x_abs: F32x8) -> Octant {
    let (jf, j) = octant(x_abs);
    let r = cody_waite(x_abs, jf, &DP_PARTS);
    let z = r * r;

    let cos_poly = horner(z, &COS_POLY) * z * z - z * F32x8::splat(0.5) + F32x8::splat(1.0);
    let sin_poly = horner(z, &SIN_POLY) * z * r + r;

    Octant {
        j,
        sin_poly,
        cos_poly,
        sin_lanes: j.and(I32x8::splat(2)).eq(I32x8::zero()),
    }
}

#[inline(always)]
fn sign_mask() -> I32x8 {
    I32x8::splat(i32::MIN)
}

/// Cephes `sin`: the sign comes from the input sign and bit 2 of the octant.
#[inline(always)]
pub fn sin(x: F32x8) -> F32x8 {
    let reduced = reduce_octant(x.abs());
    let sign = x
        .to_bits()
        .and(sign_mask())
        .xor(reduced.j.and(I32x8::splat(4)).shl::<29>());

    let y = reduced.cos_poly.blend(reduced.sin_poly, reduced.sin_lanes);
    finish_trig(flip_sign(y, sign), x)
}

/// Cephes `cos`: octant index shifted back by two, sign from bit 2 of `!(j - 2)`.
#[inline(always)]
pub fn cos(x: F32x8) -> F32x8 {
    let reduced = reduce_octant(x.abs());
    let sign = cos_sign(reduced.j);

    let y = reduced.sin_poly.blend(reduced.cos_poly, reduced.sin_lanes);
    finish_trig(flip_sign(y, sign), x)
}

#[inline(always)]
fn cos_sign(j: I32x8) -> I32x8 {
    I32x8::splat(4)
        .and_not(j.sub(I32x8::splat(2)))
        .shl::<29>()
}

/// Cephes `sin` and `cos` from one reduction.
#[inline(always)]
pub fn sincos(x: F32x8) -> (F32x8, F32x8) {
    let reduced = reduce_octant(x.abs());
    let sin_sign = x
        .to_bits()
        .and(sign_mask())
        .xor(reduced.j.and(I32x8::splat(4)).shl::<29>());
    let cos_sign = cos_sign(reduced.j);

    let s = reduced.cos_poly.blend(reduced.sin_poly, reduced.sin_lanes);
    let c = reduced.sin_poly.blend(reduced.cos_poly, reduced.sin_lanes);
    (
        finish_trig(flip_sign(s, sin_sign), x),
        finish_trig(flip_sign(c, cos_sign), x),
    )
}

/// Quadrant reduction shared by the fused kernels.
struct Quadrant {
    k: I32x8,
    sin_poly: F32x8,
    cos_poly: F32x8,
}

#[inline(always)]
fn reduce_quadrant(x: F32x8) -> Quadrant {
    let (kf, k) = quadrant(x);
    let r = cody_waite_fused(x, kf, &PIO2_PARTS);
    let z = r * r;

    Quadrant {
        k,
        sin_poly: (r * z).mul_add(horner_fused(z, &SIN_FUSED_POLY), r),
        cos_poly: horner_fused(z, &COS_FUSED_POLY),
    }
}

/// `sin(x + k * π/2)` from the two polynomials of `x`.
#[inline(always)]
fn select_quadrant(reduced: &Quadrant, k: I32x8) -> F32x8 {
    let odd = k.and(I32x8::splat(1)).eq(I32x8::splat(1));
    let y = reduced.sin_poly.blend(reduced.cos_poly, odd);
    flip_sign(y, k.and(I32x8::splat(2)).shl::<30>())
}

/// Zero lanes return `x` itself; the fused reduction turns `-0.0` into `+0.0`.
#[inline(always)]
fn keep_signed_zero(y: F32x8, x: F32x8) -> F32x8 {
    y.blend(x, x.eq(F32x8::zero()))
}

/// Fused `sin`.
#[inline(always)]
pub fn sin_fused(x: F32x8) -> F32x8 {
    let reduced = reduce_quadrant(x);
    keep_signed_zero(finish_trig(select_quadrant(&reduced, reduced.k), x), x)
}

/// Fused `cos`, evaluated as `sin` one quadrant further on.
#[inline(always)]
pub fn cos_fused(x: F32x8) -> F32x8 {
    let reduced = reduce_quadrant(x);
    let k = reduced.k.add(I32x8::splat(1));
    finish_trig(select_quadrant(&reduced, k), x)
}

/// Fused `sin` and `cos` from one reduction.
#[inline(always)]
pub fn sincos_fused(x: F32x8) -> (F32x8, F32x8) {
    let reduced = reduce_quadrant(x);
    let s = select_quadrant(&reduced, reduced.k);
    let c = select_quadrant(&reduced, reduced.k.add(I32x8::splat(1)));
    (keep_signed_zero(finish_trig(s, x), x), finish_trig(c, x))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Kernel = fn(F32x8) -> F32x8;

    fn max_error(kernel: Kernel, reference: fn(f64) -> f64, lo: f32, hi: f32) -> f64 {
        let steps = 8192;
        let mut worst = 0.0f64;
        for block in 0..steps / 8 {
            let xs: [f32; 8] = std::array::from_fn(|lane| {
                let t = (block * 8 + lane) as f64 / (steps - 1) as f64;
                (lo as f64 + (hi - lo) as f64 * t) as f32
            });
            let out = kernel(F32x8::from_array(xs)).to_array();
            for (lane, &x) in xs.iter().enumerate() {
                worst = worst.max((out[lane] as f64 - reference(x as f64)).abs());
            }
        }
        worst
    }

    fn check_kernel_pair(sin: Kernel, cos: Kernel) {
        assert!(max_error(sin, f64::sin, 0.0, 1.0) < 2e-7);
        assert!(max_error(cos, f64::cos, 0.0, 1.0) < 2e-7);
        assert!(max_error(sin, f64::sin, -100.0, 100.0) < 5e-7);
        assert!(max_error(cos, f64::cos, -100.0, 100.0) < 5e-7);
        assert!(max_error(sin, f64::sin, -8192.0, 8192.0) < 1e-6);
        assert!(max_error(cos, f64::cos, -8192.0, 8192.0) < 1e-6);
    }

    fn check_special_values(sin: Kernel, cos: Kernel) {
        let x = F32x8::from_array([
            0.0,
            -0.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            1e10,
            -3e9,
            1e30,
        ]);
        let s = sin(x).to_array();
        let c = cos(x).to_array();

        assert_eq!(s[0].to_bits(), 0.0f32.to_bits());
        assert_eq!(s[1], 0.0);
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 1.0);
        for lane in 2..5 {
            assert!(s[lane].is_nan() && c[lane].is_nan(), "lane {lane}");
        }
        for lane in 5..8 {
            assert!((-1.0..=1.0).contains(&s[lane]), "lane {lane}: {}", s[lane]);
            assert!((-1.0..=1.0).contains(&c[lane]), "lane {lane}: {}", c[lane]);
        }
    }

    mod cephes_tests {
        use super::*;

        #[test]
        fn test_accuracy() {
            check_kernel_pair(sin, cos);
        }

        #[test]
        fn test_special_values() {
            check_special_values(sin, cos);
        }

        #[test]
        fn test_sin_keeps_sign_of_negative_zero() {
            let out = sin(F32x8::splat(-0.0)).to_array();
            assert_eq!(out[0].to_bits(), (-0.0f32).to_bits());
        }

        #[test]
        fn test_sincos_matches_separate_calls() {
            let x = F32x8::from_array([-5.0, -1.0, 0.0, 0.5, 1.5, 3.0, 10.0, 1000.0]);
            let (s, c) = sincos(x);
            assert_eq!(s.to_array().map(f32::to_bits), sin(x).to_array().map(f32::to_bits));
            assert_eq!(c.to_array().map(f32::to_bits), cos(x).to_array().map(f32::to_bits));
        }
    }

    mod fused_tests {
        use super::*;

        #[test]
        fn test_accuracy() {
            check_kernel_pair(sin_fused, cos_fused);
        }

        #[test]
        fn test_special_values() {
            check_special_values(sin_fused, cos_fused);
        }

        #[test]
        fn test_sin_keeps_sign_of_negative_zero() {
            let x = F32x8::from_array([-0.0, 0.0, -0.0, -1e-30, 1e-30, -0.0, 0.0, -0.0]);
            let s = sin_fused(x).to_array();
            let (joint, c) = sincos_fused(x);
            for (lane, &v) in x.to_array().iter().enumerate() {
                assert_eq!(s[lane].to_bits(), v.to_bits(), "lane {lane}");
                assert_eq!(s[lane].to_bits(), sin(x).to_array()[lane].to_bits(), "lane {lane}");
                assert_eq!(joint.to_array()[lane].to_bits(), v.to_bits(), "lane {lane}");
                assert_eq!(c.to_array()[lane], 1.0, "lane {lane}");
            }
        }

        #[test]
        fn test_sincos_matches_separate_calls() {
            let x = F32x8::from_array([-5.0, -1.0, 0.0, 0.5, 1.5, 3.0, 10.0, 1000.0]);
            let (s, c) = sincos_fused(x);
            assert_eq!(
                s.to_array().map(f32::to_bits),
                sin_fused(x).to_array().map(f32::to_bits)
            );
            assert_eq!(
                c.to_array().map(f32::to_bits),
                cos_fused(x).to_array().map(f32::to_bits)
            );
        }
    }
}
