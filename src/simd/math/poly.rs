//! Fixed-degree Horner evaluation. Tables are ordered highest degree first.

use crate::simd::F32x8;

/// Horner scheme with a separate multiply and add per step.
#[inline(always)]
pub fn horner<const N: usize>(x: F32x8, coefficients: &[f32; N]) -> F32x8 {
    let mut acc = F32x8::splat(coefficients[0]);
    for &c in &coefficients[1..] {
        acc = acc * x + F32x8::splat(c);
    }
    acc
}

/// Horner scheme with one fused multiply-add per step.
#[inline(always)]
pub fn horner_fused<const N: usize>(x: F32x8, coefficients: &[f32; N]) -> F32x8 {
    let mut acc = F32x8::splat(coefficients[0]);
    for &c in &coefficients[1..] {
        acc = acc.mul_add(x, F32x8::splat(c));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horner_matches_expanded_polynomial() {
        // 2x^3 - 3x^2 + 0.5x + 4
        let coefficients = [2.0f32, -3.0, 0.5, 4.0];
        let xs = [0.0f32, 1.0, -1.0, 0.5, 2.0, -2.0, 0.25, 3.0];
        let x = F32x8::from_array(xs);

        let plain = horner(x, &coefficients).to_array();
        let fused = horner_fused(x, &coefficients).to_array();

        for (lane, &v) in xs.iter().enumerate() {
            let expected = 2.0 * v * v * v - 3.0 * v * v + 0.5 * v + 4.0;
            assert_eq!(plain[lane], expected, "lane {lane}");
            assert_eq!(fused[lane], expected, "lane {lane}");
        }
    }

    #[test]
    fn test_single_coefficient_is_constant() {
        let x = F32x8::splat(123.0);
        assert_eq!(horner(x, &[7.5]).to_array(), [7.5; 8]);
    }
}
