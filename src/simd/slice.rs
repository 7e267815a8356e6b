//! Slice front-end: runs a kernel over buffers of any length.
//!
//! Full 8-lane blocks go straight through the kernel; a trailing block of fewer than
//! 8 elements is loaded and stored with masked partial operations, so no element past
//! the end of either buffer is touched. [`par_map`] splits large inputs into
//! independent rayon chunks.

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{alignment_error, validation_error, Result};
use crate::simd::math::{exp, ln, trig, Function, Strategy};
use crate::simd::traits::{Alignment, SimdCos, SimdExp, SimdLn, SimdLoad, SimdSin, SimdStore};
use crate::simd::{F32x8, AVX_ALIGNMENT, LANE_COUNT};
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD};

/// Calls `$call(args..., kernel)` with the kernel for `($function, $strategy)`.
///
/// Kernels are passed as fn items so they inline into the target-feature function.
macro_rules! with_kernel {
    ($function:expr, $strategy:expr, $call:ident($($arg:expr),*)) => {
        match ($function, $strategy) {
            (Function::Exp, Strategy::Cephes) => $call($($arg,)* exp::exp),
            (Function::Exp, Strategy::Fused) => $call($($arg,)* exp::exp_fused),
            (Function::Ln, Strategy::Cephes) => $call($($arg,)* ln::ln),
            (Function::Ln, Strategy::Fused) => $call($($arg,)* ln::ln_fused),
            (Function::Sin, Strategy::Cephes) => $call($($arg,)* trig::sin),
            (Function::Sin, Strategy::Fused) => $call($($arg,)* trig::sin_fused),
            (Function::Cos, Strategy::Cephes) => $call($($arg,)* trig::cos),
            (Function::Cos, Strategy::Fused) => $call($($arg,)* trig::cos_fused),
        }
    };
}

/// # Safety
///
/// `input` and `output` must have the same length. With the `avx2` backend the CPU
/// must support AVX2 and FMA, which the build script checked on this host.
#[cfg_attr(avx2, target_feature(enable = "avx,avx2,fma"))]
unsafe fn map_chunk<K: Fn(F32x8) -> F32x8>(input: &[f32], output: &mut [f32], kernel: K) {
    debug_assert_eq!(input.len(), output.len());

    let size = input.len();
    let nb_lanes = size - (size % LANE_COUNT);
    let rem_lanes = size - nb_lanes;

    let a = input.as_ptr();
    let c = output.as_mut_ptr();

    for i in (0..nb_lanes).step_by(LANE_COUNT) {
        let block = F32x8::load(a.add(i), LANE_COUNT);
        kernel(block).store_at(c.add(i));
    }

    if rem_lanes > 0 {
        let block = F32x8::load_partial(a.add(nb_lanes), rem_lanes);
        kernel(block).store_at_partial(c.add(nb_lanes), rem_lanes);
    }
}

/// # Safety
///
/// As [`map_chunk`], plus both pointers 32-byte aligned and the length a multiple of 8.
#[cfg_attr(avx2, target_feature(enable = "avx,avx2,fma"))]
unsafe fn map_aligned_chunk<K: Fn(F32x8) -> F32x8>(
    input: &[f32],
    output: &mut [f32],
    kernel: K,
) {
    let a = input.as_ptr();
    let c = output.as_mut_ptr();

    for i in (0..input.len()).step_by(LANE_COUNT) {
        let block = F32x8::load_aligned(a.add(i));
        kernel(block).store_aligned_at(c.add(i));
    }
}

#[cfg_attr(avx2, target_feature(enable = "avx,avx2,fma"))]
unsafe fn sincos_chunk(input: &[f32], sin_out: &mut [f32], cos_out: &mut [f32], strategy: Strategy) {
    let size = input.len();
    let nb_lanes = size - (size % LANE_COUNT);
    let rem_lanes = size - nb_lanes;

    let a = input.as_ptr();
    let s = sin_out.as_mut_ptr();
    let c = cos_out.as_mut_ptr();

    for i in (0..nb_lanes).step_by(LANE_COUNT) {
        let (sin, cos) = strategy.sincos(F32x8::load(a.add(i), LANE_COUNT));
        sin.store_at(s.add(i));
        cos.store_at(c.add(i));
    }

    if rem_lanes > 0 {
        let block = F32x8::load_partial(a.add(nb_lanes), rem_lanes);
        let (sin, cos) = strategy.sincos(block);
        sin.store_at_partial(s.add(nb_lanes), rem_lanes);
        cos.store_at_partial(c.add(nb_lanes), rem_lanes);
    }
}

#[inline(always)]
fn run(input: &[f32], output: &mut [f32], function: Function, strategy: Strategy) {
    // SAFETY: lengths are equal at every call site and the backend cfg guarantees
    // the target features.
    unsafe { with_kernel!(function, strategy, map_chunk(input, output)) }
}

/// Applies `function` to every element of `input` on the current thread.
pub fn map(input: &[f32], function: Function, strategy: Strategy) -> Vec<f32> {
    let mut output = vec![0.0f32; input.len()];
    run(input, &mut output, function, strategy);
    output
}

/// [`map`] over rayon chunks of [`PARALLEL_CHUNK_SIZE`] elements.
///
/// Inputs shorter than [`PARALLEL_SIMD_THRESHOLD`] are processed on the calling thread.
pub fn par_map(input: &[f32], function: Function, strategy: Strategy) -> Vec<f32> {
    if input.len() < PARALLEL_SIMD_THRESHOLD {
        debug!(
            "{function}/{strategy}: {} elements below parallel threshold {PARALLEL_SIMD_THRESHOLD}, running single-threaded",
            input.len()
        );
        return map(input, function, strategy);
    }

    trace!(
        "{function}/{strategy}: {} elements in {} chunks of {PARALLEL_CHUNK_SIZE}",
        input.len(),
        input.len().div_ceil(PARALLEL_CHUNK_SIZE)
    );

    let mut output = vec![0.0f32; input.len()];

    output
        .par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .zip(input.par_chunks(PARALLEL_CHUNK_SIZE))
        .for_each(|(c_chunk, a_chunk)| run(a_chunk, c_chunk, function, strategy));

    output
}

/// Writes `function(input[i])` into `output[i]`.
///
/// # Errors
///
/// [`crate::MathfunError::ValidationError`] when the lengths differ.
pub fn map_into(
    input: &[f32],
    output: &mut [f32],
    function: Function,
    strategy: Strategy,
) -> Result<()> {
    if input.len() != output.len() {
        return Err(validation_error(format!(
            "input and output lengths differ: {} vs {}",
            input.len(),
            output.len()
        )));
    }

    run(input, output, function, strategy);
    Ok(())
}

/// Aligned-only variant of [`map_into`]: every load and store is a full aligned one.
///
/// # Errors
///
/// - [`crate::MathfunError::ValidationError`] when the lengths differ or are not a
///   multiple of 8
/// - [`crate::MathfunError::AlignmentError`] when either buffer is not 32-byte aligned
pub fn map_aligned(
    input: &[f32],
    output: &mut [f32],
    function: Function,
    strategy: Strategy,
) -> Result<()> {
    if input.len() != output.len() {
        return Err(validation_error(format!(
            "input and output lengths differ: {} vs {}",
            input.len(),
            output.len()
        )));
    }

    if input.len() % LANE_COUNT != 0 {
        return Err(validation_error(format!(
            "length {} is not a multiple of {LANE_COUNT}",
            input.len()
        )));
    }

    if !F32x8::is_aligned(input.as_ptr()) {
        return Err(alignment_error(input.as_ptr(), AVX_ALIGNMENT));
    }

    if !F32x8::is_aligned(output.as_ptr()) {
        return Err(alignment_error(output.as_ptr(), AVX_ALIGNMENT));
    }

    // SAFETY: lengths, alignment and the lane multiple are checked above.
    unsafe { with_kernel!(function, strategy, map_aligned_chunk(input, output)) }
    Ok(())
}

/// `sin` and `cos` of every element, sharing one argument reduction per block.
pub fn map_sincos(input: &[f32], strategy: Strategy) -> (Vec<f32>, Vec<f32>) {
    let mut sin_out = vec![0.0f32; input.len()];
    let mut cos_out = vec![0.0f32; input.len()];
    // SAFETY: all three buffers have the same length.
    unsafe { sincos_chunk(input, &mut sin_out, &mut cos_out, strategy) };
    (sin_out, cos_out)
}

/// Element-wise `f32` standard library result, the baseline the SIMD paths replace.
pub fn scalar_map(input: &[f32], function: Function) -> Vec<f32> {
    input.iter().map(|&x| function.scalar(x)).collect()
}

macro_rules! impl_slice_trait {
    ($trait:ident, $function:expr, $simd:ident, $par:ident, $scalar:ident) => {
        impl $trait<&[f32]> for &[f32] {
            type Output = Vec<f32>;

            #[inline(always)]
            fn $simd(self) -> Self::Output {
                assert!(!self.is_empty(), "Size can't be empty (size zero)");
                map(self, $function, Strategy::Cephes)
            }

            #[inline(always)]
            fn $par(self) -> Self::Output {
                assert!(!self.is_empty(), "Size can't be empty (size zero)");
                par_map(self, $function, Strategy::Cephes)
            }

            #[inline(always)]
            fn $scalar(self) -> Self::Output {
                assert!(!self.is_empty(), "Size can't be empty (size zero)");
                scalar_map(self, $function)
            }
        }

        impl $trait<Vec<f32>> for Vec<f32> {
            type Output = Vec<f32>;

            #[inline(always)]
            fn $simd(self) -> Self::Output {
                self.as_slice().$simd()
            }

            #[inline(always)]
            fn $par(self) -> Self::Output {
                self.as_slice().$par()
            }

            #[inline(always)]
            fn $scalar(self) -> Self::Output {
                self.as_slice().$scalar()
            }
        }
    };
}

impl_slice_trait!(SimdExp, Function::Exp, simd_exp, par_simd_exp, scalar_exp);
impl_slice_trait!(SimdLn, Function::Ln, simd_ln, par_simd_ln, scalar_ln);
impl_slice_trait!(SimdSin, Function::Sin, simd_sin, par_simd_sin, scalar_sin);
impl_slice_trait!(SimdCos, Function::Cos, simd_cos, par_simd_cos, scalar_cos);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AlignedVec;
    use crate::MathfunError;

    fn inputs(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 * 0.37).sin() * 3.0 + 0.5).collect()
    }

    fn assert_matches_scalar(output: &[f32], input: &[f32], function: Function) {
        assert_eq!(output.len(), input.len());
        for (i, (&y, &x)) in output.iter().zip(input).enumerate() {
            let expected = function.reference(x as f64);
            if expected.is_nan() {
                assert!(y.is_nan(), "{function}({x}) at {i}");
            } else {
                let scale = expected.abs().max(1.0);
                assert!(
                    (y as f64 - expected).abs() / scale < 1e-6,
                    "{function}({x}) at {i}: {y} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn test_map_all_tail_lengths() {
        for len in 0..=17 {
            let input = inputs(len);
            for function in Function::ALL {
                for strategy in Strategy::ALL {
                    let output = map(&input, function, strategy);
                    assert_matches_scalar(&output, &input, function);
                }
            }
        }
    }

    #[test]
    fn test_partial_store_stays_in_bounds() {
        let input = inputs(11);
        let mut output = vec![f32::NAN; 16];
        map_into(&input, &mut output[..11], Function::Exp, Strategy::Cephes).unwrap();
        assert!(output[11..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_map_into_length_mismatch() {
        let input = inputs(8);
        let mut output = vec![0.0; 16];
        let err = map_into(&input, &mut output, Function::Sin, Strategy::Fused).unwrap_err();
        assert!(matches!(err, MathfunError::ValidationError { .. }));
    }

    #[test]
    fn test_map_aligned() {
        let input = AlignedVec::from_slice(&inputs(64)).unwrap();
        let mut output = AlignedVec::new_zeroed(64).unwrap();
        map_aligned(&input, &mut output, Function::Cos, Strategy::Cephes).unwrap();
        assert_matches_scalar(&output, &input, Function::Cos);
    }

    #[test]
    fn test_map_aligned_rejects_bad_buffers() {
        let input = AlignedVec::from_slice(&inputs(32)).unwrap();
        let mut output = AlignedVec::new_zeroed(32).unwrap();

        let err = map_aligned(&input[..12], &mut output[..12], Function::Exp, Strategy::Cephes)
            .unwrap_err();
        assert!(matches!(err, MathfunError::ValidationError { .. }));

        let err = map_aligned(&input[1..9], &mut output[..8], Function::Exp, Strategy::Cephes)
            .unwrap_err();
        assert!(matches!(err, MathfunError::AlignmentError { alignment: 32, .. }));

        let err = map_aligned(&input[..8], &mut output[1..9], Function::Exp, Strategy::Cephes)
            .unwrap_err();
        assert!(matches!(err, MathfunError::AlignmentError { .. }));
    }

    #[test]
    fn test_par_map_matches_map() {
        let input = inputs(PARALLEL_SIMD_THRESHOLD + 1003);
        for strategy in Strategy::ALL {
            let sequential = map(&input, Function::Ln, strategy);
            let parallel = par_map(&input, Function::Ln, strategy);
            assert_eq!(
                sequential.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
                parallel.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_map_sincos() {
        let input = inputs(29);
        for strategy in Strategy::ALL {
            let (s, c) = map_sincos(&input, strategy);
            assert_eq!(s, map(&input, Function::Sin, strategy));
            assert_eq!(c, map(&input, Function::Cos, strategy));
        }
    }

    #[test]
    fn test_slice_traits() {
        let input = inputs(21);
        assert_matches_scalar(&input.as_slice().simd_exp(), &input, Function::Exp);
        assert_matches_scalar(&input.clone().par_simd_sin(), &input, Function::Sin);
        assert_eq!(input.as_slice().scalar_cos(), scalar_map(&input, Function::Cos));
    }

    #[test]
    #[should_panic(expected = "Size can't be empty")]
    fn test_slice_trait_rejects_empty() {
        let empty: &[f32] = &[];
        empty.simd_ln();
    }
}
