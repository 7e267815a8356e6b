//! AVX2 8-lane vector types.
//!
//! This module provides the three lane types the kernels are written against:
//!
//! - [`F32x8`]: 8 packed single-precision floats in a `__m256`.
//! - [`I32x8`]: the 32-bit integer view of the same bits in a `__m256i`.
//! - [`Mask8`]: a comparison result; each lane is all-ones (true) or all-zeros (false).
//!
//! Every method is `#[inline(always)]` so that, once inlined into a function compiled
//! with `avx,avx2,fma` enabled, each call lowers to a single instruction.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 and FMA (Intel Haswell and later, AMD Excavator and later)
//! - **Selection**: enabled by the build script through `cfg(avx2)`

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::{Alignment, SimdLoad, SimdStore};

/// AVX2 memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 values.
///
/// ```rust
/// use mathfun::simd::F32x8;
///
/// let v = F32x8::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
/// let doubled = v + v;
/// assert_eq!(doubled.to_array()[7], 16.0);
/// ```
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x8 {
    /// AVX2 256-bit vector register containing 8 packed f32 values
    pub elements: __m256,
}

/// 8 packed 32-bit integers, the bit-pattern view used for exponent and quadrant work.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct I32x8 {
    pub elements: __m256i,
}

/// Per-lane boolean produced by a comparison and consumed by [`F32x8::blend`].
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct Mask8 {
    pub elements: __m256,
}

impl Alignment<f32> for F32x8 {
    /// Checks if a pointer is 32-byte aligned.
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        let ptr = ptr as usize;

        ptr % core::mem::align_of::<__m256>() == 0
    }
}

impl F32x8 {
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_ps(value) },
        }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            elements: unsafe { _mm256_setzero_ps() },
        }
    }

    #[inline(always)]
    pub fn from_array(values: [f32; LANE_COUNT]) -> Self {
        unsafe { Self::load_unaligned(values.as_ptr()) }
    }

    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        unsafe { self.store_unaligned_at(out.as_mut_ptr()) };
        out
    }

    /// Computes `self * a + b` with a single rounding.
    #[inline(always)]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fmadd_ps(self.elements, a.elements, b.elements) },
        }
    }

    /// Computes `b - self * a` with a single rounding.
    #[inline(always)]
    pub fn neg_mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: unsafe { _mm256_fnmadd_ps(self.elements, a.elements, b.elements) },
        }
    }

    /// Lane-wise minimum. Returns `other` when either lane is NaN.
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_min_ps(self.elements, other.elements) },
        }
    }

    /// Lane-wise maximum. Returns `other` when either lane is NaN.
    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_max_ps(self.elements, other.elements) },
        }
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        Self {
            elements: unsafe { _mm256_floor_ps(self.elements) },
        }
    }

    /// Rounds to the nearest integer, ties to even.
    #[inline(always)]
    pub fn round(self) -> Self {
        Self {
            elements: unsafe {
                _mm256_round_ps(self.elements, _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC)
            },
        }
    }

    /// Clears the sign bit of every lane.
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self {
            elements: unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0f32), self.elements) },
        }
    }

    /// Reinterprets the lanes as integers without changing any bit.
    #[inline(always)]
    pub fn to_bits(self) -> I32x8 {
        I32x8 {
            elements: unsafe { _mm256_castps_si256(self.elements) },
        }
    }

    #[inline(always)]
    pub fn from_bits(bits: I32x8) -> Self {
        Self {
            elements: unsafe { _mm256_castsi256_ps(bits.elements) },
        }
    }

    /// Converts to integers using round-to-nearest-even.
    /// NaN and out-of-range lanes become `i32::MIN`.
    #[inline(always)]
    pub fn to_i32_round(self) -> I32x8 {
        I32x8 {
            elements: unsafe { _mm256_cvtps_epi32(self.elements) },
        }
    }

    /// Converts to integers truncating toward zero.
    /// NaN and out-of-range lanes become `i32::MIN`.
    #[inline(always)]
    pub fn to_i32_trunc(self) -> I32x8 {
        I32x8 {
            elements: unsafe { _mm256_cvttps_epi32(self.elements) },
        }
    }

    #[inline(always)]
    pub fn lt(self, other: Self) -> Mask8 {
        Mask8 {
            elements: unsafe { _mm256_cmp_ps(self.elements, other.elements, _CMP_LT_OQ) },
        }
    }

    #[inline(always)]
    pub fn le(self, other: Self) -> Mask8 {
        Mask8 {
            elements: unsafe { _mm256_cmp_ps(self.elements, other.elements, _CMP_LE_OQ) },
        }
    }

    #[inline(always)]
    pub fn gt(self, other: Self) -> Mask8 {
        Mask8 {
            elements: unsafe { _mm256_cmp_ps(self.elements, other.elements, _CMP_GT_OQ) },
        }
    }

    #[inline(always)]
    pub fn ge(self, other: Self) -> Mask8 {
        Mask8 {
            elements: unsafe { _mm256_cmp_ps(self.elements, other.elements, _CMP_GE_OQ) },
        }
    }

    #[inline(always)]
    pub fn eq(self, other: Self) -> Mask8 {
        Mask8 {
            elements: unsafe { _mm256_cmp_ps(self.elements, other.elements, _CMP_EQ_OQ) },
        }
    }

    #[inline(always)]
    pub fn is_nan(self) -> Mask8 {
        Mask8 {
            elements: unsafe { _mm256_cmp_ps(self.elements, self.elements, _CMP_UNORD_Q) },
        }
    }

    /// Returns `other` in lanes where `mask` is set, `self` elsewhere.
    #[inline(always)]
    pub fn blend(self, other: Self, mask: Mask8) -> Self {
        Self {
            elements: unsafe { _mm256_blendv_ps(self.elements, other.elements, mask.elements) },
        }
    }
}

impl I32x8 {
    #[inline(always)]
    pub fn splat(value: i32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_epi32(value) },
        }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            elements: unsafe { _mm256_setzero_si256() },
        }
    }

    #[inline(always)]
    pub fn from_array(values: [i32; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { _mm256_loadu_si256(values.as_ptr() as *const __m256i) },
        }
    }

    #[inline(always)]
    pub fn to_array(self) -> [i32; LANE_COUNT] {
        let mut out = [0i32; LANE_COUNT];
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.elements) };
        out
    }

    /// Wrapping lane-wise addition.
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_add_epi32(self.elements, other.elements) },
        }
    }

    /// Wrapping lane-wise subtraction.
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_sub_epi32(self.elements, other.elements) },
        }
    }

    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_and_si256(self.elements, other.elements) },
        }
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_or_si256(self.elements, other.elements) },
        }
    }

    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_xor_si256(self.elements, other.elements) },
        }
    }

    /// Computes `self & !other`.
    #[inline(always)]
    pub fn and_not(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_andnot_si256(other.elements, self.elements) },
        }
    }

    #[inline(always)]
    pub fn shl<const SHIFT: i32>(self) -> Self {
        Self {
            elements: unsafe { _mm256_slli_epi32::<SHIFT>(self.elements) },
        }
    }

    /// Logical right shift (zero fill).
    #[inline(always)]
    pub fn shr<const SHIFT: i32>(self) -> Self {
        Self {
            elements: unsafe { _mm256_srli_epi32::<SHIFT>(self.elements) },
        }
    }

    /// Arithmetic right shift (sign fill).
    #[inline(always)]
    pub fn shr_arith<const SHIFT: i32>(self) -> Self {
        Self {
            elements: unsafe { _mm256_srai_epi32::<SHIFT>(self.elements) },
        }
    }

    /// Numeric conversion to float (not a bit cast).
    #[inline(always)]
    pub fn to_f32(self) -> F32x8 {
        F32x8 {
            elements: unsafe { _mm256_cvtepi32_ps(self.elements) },
        }
    }

    #[inline(always)]
    pub fn eq(self, other: Self) -> Mask8 {
        Mask8 {
            elements: unsafe {
                _mm256_castsi256_ps(_mm256_cmpeq_epi32(self.elements, other.elements))
            },
        }
    }
}

impl Mask8 {
    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_and_ps(self.elements, other.elements) },
        }
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self {
            elements: unsafe { _mm256_or_ps(self.elements, other.elements) },
        }
    }

    #[inline(always)]
    pub fn not(self) -> Self {
        Self {
            elements: unsafe {
                _mm256_castsi256_ps(_mm256_xor_si256(
                    _mm256_castps_si256(self.elements),
                    _mm256_set1_epi32(-1),
                ))
            },
        }
    }

    /// The raw lane bits: `-1` for true lanes, `0` for false lanes.
    #[inline(always)]
    pub fn to_bits(self) -> I32x8 {
        I32x8 {
            elements: unsafe { _mm256_castps_si256(self.elements) },
        }
    }

    /// Returns `true` for each lane whose mask is set.
    #[inline(always)]
    pub fn to_array(self) -> [bool; LANE_COUNT] {
        let bits = unsafe { _mm256_movemask_ps(self.elements) };
        let mut out = [false; LANE_COUNT];
        for (lane, flag) in out.iter_mut().enumerate() {
            *flag = (bits >> lane) & 1 == 1;
        }
        out
    }
}

impl From<&[f32]> for F32x8 {
    /// Loads a full vector when the slice holds at least 8 elements,
    /// otherwise a zero-padded partial vector.
    fn from(slice: &[f32]) -> Self {
        debug_assert!(!slice.is_empty(), "data pointer can't be NULL");

        let size = slice.len();

        match slice.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { Self::load_partial(slice.as_ptr(), size) },
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load(slice.as_ptr(), LANE_COUNT)
            },
        }
    }
}

/// Lane mask for a partial load or store of `size` elements.
#[inline(always)]
unsafe fn partial_mask(size: usize) -> __m256i {
    match size {
        1 => _mm256_setr_epi32(-1, 0, 0, 0, 0, 0, 0, 0),
        2 => _mm256_setr_epi32(-1, -1, 0, 0, 0, 0, 0, 0),
        3 => _mm256_setr_epi32(-1, -1, -1, 0, 0, 0, 0, 0),
        4 => _mm256_setr_epi32(-1, -1, -1, -1, 0, 0, 0, 0),
        5 => _mm256_setr_epi32(-1, -1, -1, -1, -1, 0, 0, 0),
        6 => _mm256_setr_epi32(-1, -1, -1, -1, -1, -1, 0, 0),
        7 => _mm256_setr_epi32(-1, -1, -1, -1, -1, -1, -1, 0),
        _ => unreachable!(),
    }
}

impl SimdLoad<f32> for F32x8 {
    type Output = Self;

    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => unsafe { Self::load_aligned(ptr) },
            false => unsafe { Self::load_unaligned(ptr) },
        }
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Masked load; lanes past `size` read as zero and memory past `size` is not touched.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self::Output {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_maskload_ps(ptr, partial_mask(size)),
        }
    }
}

impl SimdStore<f32> for F32x8 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F32x8::is_aligned(ptr) {
            true => unsafe { self.store_aligned_at(ptr) },
            false => unsafe { self.store_unaligned_at(ptr) },
        }
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        _mm256_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32, size: usize) {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_maskstore_ps(ptr, partial_mask(size), self.elements)
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_div_ps(self.elements, rhs.elements) },
        }
    }
}
