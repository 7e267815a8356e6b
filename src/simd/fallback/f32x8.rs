//! Portable 8-lane vector types.
//!
//! Same method set as the AVX2 backend, implemented on plain arrays. Where the kernels
//! depend on x86 behaviour the lanes follow it: `min`/`max` return the second operand
//! on unordered lanes, out-of-range or NaN float to int conversions yield `i32::MIN`,
//! rounding is ties-to-even and `blend` keys off the sign bit of each mask lane.

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::{Alignment, SimdLoad, SimdStore};

pub(crate) const AVX_ALIGNMENT: usize = 32;

pub(crate) const LANE_COUNT: usize = 8;

/// 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
#[repr(C, align(32))]
pub struct F32x8 {
    pub elements: [f32; LANE_COUNT],
}

/// 8 packed 32-bit integers, the bit-pattern view of [`F32x8`].
#[derive(Copy, Clone, Debug)]
#[repr(C, align(32))]
pub struct I32x8 {
    pub elements: [i32; LANE_COUNT],
}

/// Per-lane boolean; true lanes are `-1`, false lanes `0`.
#[derive(Copy, Clone, Debug)]
#[repr(C, align(32))]
pub struct Mask8 {
    pub elements: [i32; LANE_COUNT],
}

#[inline(always)]
fn map_f32(a: [f32; LANE_COUNT], f: impl Fn(f32) -> f32) -> [f32; LANE_COUNT] {
    a.map(f)
}

#[inline(always)]
fn zip_f32(
    a: [f32; LANE_COUNT],
    b: [f32; LANE_COUNT],
    f: impl Fn(f32, f32) -> f32,
) -> [f32; LANE_COUNT] {
    std::array::from_fn(|lane| f(a[lane], b[lane]))
}

#[inline(always)]
fn zip_i32(
    a: [i32; LANE_COUNT],
    b: [i32; LANE_COUNT],
    f: impl Fn(i32, i32) -> i32,
) -> [i32; LANE_COUNT] {
    std::array::from_fn(|lane| f(a[lane], b[lane]))
}

#[inline(always)]
fn compare(a: [f32; LANE_COUNT], b: [f32; LANE_COUNT], f: impl Fn(f32, f32) -> bool) -> Mask8 {
    Mask8 {
        elements: std::array::from_fn(|lane| -(f(a[lane], b[lane]) as i32)),
    }
}

/// `cvtps2dq` / `cvttps2dq` behaviour: the integer indefinite value for anything
/// that does not fit.
#[inline(always)]
fn convert_to_i32(value: f32) -> i32 {
    if value.is_nan() || value >= 2_147_483_648.0 || value < -2_147_483_648.0 {
        i32::MIN
    } else {
        value as i32
    }
}

impl Alignment<f32> for F32x8 {
    #[inline(always)]
    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }
}

impl F32x8 {
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    pub fn from_array(values: [f32; LANE_COUNT]) -> Self {
        Self { elements: values }
    }

    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        self.elements
    }

    /// Computes `self * a + b` with a single rounding.
    #[inline(always)]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: std::array::from_fn(|lane| {
                self.elements[lane].mul_add(a.elements[lane], b.elements[lane])
            }),
        }
    }

    /// Computes `b - self * a` with a single rounding.
    #[inline(always)]
    pub fn neg_mul_add(self, a: Self, b: Self) -> Self {
        Self {
            elements: std::array::from_fn(|lane| {
                (-self.elements[lane]).mul_add(a.elements[lane], b.elements[lane])
            }),
        }
    }

    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        Self {
            elements: zip_f32(self.elements, other.elements, |a, b| if a < b { a } else { b }),
        }
    }

    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        Self {
            elements: zip_f32(self.elements, other.elements, |a, b| if a > b { a } else { b }),
        }
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        Self {
            elements: map_f32(self.elements, f32::floor),
        }
    }

    #[inline(always)]
    pub fn round(self) -> Self {
        Self {
            elements: map_f32(self.elements, f32::round_ties_even),
        }
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        Self {
            elements: map_f32(self.elements, f32::abs),
        }
    }

    #[inline(always)]
    pub fn to_bits(self) -> I32x8 {
        I32x8 {
            elements: self.elements.map(|v| v.to_bits() as i32),
        }
    }

    #[inline(always)]
    pub fn from_bits(bits: I32x8) -> Self {
        Self {
            elements: bits.elements.map(|b| f32::from_bits(b as u32)),
        }
    }

    #[inline(always)]
    pub fn to_i32_round(self) -> I32x8 {
        I32x8 {
            elements: self
                .elements
                .map(|v| convert_to_i32(v.round_ties_even())),
        }
    }

    #[inline(always)]
    pub fn to_i32_trunc(self) -> I32x8 {
        I32x8 {
            elements: self.elements.map(|v| convert_to_i32(v.trunc())),
        }
    }

    #[inline(always)]
    pub fn lt(self, other: Self) -> Mask8 {
        compare(self.elements, other.elements, |a, b| a < b)
    }

    #[inline(always)]
    pub fn le(self, other: Self) -> Mask8 {
        compare(self.elements, other.elements, |a, b| a <= b)
    }

    #[inline(always)]
    pub fn gt(self, other: Self) -> Mask8 {
        compare(self.elements, other.elements, |a, b| a > b)
    }

    #[inline(always)]
    pub fn ge(self, other: Self) -> Mask8 {
        compare(self.elements, other.elements, |a, b| a >= b)
    }

    #[inline(always)]
    pub fn eq(self, other: Self) -> Mask8 {
        compare(self.elements, other.elements, |a, b| a == b)
    }

    #[inline(always)]
    pub fn is_nan(self) -> Mask8 {
        compare(self.elements, self.elements, |a, _| a.is_nan())
    }

    /// Returns `other` in lanes where `mask` is set, `self` elsewhere.
    #[inline(always)]
    pub fn blend(self, other: Self, mask: Mask8) -> Self {
        Self {
            elements: std::array::from_fn(|lane| {
                if mask.elements[lane] < 0 {
                    other.elements[lane]
                } else {
                    self.elements[lane]
                }
            }),
        }
    }
}

impl I32x8 {
    #[inline(always)]
    pub fn splat(value: i32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(0)
    }

    #[inline(always)]
    pub fn from_array(values: [i32; LANE_COUNT]) -> Self {
        Self { elements: values }
    }

    #[inline(always)]
    pub fn to_array(self) -> [i32; LANE_COUNT] {
        self.elements
    }

    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, i32::wrapping_add),
        }
    }

    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, i32::wrapping_sub),
        }
    }

    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, |a, b| a & b),
        }
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, |a, b| a | b),
        }
    }

    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, |a, b| a ^ b),
        }
    }

    /// Computes `self & !other`.
    #[inline(always)]
    pub fn and_not(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, |a, b| a & !b),
        }
    }

    #[inline(always)]
    pub fn shl<const SHIFT: i32>(self) -> Self {
        Self {
            elements: self.elements.map(|v| ((v as u32) << SHIFT) as i32),
        }
    }

    #[inline(always)]
    pub fn shr<const SHIFT: i32>(self) -> Self {
        Self {
            elements: self.elements.map(|v| ((v as u32) >> SHIFT) as i32),
        }
    }

    #[inline(always)]
    pub fn shr_arith<const SHIFT: i32>(self) -> Self {
        Self {
            elements: self.elements.map(|v| v >> SHIFT),
        }
    }

    #[inline(always)]
    pub fn to_f32(self) -> F32x8 {
        F32x8 {
            elements: self.elements.map(|v| v as f32),
        }
    }

    #[inline(always)]
    pub fn eq(self, other: Self) -> Mask8 {
        Mask8 {
            elements: zip_i32(self.elements, other.elements, |a, b| -((a == b) as i32)),
        }
    }
}

impl Mask8 {
    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, |a, b| a & b),
        }
    }

    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self {
            elements: zip_i32(self.elements, other.elements, |a, b| a | b),
        }
    }

    #[inline(always)]
    pub fn not(self) -> Self {
        Self {
            elements: self.elements.map(|v| !v),
        }
    }

    #[inline(always)]
    pub fn to_bits(self) -> I32x8 {
        I32x8 {
            elements: self.elements,
        }
    }

    #[inline(always)]
    pub fn to_array(self) -> [bool; LANE_COUNT] {
        self.elements.map(|v| v < 0)
    }
}

impl From<&[f32]> for F32x8 {
    fn from(slice: &[f32]) -> Self {
        debug_assert!(!slice.is_empty(), "data pointer can't be NULL");

        match slice.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { Self::load_partial(slice.as_ptr(), slice.len()) },
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load(slice.as_ptr(), LANE_COUNT)
            },
        }
    }
}

impl SimdLoad<f32> for F32x8 {
    type Output = Self;

    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Output {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        Self::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            elements: std::ptr::read_unaligned(ptr as *const [f32; LANE_COUNT]),
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self::Output {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        let mut elements = [0.0f32; LANE_COUNT];
        std::ptr::copy_nonoverlapping(ptr, elements.as_mut_ptr(), size);
        Self { elements }
    }
}

impl SimdStore<f32> for F32x8 {
    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        self.store_unaligned_at(ptr)
    }

    #[inline(always)]
    unsafe fn store_aligned_at(&self, ptr: *mut f32) {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        self.store_unaligned_at(ptr)
    }

    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        std::ptr::write_unaligned(ptr as *mut [f32; LANE_COUNT], self.elements)
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32, size: usize) {
        debug_assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        std::ptr::copy_nonoverlapping(self.elements.as_ptr(), ptr, size);
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: zip_f32(self.elements, rhs.elements, |a, b| a + b),
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: zip_f32(self.elements, rhs.elements, |a, b| a - b),
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: zip_f32(self.elements, rhs.elements, |a, b| a * b),
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: zip_f32(self.elements, rhs.elements, |a, b| a / b),
        }
    }
}
