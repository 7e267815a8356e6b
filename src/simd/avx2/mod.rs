//! AVX2 backend for 256-bit vector operations.
//!
//! Selected by the build script when the native host reports both `avx2` and `fma`.
//! The kernels in [`crate::simd::math`] are written against the method set of
//! [`f32x8::F32x8`], [`f32x8::I32x8`] and [`f32x8::Mask8`]; each method maps to one
//! AVX2 or FMA instruction once inlined into a function compiled with
//! `#[target_feature(enable = "avx,avx2,fma")]`.
//!
//! # Usage Example
//!
//! ```rust
//! # #[cfg(avx2)]
//! # {
//! use mathfun::simd::avx2::f32x8::F32x8;
//!
//! let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let vector = F32x8::from(data.as_slice());
//! # }
//! ```

pub mod f32x8;
