//! # mathfun
//!
//! 8-lane single-precision approximations of `exp`, `ln`, `sin` and `cos`, computed
//! entirely with packed arithmetic, bitwise and compare/blend operations. No lane is
//! branched on and no scalar math routine is called.
//!
//! ## Layers
//!
//! - [`simd::F32x8`], [`simd::I32x8`], [`simd::Mask8`]: the lane types, backed by AVX2 +
//!   FMA intrinsics or by a portable implementation, chosen at build time.
//! - [`simd::math`]: the kernels, in two families ([`Strategy::Cephes`] and
//!   [`Strategy::Fused`]).
//! - [`simd::slice`]: buffer-level entry points, sequential and rayon-parallel.
//!
//! ## Quick start
//!
//! ```rust
//! use mathfun::simd::SimdExp;
//!
//! let x = vec![0.0f32, 0.5, 1.0, 0.1, 0.9, 0.25, 0.75, 0.33, 2.0];
//! let y = x.as_slice().simd_exp();
//! assert!((y[2] - std::f32::consts::E).abs() < 1e-6);
//! ```
//!
//! ## Backend selection
//!
//! `build.rs` inspects the build host. When it reports `avx2` and `fma` on an x86 target
//! the crate compiles with `cfg(avx2)`; otherwise, or when `MATHFUN_BACKEND=fallback` is
//! set, it compiles the portable backend. [`simd::backend`] reports the choice.

pub mod error;
pub mod simd;
pub mod utils;

pub use error::{MathfunError, Result};
pub use simd::math::{Function, Strategy};
pub use simd::traits::{SimdCos, SimdExp, SimdLn, SimdMath, SimdSin};

/// Inputs shorter than this run single-threaded even through the `par_*` entry points.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Elements handed to each rayon task. A multiple of the lane count.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

const _: () = assert!(PARALLEL_CHUNK_SIZE % simd::LANE_COUNT == 0);
