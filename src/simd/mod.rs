//! Vector types, kernels and the slice front-end.
//!
//! Exactly one backend is compiled, chosen by `build.rs`:
//!
//! - `avx2`: AVX2 + FMA intrinsics
//! - `fallback`: portable arrays with x86-compatible lane semantics
//!
//! Both expose [`F32x8`], [`I32x8`] and [`Mask8`] with identical methods, so the
//! kernels in [`math`] are written once.

#[cfg(avx2)]
pub mod avx2;

#[cfg(not(avx2))]
pub mod fallback;

#[cfg(avx2)]
pub use avx2::f32x8::{F32x8, I32x8, Mask8};

#[cfg(not(avx2))]
pub use fallback::f32x8::{F32x8, I32x8, Mask8};

#[cfg(avx2)]
pub(crate) use avx2::f32x8::{AVX_ALIGNMENT, LANE_COUNT};

#[cfg(not(avx2))]
pub(crate) use fallback::f32x8::{AVX_ALIGNMENT, LANE_COUNT};

#[allow(clippy::excessive_precision)]
pub mod math;
pub mod slice;
pub mod traits;

pub use traits::{Alignment, SimdCos, SimdExp, SimdLn, SimdLoad, SimdMath, SimdSin, SimdStore};

/// Name of the backend this build was compiled with: `"avx2"` or `"fallback"`.
pub fn backend() -> &'static str {
    if cfg!(avx2) {
        "avx2"
    } else {
        "fallback"
    }
}
