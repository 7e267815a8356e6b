//! Portable backend, used when the build host lacks AVX2/FMA, on non-x86 targets,
//! for cross builds, or when `MATHFUN_BACKEND=fallback` is set.

pub mod f32x8;
