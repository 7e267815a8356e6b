//! Transcendental kernels on [`F32x8`].
//!
//! Every kernel is a pure `fn(F32x8) -> F32x8` built from the same pipeline:
//! [`reduce`] the argument, evaluate a fixed polynomial from [`consts`] with [`poly`],
//! then [`reconstruct`] the result and patch edge lanes with masks. No lane is ever
//! branched on.
//!
//! Two families are provided, selected with [`Strategy`]:
//!
//! - [`Strategy::Cephes`]: the classic Cephes/`avx_mathfun` scheme.
//! - [`Strategy::Fused`]: fused multiply-add throughout, round-to-nearest reduction and
//!   exponent arithmetic on the raw bits.
//!
//! Both meet the same contract and are tested against the same tolerance.
//!
//! ```rust
//! use mathfun::simd::F32x8;
//! use mathfun::simd::math::{Function, Strategy};
//!
//! let x = F32x8::splat(1.0);
//! let y = Function::Exp.eval(x, Strategy::Cephes).to_array();
//! assert!((y[0] - std::f32::consts::E).abs() < 1e-6);
//! ```

use std::fmt;

use crate::simd::traits::SimdMath;
use crate::simd::F32x8;

pub mod consts;
pub mod exp;
pub mod ln;
pub mod poly;
pub mod reconstruct;
pub mod reduce;
pub mod trig;

/// The functions the crate approximates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Exp,
    Ln,
    Sin,
    Cos,
}

/// Which kernel family computes a [`Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    Cephes,
    Fused,
}

impl Function {
    pub const ALL: [Function; 4] = [Function::Exp, Function::Ln, Function::Sin, Function::Cos];

    /// Evaluates the kernel for this function and strategy.
    #[inline]
    pub fn eval(self, x: F32x8, strategy: Strategy) -> F32x8 {
        // SAFETY: the avx2 backend is only compiled when the build script found AVX2
        // and FMA on this host.
        unsafe { eval_kernel(self, x, strategy) }
    }

    /// Scalar `f32` standard library result.
    pub fn scalar(self, x: f32) -> f32 {
        match self {
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
        }
    }

    /// Double precision reference the kernels are measured against.
    pub fn reference(self, x: f64) -> f64 {
        match self {
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Sin => "sin",
            Function::Cos => "cos",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Cephes, Strategy::Fused];

    /// `sin` and `cos` from a single argument reduction.
    #[inline]
    pub fn sincos(self, x: F32x8) -> (F32x8, F32x8) {
        // SAFETY: as in `Function::eval`.
        unsafe { sincos_kernel(x, self) }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Cephes => f.write_str("cephes"),
            Strategy::Fused => f.write_str("fused"),
        }
    }
}

/// Runs one kernel inside a function compiled with the vector features enabled, so
/// the lane methods inline down to single instructions.
///
/// # Safety
///
/// With the `avx2` backend the CPU must support AVX2 and FMA.
#[cfg_attr(avx2, target_feature(enable = "avx,avx2,fma"))]
unsafe fn eval_kernel(function: Function, x: F32x8, strategy: Strategy) -> F32x8 {
    match (function, strategy) {
        (Function::Exp, Strategy::Cephes) => exp::exp(x),
        (Function::Exp, Strategy::Fused) => exp::exp_fused(x),
        (Function::Ln, Strategy::Cephes) => ln::ln(x),
        (Function::Ln, Strategy::Fused) => ln::ln_fused(x),
        (Function::Sin, Strategy::Cephes) => trig::sin(x),
        (Function::Sin, Strategy::Fused) => trig::sin_fused(x),
        (Function::Cos, Strategy::Cephes) => trig::cos(x),
        (Function::Cos, Strategy::Fused) => trig::cos_fused(x),
    }
}

/// # Safety
///
/// As [`eval_kernel`].
#[cfg_attr(avx2, target_feature(enable = "avx,avx2,fma"))]
unsafe fn sincos_kernel(x: F32x8, strategy: Strategy) -> (F32x8, F32x8) {
    match strategy {
        Strategy::Cephes => trig::sincos(x),
        Strategy::Fused => trig::sincos_fused(x),
    }
}

impl SimdMath for F32x8 {
    type Output = F32x8;

    #[inline]
    fn exp(&self) -> Self::Output {
        Function::Exp.eval(*self, Strategy::Cephes)
    }

    #[inline]
    fn ln(&self) -> Self::Output {
        Function::Ln.eval(*self, Strategy::Cephes)
    }

    #[inline]
    fn sin(&self) -> Self::Output {
        Function::Sin.eval(*self, Strategy::Cephes)
    }

    #[inline]
    fn cos(&self) -> Self::Output {
        Function::Cos.eval(*self, Strategy::Cephes)
    }
}
