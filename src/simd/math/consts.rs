//! Coefficient tables and reduction constants.
//!
//! Polynomial tables are ordered highest degree first, the order [`super::poly`]
//! consumes them in.

// exp

pub const LOG2EF: f32 = 1.44269504088896341;

/// Largest input with a finite `f32` exponential.
pub const EXP_HI: f32 = 88.72283935546875;

/// Below this the exponential is less than half the smallest subnormal.
pub const EXP_LO: f32 = -103.972084045410;

/// Below this the `Fused` exponential flushes to zero.
pub const EXP_FUSED_LO: f32 = -87.33654022216797;

/// ln(2) split for the `Cephes` reduction; the high part has 9 significant bits.
pub const EXP_LN2_PARTS: [f32; 2] = [0.693359375, -2.12194440e-4];

/// ln(2) split for the `Fused` reduction.
pub const EXP_FUSED_LN2_PARTS: [f32; 2] = [0.693145751953125, 1.428606765330187045e-06];

/// `(e^r - 1 - r) / r^2` on `[-ln2/2, ln2/2]`.
pub const EXP_POLY: [f32; 6] = [
    1.9875691500E-4,
    1.3981999507E-3,
    8.3334519073E-3,
    4.1665795894E-2,
    1.6666665459E-1,
    5.0000001201E-1,
];

/// Taylor series of `e^r` up to `r^6`.
pub const EXP_FUSED_POLY: [f32; 7] = [
    1.0 / 720.0,
    1.0 / 120.0,
    1.0 / 24.0,
    1.0 / 6.0,
    0.5,
    1.0,
    1.0,
];

// ln

/// Bits of the smallest positive normal float.
pub const MIN_NORM_POS: i32 = 0x0080_0000;

pub const EXPONENT_FIELD: i32 = 0x7f80_0000;

pub const MANTISSA_FIELD: i32 = 0x007f_ffff;

pub const EXPONENT_BIAS: i32 = 0x7f;

pub const SQRTHF: f32 = 0.707106781186547524;

/// `(log(1 + m) - m + m^2/2) / m^3` on `[sqrt(1/2) - 1, sqrt(2) - 1]`.
pub const LN_POLY: [f32; 9] = [
    7.0376836292E-2,
    -1.1514610310E-1,
    1.1676998740E-1,
    -1.2420140846E-1,
    1.4249322787E-1,
    -1.6668057665E-1,
    2.0000714765E-1,
    -2.4999993993E-1,
    3.3333331174E-1,
];

/// ln(2) split for the `Cephes` logarithm: low part first, it is added earlier.
pub const LN_Q1: f32 = -2.12194440e-4;
pub const LN_Q2: f32 = 0.693359375;

/// Bits of 2/3 rounded up; the `Fused` mantissa lands in `[2/3, 4/3)`.
pub const LN_FUSED_OFFSET: i32 = 0x3f2a_aaab;

/// `2^25`, used to lift subnormal inputs into the normal range.
pub const LN_SUBNORMAL_SCALE: f32 = 33554432.0;
pub const LN_SUBNORMAL_SHIFT: f32 = 25.0;

/// `R(s^2)` for `log(1 + f) = f - f^2/2 + s * (f^2/2 + R)`, `s = f / (2 + f)`.
pub const LN_FUSED_POLY: [f32; 4] = [
    0.24279078841,
    0.28498786688,
    0.40000972152,
    0.66666662693,
];

pub const LN_FUSED_LN2_HI: f32 = 6.9313812256e-01;
pub const LN_FUSED_LN2_LO: f32 = 9.0580006145e-06;

// sin, cos

pub const FOPI: f32 = 1.27323954473516;

pub const FRAC_2_PI: f32 = 0.636619772367581343;

/// π/4 split for octant reduction.
pub const DP_PARTS: [f32; 3] = [0.78515625, 2.4187564849853515625e-4, 3.77489497744594108e-8];

/// π/2 split for quadrant reduction.
pub const PIO2_PARTS: [f32; 3] = [1.5707964, -4.371139e-8, -2.7118834e-17];

/// `cos(r) = 1 - r^2/2 + r^4 * C(r^2)` on `[-π/4, π/4]`.
pub const COS_POLY: [f32; 3] = [2.443315711809948E-005, -1.388731625493765E-003, 4.166664568298827E-002];

/// `sin(r) = r + r^3 * S(r^2)` on `[-π/4, π/4]`.
pub const SIN_POLY: [f32; 3] = [-1.9515295891E-4, 8.3321608736E-3, -1.6666654611E-1];

pub const SIN_FUSED_POLY: [f32; 5] = [
    -2.502943e-8,
    2.7525562e-6,
    -1.9840874e-4,
    8.333331e-3,
    -1.6666667e-1,
];

/// Full `cos(r)` polynomial in `r^2`.
pub const COS_FUSED_POLY: [f32; 5] = [
    2.43904487962774090654e-05,
    -1.38867637746099294692e-03,
    4.16666233237390631894e-02,
    -4.99999997251031003120e-01,
    1.0,
];
