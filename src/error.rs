//! Failures of the buffer-level API.
//!
//! Kernels are total over `f32` and return no errors. Only the entry points that own or
//! check memory do: [`crate::utils::AlignedVec`] and [`crate::simd::slice`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathfunError {
    /// The allocator returned null for an aligned buffer.
    AllocationError { bytes: usize, alignment: usize },
    /// An aligned buffer of this many bytes cannot be described by a `Layout`.
    LayoutError { bytes: usize, alignment: usize, reason: String },
    /// Buffers passed to a batch call do not fit together.
    ValidationError { reason: String },
    /// A buffer passed to an aligned-only entry point starts off the 32-byte grid.
    AlignmentError { address: usize, alignment: usize },
}

impl fmt::Display for MathfunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathfunError::AllocationError { bytes, alignment } => {
                write!(f, "could not allocate {bytes} bytes aligned to {alignment}")
            }
            MathfunError::LayoutError {
                bytes,
                alignment,
                reason,
            } => write!(f, "no layout for {bytes} bytes aligned to {alignment}: {reason}"),
            MathfunError::ValidationError { reason } => write!(f, "invalid buffers: {reason}"),
            MathfunError::AlignmentError { address, alignment } => write!(
                f,
                "Misaligned buffer: address {address:#x} is not {alignment} byte aligned"
            ),
        }
    }
}

impl std::error::Error for MathfunError {}

pub type Result<T> = std::result::Result<T, MathfunError>;

pub fn allocation_error(bytes: usize, alignment: usize) -> MathfunError {
    MathfunError::AllocationError { bytes, alignment }
}

pub fn layout_error(bytes: usize, alignment: usize, reason: impl Into<String>) -> MathfunError {
    MathfunError::LayoutError {
        bytes,
        alignment,
        reason: reason.into(),
    }
}

pub fn validation_error(reason: impl Into<String>) -> MathfunError {
    MathfunError::ValidationError {
        reason: reason.into(),
    }
}

/// Alignment error for the buffer starting at `ptr`.
pub fn alignment_error<T>(ptr: *const T, alignment: usize) -> MathfunError {
    MathfunError::AlignmentError {
        address: ptr as usize,
        alignment,
    }
}
