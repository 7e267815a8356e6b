use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::{allocation_error, layout_error, Result};
use crate::simd::AVX_ALIGNMENT;

/// An owned `f32` buffer whose first element is 32-byte aligned.
///
/// This is the buffer the aligned entry points ([`crate::simd::slice::map_aligned`])
/// expect. Memory comes from `std::alloc` and is released with the same layout on drop.
///
/// ```rust
/// use mathfun::utils::AlignedVec;
///
/// let buffer = AlignedVec::from_slice(&[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(&buffer[..], &[1.0, 2.0, 3.0]);
/// assert_eq!(buffer.as_ptr() as usize % 32, 0);
/// ```
pub struct AlignedVec {
    ptr: NonNull<f32>,
    len: usize,
    layout: Layout,
}

// SAFETY: AlignedVec owns its allocation exclusively, like Vec<f32>.
unsafe impl Send for AlignedVec {}
unsafe impl Sync for AlignedVec {}

impl AlignedVec {
    /// Allocates `len` zeroed elements.
    ///
    /// # Errors
    ///
    /// [`crate::MathfunError::LayoutError`] when the size overflows,
    /// [`crate::MathfunError::AllocationError`] when the allocator returns null.
    pub fn new_zeroed(len: usize) -> Result<Self> {
        let size = len
            .checked_mul(mem::size_of::<f32>())
            .ok_or_else(|| layout_error(usize::MAX, AVX_ALIGNMENT, "size overflows usize"))?;

        if size == 0 {
            return Ok(AlignedVec {
                ptr: NonNull::dangling(),
                len: 0,
                layout: Layout::new::<()>(),
            });
        }

        let layout = Layout::from_size_align(size, AVX_ALIGNMENT)
            .map_err(|e| layout_error(size, AVX_ALIGNMENT, e.to_string()))?;

        let ptr = unsafe { alloc_zeroed(layout) };

        match NonNull::new(ptr as *mut f32) {
            Some(ptr) => Ok(AlignedVec { ptr, len, layout }),
            None => Err(allocation_error(size, AVX_ALIGNMENT)),
        }
    }

    /// Allocates an aligned copy of `data`.
    pub fn from_slice(data: &[f32]) -> Result<Self> {
        let mut buffer = Self::new_zeroed(data.len())?;
        buffer.copy_from_slice(data);
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for AlignedVec {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            unsafe {
                dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
            }
        }
    }
}

impl Deref for AlignedVec {
    type Target = [f32];
    fn deref(&self) -> &Self::Target {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl From<AlignedVec> for Vec<f32> {
    fn from(aligned_vec: AlignedVec) -> Self {
        aligned_vec.to_vec()
    }
}

impl std::fmt::Debug for AlignedVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
