//! Traits shared by the vector backends and the slice front-end.

/// Pointer alignment check for a vector type.
pub trait Alignment<T> {
    /// Returns `true` if `ptr` satisfies the vector's natural alignment.
    fn is_aligned(ptr: *const T) -> bool;
}

/// Loading lanes from memory.
pub trait SimdLoad<T> {
    type Output;

    /// Loads exactly `size` (== lane count) elements, choosing the aligned or
    /// unaligned instruction from the pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and valid for reads of a full vector.
    unsafe fn load(ptr: *const T, size: usize) -> Self::Output;

    /// Loads a full vector from aligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned to the vector width and valid for reads of a full vector.
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// Loads a full vector with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of a full vector.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;

    /// Loads `size` elements and zero-fills the remaining lanes.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `size` elements, `size` less than the lane count.
    unsafe fn load_partial(ptr: *const T, size: usize) -> Self::Output;
}

/// Storing lanes to memory.
pub trait SimdStore<T> {
    /// Stores all lanes, choosing the aligned or unaligned instruction from the pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and valid for writes of a full vector.
    unsafe fn store_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must be aligned to the vector width and valid for writes of a full vector.
    unsafe fn store_aligned_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must be valid for writes of a full vector.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);

    /// Stores the first `size` lanes only.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `size` elements, `size` less than the lane count.
    unsafe fn store_at_partial(&self, ptr: *mut T, size: usize);
}

/// Transcendental functions on a whole vector, using the baseline strategy.
pub trait SimdMath {
    type Output;

    fn exp(&self) -> Self::Output;
    fn ln(&self) -> Self::Output;
    fn sin(&self) -> Self::Output;
    fn cos(&self) -> Self::Output;
}

pub trait SimdExp<Rhs = Self> {
    type Output;

    fn simd_exp(self) -> Self::Output;
    fn par_simd_exp(self) -> Self::Output;
    fn scalar_exp(self) -> Self::Output;
}

pub trait SimdLn<Rhs = Self> {
    type Output;

    fn simd_ln(self) -> Self::Output;
    fn par_simd_ln(self) -> Self::Output;
    fn scalar_ln(self) -> Self::Output;
}

pub trait SimdSin<Rhs = Self> {
    type Output;

    fn simd_sin(self) -> Self::Output;
    fn par_simd_sin(self) -> Self::Output;
    fn scalar_sin(self) -> Self::Output;
}

pub trait SimdCos<Rhs = Self> {
    type Output;

    fn simd_cos(self) -> Self::Output;
    fn par_simd_cos(self) -> Self::Output;
    fn scalar_cos(self) -> Self::Output;
}
