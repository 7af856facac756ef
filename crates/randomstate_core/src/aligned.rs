//! Heap blocks with caller-chosen alignment.
//!
//! SIMD-oriented generators (dSFMT) keep their state in 128-bit lanes and
//! expect 16-byte alignment. [`AlignedBuffer`] owns such a block, frees it
//! exactly once on drop, and derefs to a slice so generator code never
//! touches raw pointers.

use std::alloc::{self, Layout};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::error::RngError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for f64 {}
}

/// Element types for which the all-zero bit pattern is a valid value.
pub trait Zeroable: sealed::Sealed + Copy {}

impl Zeroable for u8 {}
impl Zeroable for u32 {}
impl Zeroable for u64 {}
impl Zeroable for f64 {}

/// Zero-initialised, fixed-length buffer aligned to a power-of-two boundary.
///
/// # Examples
///
/// ```
/// use randomstate_core::aligned::AlignedBuffer;
///
/// let mut buf = AlignedBuffer::<u64>::new(8, 16).unwrap();
/// assert_eq!(buf.as_ptr() as usize % 16, 0);
/// buf[3] = 7;
/// assert_eq!(buf.iter().sum::<u64>(), 7);
/// ```
pub struct AlignedBuffer<T: Zeroable> {
    ptr: NonNull<T>,
    len: usize,
    alignment: usize,
}

// SAFETY: the buffer exclusively owns its allocation; T is plain data.
unsafe impl<T: Zeroable + Send> Send for AlignedBuffer<T> {}
// SAFETY: shared access only hands out `&[T]`.
unsafe impl<T: Zeroable + Sync> Sync for AlignedBuffer<T> {}

impl<T: Zeroable> AlignedBuffer<T> {
    /// Allocates `len` zeroed elements aligned to `alignment` bytes.
    ///
    /// The effective alignment is never below `align_of::<T>()`.
    ///
    /// # Errors
    ///
    /// - [`RngError::InvalidAlignment`] if `alignment` is not a power of two
    /// - [`RngError::OutOfMemory`] if the size overflows or the allocator fails
    pub fn new(len: usize, alignment: usize) -> Result<Self, RngError> {
        if !alignment.is_power_of_two() {
            return Err(RngError::InvalidAlignment(alignment));
        }
        let alignment = alignment.max(mem::align_of::<T>());
        let size = len
            .checked_mul(mem::size_of::<T>())
            .ok_or(RngError::OutOfMemory {
                size: usize::MAX,
                alignment,
            })?;

        if size == 0 {
            // Non-null and suitably aligned; never dereferenced for reads of
            // more than zero elements and never deallocated.
            let dangling = alignment as *mut T;
            return Ok(Self {
                ptr: NonNull::new(dangling).ok_or(RngError::InvalidAlignment(alignment))?,
                len,
                alignment,
            });
        }

        let layout = Layout::from_size_align(size, alignment)
            .map_err(|_| RngError::OutOfMemory { size, alignment })?;
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) } as *mut T;
        let ptr = NonNull::new(raw).ok_or(RngError::OutOfMemory { size, alignment })?;
        Ok(Self {
            ptr,
            len,
            alignment,
        })
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment of the block in bytes.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    #[inline]
    fn layout(&self) -> Option<Layout> {
        let size = self.len * mem::size_of::<T>();
        if size == 0 {
            None
        } else {
            Layout::from_size_align(size, self.alignment).ok()
        }
    }
}

impl<T: Zeroable> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.layout() {
            // SAFETY: allocated in `new` with exactly this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) }
        }
    }
}

impl<T: Zeroable> Deref for AlignedBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialised elements.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Zeroable> DerefMut for AlignedBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: ptr is valid for len initialised elements and uniquely owned.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Zeroable> Clone for AlignedBuffer<T> {
    fn clone(&self) -> Self {
        let mut copy = match Self::new(self.len, self.alignment) {
            Ok(copy) => copy,
            Err(_) => match self.layout() {
                Some(layout) => alloc::handle_alloc_error(layout),
                None => unreachable!("zero-sized buffers never fail to allocate"),
            },
        };
        copy.copy_from_slice(self);
        copy
    }
}

impl<T: Zeroable + PartialEq> PartialEq for AlignedBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Zeroable + Eq> Eq for AlignedBuffer<T> {}

impl<T: Zeroable + fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("alignment", &self.alignment)
            .finish()
    }
}
