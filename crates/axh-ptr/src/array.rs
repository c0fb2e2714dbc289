//! Array transfer handle
//!
//! Arrays are held as `Box<[T]>`, never as `Box<T>`, so an array allocation
//! is always released as an array and the element count travels with it.
//! As with the single-value handles, nothing here is synchronized.

use crate::error::{check_index, check_unsigned, fatal, OwnershipError, PtrResult};
use crate::slot::{HandleState, Slot};
use crate::transfer::Transfer;
use std::fmt;
use std::ops::{Index, IndexMut};

const ARRAY_TRANSFER: &str = "ArrayTransfer";

/// Nullable transfer handle over a boxed slice.
///
/// ```rust
/// use axh_ptr::{ArrayTransfer, ErrorKind};
///
/// let handle = ArrayTransfer::from_vec(vec![10, 20, 30]);
/// assert_eq!(handle[1], 20);
/// assert_eq!(handle.get(3).unwrap_err().kind(), ErrorKind::BoundsViolation);
/// ```
pub struct ArrayTransfer<T> {
    slot: Slot<Box<[T]>>,
}

impl<T> Default for ArrayTransfer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ArrayTransfer<T> {
    pub fn empty() -> Self {
        Self {
            slot: Slot::vacant(ARRAY_TRANSFER),
        }
    }

    pub fn from_boxed_slice(values: Box<[T]>) -> Self {
        Self {
            slot: Slot::owned(ARRAY_TRANSFER, values),
        }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_boxed_slice(values.into_boxed_slice())
    }

    /// A `len`-element array of default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_vec(std::iter::repeat_with(T::default).take(len).collect())
    }

    /// A one-element array holding the value of `single`.
    pub fn from_single(mut single: Transfer<T>) -> PtrResult<Self> {
        let value = single.extract()?;
        Ok(Self::from_vec(vec![*value]))
    }

    /// Adopt `len` elements starting at `ptr`. A null `ptr` is rejected.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be the data pointer of a `Box<[T]>` of exactly
    /// `len` elements released with [`Box::into_raw`], and nothing else may
    /// free it.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> PtrResult<Self> {
        if ptr.is_null() {
            return Err(OwnershipError::invalid_transfer(
                ARRAY_TRANSFER,
                "ArrayTransfer::from_raw_parts",
            ));
        }
        let slice = std::ptr::slice_from_raw_parts_mut(ptr, len);
        Ok(Self::from_boxed_slice(Box::from_raw(slice)))
    }

    pub fn take_from(source: &mut ArrayTransfer<T>) -> Self {
        Self {
            slot: Slot::from_option(ARRAY_TRANSFER, source.extract()),
        }
    }

    /// Free the current array and adopt whatever `source` holds.
    pub fn assign_from(&mut self, source: &mut ArrayTransfer<T>) {
        let values = source.extract();
        self.slot.install_option(values);
    }

    pub fn extract(&mut self) -> Option<Box<[T]>> {
        self.slot.extract()
    }

    pub fn into_vec(mut self) -> Vec<T> {
        self.extract().map(Vec::from).unwrap_or_default()
    }

    /// Number of elements; 0 when empty.
    pub fn len(&self) -> usize {
        self.slot.value().map_or(0, <[T]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> PtrResult<&T> {
        let values = self.slice("ArrayTransfer::get")?;
        let index = check_unsigned(index, values.len(), "ArrayTransfer::get")?;
        Ok(&values[index])
    }

    pub fn get_mut(&mut self, index: usize) -> PtrResult<&mut T> {
        let values = self.slice_mut("ArrayTransfer::get_mut")?;
        let index = check_unsigned(index, values.len(), "ArrayTransfer::get_mut")?;
        Ok(&mut values[index])
    }

    /// [`get`](Self::get) for signed offsets; negative indices are violations.
    pub fn get_signed(&self, index: isize) -> PtrResult<&T> {
        let values = self.slice("ArrayTransfer::get_signed")?;
        let index = check_index(index as i64, values.len(), "ArrayTransfer::get_signed")?;
        Ok(&values[index])
    }

    pub fn as_slice(&self) -> &[T] {
        self.slot.value().unwrap_or(&[])
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.slot.value_mut().unwrap_or(&mut [])
    }

    pub fn discard(&mut self) {
        self.slot.discard();
    }

    pub fn is_valid(&self) -> bool {
        self.slot.is_owned()
    }

    pub fn state(&self) -> HandleState {
        self.slot.state()
    }

    pub fn as_ptr(&self) -> *const T {
        self.slot
            .address()
            .map_or(std::ptr::null(), |slice| slice as *const T)
    }

    fn slice(&self, location: &str) -> PtrResult<&[T]> {
        self.slot.value().ok_or_else(|| {
            OwnershipError::null_dereference(ARRAY_TRANSFER, self.slot.state(), location)
        })
    }

    fn slice_mut(&mut self, location: &str) -> PtrResult<&mut [T]> {
        let state = self.slot.state();
        self.slot
            .value_mut()
            .ok_or_else(|| OwnershipError::null_dereference(ARRAY_TRANSFER, state, location))
    }
}

impl<T> Index<usize> for ArrayTransfer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> IndexMut<usize> for ArrayTransfer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> From<Vec<T>> for ArrayTransfer<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T> From<Box<[T]>> for ArrayTransfer<T> {
    fn from(values: Box<[T]>) -> Self {
        Self::from_boxed_slice(values)
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayTransfer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayTransfer")
            .field("state", &self.slot.state())
            .field("values", &self.slot.value())
            .finish()
    }
}
