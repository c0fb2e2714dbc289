//! Transfer handles
//!
//! A transfer handle carries a heap allocation from the place it is created
//! to the place that finally owns it. The allocation can be taken out exactly
//! once; a handle that is dropped while still owning frees it.
//!
//! [`Transfer`] never adopts an absent allocation. [`NullableTransfer`]
//! may be empty from the start and extracting from it never fails.
//!
//! Neither type synchronizes anything. Sharing the referenced value between
//! threads requires a lock at the call site.

use crate::error::{fatal, OwnershipError, PtrResult};
use crate::slot::{HandleState, Slot};
use std::fmt;
use std::ops::{Deref, DerefMut};

const TRANSFER: &str = "Transfer";
const NULLABLE: &str = "NullableTransfer";

/// Exclusive single-owner handle over a boxed `T`.
///
/// ```rust
/// use axh_ptr::{ErrorKind, Transfer};
///
/// let mut handle = Transfer::new(42);
/// let value = handle.extract().unwrap();
/// assert_eq!(*value, 42);
/// assert_eq!(handle.extract().unwrap_err().kind(), ErrorKind::UseAfterExtract);
/// ```
pub struct Transfer<T> {
    slot: Slot<Box<T>>,
}

impl<T> Transfer<T> {
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    pub fn from_box(value: Box<T>) -> Self {
        Self {
            slot: Slot::owned(TRANSFER, value),
        }
    }

    /// Adopt an allocation that may be absent. `None` is rejected.
    pub fn from_option(value: Option<Box<T>>) -> PtrResult<Self> {
        value
            .map(Self::from_box)
            .ok_or_else(|| OwnershipError::invalid_transfer(TRANSFER, "Transfer::from_option"))
    }

    /// Adopt a raw address. A null address is rejected.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from [`Box::into_raw`] (or
    /// [`Transfer::into_raw`]) for a `T`, and nothing else may free it.
    pub unsafe fn from_raw(ptr: *mut T) -> PtrResult<Self> {
        if ptr.is_null() {
            return Err(OwnershipError::invalid_transfer(TRANSFER, "Transfer::from_raw"));
        }
        Ok(Self::from_box(Box::from_raw(ptr)))
    }

    /// Move the allocation out of `source`, leaving it empty.
    pub fn take_from(source: &mut Transfer<T>) -> PtrResult<Self> {
        source.extract().map(Self::from_box)
    }

    /// Free the current allocation and adopt the one held by `source`.
    ///
    /// When `source` is empty nothing changes on this handle.
    pub fn assign_from(&mut self, source: &mut Transfer<T>) -> PtrResult<()> {
        let value = source.extract()?;
        self.slot.install(value);
        Ok(())
    }

    /// Hand out the allocation. Works once per allocation.
    pub fn extract(&mut self) -> PtrResult<Box<T>> {
        self.slot.extract().ok_or_else(|| {
            OwnershipError::use_after_extract(TRANSFER, self.slot.state(), "Transfer::extract")
        })
    }

    /// Hand out the allocation as a raw address; the receiver must free it.
    pub fn into_raw(&mut self) -> PtrResult<*mut T> {
        self.extract().map(Box::into_raw)
    }

    /// Consume the handle and unbox its value.
    pub fn into_inner(mut self) -> PtrResult<T> {
        self.extract().map(|boxed| *boxed)
    }

    pub fn get(&self) -> PtrResult<&T> {
        match self.slot.value() {
            Some(value) => Ok(value),
            None => Err(OwnershipError::null_dereference(
                TRANSFER,
                self.slot.state(),
                "Transfer::get",
            )),
        }
    }

    pub fn get_mut(&mut self) -> PtrResult<&mut T> {
        let state = self.slot.state();
        match self.slot.value_mut() {
            Some(value) => Ok(value),
            None => Err(OwnershipError::null_dereference(
                TRANSFER,
                state,
                "Transfer::get_mut",
            )),
        }
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

    /// Address of the owned value without giving up ownership. Null when empty.
    pub fn as_ptr(&self) -> *const T {
        self.slot.address().unwrap_or(std::ptr::null())
    }
}

impl<T> Deref for Transfer<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> DerefMut for Transfer<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> From<Box<T>> for Transfer<T> {
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Transfer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transfer")
            .field("state", &self.slot.state())
            .field("value", &self.slot.value())
            .finish()
    }
}

/// Transfer handle that may hold nothing.
pub struct NullableTransfer<T> {
    slot: Slot<Box<T>>,
}

impl<T> Default for NullableTransfer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> NullableTransfer<T> {
    pub fn empty() -> Self {
        Self {
            slot: Slot::vacant(NULLABLE),
        }
    }

    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    pub fn from_box(value: Box<T>) -> Self {
        Self {
            slot: Slot::owned(NULLABLE, value),
        }
    }

    pub fn from_option(value: Option<Box<T>>) -> Self {
        Self {
            slot: Slot::from_option(NULLABLE, value),
        }
    }

    /// Adopt a raw address; null yields an empty handle.
    ///
    /// # Safety
    ///
    /// Same contract as [`Transfer::from_raw`].
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        if ptr.is_null() {
            Self::empty()
        } else {
            Self::from_box(Box::from_raw(ptr))
        }
    }

    pub fn take_from(source: &mut NullableTransfer<T>) -> Self {
        Self::from_option(source.extract())
    }

    /// Free the current allocation and adopt whatever `source` holds.
    pub fn assign_from(&mut self, source: &mut NullableTransfer<T>) {
        let value = source.extract();
        self.slot.install_option(value);
    }

    /// Hand out the allocation, if any.
    pub fn extract(&mut self) -> Option<Box<T>> {
        self.slot.extract()
    }

    /// Move the allocation into an exclusive handle. Fails when empty.
    pub fn into_transfer(&mut self) -> PtrResult<Transfer<T>> {
        match self.extract() {
            Some(value) => Ok(Transfer::from_box(value)),
            None => Err(OwnershipError::invalid_transfer(
                TRANSFER,
                "NullableTransfer::into_transfer",
            )),
        }
    }

    pub fn get(&self) -> PtrResult<&T> {
        match self.slot.value() {
            Some(value) => Ok(value),
            None => Err(OwnershipError::null_dereference(
                NULLABLE,
                self.slot.state(),
                "NullableTransfer::get",
            )),
        }
    }

    pub fn get_mut(&mut self) -> PtrResult<&mut T> {
        let state = self.slot.state();
        match self.slot.value_mut() {
            Some(value) => Ok(value),
            None => Err(OwnershipError::null_dereference(
                NULLABLE,
                state,
                "NullableTransfer::get_mut",
            )),
        }
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
        self.slot.address().unwrap_or(std::ptr::null())
    }
}

impl<T> Deref for NullableTransfer<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> DerefMut for NullableTransfer<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

/// Converting an emptied `Transfer` is fatal.
impl<T> From<Transfer<T>> for NullableTransfer<T> {
    fn from(mut value: Transfer<T>) -> Self {
        match value.extract() {
            Ok(value) => Self::from_box(value),
            Err(err) => fatal(err),
        }
    }
}

impl<T> From<Option<Box<T>>> for NullableTransfer<T> {
    fn from(value: Option<Box<T>>) -> Self {
        Self::from_option(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for NullableTransfer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableTransfer")
            .field("state", &self.slot.state())
            .field("value", &self.slot.value())
            .finish()
    }
}
