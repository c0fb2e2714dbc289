//! Value handle
//!
//! [`ValueBox`] lets a heap allocation behave like a plain value: cloning
//! the handle clones the pointee into a fresh allocation, moving it hands the
//! allocation over. Absorbing a [`Transfer`] is the only way a `ValueBox`
//! gains a value without copying it.

use crate::error::{fatal, OwnershipError, PtrResult};
use crate::slot::{HandleState, Slot};
use crate::transfer::{NullableTransfer, Transfer};
use std::fmt;
use std::ops::{Deref, DerefMut};

const VALUE_BOX: &str = "ValueBox";

/// Owning, deep-copying handle over a boxed `T`.
///
/// ```rust
/// use axh_ptr::ValueBox;
///
/// let original = ValueBox::new(vec![1, 2, 3]);
/// let mut copy = original.clone();
/// copy.push(4);
/// assert_eq!(original.len(), 3);
/// assert_eq!(copy.len(), 4);
/// ```
///
/// The handle does not synchronize access to its value; share it across
/// threads only behind a lock.
pub struct ValueBox<T> {
    slot: Slot<Box<T>>,
}

impl<T> Default for ValueBox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ValueBox<T> {
    pub fn empty() -> Self {
        Self {
            slot: Slot::vacant(VALUE_BOX),
        }
    }

    pub fn new(value: T) -> Self {
        Self {
            slot: Slot::owned(VALUE_BOX, Box::new(value)),
        }
    }

    /// Adopt the allocation held by `source`, emptying it.
    pub fn from_transfer(source: &mut Transfer<T>) -> PtrResult<Self> {
        let value = source.extract()?;
        Ok(Self {
            slot: Slot::owned(VALUE_BOX, value),
        })
    }

    /// Free the current value and adopt the allocation held by `source`.
    pub fn assign_transfer(&mut self, mut source: Transfer<T>) -> PtrResult<()> {
        self.assign_transfer_from(&mut source)
    }

    /// [`assign_transfer`](Self::assign_transfer) from a borrowed handle.
    /// When `source` is empty this handle is left untouched.
    pub fn assign_transfer_from(&mut self, source: &mut Transfer<T>) -> PtrResult<()> {
        let value = source.extract()?;
        self.slot.install(value);
        Ok(())
    }

    /// Move construction: take the allocation of `source` without copying.
    pub fn take_from(source: &mut ValueBox<T>) -> Self {
        Self {
            slot: Slot::from_option(VALUE_BOX, source.slot.extract()),
        }
    }

    /// Move assignment: free the current value and adopt `source`'s.
    pub fn assign_move(&mut self, source: &mut ValueBox<T>) {
        let value = source.slot.extract();
        self.slot.install_option(value);
    }

    /// Hand the allocation out, leaving this handle empty.
    pub fn extract(&mut self) -> NullableTransfer<T> {
        NullableTransfer::from_option(self.slot.extract())
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

    pub fn get(&self) -> PtrResult<&T> {
        match self.slot.value() {
            Some(value) => Ok(value),
            None => Err(OwnershipError::null_dereference(
                VALUE_BOX,
                self.slot.state(),
                "ValueBox::get",
            )),
        }
    }

    pub fn get_mut(&mut self) -> PtrResult<&mut T> {
        let state = self.slot.state();
        match self.slot.value_mut() {
            Some(value) => Ok(value),
            None => Err(OwnershipError::null_dereference(
                VALUE_BOX,
                state,
                "ValueBox::get_mut",
            )),
        }
    }

    pub fn as_ptr(&self) -> *const T {
        self.slot.address().unwrap_or(std::ptr::null())
    }
}

/// Deep copy. The destination never shares an allocation with the source.
impl<T: Clone> Clone for ValueBox<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Slot::from_option(VALUE_BOX, self.slot.value().map(|v| Box::new(v.clone()))),
        }
    }

    /// Frees the current value before installing the copy.
    fn clone_from(&mut self, source: &Self) {
        self.slot.discard();
        if let Some(value) = source.slot.value() {
            self.slot.install(Box::new(value.clone()));
        }
    }
}

impl<T> Deref for ValueBox<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.get() {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> DerefMut for ValueBox<T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.get_mut() {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

/// Absorbs the allocation without copying. Converting an emptied `Transfer`
/// is fatal; use [`ValueBox::from_transfer`] to get the error instead.
impl<T> From<Transfer<T>> for ValueBox<T> {
    fn from(mut source: Transfer<T>) -> Self {
        match source.extract() {
            Ok(value) => Self {
                slot: Slot::owned(VALUE_BOX, value),
            },
            Err(err) => fatal(err),
        }
    }
}

impl<T> From<NullableTransfer<T>> for ValueBox<T> {
    fn from(mut source: NullableTransfer<T>) -> Self {
        Self {
            slot: Slot::from_option(VALUE_BOX, source.extract()),
        }
    }
}

impl<T: PartialEq> PartialEq for ValueBox<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot.value() == other.slot.value()
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.value() {
            Some(value) => f.debug_tuple("ValueBox").field(value).finish(),
            None => write!(f, "ValueBox(<{}>)", self.slot.state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use axh_stream::{capture, Channel};
    use std::rc::Rc;

    #[test]
    fn test_clone_is_deep() {
        let original = ValueBox::new(String::from("payload"));
        let mut copy = original.clone();
        assert_eq!(*copy, "payload");
        assert_ne!(copy.as_ptr(), original.as_ptr());

        copy.push_str("-changed");
        assert_eq!(*original, "payload");
        assert_eq!(*copy, "payload-changed");
    }

    #[test]
    fn test_clone_of_empty_is_empty() {
        let empty: ValueBox<i32> = ValueBox::empty();
        let copy = empty.clone();
        assert!(!copy.is_valid());
    }

    #[test]
    fn test_clone_from_frees_previous() {
        let old = Rc::new(1);
        let mut target = ValueBox::new(old.clone());
        let source = ValueBox::new(Rc::new(2));
        target.clone_from(&source);
        assert_eq!(Rc::strong_count(&old), 1);
        assert_eq!(**target, 2);

        let empty = ValueBox::empty();
        target.clone_from(&empty);
        assert!(!target.is_valid());
        assert_eq!(target.state(), HandleState::Discarded);
    }

    #[test]
    fn test_move_does_not_copy() {
        let mut source = ValueBox::new(5u32);
        let address = source.as_ptr();
        let target = ValueBox::take_from(&mut source);
        assert_eq!(target.as_ptr(), address);
        assert!(!source.is_valid());
        assert_eq!(source.state(), HandleState::Extracted);

        let mut other = ValueBox::new(9u32);
        let mut target = target;
        target.assign_move(&mut other);
        assert_eq!(*target, 9);
        assert!(!other.is_valid());
    }

    #[test]
    fn test_absorb_transfer_without_copy() {
        let mut transfer = Transfer::new(vec![1, 2]);
        let address = transfer.as_ptr();
        let value = ValueBox::from_transfer(&mut transfer).unwrap();
        assert_eq!(value.as_ptr(), address);
        assert!(!transfer.is_valid());

        let err = ValueBox::from_transfer(&mut transfer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UseAfterExtract);
    }

    #[test]
    fn test_assign_transfer_replaces_value() {
        let old = Rc::new(());
        let mut value = ValueBox::new(old.clone());
        value.assign_transfer(Transfer::new(Rc::new(()))).unwrap();
        assert_eq!(Rc::strong_count(&old), 1);
        assert!(value.is_valid());

        let mut spent = Transfer::new(Rc::new(()));
        spent.discard();
        let before = value.as_ptr();
        assert!(value.assign_transfer_from(&mut spent).is_err());
        assert_eq!(value.as_ptr(), before);
    }

    #[test]
    fn test_from_transfer_conversion() {
        let transfer = Transfer::new('z');
        let address = transfer.as_ptr();
        let value: ValueBox<char> = transfer.into();
        assert_eq!(value.as_ptr(), address);

        let value = ValueBox::from(NullableTransfer::<char>::empty());
        assert!(!value.is_valid());
    }

    #[test]
    #[should_panic(expected = "use after extract: Transfer is extracted")]
    fn test_from_emptied_transfer_is_fatal() {
        let mut spent = Transfer::new('q');
        spent.extract().unwrap();
        let _value = ValueBox::from(spent);
    }

    #[test]
    fn test_from_emptied_transfer_reports() {
        let guard = capture();
        let result = std::panic::catch_unwind(|| {
            let mut spent = Transfer::new(1);
            spent.extract().unwrap();
            ValueBox::from(spent).is_valid()
        });
        assert!(result.is_err());
        let records: Vec<_> = guard
            .finish()
            .into_iter()
            .filter(|r| r.channel == Channel::Memory)
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "use after extract: Transfer is extracted");
    }

    #[test]
    fn test_extract_yields_nullable() {
        let mut value = ValueBox::new(3);
        let address = value.as_ptr();
        let mut out = value.extract();
        assert_eq!(out.as_ptr(), address);
        assert!(!value.is_valid());
        assert!(!value.extract().is_valid());
        assert_eq!(*out.extract().unwrap(), 3);
    }

    #[test]
    fn test_dereference_empty() {
        let mut value: ValueBox<i32> = ValueBox::default();
        assert_eq!(value.get().unwrap_err().kind(), ErrorKind::NullDereference);
        assert_eq!(value.get_mut().unwrap_err().kind(), ErrorKind::NullDereference);
    }

    #[test]
    #[should_panic(expected = "null dereference of ValueBox: handle is vacant")]
    fn test_deref_empty_is_fatal() {
        let value: ValueBox<i32> = ValueBox::empty();
        let _copy = *value;
    }

    #[test]
    fn test_discard_and_equality() {
        let mut a = ValueBox::new(1);
        let b = ValueBox::new(1);
        assert_eq!(a, b);
        a.discard();
        assert_ne!(a, b);
        assert_eq!(a, ValueBox::empty());
        assert_eq!(format!("{:?}", a), "ValueBox(<discarded>)");
        assert_eq!(format!("{:?}", b), "ValueBox(1)");
    }
}
