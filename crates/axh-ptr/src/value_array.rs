//! Array value handle
//!
//! [`ValueArray`] is the array counterpart of [`ValueBox`](crate::ValueBox):
//! copies allocate a same-sized array, moves hand the allocation over, and
//! [`ValueArray::extract`] gives it back as an [`ArrayTransfer`].
//!
//! No internal synchronization. Sharing the elements between threads needs
//! a lock at the call site.

use crate::array::ArrayTransfer;
use crate::error::{check_index, check_unsigned, fatal, OwnershipError, PtrResult};
use crate::slot::{HandleState, Slot};
use std::fmt;
use std::ops::{Index, IndexMut};

const VALUE_ARRAY: &str = "ValueArray";

/// Value-semantic owner of a boxed slice.
///
/// Cloning allocates a same-sized array and clones every element; moving
/// hands the allocation over. Indexing is bounds checked.
///
/// ```rust
/// use axh_ptr::ValueArray;
///
/// let mut grid: ValueArray<f32> = ValueArray::with_len(4);
/// grid[2] = 1.5;
/// let snapshot = grid.clone();
/// grid[2] = 0.0;
/// assert_eq!(snapshot[2], 1.5);
/// ```
pub struct ValueArray<T> {
    slot: Slot<Box<[T]>>,
}

impl<T> Default for ValueArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ValueArray<T> {
    pub fn empty() -> Self {
        Self {
            slot: Slot::vacant(VALUE_ARRAY),
        }
    }

    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_vec(std::iter::repeat_with(T::default).take(len).collect())
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            slot: Slot::owned(VALUE_ARRAY, values.into_boxed_slice()),
        }
    }

    /// Free the current array and adopt the one held by `source`.
    pub fn assign_transfer(&mut self, mut source: ArrayTransfer<T>) {
        self.slot.install_option(source.extract());
    }

    pub fn take_from(source: &mut ValueArray<T>) -> Self {
        Self {
            slot: Slot::from_option(VALUE_ARRAY, source.slot.extract()),
        }
    }

    pub fn assign_move(&mut self, source: &mut ValueArray<T>) {
        let values = source.slot.extract();
        self.slot.install_option(values);
    }

    /// Hand the array out, leaving this handle empty.
    pub fn extract(&mut self) -> ArrayTransfer<T> {
        self.slot
            .extract()
            .map_or_else(ArrayTransfer::empty, ArrayTransfer::from_boxed_slice)
    }

    pub fn len(&self) -> usize {
        self.slot.value().map_or(0, <[T]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> PtrResult<&T> {
        let values = self.slice("ValueArray::get")?;
        let index = check_unsigned(index, values.len(), "ValueArray::get")?;
        Ok(&values[index])
    }

    pub fn get_mut(&mut self, index: usize) -> PtrResult<&mut T> {
        let values = self.slice_mut("ValueArray::get_mut")?;
        let index = check_unsigned(index, values.len(), "ValueArray::get_mut")?;
        Ok(&mut values[index])
    }

    pub fn get_signed(&self, index: isize) -> PtrResult<&T> {
        let values = self.slice("ValueArray::get_signed")?;
        let index = check_index(index as i64, values.len(), "ValueArray::get_signed")?;
        Ok(&values[index])
    }

    /// Borrow the elements. Ownership stays with the handle.
    pub fn as_slice(&self) -> &[T] {
        self.slot.value().unwrap_or(&[])
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.slot.value_mut().unwrap_or(&mut [])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
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
            OwnershipError::null_dereference(VALUE_ARRAY, self.slot.state(), location)
        })
    }

    fn slice_mut(&mut self, location: &str) -> PtrResult<&mut [T]> {
        let state = self.slot.state();
        self.slot
            .value_mut()
            .ok_or_else(|| OwnershipError::null_dereference(VALUE_ARRAY, state, location))
    }
}

impl<T: Clone> Clone for ValueArray<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Slot::from_option(VALUE_ARRAY, self.slot.value().map(Box::<[T]>::from)),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slot.discard();
        if let Some(values) = source.slot.value() {
            self.slot.install(Box::<[T]>::from(values));
        }
    }
}

impl<T> Index<usize> for ValueArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> IndexMut<usize> for ValueArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T> From<ArrayTransfer<T>> for ValueArray<T> {
    fn from(mut source: ArrayTransfer<T>) -> Self {
        Self {
            slot: Slot::from_option(VALUE_ARRAY, source.extract()),
        }
    }
}

impl<T> From<Vec<T>> for ValueArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<'a, T> IntoIterator for &'a ValueArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for ValueArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot.value() == other.slot.value()
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.value() {
            Some(values) => f.debug_tuple("ValueArray").field(&values).finish(),
            None => write!(f, "ValueArray(<{}>)", self.slot.state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn test_clone_copies_every_element() {
        let original = ValueArray::from_vec(vec![String::from("a"), String::from("b")]);
        let mut copy = original.clone();
        assert_eq!(copy.len(), 2);
        assert_ne!(copy.as_ptr(), original.as_ptr());
        copy[0].push('!');
        assert_eq!(original.as_slice(), &["a".to_string(), "b".to_string()]);
        assert_eq!(copy[0], "a!");
    }

    #[test]
    fn test_clone_from_frees_previous() {
        let old = Rc::new(());
        let mut target = ValueArray::from_vec(vec![old.clone(), old.clone()]);
        let source = ValueArray::from_vec(vec![Rc::new(())]);
        target.clone_from(&source);
        assert_eq!(Rc::strong_count(&old), 1);
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut values = ValueArray::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(*values.get(3).unwrap(), 4);
        assert_eq!(
            values.get(4).unwrap_err(),
            OwnershipError::BoundsViolation { index: 4, len: 4 }
        );
        assert_eq!(
            values.get(usize::MAX).unwrap_err().kind(),
            ErrorKind::BoundsViolation
        );
        assert_eq!(
            values.get_signed(-2).unwrap_err(),
            OwnershipError::BoundsViolation { index: -2, len: 4 }
        );
        *values.get_mut(0).unwrap() = 0;
        assert_eq!(values.iter().copied().collect::<Vec<_>>(), vec![0, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "index 2 out of bounds for length 2")]
    fn test_index_mut_out_of_range_is_fatal() {
        let mut values = ValueArray::from_vec(vec![0u8, 1]);
        values[2] = 5;
    }

    #[test]
    fn test_extract_into_array_transfer() {
        let mut values = ValueArray::from_vec(vec![7, 8]);
        let address = values.as_ptr();
        let transfer = values.extract();
        assert_eq!(transfer.as_ptr(), address);
        assert_eq!(transfer.len(), 2);
        assert!(!values.is_valid());
        assert_eq!(values.len(), 0);
        assert!(!values.extract().is_valid());
    }

    #[test]
    fn test_absorb_array_transfer() {
        let transfer = ArrayTransfer::from_vec(vec![1.0, 2.0]);
        let address = transfer.as_ptr();
        let values = ValueArray::from(transfer);
        assert_eq!(values.as_ptr(), address);

        let mut target = ValueArray::from_vec(vec![0.0]);
        target.assign_transfer(ArrayTransfer::from_vec(vec![3.0, 4.0, 5.0]));
        assert_eq!(target.len(), 3);
        target.assign_transfer(ArrayTransfer::empty());
        assert!(!target.is_valid());
    }

    #[test]
    fn test_move_helpers() {
        let mut source = ValueArray::from_vec(vec!['x']);
        let address = source.as_ptr();
        let mut target = ValueArray::take_from(&mut source);
        assert_eq!(target.as_ptr(), address);
        assert_eq!(source.state(), HandleState::Extracted);

        let mut other = ValueArray::from_vec(vec!['y', 'z']);
        target.assign_move(&mut other);
        assert_eq!(target.as_slice(), &['y', 'z']);
        assert!(!other.is_valid());
    }

    #[test]
    fn test_empty_array() {
        let values: ValueArray<i32> = ValueArray::default();
        assert!(values.is_empty());
        assert!(values.as_slice().is_empty());
        assert_eq!(values.get(0).unwrap_err().kind(), ErrorKind::NullDereference);
        assert_eq!(format!("{:?}", values), "ValueArray(<vacant>)");
        assert_eq!(values.clone(), ValueArray::empty());
    }

    #[test]
    fn test_with_len_and_iteration() {
        let values: ValueArray<u8> = ValueArray::with_len(3);
        let mut count = 0;
        for v in &values {
            assert_eq!(*v, 0);
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
