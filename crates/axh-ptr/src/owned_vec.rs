//! Owned collection
//!
//! [`OwnedVec`] keeps every element in its own allocation. Elements enter as
//! [`Transfer`]s, leave by erasure (freed) or [`OwnedVec::remove`] (handed
//! back), and are dropped in insertion order with the collection.
//!
//! Cloning a collection duplicates every element through its
//! [`Duplicator`]; the copy never shares an allocation with the source.

use crate::dup::{CloneDuplicator, Duplicator};
use crate::error::{check_unsigned, fatal, PtrResult};
use crate::trace;
use crate::transfer::Transfer;
use std::fmt;
use std::ops::{Index, IndexMut};

const OWNED_VEC: &str = "OwnedVec";

/// Ordered collection of independently boxed elements.
///
/// ```rust
/// use axh_ptr::{OwnedVec, Transfer};
///
/// let mut items = OwnedVec::new();
/// for v in [1, 2, 3] {
///     items.push(Transfer::new(v)).unwrap();
/// }
/// items.erase(1).unwrap();
/// assert_eq!(items.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
///
/// No internal synchronization: concurrent use needs an external lock.
pub struct OwnedVec<T, D = CloneDuplicator> {
    items: Vec<Box<T>>,
    duplicator: D,
}

impl<T> OwnedVec<T> {
    pub fn new() -> Self {
        Self::with_duplicator(CloneDuplicator)
    }

    /// Build a collection from transfer handles, in order. Stops at the
    /// first empty handle.
    pub fn from_transfers<I>(transfers: I) -> PtrResult<Self>
    where
        I: IntoIterator<Item = Transfer<T>>,
    {
        let mut vec = Self::new();
        vec.extend_transfers(transfers)?;
        Ok(vec)
    }
}

impl<T> Default for OwnedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D> OwnedVec<T, D> {
    pub fn with_duplicator(duplicator: D) -> Self {
        Self {
            items: Vec::new(),
            duplicator,
        }
    }

    pub fn duplicator(&self) -> &D {
        &self.duplicator
    }

    /// Adopt the element of `transfer` and append it.
    pub fn push(&mut self, mut transfer: Transfer<T>) -> PtrResult<()> {
        self.push_back(&mut transfer)
    }

    /// Adopt the element of a borrowed handle, which is left empty.
    pub fn push_back(&mut self, transfer: &mut Transfer<T>) -> PtrResult<()> {
        let value = transfer.extract()?;
        self.items.push(value);
        Ok(())
    }

    pub fn extend_transfers<I>(&mut self, transfers: I) -> PtrResult<()>
    where
        I: IntoIterator<Item = Transfer<T>>,
    {
        for transfer in transfers {
            self.push(transfer)?;
        }
        Ok(())
    }

    pub fn at(&self, index: usize) -> PtrResult<&T> {
        let index = check_unsigned(index, self.items.len(), "OwnedVec::at")?;
        Ok(&*self.items[index])
    }

    pub fn at_mut(&mut self, index: usize) -> PtrResult<&mut T> {
        let index = check_unsigned(index, self.items.len(), "OwnedVec::at_mut")?;
        Ok(&mut *self.items[index])
    }

    /// Address of the element at `index`. Ownership stays with the collection.
    pub fn access(&self, index: usize) -> PtrResult<*const T> {
        self.at(index).map(|value| value as *const T)
    }

    /// Free the element at `index` and close the gap.
    pub fn erase(&mut self, index: usize) -> PtrResult<()> {
        let index = check_unsigned(index, self.items.len(), "OwnedVec::erase")?;
        let value = self.items.remove(index);
        trace::freed(OWNED_VEC, &*value as *const T);
        Ok(())
    }

    /// Take the element at `index` out of the collection without freeing it.
    pub fn remove(&mut self, index: usize) -> PtrResult<Transfer<T>> {
        let index = check_unsigned(index, self.items.len(), "OwnedVec::remove")?;
        Ok(Transfer::from_box(self.items.remove(index)))
    }

    /// Free every element.
    pub fn erase_all(&mut self) {
        for value in self.items.drain(..) {
            trace::freed(OWNED_VEC, &*value as *const T);
        }
    }

    /// Move construction: adopt the elements of `source`, leaving it empty.
    pub fn take_from(source: &mut OwnedVec<T, D>) -> Self
    where
        D: Clone,
    {
        Self {
            items: std::mem::take(&mut source.items),
            duplicator: source.duplicator.clone(),
        }
    }

    /// Move assignment: free the current elements and adopt `source`'s.
    pub fn assign_move(&mut self, source: &mut OwnedVec<T, D>) {
        self.erase_all();
        self.items = std::mem::take(&mut source.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.items.iter_mut(),
        }
    }
}

impl<T, D: Duplicator<T>> OwnedVec<T, D> {
    /// Append an independent copy of `value` made by the duplicator.
    pub fn push_copy(&mut self, value: &T) {
        let copy = self.duplicator.duplicate(value);
        self.items.push(copy);
    }

    fn duplicate_from(&mut self, source: &[Box<T>]) {
        self.items.reserve(source.len());
        for value in source {
            let copy = self.duplicator.duplicate(value);
            self.items.push(copy);
        }
    }
}

impl<T, D: Duplicator<T> + Clone> Clone for OwnedVec<T, D> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_duplicator(self.duplicator.clone());
        copy.duplicate_from(&self.items);
        copy
    }

    /// Frees every current element first, then duplicates the source in order.
    fn clone_from(&mut self, source: &Self) {
        self.erase_all();
        self.duplicator = source.duplicator.clone();
        self.duplicate_from(&source.items);
    }
}

impl<T, D> Drop for OwnedVec<T, D> {
    fn drop(&mut self) {
        self.erase_all();
    }
}

impl<T, D> Index<usize> for OwnedVec<T, D> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

impl<T, D> IndexMut<usize> for OwnedVec<T, D> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }
}

/// Borrowing iterator over the elements of an [`OwnedVec`], in order.
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, Box<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|value| &**value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|value| &**value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutably borrowing iterator over the elements of an [`OwnedVec`].
pub struct IterMut<'a, T> {
    inner: std::slice::IterMut<'a, Box<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next().map(|value| &mut **value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|value| &mut **value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<'a, T, D> IntoIterator for &'a OwnedVec<T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, D> IntoIterator for &'a mut OwnedVec<T, D> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T: PartialEq, D> PartialEq for OwnedVec<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: fmt::Debug, D> fmt::Debug for OwnedVec<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
