//! Duplication strategies for [`OwnedVec`](crate::OwnedVec).

use std::fmt;

/// Produces an independent heap copy of a collection element.
pub trait Duplicator<T> {
    fn duplicate(&self, value: &T) -> Box<T>;
}

/// Allocates a new element with `T::clone`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloneDuplicator;

impl<T: Clone> Duplicator<T> for CloneDuplicator {
    fn duplicate(&self, value: &T) -> Box<T> {
        Box::new(value.clone())
    }
}

/// Uses a closure as the duplication strategy.
///
/// ```rust
/// use axh_ptr::{Duplicator, FnDuplicator};
///
/// let reset = FnDuplicator(|value: &Vec<u8>| Box::new(Vec::with_capacity(value.len())));
/// assert!(reset.duplicate(&vec![1, 2, 3]).is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct FnDuplicator<F>(pub F);

impl<T, F> Duplicator<T> for FnDuplicator<F>
where
    F: Fn(&T) -> Box<T>,
{
    fn duplicate(&self, value: &T) -> Box<T> {
        (self.0)(value)
    }
}

impl<F> fmt::Debug for FnDuplicator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDuplicator(..)")
    }
}
