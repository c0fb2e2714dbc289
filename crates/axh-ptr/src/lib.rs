//! Exclusive-ownership handles
//!
//! Heap allocations in AxH move between owners through explicit handles:
//!
//! - [`Transfer`] and [`NullableTransfer`] carry a single allocation from its
//!   creator to its final owner and hand it out exactly once.
//! - [`ArrayTransfer`] does the same for arrays, which are never mixed up
//!   with single allocations.
//! - [`ValueBox`] and [`ValueArray`] make an allocation behave like a value:
//!   copying the handle copies the pointee.
//! - [`OwnedVec`] owns a sequence of individually allocated elements and
//!   copies them through a [`Duplicator`].
//!
//! Contract violations come back as [`OwnershipError`] and are reported on
//! the `Memory` channel of the global [`axh_stream::ChannelStream`]. The
//! operator forms (`*handle`, `handle[i]`) panic on them.
//!
//! ```rust
//! use axh_ptr::{Transfer, ValueBox};
//!
//! fn make() -> Transfer<i32> {
//!     Transfer::new(42)
//! }
//!
//! let value = ValueBox::from(make());
//! assert_eq!(*value, 42);
//! ```

mod array;
mod dup;
mod error;
mod owned_vec;
mod slot;
mod trace;
mod transfer;
mod value;
mod value_array;

pub use array::ArrayTransfer;
pub use dup::{CloneDuplicator, Duplicator, FnDuplicator};
pub use error::{ErrorKind, OwnershipError, PtrResult};
pub use owned_vec::{Iter, IterMut, OwnedVec};
pub use slot::HandleState;
pub use transfer::{NullableTransfer, Transfer};
pub use value::ValueBox;
pub use value_array::ValueArray;
