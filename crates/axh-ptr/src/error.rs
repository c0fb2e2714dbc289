//! Ownership errors
//!
//! Every variant is a contract violation on the caller's side. The checked
//! API hands them back as [`PtrResult`]; callers are expected to treat all of
//! them as fatal. The operator forms (`Deref`, `Index`) already do so and
//! panic after reporting.
//!
//! Each error is written to the [`Channel::Memory`] channel of the global
//! [`ChannelStream`] at the moment it is raised.

use crate::slot::HandleState;
use axh_stream::{Channel, ChannelStream, Priority};
use miette::Diagnostic;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

pub type PtrResult<T> = std::result::Result<T, OwnershipError>;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    /// A handle was asked to adopt a null or absent allocation
    #[error("invalid transfer into {handle}: null address")]
    #[diagnostic(
        code(axh_ptr_E0001),
        help("Only live allocations can be adopted by a {handle}")
    )]
    InvalidTransfer { handle: &'static str },

    /// Ownership was requested from a handle that no longer has any
    #[error("use after extract: {handle} is {state}")]
    #[diagnostic(
        code(axh_ptr_E0002),
        help("A {handle} hands out its allocation exactly once")
    )]
    UseAfterExtract {
        handle: &'static str,
        state: HandleState,
    },

    #[error("index {index} out of bounds for length {len}")]
    #[diagnostic(code(axh_ptr_E0003), help("Valid indices are 0..{len}"))]
    BoundsViolation { index: i64, len: usize },

    #[error("null dereference of {handle}: handle is {state}")]
    #[diagnostic(
        code(axh_ptr_E0004),
        help("Check is_valid() before dereferencing a {handle}")
    )]
    NullDereference {
        handle: &'static str,
        state: HandleState,
    },
}

/// Discriminant of [`OwnershipError`] for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidTransfer,
    UseAfterExtract,
    BoundsViolation,
    NullDereference,
}

impl OwnershipError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OwnershipError::InvalidTransfer { .. } => ErrorKind::InvalidTransfer,
            OwnershipError::UseAfterExtract { .. } => ErrorKind::UseAfterExtract,
            OwnershipError::BoundsViolation { .. } => ErrorKind::BoundsViolation,
            OwnershipError::NullDereference { .. } => ErrorKind::NullDereference,
        }
    }

    pub(crate) fn invalid_transfer(handle: &'static str, location: &str) -> Self {
        OwnershipError::InvalidTransfer { handle }.report(location)
    }

    pub(crate) fn use_after_extract(
        handle: &'static str,
        state: HandleState,
        location: &str,
    ) -> Self {
        OwnershipError::UseAfterExtract { handle, state }.report(location)
    }

    pub(crate) fn null_dereference(
        handle: &'static str,
        state: HandleState,
        location: &str,
    ) -> Self {
        OwnershipError::NullDereference { handle, state }.report(location)
    }

    pub(crate) fn bounds(index: i64, len: usize, location: &str) -> Self {
        OwnershipError::BoundsViolation { index, len }.report(location)
    }

    fn report(self, location: &str) -> Self {
        ChannelStream::global().print_error(
            location,
            &self.to_string(),
            Priority::HALT,
            Channel::Memory,
        );
        self
    }
}

/// Abort the current operation on an already reported error.
#[track_caller]
pub(crate) fn fatal(err: OwnershipError) -> ! {
    panic!("{}", err)
}

/// Validate `index` against `len`, reporting a violation.
pub(crate) fn check_index(index: i64, len: usize, location: &str) -> PtrResult<usize> {
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        _ => Err(OwnershipError::bounds(index, len, location)),
    }
}

/// [`check_index`] for unsigned indices. Indices beyond `i64::MAX` saturate in
/// the report.
pub(crate) fn check_unsigned(index: usize, len: usize, location: &str) -> PtrResult<usize> {
    if index < len {
        Ok(index)
    } else {
        let reported = i64::try_from(index).unwrap_or(i64::MAX);
        Err(OwnershipError::bounds(reported, len, location))
    }
}
