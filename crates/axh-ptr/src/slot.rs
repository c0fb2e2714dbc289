//! Ownership state shared by every handle
//!
//! A [`Slot`] holds at most one allocation and remembers why it is empty.
//! The handle types are thin typed fronts over it.

use crate::trace;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Why a handle does or does not hold an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleState {
    /// Holds an allocation.
    Owned,
    /// Created empty and never filled.
    Vacant,
    /// The allocation was handed out.
    Extracted,
    /// The allocation was freed.
    Discarded,
}

impl HandleState {
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned)
    }

    pub fn is_empty(&self) -> bool {
        !self.is_owned()
    }
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned => write!(f, "owned"),
            Self::Vacant => write!(f, "vacant"),
            Self::Extracted => write!(f, "extracted"),
            Self::Discarded => write!(f, "discarded"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Slot<P: Deref> {
    value: Option<P>,
    state: HandleState,
    handle: &'static str,
}

impl<P: Deref> Slot<P> {
    pub fn vacant(handle: &'static str) -> Self {
        Self {
            value: None,
            state: HandleState::Vacant,
            handle,
        }
    }

    pub fn owned(handle: &'static str, value: P) -> Self {
        Self {
            value: Some(value),
            state: HandleState::Owned,
            handle,
        }
    }

    pub fn from_option(handle: &'static str, value: Option<P>) -> Self {
        match value {
            Some(value) => Self::owned(handle, value),
            None => Self::vacant(handle),
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn is_owned(&self) -> bool {
        self.state.is_owned()
    }

    pub fn value(&self) -> Option<&P::Target> {
        self.value.as_deref()
    }

    pub fn value_mut(&mut self) -> Option<&mut P::Target>
    where
        P: DerefMut,
    {
        self.value.as_deref_mut()
    }

    /// Hand the allocation out. An empty slot keeps its previous state.
    pub fn extract(&mut self) -> Option<P> {
        let value = self.value.take();
        if value.is_some() {
            self.state = HandleState::Extracted;
        }
        value
    }

    /// Free the allocation now. No-op when empty.
    pub fn discard(&mut self) {
        if let Some(value) = self.value.take() {
            trace::freed(self.handle, &*value as *const P::Target);
            drop(value);
            self.state = HandleState::Discarded;
        }
    }

    /// Free the current allocation, if any, and adopt `value`.
    pub fn install(&mut self, value: P) {
        self.discard();
        self.value = Some(value);
        self.state = HandleState::Owned;
    }

    /// Free the current allocation, if any, and adopt `value` or stay empty.
    pub fn install_option(&mut self, value: Option<P>) {
        match value {
            Some(value) => self.install(value),
            None => self.discard(),
        }
    }

    pub fn address(&self) -> Option<*const P::Target> {
        self.value().map(|target| target as *const P::Target)
    }
}

impl<P: Deref> Drop for Slot<P> {
    fn drop(&mut self) {
        self.discard();
    }
}
