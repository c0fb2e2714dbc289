//! Thread-local record capture
//!
//! Tests run in parallel against the one global stream, so sink-based
//! assertions would see each other's records. A capture only collects what
//! the current thread emits.
//!
//! Captures do not nest: starting a capture hides the enclosing one until
//! the inner guard is dropped.

use crate::record::Record;
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static CAPTURE: RefCell<Option<Vec<Record>>> = const { RefCell::new(None) };
}

/// Start collecting records emitted on this thread.
pub fn capture() -> CaptureGuard {
    let previous = CAPTURE.with(|slot| slot.borrow_mut().replace(Vec::new()));
    CaptureGuard {
        previous,
        _thread_bound: PhantomData,
    }
}

pub(crate) fn push(record: &Record) {
    CAPTURE.with(|slot| {
        if let Some(records) = slot.borrow_mut().as_mut() {
            records.push(record.clone());
        }
    });
}

/// Active capture. Dropping it stops the capture.
#[must_use = "the capture ends when the guard is dropped"]
pub struct CaptureGuard {
    previous: Option<Vec<Record>>,
    _thread_bound: PhantomData<*const ()>,
}

impl CaptureGuard {
    /// Records captured so far.
    pub fn records(&self) -> Vec<Record> {
        CAPTURE.with(|slot| slot.borrow().clone().unwrap_or_default())
    }

    /// Stop capturing and return everything collected.
    pub fn finish(self) -> Vec<Record> {
        CAPTURE.with(|slot| slot.borrow_mut().take().unwrap_or_default())
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CAPTURE.with(|slot| *slot.borrow_mut() = previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, Priority};
    use crate::record::Level;

    fn record(message: &str) -> Record {
        Record::new("test", message, Level::Info, Priority::DEBUG, Channel::General)
    }

    #[test]
    fn test_push_without_capture_is_dropped() {
        push(&record("lost"));
        let guard = capture();
        assert!(guard.records().is_empty());
    }

    #[test]
    fn test_capture_collects_and_finishes() {
        let guard = capture();
        push(&record("a"));
        push(&record("b"));
        assert_eq!(guard.records().len(), 2);
        let records = guard.finish();
        assert_eq!(records[1].message, "b");
        push(&record("after"));
        let guard = capture();
        assert!(guard.records().is_empty());
    }

    #[test]
    fn test_inner_capture_restores_outer() {
        let outer = capture();
        push(&record("outer-1"));
        {
            let inner = capture();
            push(&record("inner"));
            assert_eq!(inner.records().len(), 1);
        }
        push(&record("outer-2"));
        let messages: Vec<String> = outer.finish().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["outer-1", "outer-2"]);
    }

    #[test]
    fn test_capture_is_per_thread() {
        let guard = capture();
        std::thread::spawn(|| push(&record("elsewhere")))
            .join()
            .unwrap();
        assert!(guard.records().is_empty());
    }
}
