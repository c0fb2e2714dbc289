use crate::channel::Priority;
use crate::record::{Level, Record};
use std::sync::{Mutex, PoisonError};

/// Receiver of diagnostic records.
///
/// Sinks are shared between threads by the stream, so implementations must
/// synchronize any interior state themselves.
pub trait Sink: Send + Sync {
    fn emit(&self, record: &Record);
}

/// Forwards records to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Sink for LogSink {
    fn emit(&self, record: &Record) {
        let level = match record.level {
            Level::Error if record.priority >= Priority::HALT => log::Level::Error,
            Level::Error => log::Level::Warn,
            Level::Info if record.priority >= Priority::MESSAGE => log::Level::Info,
            Level::Info => log::Level::Debug,
        };
        log::log!(target: "axh_stream", level, "{}", record);
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

/// Adapts a closure into a [`Sink`].
pub struct FnSink<F>(pub F);

impl<F> Sink for FnSink<F>
where
    F: Fn(&Record) + Send + Sync,
{
    fn emit(&self, record: &Record) {
        (self.0)(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(level: Level) -> Record {
        Record::new("test", "line", level, Priority::HALT, Channel::Memory)
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.emit(&record(Level::Info));
        sink.emit(&record(Level::Error));
        assert_eq!(sink.len(), 2);
        assert!(sink.records()[1].is_error());
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_fn_sink_calls_closure() {
        let hits = AtomicUsize::new(0);
        let sink = FnSink(|_: &Record| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        sink.emit(&record(Level::Error));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_sink_does_not_panic_without_logger() {
        LogSink.emit(&record(Level::Error));
        LogSink.emit(&record(Level::Info));
    }
}
