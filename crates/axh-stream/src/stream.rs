//! The channel stream
//!
//! A [`ChannelStream`] routes records to the sinks registered for their
//! channel. Error records additionally report how far they escalate; the
//! caller decides what to do with a [`Escalation::Halt`].

use crate::capture;
use crate::channel::{Channel, Priority};
use crate::config::StreamConfig;
use crate::record::{Level, Record};
use crate::sink::{LogSink, Sink};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strum::IntoEnumIterator;
use strum_macros::Display;

/// How far an error record escalates under the current thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Escalation {
    /// Written to the sinks only.
    Logged,
    /// At or above the notify threshold.
    Notify,
    /// At or above the halt threshold. The caller must stop.
    Halt,
}

impl Escalation {
    pub fn is_halt(&self) -> bool {
        matches!(self, Escalation::Halt)
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_STREAM: ChannelStream =
        ChannelStream::with_log_sinks(StreamConfig::from_env_or_default());
}

pub struct ChannelStream {
    config: Mutex<StreamConfig>,
    sinks: Mutex<HashMap<Channel, Vec<Arc<dyn Sink>>>>,
}

impl Default for ChannelStream {
    fn default() -> Self {
        Self::new(StreamConfig::default())
    }
}

impl ChannelStream {
    /// A stream without any sinks.
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config: Mutex::new(config),
            sinks: Mutex::new(HashMap::new()),
        }
    }

    /// A stream with a [`LogSink`] registered on every channel.
    pub fn with_log_sinks(config: StreamConfig) -> Self {
        let stream = Self::new(config);
        let log_sink: Arc<dyn Sink> = Arc::new(LogSink);
        for channel in Channel::iter() {
            stream.register_shared(channel, log_sink.clone());
        }
        stream
    }

    /// The process-wide stream, configured from the environment on first use.
    pub fn global() -> &'static ChannelStream {
        &GLOBAL_STREAM
    }

    /// Append a sink to a channel. Earlier sinks stay registered.
    pub fn register(&self, channel: Channel, sink: impl Sink + 'static) {
        self.register_shared(channel, Arc::new(sink));
    }

    pub fn register_shared(&self, channel: Channel, sink: Arc<dyn Sink>) {
        self.lock_sinks().entry(channel).or_default().push(sink);
    }

    pub fn sink_count(&self, channel: Channel) -> usize {
        self.lock_sinks().get(&channel).map_or(0, Vec::len)
    }

    pub fn config(&self) -> StreamConfig {
        self.lock_config().clone()
    }

    pub fn set_config(&self, config: StreamConfig) {
        *self.lock_config() = config;
    }

    pub fn print_info(&self, location: &str, message: &str, priority: Priority, channel: Channel) {
        self.emit(location, message, Level::Info, priority, channel);
    }

    pub fn print_error(
        &self,
        location: &str,
        message: &str,
        priority: Priority,
        channel: Channel,
    ) -> Escalation {
        self.emit(location, message, Level::Error, priority, channel);
        let config = self.lock_config();
        if priority >= config.halt_threshold {
            Escalation::Halt
        } else if priority >= config.notify_threshold {
            Escalation::Notify
        } else {
            Escalation::Logged
        }
    }

    /// Report a halting error when `condition` is false. Returns `condition`.
    pub fn check(&self, condition: bool, location: &str, message: &str, channel: Channel) -> bool {
        if !condition {
            self.print_error(location, message, Priority::HALT, channel);
        }
        condition
    }

    pub fn pointer_to_string<T: ?Sized>(ptr: *const T) -> String {
        format!("0x{:x}", ptr.cast::<()>() as usize)
    }

    pub fn device_pointer_to_string<T: ?Sized>(ptr: *const T) -> String {
        format!("D_{:x}", ptr.cast::<()>() as usize)
    }

    fn emit(
        &self,
        location: &str,
        message: &str,
        level: Level,
        priority: Priority,
        channel: Channel,
    ) {
        let (muted, split) = {
            let config = self.lock_config();
            (config.is_muted(channel), config.split_lines)
        };
        let lines: Vec<&str> = if split && !message.is_empty() {
            message.lines().collect()
        } else {
            vec![message]
        };

        // Sinks run without holding the lock so they may print themselves.
        let sinks = if muted {
            Vec::new()
        } else {
            self.lock_sinks().get(&channel).cloned().unwrap_or_default()
        };

        for line in lines {
            let record = Record::new(location, line, level, priority, channel);
            capture::push(&record);
            for sink in &sinks {
                sink.emit(&record);
            }
        }
    }

    fn lock_config(&self) -> MutexGuard<'_, StreamConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_sinks(&self) -> MutexGuard<'_, HashMap<Channel, Vec<Arc<dyn Sink>>>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn stream_with_memory(channel: Channel) -> (ChannelStream, Arc<MemorySink>) {
        let stream = ChannelStream::default();
        let sink = Arc::new(MemorySink::new());
        stream.register_shared(channel, sink.clone());
        (stream, sink)
    }

    #[test]
    fn test_info_reaches_registered_sink() {
        let (stream, sink) = stream_with_memory(Channel::Math);
        stream.print_info("solver", "converged", Priority::DEBUG, Channel::Math);
        stream.print_info("solver", "elsewhere", Priority::DEBUG, Channel::General);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "converged");
        assert_eq!(records[0].level, Level::Info);
    }

    #[test]
    fn test_multiline_messages_are_split() {
        let (stream, sink) = stream_with_memory(Channel::FileIo);
        stream.print_error("loader", "first\nsecond", Priority::MESSAGE, Channel::FileIo);
        let messages: Vec<String> = sink.records().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_split_can_be_disabled() {
        let (stream, sink) = stream_with_memory(Channel::FileIo);
        stream.set_config(StreamConfig::default().with_split_lines(false));
        stream.print_info("loader", "a\nb", Priority::DEBUG, Channel::FileIo);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_escalation_thresholds() {
        let stream = ChannelStream::default();
        assert_eq!(
            stream.print_error("x", "low", Priority::DEBUG, Channel::General),
            Escalation::Logged
        );
        assert_eq!(
            stream.print_error("x", "mid", Priority::MESSAGE, Channel::General),
            Escalation::Notify
        );
        assert!(stream
            .print_error("x", "high", Priority::HALT, Channel::General)
            .is_halt());
    }

    #[test]
    fn test_muted_channel_skips_sinks() {
        let (stream, sink) = stream_with_memory(Channel::Deconst);
        stream.print_info("drop", "freed", Priority::DEBUG, Channel::Deconst);
        assert!(sink.is_empty());
        stream.set_config(StreamConfig::default().with_unmuted(Channel::Deconst));
        stream.print_info("drop", "freed", Priority::DEBUG, Channel::Deconst);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_register_appends() {
        let stream = ChannelStream::default();
        stream.register(Channel::Memory, MemorySink::new());
        stream.register(Channel::Memory, MemorySink::new());
        assert_eq!(stream.sink_count(Channel::Memory), 2);
        assert_eq!(stream.sink_count(Channel::Vulkan), 0);
    }

    #[test]
    fn test_check_reports_only_failures() {
        let (stream, sink) = stream_with_memory(Channel::General);
        assert!(stream.check(true, "assert", "fine", Channel::General));
        assert!(!stream.check(false, "assert", "broken", Channel::General));
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].priority, Priority::HALT);
    }

    #[test]
    fn test_pointer_formatting() {
        let value = 5u32;
        let ptr = &value as *const u32;
        let text = ChannelStream::pointer_to_string(ptr);
        assert!(text.starts_with("0x"));
        assert_eq!(
            text.trim_start_matches("0x"),
            ChannelStream::device_pointer_to_string(ptr).trim_start_matches("D_")
        );
    }

    #[test]
    fn test_capture_sees_records_of_muted_channels() {
        let stream = ChannelStream::default();
        let guard = capture::capture();
        stream.print_info("drop", "freed", Priority::DEBUG, Channel::Deconst);
        assert_eq!(guard.records().len(), 1);
    }

    #[test]
    fn test_log_sinks_on_every_channel() {
        let stream = ChannelStream::with_log_sinks(StreamConfig::default());
        for channel in Channel::iter() {
            assert_eq!(stream.sink_count(channel), 1);
        }
    }
}
