//! Channelled diagnostic stream
//!
//! Every subsystem reports through one [`ChannelStream`]: records carry a
//! [`Channel`], a [`Priority`] and the location they come from, and are
//! handed to the [`Sink`]s registered for that channel. Error records report
//! an [`Escalation`] so the caller can stop on a halting condition.
//!
//! ```rust
//! use axh_stream::{ChannelStream, Channel, MemorySink, Priority, StreamConfig};
//! use std::sync::Arc;
//!
//! let stream = ChannelStream::new(StreamConfig::default());
//! let sink = Arc::new(MemorySink::new());
//! stream.register_shared(Channel::Memory, sink.clone());
//!
//! let escalation = stream.print_error("loader", "out of memory", Priority::HALT, Channel::Memory);
//! assert!(escalation.is_halt());
//! assert_eq!(sink.records()[0].to_string(), "|MEMORY| [ERROR] @loader: out of memory");
//! ```

mod capture;
mod channel;
mod config;
mod error;
mod macros;
mod record;
mod sink;
mod stream;

pub use capture::{capture, CaptureGuard};
pub use channel::{Channel, Priority};
pub use config::{parse_channels, parse_priority, StreamConfig, HALT_VAR, MUTE_VAR};
pub use error::{StreamError, StreamResult};
pub use record::{Level, Record};
pub use sink::{FnSink, LogSink, MemorySink, Sink};
pub use stream::{ChannelStream, Escalation};
