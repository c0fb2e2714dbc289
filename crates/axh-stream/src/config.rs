//! Stream configuration
//!
//! Defaults mirror the engine's settings header: every channel prints except
//! destructor tracing, notification starts at [`Priority::MESSAGE`] and
//! halting at [`Priority::HALT`].
//!
//! # Environment
//!
//! - `AXH_STREAM_MUTE`: comma separated channel names to mute. Replaces the
//!   default mute set, so an empty value unmutes everything.
//! - `AXH_STREAM_HALT`: halt threshold as an unsigned integer.

use crate::channel::{Channel, Priority};
use crate::error::{StreamError, StreamResult};
use std::collections::HashSet;
use std::str::FromStr;

pub const MUTE_VAR: &str = "AXH_STREAM_MUTE";
pub const HALT_VAR: &str = "AXH_STREAM_HALT";

#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    pub muted: HashSet<Channel>,
    pub notify_threshold: Priority,
    pub halt_threshold: Priority,
    pub split_lines: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            muted: HashSet::from([Channel::Deconst]),
            notify_threshold: Priority::MESSAGE,
            halt_threshold: Priority::HALT,
            split_lines: true,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration overridden by the `AXH_STREAM_*` variables.
    pub fn from_env() -> StreamResult<Self> {
        let mut config = Self::default();
        if let Ok(list) = std::env::var(MUTE_VAR) {
            config.muted = parse_channels(&list)?;
        }
        if let Ok(raw) = std::env::var(HALT_VAR) {
            config.halt_threshold = parse_priority(&raw)?;
        }
        Ok(config)
    }

    /// [`from_env`](Self::from_env), falling back to the defaults with a
    /// warning when a variable is malformed.
    pub fn from_env_or_default() -> Self {
        Self::or_default_warned(Self::from_env())
    }

    fn or_default_warned(result: StreamResult<Self>) -> Self {
        result.unwrap_or_else(|err| {
            log::warn!(target: "axh_stream", "ignoring stream environment: {}", err);
            Self::default()
        })
    }

    pub fn with_muted(mut self, channel: Channel) -> Self {
        self.muted.insert(channel);
        self
    }

    pub fn with_unmuted(mut self, channel: Channel) -> Self {
        self.muted.remove(&channel);
        self
    }

    pub fn with_notify_threshold(mut self, priority: Priority) -> Self {
        self.notify_threshold = priority;
        self
    }

    pub fn with_halt_threshold(mut self, priority: Priority) -> Self {
        self.halt_threshold = priority;
        self
    }

    pub fn with_split_lines(mut self, split: bool) -> Self {
        self.split_lines = split;
        self
    }

    pub fn is_muted(&self, channel: Channel) -> bool {
        self.muted.contains(&channel)
    }
}

/// Parse a comma separated channel list. Blank entries are ignored.
pub fn parse_channels(list: &str) -> StreamResult<HashSet<Channel>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Channel::from_str(name).map_err(|_| StreamError::UnknownChannel {
                name: name.to_string(),
            })
        })
        .collect()
}

pub fn parse_priority(raw: &str) -> StreamResult<Priority> {
    raw.trim()
        .parse::<u64>()
        .map(Priority)
        .map_err(|_| StreamError::InvalidPriority {
            value: raw.to_string(),
        })
}
