use crate::channel::{Channel, Priority};
use std::fmt;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Info,
    Error,
}

/// A single line of diagnostic output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub location: String,
    pub message: String,
    pub level: Level,
    pub priority: Priority,
    pub channel: Channel,
}

impl Record {
    pub fn new(
        location: impl Into<String>,
        message: impl Into<String>,
        level: Level,
        priority: Priority,
        channel: Channel,
    ) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            level,
            priority,
            channel,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// `|TAG| [LEVEL] @location: message`
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{}| [{}] @{}: {}",
            self.channel.tag(),
            self.level,
            self.location,
            self.message
        )
    }
}
