use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Destination channel of a diagnostic record.
///
/// Every subsystem writes to its own channel so sinks and mute settings can
/// be applied per subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Channel {
    General,
    Window,
    Math,
    FileIo,
    Resources,
    Deconst,
    Vulkan,
    Parallel,
    Memory,
}

impl Channel {
    /// Short tag printed in front of every record of this channel.
    pub fn tag(&self) -> &'static str {
        match self {
            Channel::General => "Debug",
            Channel::Window => "GLFW",
            Channel::Math => "Math",
            Channel::FileIo => "FILE/IO",
            Channel::Resources => "RESOURCE",
            Channel::Deconst => "~D",
            Channel::Vulkan => "VULKAN",
            Channel::Parallel => "PARALLEL",
            Channel::Memory => "MEMORY",
        }
    }
}

/// Priority of a record. Higher is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub u64);

impl Priority {
    pub const DEBUG: Priority = Priority(0);
    pub const MESSAGE: Priority = Priority(16);
    pub const HALT: Priority = Priority(32);

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Priority {
    fn from(value: u64) -> Self {
        Priority(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Priority::DEBUG => write!(f, "debug"),
            Priority::MESSAGE => write!(f, "message"),
            Priority::HALT => write!(f, "halt"),
            Priority(other) => write!(f, "{}", other),
        }
    }
}
