//! Printing shortcuts for the global stream.
//!
//! The location of every record is the calling module's path.
//!
//! ```rust
//! use axh_stream::{print_error, print_info, Channel, Priority};
//!
//! print_info!(Channel::FileIo, "loaded {} bytes", 512);
//! let escalation = print_error!(Channel::FileIo, Priority::MESSAGE, "missing chunk {}", 3);
//! assert!(!escalation.is_halt());
//! ```

/// Print an info record at [`Priority::DEBUG`](crate::Priority::DEBUG).
#[macro_export]
macro_rules! print_info {
    ($channel:expr, $($arg:tt)+) => {
        $crate::ChannelStream::global().print_info(
            module_path!(),
            &format!($($arg)+),
            $crate::Priority::DEBUG,
            $channel,
        )
    };
}

/// Print an error record and evaluate to its [`Escalation`](crate::Escalation).
#[macro_export]
macro_rules! print_error {
    ($channel:expr, $priority:expr, $($arg:tt)+) => {
        $crate::ChannelStream::global().print_error(
            module_path!(),
            &format!($($arg)+),
            $priority,
            $channel,
        )
    };
}
