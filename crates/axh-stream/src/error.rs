//! Error types for stream configuration.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum StreamError {
    /// A channel name in a mute list did not match any [`crate::Channel`].
    #[error("unknown channel '{name}'")]
    UnknownChannel { name: String },

    /// A priority value could not be parsed as an unsigned integer.
    #[error("invalid priority '{value}': expected an unsigned integer")]
    InvalidPriority { value: String },
}

pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_channel_message() {
        let err = StreamError::UnknownChannel {
            name: "audio".to_string(),
        };
        assert_eq!(err.to_string(), "unknown channel 'audio'");
    }

    #[test]
    fn test_invalid_priority_message() {
        let err = StreamError::InvalidPriority {
            value: "high".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid priority 'high': expected an unsigned integer"
        );
    }
}
