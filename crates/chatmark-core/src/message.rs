use serde::Deserialize;
use thiserror::Error;

/// Length bounds for a message typed into the widget, counted in Unicode
/// scalar values.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageLimits {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 500,
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MessageError {
    #[error("message is empty")]
    Empty,
    #[error("message is {length} characters, at least {min} required")]
    TooShort { length: usize, min: usize },
    #[error("message is {length} characters, at most {max} allowed")]
    TooLong { length: usize, max: usize },
}

/// Checks a user message before it is sent.
///
/// Whitespace-only messages count as empty.
pub fn validate_message(message: &str, limits: &MessageLimits) -> Result<(), MessageError> {
    if message.trim().is_empty() {
        return Err(MessageError::Empty);
    }
    let length = message.chars().count();
    if length < limits.min_length {
        return Err(MessageError::TooShort {
            length,
            min: limits.min_length,
        });
    }
    if length > limits.max_length {
        return Err(MessageError::TooLong {
            length,
            max: limits.max_length,
        });
    }
    Ok(())
}
