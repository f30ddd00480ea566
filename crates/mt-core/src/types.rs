//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A count or duration that must be at least 1 was zero.
    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },

    /// The hourly rate was negative or not a finite number.
    #[error("hourly rate must be a non-negative number, got {value}")]
    InvalidRate { value: f64 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Generates a fresh random ID (UUID v4).
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated agenda topic identifier.
    ///
    /// Topic IDs must be non-empty strings. They are assigned when a topic is
    /// created and stay stable for the topic's lifetime.
    TopicId, "topic ID"
);

define_string_id!(
    /// A validated parking-lot entry identifier.
    EntryId, "entry ID"
);

/// Parameters captured at the setup-to-meeting transition.
///
/// Immutable for the duration of a meeting; changing them requires going back
/// to the setup phase and starting a fresh meeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionParameters {
    /// Number of people in the meeting.
    pub participants: u32,

    /// Hourly rate per participant, in dollars.
    pub hourly_rate: f64,
}

impl SessionParameters {
    /// Creates validated session parameters.
    ///
    /// Participants must be at least 1; the rate must be finite and
    /// non-negative. There is no upper bound on either.
    pub fn new(participants: u32, hourly_rate: f64) -> Result<Self, ValidationError> {
        if participants == 0 {
            return Err(ValidationError::NotPositive {
                field: "participant count",
            });
        }
        if !hourly_rate.is_finite() || hourly_rate < 0.0 {
            return Err(ValidationError::InvalidRate { value: hourly_rate });
        }
        Ok(Self {
            participants,
            hourly_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_id_rejects_empty() {
        assert!(TopicId::new("").is_err());
        assert!(TopicId::new("valid-id").is_ok());
    }

    #[test]
    fn topic_id_random_is_unique() {
        let a = TopicId::random();
        let b = TopicId::random();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn topic_id_serde_roundtrip() {
        let id = TopicId::new("topic-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"topic-123\"");
        let parsed: TopicId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn topic_id_serde_rejects_empty() {
        let result: Result<TopicId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn entry_id_rejects_empty() {
        assert!(EntryId::new("").is_err());
        assert!(EntryId::new("entry-1").is_ok());
    }

    #[test]
    fn entry_id_as_ref() {
        let id = EntryId::new("entry-42").unwrap();
        let s: &str = id.as_ref();
        assert_eq!(s, "entry-42");
    }

    #[test]
    fn session_parameters_validate() {
        assert!(SessionParameters::new(3, 90.0).is_ok());
        assert!(SessionParameters::new(1, 0.0).is_ok());
        assert!(SessionParameters::new(0, 90.0).is_err());
        assert!(SessionParameters::new(3, -1.0).is_err());
        assert!(SessionParameters::new(3, f64::NAN).is_err());
        assert!(SessionParameters::new(3, f64::INFINITY).is_err());
    }
}
