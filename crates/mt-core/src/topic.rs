//! Agenda topics and the ordered topic store.

use serde::{Deserialize, Serialize};

use crate::types::{TopicId, ValidationError};

/// The duration choices offered by the setup form, in minutes.
///
/// Advertised to presentation layers but not enforced as a closed set; any
/// positive duration is accepted.
pub const DURATION_CHOICES: [u32; 7] = [1, 5, 10, 15, 20, 30, 60];

/// A timeboxed discussion item.
///
/// Topics are created during the setup phase and are immutable once the
/// meeting starts, except for removal when moved to the parking lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier, assigned at creation.
    pub id: TopicId,

    /// Non-empty label.
    pub name: String,

    /// Timebox length in minutes.
    pub duration_minutes: u32,

    /// Optional free text.
    #[serde(default)]
    pub description: String,
}

impl Topic {
    /// Creates a topic with a fresh ID after validating the fields.
    pub fn new(
        name: impl Into<String>,
        duration_minutes: u32,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "topic name" });
        }
        if duration_minutes == 0 {
            return Err(ValidationError::NotPositive {
                field: "topic duration",
            });
        }
        Ok(Self {
            id: TopicId::random(),
            name,
            duration_minutes,
            description: description.into(),
        })
    }

    /// The topic's timebox length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.duration_minutes) * 60.0
    }
}

/// Ordered list of agenda topics.
///
/// The order defines the cumulative schedule: a topic's scheduled start
/// offset is the sum of the durations before it. Offsets are derived by the
/// scheduler on every evaluation and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    topics: Vec<Topic>,
}

impl Agenda {
    /// Creates an empty agenda.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an agenda from an ordered list of topics.
    #[must_use]
    pub fn from_topics(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Appends a topic at the end of the agenda.
    pub fn add(&mut self, topic: Topic) {
        self.topics.push(topic);
    }

    /// Removes the topic with the given ID, returning it if present.
    pub fn remove(&mut self, id: &TopicId) -> Option<Topic> {
        let index = self.topics.iter().position(|t| &t.id == id)?;
        Some(self.topics.remove(index))
    }

    /// Looks up a topic by ID.
    pub fn get(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| &t.id == id)
    }

    /// The topics in schedule order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Number of topics on the agenda.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the agenda has no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Total scheduled length of the agenda in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.topics.iter().map(Topic::duration_seconds).sum()
    }
}
