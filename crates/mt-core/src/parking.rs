//! The parking lot: topics and ad-hoc items set aside for later discussion.

use serde::{Deserialize, Serialize};

use crate::topic::Topic;
use crate::types::{EntryId, ValidationError};

/// Plain-data payload for creating a parking-lot entry.
///
/// Produced by a dialog collaborator, either blank (independent add) or
/// pre-filled from a topic being moved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLotForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owners: String,
}

impl ParkingLotForm {
    /// Pre-fills the form from a topic, leaving the owners blank.
    #[must_use]
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            description: topic.description.clone(),
            owners: String::new(),
        }
    }
}

/// An item parked for later discussion.
///
/// Deletable at any time during the meeting; never otherwise mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLotEntry {
    /// Unique identifier, assigned at creation.
    pub id: EntryId,

    /// Non-empty label.
    pub name: String,

    /// Optional free text.
    #[serde(default)]
    pub description: String,

    /// Non-empty free text naming the responsible parties.
    pub owners: String,
}

impl ParkingLotEntry {
    /// Creates an entry with a fresh ID after validating the form fields.
    pub fn new(form: ParkingLotForm) -> Result<Self, ValidationError> {
        if form.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "topic name" });
        }
        if form.owners.trim().is_empty() {
            return Err(ValidationError::Empty { field: "owners" });
        }
        Ok(Self {
            id: EntryId::random(),
            name: form.name,
            description: form.description,
            owners: form.owners,
        })
    }
}

/// Ordered list of parked items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingLot {
    entries: Vec<ParkingLotEntry>,
}

impl ParkingLot {
    /// Creates an empty parking lot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn add(&mut self, entry: ParkingLotEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry with the given ID, returning it if present.
    pub fn remove(&mut self, id: &EntryId) -> Option<ParkingLotEntry> {
        let index = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[ParkingLotEntry] {
        &self.entries
    }

    /// Number of parked items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text serialization for the clipboard collaborator.
    ///
    /// One row per entry: `name - description - owners`, newline-joined.
    pub fn clipboard_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} - {} - {}", e.name, e.description, e.owners))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
