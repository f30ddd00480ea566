//! Core domain logic for the meeting timer.
//!
//! This crate contains the fundamental types and logic for:
//! - Scheduling: deriving per-topic status from the agenda and elapsed time
//! - Session control: the setup/meeting state machine
//! - The meeting clock, topic and parking-lot stores, and display formatting
//!
//! Everything here is pure with respect to time: callers pass timestamps in,
//! so the logic is fully testable without a real clock.

pub mod clock;
pub mod format;
pub mod parking;
pub mod schedule;
pub mod session;
pub mod topic;
pub mod types;

pub use clock::MeetingClock;
pub use format::{format_clock, format_dollars};
pub use parking::{ParkingLot, ParkingLotEntry, ParkingLotForm};
pub use schedule::{Schedule, TopicSlot, TopicStatus, Urgency, meeting_cost};
pub use session::{Phase, Session, SessionError};
pub use topic::{Agenda, DURATION_CHOICES, Topic};
pub use types::{EntryId, SessionParameters, TopicId, ValidationError};
