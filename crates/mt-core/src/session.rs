//! The session controller.
//!
//! A `Session` owns the setup/meeting state machine: the editable agenda, and
//! while a meeting runs, the clock, the parking lot, and the notes. All
//! timestamps are passed in by the caller, so every transition is testable
//! without a real clock.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clock::MeetingClock;
use crate::parking::{ParkingLot, ParkingLotEntry, ParkingLotForm};
use crate::schedule::{Schedule, meeting_cost};
use crate::topic::{Agenda, Topic};
use crate::types::{EntryId, SessionParameters, TopicId, ValidationError};

/// The two phases of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Editing the agenda and session parameters.
    Setup,
    /// Clock running, scheduler active.
    Meeting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Meeting => write!(f, "meeting"),
        }
    }
}

/// Errors from session operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// The operation is only valid in the other phase.
    #[error("this action is only available in the {expected} phase")]
    WrongPhase { expected: Phase },

    /// No topic with the given ID is on the agenda.
    #[error("no agenda topic with ID {id}")]
    UnknownTopic { id: TopicId },

    /// The topic has already started and can no longer be moved.
    #[error("topic '{name}' has already started and cannot be moved to the parking lot")]
    TopicStarted { name: String },

    /// No parking-lot entry with the given ID.
    #[error("no parking-lot entry with ID {id}")]
    UnknownEntry { id: EntryId },

    /// A field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// State that exists only while a meeting runs.
#[derive(Debug, Clone, PartialEq)]
struct MeetingState {
    params: SessionParameters,
    clock: MeetingClock,
    parking: ParkingLot,
    notes: String,
}

/// One run of setup-phase configuration and meeting-phase execution.
///
/// The agenda outlives meetings: going back to setup keeps the (possibly
/// mutated) topic list as the new editable agenda, while the clock, parking
/// lot, and notes are discarded with the meeting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    agenda: Agenda,
    meeting: Option<MeetingState>,
}

impl Session {
    /// Creates a session in the setup phase with an empty agenda.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session in the setup phase with a pre-built agenda.
    #[must_use]
    pub fn with_agenda(agenda: Agenda) -> Self {
        Self {
            agenda,
            meeting: None,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        if self.meeting.is_some() {
            Phase::Meeting
        } else {
            Phase::Setup
        }
    }

    /// The agenda in schedule order.
    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    // ========== Setup Phase ==========

    /// Adds a topic to the end of the agenda. Setup phase only.
    pub fn add_topic(
        &mut self,
        name: impl Into<String>,
        duration_minutes: u32,
        description: impl Into<String>,
    ) -> Result<&Topic, SessionError> {
        self.require_setup()?;
        let topic = Topic::new(name, duration_minutes, description)?;
        tracing::debug!(topic = %topic.name, minutes = topic.duration_minutes, "topic added");
        self.agenda.add(topic);
        Ok(&self.agenda.topics()[self.agenda.len() - 1])
    }

    /// Deletes a topic from the agenda. Setup phase only.
    pub fn delete_topic(&mut self, id: &TopicId) -> Result<Topic, SessionError> {
        self.require_setup()?;
        self.agenda
            .remove(id)
            .ok_or_else(|| SessionError::UnknownTopic { id: id.clone() })
    }

    /// Starts the meeting: setup → meeting.
    ///
    /// The current topic list becomes the meeting agenda, a fresh clock
    /// starts at zero, and the parking lot and notes start empty.
    pub fn start_meeting(
        &mut self,
        params: SessionParameters,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.require_setup()?;
        tracing::info!(
            participants = params.participants,
            rate = params.hourly_rate,
            topics = self.agenda.len(),
            "meeting started"
        );
        self.meeting = Some(MeetingState {
            params,
            clock: MeetingClock::start(now),
            parking: ParkingLot::new(),
            notes: String::new(),
        });
        Ok(())
    }

    // ========== Meeting Phase ==========

    /// Returns to setup: meeting → setup.
    ///
    /// Discards the clock; the current (possibly mutated) topic list persists
    /// as the new setup-phase agenda.
    pub fn go_back(&mut self) -> Result<(), SessionError> {
        self.require_meeting()?;
        tracing::info!("meeting left, back to setup");
        self.meeting = None;
        Ok(())
    }

    /// Freezes the clock without changing phase.
    pub fn halt(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let meeting = self.meeting_mut()?;
        meeting.clock.halt(now);
        Ok(())
    }

    /// Whether the meeting clock has been halted.
    pub fn is_halted(&self) -> bool {
        self.meeting.as_ref().is_some_and(|m| m.clock.is_halted())
    }

    /// Seconds elapsed in the meeting, sampled at `now`.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Result<f64, SessionError> {
        Ok(self.meeting_ref()?.clock.elapsed_seconds(now))
    }

    /// The schedule derived from the current agenda at `now`.
    pub fn schedule(&self, now: DateTime<Utc>) -> Result<Schedule, SessionError> {
        let elapsed = self.elapsed_seconds(now)?;
        Ok(Schedule::compute(self.agenda.topics(), elapsed))
    }

    /// Accumulated meeting cost in dollars at `now`.
    pub fn cost(&self, now: DateTime<Utc>) -> Result<f64, SessionError> {
        let meeting = self.meeting_ref()?;
        Ok(meeting_cost(
            &meeting.params,
            meeting.clock.elapsed_seconds(now),
        ))
    }

    /// The parameters the meeting was started with.
    pub fn parameters(&self) -> Option<&SessionParameters> {
        self.meeting.as_ref().map(|m| &m.params)
    }

    /// Moves a topic off the agenda into the parking lot.
    ///
    /// Only a topic that has not yet started may be moved; a running or done
    /// topic is rejected and nothing mutates. On success the topic is removed
    /// from the agenda and exactly one entry is appended to the lot, so the
    /// offsets of the remaining topics shift on the next evaluation.
    pub fn move_topic_to_parking(
        &mut self,
        id: &TopicId,
        form: ParkingLotForm,
        now: DateTime<Utc>,
    ) -> Result<&ParkingLotEntry, SessionError> {
        let schedule = self.schedule(now)?;
        let slot = schedule
            .slot(id)
            .ok_or_else(|| SessionError::UnknownTopic { id: id.clone() })?;
        if !slot.selectable {
            let name = self
                .agenda
                .get(id)
                .map_or_else(String::new, |t| t.name.clone());
            return Err(SessionError::TopicStarted { name });
        }

        // Validate the entry before touching the agenda
        let entry = ParkingLotEntry::new(form)?;
        let topic = self
            .agenda
            .remove(id)
            .ok_or_else(|| SessionError::UnknownTopic { id: id.clone() })?;
        tracing::info!(topic = %topic.name, "topic moved to parking lot");

        let meeting = self.meeting_mut()?;
        meeting.parking.add(entry);
        Ok(&meeting.parking.entries()[meeting.parking.len() - 1])
    }

    /// Adds an independent parking-lot item.
    pub fn add_parking_entry(
        &mut self,
        form: ParkingLotForm,
    ) -> Result<&ParkingLotEntry, SessionError> {
        let entry = ParkingLotEntry::new(form)?;
        let meeting = self.meeting_mut()?;
        meeting.parking.add(entry);
        Ok(&meeting.parking.entries()[meeting.parking.len() - 1])
    }

    /// Deletes a parking-lot entry.
    pub fn delete_parking_entry(&mut self, id: &EntryId) -> Result<ParkingLotEntry, SessionError> {
        let meeting = self.meeting_mut()?;
        meeting
            .parking
            .remove(id)
            .ok_or_else(|| SessionError::UnknownEntry { id: id.clone() })
    }

    /// The parking lot for the running meeting.
    pub fn parking(&self) -> Result<&ParkingLot, SessionError> {
        Ok(&self.meeting_ref()?.parking)
    }

    /// The freeform notes for the running meeting.
    pub fn notes(&self) -> Result<&str, SessionError> {
        Ok(&self.meeting_ref()?.notes)
    }

    /// Replaces the notes text.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), SessionError> {
        self.meeting_mut()?.notes = notes.into();
        Ok(())
    }

    // ========== Phase Guards ==========

    fn require_setup(&self) -> Result<(), SessionError> {
        if self.meeting.is_some() {
            return Err(SessionError::WrongPhase {
                expected: Phase::Setup,
            });
        }
        Ok(())
    }

    fn require_meeting(&self) -> Result<(), SessionError> {
        if self.meeting.is_none() {
            return Err(SessionError::WrongPhase {
                expected: Phase::Meeting,
            });
        }
        Ok(())
    }

    fn meeting_ref(&self) -> Result<&MeetingState, SessionError> {
        self.meeting.as_ref().ok_or(SessionError::WrongPhase {
            expected: Phase::Meeting,
        })
    }

    fn meeting_mut(&mut self) -> Result<&mut MeetingState, SessionError> {
        self.meeting.as_mut().ok_or(SessionError::WrongPhase {
            expected: Phase::Meeting,
        })
    }
}
