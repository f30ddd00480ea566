//! The agenda scheduler.
//!
//! Pure derivation of per-topic status from the ordered topic list and the
//! elapsed meeting time. There is no cursor and no cached state: the whole
//! schedule is recomputed from the current list order on every evaluation, so
//! list mutation can never leave a stale status behind.

use serde::Serialize;

use crate::topic::Topic;
use crate::types::{SessionParameters, TopicId};

/// Visual urgency tier for a running topic's countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Less than one minute remaining.
    Critical,
    /// Less than three minutes remaining.
    Warning,
    /// Three minutes or more remaining.
    Normal,
}

impl Urgency {
    /// Tier for a given remaining time in seconds.
    #[must_use]
    pub fn from_remaining(remaining_seconds: f64) -> Self {
        if remaining_seconds < 60.0 {
            Self::Critical
        } else if remaining_seconds < 180.0 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Schedule-derived status of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TopicStatus {
    /// The topic's window has not opened yet.
    Pending,
    /// The topic's window is open; counting down.
    Running { remaining_seconds: f64 },
    /// The topic's window has closed.
    Done,
}

impl TopicStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// One topic's place in the computed schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSlot {
    /// The topic this slot belongs to.
    pub topic_id: TopicId,

    /// Scheduled start offset in seconds: the sum of the durations of all
    /// topics before this one in the current order.
    pub start_offset: f64,

    /// Scheduled end offset in seconds.
    pub end_offset: f64,

    /// Status at the evaluated elapsed time.
    #[serde(flatten)]
    pub status: TopicStatus,

    /// Whether the topic may still be moved to the parking lot.
    ///
    /// True only while the topic has not yet started; once running or done
    /// it can no longer be selected.
    pub selectable: bool,
}

impl TopicSlot {
    /// Urgency tier, for running slots.
    pub fn urgency(&self) -> Option<Urgency> {
        match self.status {
            TopicStatus::Running { remaining_seconds } => {
                Some(Urgency::from_remaining(remaining_seconds))
            }
            TopicStatus::Pending | TopicStatus::Done => None,
        }
    }
}

/// The computed schedule for one evaluation instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    slots: Vec<TopicSlot>,
}

impl Schedule {
    /// Derives the schedule for `topics` at `elapsed_seconds`.
    ///
    /// For the topic at index `i`, the start offset is the cumulative
    /// duration of topics `0..i` and the end offset adds the topic's own
    /// duration. A zero-duration topic has a zero-width window and is done
    /// as soon as elapsed time reaches its start offset.
    pub fn compute(topics: &[Topic], elapsed_seconds: f64) -> Self {
        let mut slots = Vec::with_capacity(topics.len());
        let mut offset = 0.0;
        for topic in topics {
            let start_offset = offset;
            let end_offset = start_offset + topic.duration_seconds();
            offset = end_offset;

            let status = if elapsed_seconds < start_offset {
                TopicStatus::Pending
            } else if elapsed_seconds >= end_offset {
                TopicStatus::Done
            } else {
                TopicStatus::Running {
                    remaining_seconds: end_offset - elapsed_seconds,
                }
            };

            slots.push(TopicSlot {
                topic_id: topic.id.clone(),
                start_offset,
                end_offset,
                status,
                selectable: elapsed_seconds <= start_offset,
            });
        }
        Self { slots }
    }

    /// The slots in schedule order, one per topic.
    pub fn slots(&self) -> &[TopicSlot] {
        &self.slots
    }

    /// The slot for a specific topic, if it is on the agenda.
    pub fn slot(&self, id: &TopicId) -> Option<&TopicSlot> {
        self.slots.iter().find(|s| &s.topic_id == id)
    }

    /// The currently running slot, if any.
    pub fn current(&self) -> Option<&TopicSlot> {
        self.slots.iter().find(|s| s.status.is_running())
    }
}

/// Accumulated meeting cost in dollars.
///
/// `participants × hourly rate × elapsed time`, with elapsed time in hours.
pub fn meeting_cost(params: &SessionParameters, elapsed_seconds: f64) -> f64 {
    f64::from(params.participants) * params.hourly_rate * elapsed_seconds / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(minutes: &[u32]) -> Vec<Topic> {
        minutes
            .iter()
            .enumerate()
            .map(|(i, m)| Topic::new(format!("Topic {}", i + 1), *m, "").unwrap())
            .collect()
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact values from integer minutes")]
    fn offsets_are_cumulative() {
        let topics = topics(&[15, 30, 10]);
        let schedule = Schedule::compute(&topics, 0.0);
        let slots = schedule.slots();

        assert_eq!(slots[0].start_offset, 0.0);
        assert_eq!(slots[0].end_offset, 900.0);
        assert_eq!(slots[1].start_offset, 900.0);
        assert_eq!(slots[1].end_offset, 2700.0);
        assert_eq!(slots[2].start_offset, 2700.0);
        assert_eq!(slots[2].end_offset, 3300.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact values from integer minutes")]
    fn status_at_twenty_minutes() {
        // 15/30/10-minute agenda at 20 minutes in: first done, second
        // running with 10 minutes left, third pending.
        let topics = topics(&[15, 30, 10]);
        let schedule = Schedule::compute(&topics, 1200.0);
        let slots = schedule.slots();

        assert!(slots[0].status.is_done());
        assert_eq!(
            slots[1].status,
            TopicStatus::Running {
                remaining_seconds: 600.0
            }
        );
        assert!(slots[2].status.is_pending());
        assert_eq!(schedule.current().unwrap().topic_id, topics[1].id);
    }

    #[test]
    fn status_boundaries() {
        let topics = topics(&[15]);

        // Window opens exactly at the start offset
        let at_start = Schedule::compute(&topics, 0.0);
        assert!(at_start.slots()[0].status.is_running());

        // And closes exactly at the end offset
        let at_end = Schedule::compute(&topics, 900.0);
        assert!(at_end.slots()[0].status.is_done());

        let just_before_end = Schedule::compute(&topics, 899.5);
        assert!(just_before_end.slots()[0].status.is_running());
    }

    #[test]
    fn zero_duration_topic_skips_to_done() {
        let mut list = topics(&[15]);
        let mut zero = Topic::new("Placeholder", 1, "").unwrap();
        zero.duration_minutes = 0;
        list.push(zero);

        let before = Schedule::compute(&list, 899.0);
        assert!(before.slots()[1].status.is_pending());

        let at_window = Schedule::compute(&list, 900.0);
        assert!(at_window.slots()[1].status.is_done());
    }

    #[test]
    fn selectable_only_before_start() {
        let topics = topics(&[15, 30]);

        let at_zero = Schedule::compute(&topics, 0.0);
        // First topic is running but has not consumed any time yet
        assert!(at_zero.slots()[0].selectable);
        assert!(at_zero.slots()[1].selectable);

        let mid_first = Schedule::compute(&topics, 1.0);
        assert!(!mid_first.slots()[0].selectable);
        assert!(mid_first.slots()[1].selectable);

        let mid_second = Schedule::compute(&topics, 1000.0);
        assert!(!mid_second.slots()[0].selectable);
        assert!(!mid_second.slots()[1].selectable);
    }

    #[test]
    fn recompute_is_idempotent() {
        let topics = topics(&[15, 30, 10]);
        let first = Schedule::compute(&topics, 1200.0);
        let second = Schedule::compute(&topics, 1200.0);
        assert_eq!(first, second);
    }

    #[test]
    fn removal_shifts_subsequent_offsets() {
        let mut topics = topics(&[15, 30, 10]);
        topics.remove(1);

        let schedule = Schedule::compute(&topics, 0.0);
        let slots = schedule.slots();
        assert!((slots[1].start_offset - 900.0).abs() < f64::EPSILON);
        assert!((slots[1].end_offset - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn urgency_tiers() {
        assert_eq!(Urgency::from_remaining(59.0), Urgency::Critical);
        assert_eq!(Urgency::from_remaining(60.0), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(179.9), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(180.0), Urgency::Normal);
        assert_eq!(Urgency::from_remaining(600.0), Urgency::Normal);
    }

    #[test]
    fn slot_urgency_only_for_running() {
        let topics = topics(&[15, 30]);
        let schedule = Schedule::compute(&topics, 870.0);
        // 30 seconds left on the first topic
        assert_eq!(schedule.slots()[0].urgency(), Some(Urgency::Critical));
        assert_eq!(schedule.slots()[1].urgency(), None);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact value per the cost formula")]
    fn cost_formula() {
        let params = SessionParameters::new(3, 90.0).unwrap();
        assert_eq!(meeting_cost(&params, 1200.0), 90.0);
        assert_eq!(meeting_cost(&params, 0.0), 0.0);
    }

    #[test]
    fn cost_grows_monotonically() {
        let params = SessionParameters::new(5, 120.0).unwrap();
        let mut last = -1.0;
        for elapsed in [0.0, 1.0, 60.0, 3600.0, 7200.0] {
            let cost = meeting_cost(&params, elapsed);
            assert!(cost >= last);
            last = cost;
        }
    }
}
