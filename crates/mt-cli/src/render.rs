//! Plain-text rendering of the meeting and parking-lot tables.

use std::fmt::Write;

use mt_core::{
    Agenda, ParkingLot, Schedule, SessionParameters, TopicStatus, Urgency, format_clock,
    format_dollars, meeting_cost,
};

/// Formats the elapsed-time and cost header.
///
/// The cost figure is omitted when session parameters are not known
/// (e.g. `preview` without `--participants`/`--rate`).
pub fn cost_header(elapsed_seconds: f64, params: Option<&SessionParameters>) -> String {
    let time_spent = format_clock(elapsed_seconds);
    match params {
        Some(p) => {
            let dollars = format_dollars(meeting_cost(p, elapsed_seconds));
            format!("Time spent {time_spent}   Dollars cost ${dollars}")
        }
        None => format!("Time spent {time_spent}"),
    }
}

/// The clock cell for a slot: empty for pending, a countdown with an urgency
/// marker while running, "Done" afterwards.
fn clock_cell(status: TopicStatus) -> String {
    match status {
        TopicStatus::Pending => String::new(),
        TopicStatus::Done => "Done".to_string(),
        TopicStatus::Running { remaining_seconds } => {
            let countdown = format_clock(remaining_seconds);
            match Urgency::from_remaining(remaining_seconds) {
                Urgency::Critical => format!("{countdown} (!!)"),
                Urgency::Warning => format!("{countdown} (!)"),
                Urgency::Normal => countdown,
            }
        }
    }
}

/// Formats the meeting table: one row per topic with a selection marker in
/// the first column for topics that can still be moved to the parking lot.
pub fn meeting_table(agenda: &Agenda, schedule: &Schedule) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "    #  {:<24}{:<10}{:<32}Clock",
        "Name", "Time", "Description"
    )
    .unwrap();

    for (index, (topic, slot)) in agenda.topics().iter().zip(schedule.slots()).enumerate() {
        let marker = if slot.selectable { "*" } else { " " };
        let minutes = format!("{} min", topic.duration_minutes);
        writeln!(
            output,
            "{marker} {:>3}  {:<24}{:<10}{:<32}{}",
            index + 1,
            truncate(&topic.name, 22),
            minutes,
            truncate(&topic.description, 30),
            clock_cell(slot.status)
        )
        .unwrap();
    }

    if agenda.is_empty() {
        writeln!(output, "(no agenda topics)").unwrap();
    }
    output
}

/// Formats the parking-lot table.
pub fn parking_table(lot: &ParkingLot) -> String {
    let mut output = String::new();
    writeln!(output, "PARKING LOT").unwrap();
    writeln!(output, "───────────").unwrap();

    if lot.is_empty() {
        writeln!(output, "(empty)").unwrap();
        return output;
    }

    writeln!(
        output,
        "  #  {:<24}{:<32}Owners",
        "Topic", "Description"
    )
    .unwrap();
    for (index, entry) in lot.entries().iter().enumerate() {
        writeln!(
            output,
            "{:>3}  {:<24}{:<32}{}",
            index + 1,
            truncate(&entry.name, 22),
            truncate(&entry.description, 30),
            entry.owners
        )
        .unwrap();
    }
    output
}

/// One-line meeting status for the live ticker.
pub fn status_line(
    elapsed_seconds: f64,
    params: &SessionParameters,
    agenda: &Agenda,
    schedule: &Schedule,
    halted: bool,
) -> String {
    let time_spent = format_clock(elapsed_seconds);
    let dollars = format_dollars(meeting_cost(params, elapsed_seconds));
    let current = schedule.current().and_then(|slot| {
        let topic = agenda.get(&slot.topic_id)?;
        Some(format!("{} {}", topic.name, clock_cell(slot.status)))
    });

    let mut line = format!("[{time_spent}] ${dollars}");
    match current {
        Some(current) => write!(line, "  {current}").unwrap(),
        None if agenda.is_empty() || schedule.slots().iter().all(|s| s.status.is_done()) => {
            line.push_str("  agenda complete");
        }
        None => {}
    }
    if halted {
        line.push_str("  (halted)");
    }
    line
}

/// Truncates a cell value, marking the cut with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use mt_core::{ParkingLotEntry, ParkingLotForm, Topic};

    use super::*;

    fn agenda() -> Agenda {
        let mut agenda = Agenda::new();
        agenda.add(Topic::new("Budget review", 15, "").unwrap());
        agenda.add(Topic::new("Roadmap", 30, "Q3 planning").unwrap());
        agenda.add(Topic::new("AOB", 10, "").unwrap());
        agenda
    }

    #[test]
    fn cost_header_with_and_without_params() {
        let params = SessionParameters::new(3, 90.0).unwrap();
        assert_snapshot!(
            cost_header(1200.0, Some(&params)),
            @"Time spent 20:00   Dollars cost $90.00"
        );
        assert_snapshot!(cost_header(1200.0, None), @"Time spent 20:00");
    }

    #[test]
    fn meeting_table_shows_statuses() {
        let agenda = agenda();
        let schedule = Schedule::compute(agenda.topics(), 1200.0);
        let output = meeting_table(&agenda, &schedule);

        assert!(output.contains("Budget review"));
        assert!(output.contains("Done"));
        assert!(output.contains("10:00"));
        // The pending topic row ends without a clock cell
        assert!(output.lines().any(|l| l.contains("AOB") && !l.contains(':')));
    }

    #[test]
    fn meeting_table_marks_selectable_rows() {
        let agenda = agenda();
        let schedule = Schedule::compute(agenda.topics(), 1200.0);
        let output = meeting_table(&agenda, &schedule);

        let aob_row = output.lines().find(|l| l.contains("AOB")).unwrap();
        assert!(aob_row.starts_with('*'));
        let done_row = output.lines().find(|l| l.contains("Budget")).unwrap();
        assert!(done_row.starts_with(' '));
    }

    #[test]
    fn meeting_table_urgency_markers() {
        let agenda = agenda();
        // 30 seconds left on the first topic
        let critical = meeting_table(&agenda, &Schedule::compute(agenda.topics(), 870.0));
        assert!(critical.contains("00:30 (!!)"));

        // 2 minutes left
        let warning = meeting_table(&agenda, &Schedule::compute(agenda.topics(), 780.0));
        assert!(warning.contains("02:00 (!)"));

        // 10 minutes left
        let normal = meeting_table(&agenda, &Schedule::compute(agenda.topics(), 300.0));
        assert!(normal.contains("10:00"));
        assert!(!normal.contains("(!"));
    }

    #[test]
    fn empty_agenda_table() {
        let agenda = Agenda::new();
        let schedule = Schedule::compute(agenda.topics(), 0.0);
        assert!(meeting_table(&agenda, &schedule).contains("(no agenda topics)"));
    }

    #[test]
    fn parking_table_lists_entries() {
        let mut lot = ParkingLot::new();
        lot.add(
            ParkingLotEntry::new(ParkingLotForm {
                name: "Scaling".to_string(),
                description: "Sharding options".to_string(),
                owners: "alice".to_string(),
            })
            .unwrap(),
        );
        let output = parking_table(&lot);
        assert!(output.contains("Scaling"));
        assert!(output.contains("alice"));
    }

    #[test]
    fn parking_table_empty() {
        assert!(parking_table(&ParkingLot::new()).contains("(empty)"));
    }

    #[test]
    fn status_line_shows_current_topic() {
        let agenda = agenda();
        let params = SessionParameters::new(3, 90.0).unwrap();
        let schedule = Schedule::compute(agenda.topics(), 1200.0);
        let line = status_line(1200.0, &params, &agenda, &schedule, false);
        assert_eq!(line, "[20:00] $90.00  Roadmap 10:00");
    }

    #[test]
    fn status_line_after_agenda_completes() {
        let agenda = agenda();
        let params = SessionParameters::new(3, 90.0).unwrap();
        let schedule = Schedule::compute(agenda.topics(), 4000.0);
        let line = status_line(4000.0, &params, &agenda, &schedule, true);
        assert!(line.contains("agenda complete"));
        assert!(line.contains("(halted)"));
    }

    #[test]
    fn truncate_long_cells() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long topic name", 10), "a very lo…");
    }
}
