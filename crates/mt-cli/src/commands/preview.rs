//! Preview command: the computed schedule at a chosen elapsed time.
//!
//! Useful for sanity-checking an agenda file before a meeting ("where will
//! we be 20 minutes in?") without running a clock.

use std::path::Path;

use anyhow::Result;
use mt_core::{Schedule, SessionParameters, format_clock, meeting_cost};
use serde::Serialize;

use crate::config::Config;
use crate::render;

use super::util::{load_agenda, parse_elapsed};

/// JSON preview structure.
#[derive(Debug, Serialize)]
struct JsonPreview<'a> {
    elapsed_seconds: f64,
    elapsed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_dollars: Option<f64>,
    topics: Vec<JsonTopic<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonTopic<'a> {
    name: &'a str,
    duration_minutes: u32,
    #[serde(flatten)]
    slot: &'a mt_core::TopicSlot,
}

/// Resolves the cost parameters from flags, falling back to config defaults.
fn resolve_parameters(
    config: &Config,
    participants: Option<u32>,
    rate: Option<f64>,
) -> Result<Option<SessionParameters>> {
    match (
        participants.or(config.participants),
        rate.or(config.hourly_rate),
    ) {
        (Some(p), Some(r)) => Ok(Some(SessionParameters::new(p, r)?)),
        _ => Ok(None),
    }
}

/// Runs the preview command.
pub fn run(
    config: &Config,
    agenda_path: &Path,
    at: &str,
    participants: Option<u32>,
    rate: Option<f64>,
    json: bool,
) -> Result<()> {
    let agenda = load_agenda(agenda_path)?;
    let elapsed = parse_elapsed(at)?;
    let params = resolve_parameters(config, participants, rate)?;
    let schedule = Schedule::compute(agenda.topics(), elapsed);

    if json {
        let preview = JsonPreview {
            elapsed_seconds: elapsed,
            elapsed: format_clock(elapsed),
            cost_dollars: params.as_ref().map(|p| meeting_cost(p, elapsed)),
            topics: agenda
                .topics()
                .iter()
                .zip(schedule.slots())
                .map(|(topic, slot)| JsonTopic {
                    name: &topic.name,
                    duration_minutes: topic.duration_minutes,
                    slot,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        println!("{}", render::cost_header(elapsed, params.as_ref()));
        println!();
        print!("{}", render::meeting_table(&agenda, &schedule));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_from_flags_override_config() {
        let config = Config {
            default_duration_minutes: 15,
            participants: Some(2),
            hourly_rate: Some(50.0),
        };
        let params = resolve_parameters(&config, Some(5), None).unwrap().unwrap();
        assert_eq!(params.participants, 5);
        assert!((params.hourly_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parameters_absent_when_rate_unknown() {
        let config = Config {
            default_duration_minutes: 15,
            participants: Some(2),
            hourly_rate: None,
        };
        assert!(resolve_parameters(&config, None, None).unwrap().is_none());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let config = Config::default();
        assert!(resolve_parameters(&config, Some(0), Some(50.0)).is_err());
        assert!(resolve_parameters(&config, Some(3), Some(-1.0)).is_err());
    }
}
