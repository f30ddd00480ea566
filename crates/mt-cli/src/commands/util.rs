//! Shared helpers for subcommands: agenda files and elapsed-time parsing.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mt_core::{Agenda, Topic};
use serde::Deserialize;

/// On-disk agenda format.
#[derive(Debug, Deserialize)]
struct AgendaFile {
    topics: Vec<TopicEntry>,
}

#[derive(Debug, Deserialize)]
struct TopicEntry {
    name: String,
    minutes: u32,
    #[serde(default)]
    description: String,
}

/// Loads an agenda from a JSON file, validating every topic.
pub fn load_agenda(path: &Path) -> Result<Agenda> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read agenda file {}", path.display()))?;
    let file: AgendaFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse agenda file {}", path.display()))?;

    let mut agenda = Agenda::new();
    for entry in file.topics {
        let topic = Topic::new(entry.name, entry.minutes, entry.description)
            .with_context(|| format!("invalid topic in {}", path.display()))?;
        agenda.add(topic);
    }
    tracing::debug!(topics = agenda.len(), "agenda loaded");
    Ok(agenda)
}

/// Parses an elapsed time given as `SS`, `MM:SS`, or `HH:MM:SS`.
pub fn parse_elapsed(input: &str) -> Result<f64> {
    let parts: Vec<&str> = input.split(':').collect();
    let fields: Vec<u64> = parts
        .iter()
        .map(|p| {
            p.parse::<u64>()
                .with_context(|| format!("invalid elapsed time '{input}'"))
        })
        .collect::<Result<_>>()?;

    let seconds = match fields.as_slice() {
        [s] => *s,
        [m, s] if *s < 60 => m * 60 + s,
        [h, m, s] if *m < 60 && *s < 60 => h * 3600 + m * 60 + s,
        _ => bail!("invalid elapsed time '{input}' (expected SS, MM:SS, or HH:MM:SS)"),
    };
    #[allow(
        clippy::cast_precision_loss,
        reason = "meeting lengths stay far below f64's exact integer range"
    )]
    let seconds = seconds as f64;
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "exact values from integer input")]
    fn parse_elapsed_formats() {
        assert_eq!(parse_elapsed("90").unwrap(), 90.0);
        assert_eq!(parse_elapsed("20:00").unwrap(), 1200.0);
        assert_eq!(parse_elapsed("01:00:00").unwrap(), 3600.0);
        assert_eq!(parse_elapsed("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_elapsed_rejects_garbage() {
        assert!(parse_elapsed("").is_err());
        assert!(parse_elapsed("abc").is_err());
        assert!(parse_elapsed("1:2:3:4").is_err());
        assert!(parse_elapsed("10:99").is_err());
        assert!(parse_elapsed("-5").is_err());
    }

    #[test]
    fn load_agenda_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"topics": [
                {{"name": "Budget review", "minutes": 15}},
                {{"name": "Roadmap", "minutes": 30, "description": "Q3 planning"}}
            ]}}"#
        )
        .unwrap();

        let agenda = load_agenda(file.path()).unwrap();
        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda.topics()[1].description, "Q3 planning");
    }

    #[test]
    fn load_agenda_rejects_invalid_topic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"topics": [{{"name": "", "minutes": 15}}]}}"#).unwrap();
        assert!(load_agenda(file.path()).is_err());
    }

    #[test]
    fn load_agenda_missing_file() {
        assert!(load_agenda(Path::new("/nonexistent/agenda.json")).is_err());
    }
}
