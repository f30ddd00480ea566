//! Interactive meeting session.
//!
//! Drives the setup/meeting state machine from stdin line commands. During
//! the meeting phase a 1-second ticker re-renders the status line; the ticker
//! is created on entering the phase and dropped on leaving it, so there is
//! never more than one tick source no matter how often the user flips
//! between editing and meeting.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use mt_core::{Agenda, ParkingLotForm, Phase, Session, SessionParameters, TopicId};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{Duration, MissedTickBehavior};

use crate::clipboard;
use crate::config::Config;
use crate::render;

use super::util::load_agenda;

const SETUP_HELP: &str = "\
setup commands:
  add [minutes] <name> [| description]   append a topic (default duration from config)
  del <n>                                delete topic n
  list                                   show the agenda
  start [<participants> <rate>]          start the meeting
  quit                                   exit";

const MEETING_HELP: &str = "\
meeting commands:
  show                                   full agenda table with countdowns
  park <n> <owners>                      move topic n to the parking lot
  item <name> | <owners> [| description] add an independent parking-lot item
  parking                                show the parking lot
  note <text>                            append a line to the meeting notes
  copy notes | copy parking              export via the clipboard
  halt                                   freeze the clock
  edit                                   back to setup (discards the clock)
  quit                                   exit";

/// A parsed setup-phase command.
#[derive(Debug, Clone, PartialEq)]
enum SetupCommand {
    Add {
        minutes: Option<u32>,
        name: String,
        description: String,
    },
    Delete {
        index: usize,
    },
    List,
    Start {
        participants: Option<u32>,
        rate: Option<f64>,
    },
    Help,
    Quit,
}

/// A parsed meeting-phase command.
#[derive(Debug, Clone, PartialEq)]
enum MeetingCommand {
    Show,
    Park { index: usize, owners: String },
    Item(ParkingLotForm),
    Parking,
    Note { text: String },
    CopyNotes,
    CopyParking,
    Halt,
    Edit,
    Help,
    Quit,
}

/// Runs the interactive session.
pub fn run(config: &Config, agenda_path: Option<&Path>) -> Result<()> {
    let agenda = match agenda_path {
        Some(path) => load_agenda(path)?,
        None => Agenda::new(),
    };
    let session = Session::with_agenda(agenda);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(drive(config, session))
}

async fn drive(config: &Config, mut session: Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Meeting timer. Type 'help' for commands.");

    loop {
        let keep_going = match session.phase() {
            Phase::Setup => setup_loop(config, &mut session, &mut lines).await?,
            Phase::Meeting => meeting_loop(&mut session, &mut lines).await?,
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// Setup phase. Returns false when the program should exit.
async fn setup_loop(
    config: &Config,
    session: &mut Session,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    print_agenda(session);

    loop {
        print!("setup> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_setup_command(line) {
            Err(message) => println!("{message}"),
            Ok(SetupCommand::Quit) => return Ok(false),
            Ok(SetupCommand::Help) => println!("{SETUP_HELP}"),
            Ok(SetupCommand::List) => print_agenda(session),
            Ok(SetupCommand::Add {
                minutes,
                name,
                description,
            }) => {
                let minutes = minutes.unwrap_or(config.default_duration_minutes);
                match session.add_topic(name, minutes, description) {
                    Ok(topic) => {
                        println!("Added '{}' ({} min).", topic.name, topic.duration_minutes);
                    }
                    Err(error) => println!("{error}"),
                }
            }
            Ok(SetupCommand::Delete { index }) => {
                match topic_id_at(session.agenda(), index) {
                    Some(id) => match session.delete_topic(&id) {
                        Ok(topic) => println!("Deleted '{}'.", topic.name),
                        Err(error) => println!("{error}"),
                    },
                    None => println!("No topic #{index} on the agenda."),
                }
            }
            Ok(SetupCommand::Start { participants, rate }) => {
                let Some(participants) = participants.or(config.participants) else {
                    println!("Participant count required: start <participants> <rate>");
                    continue;
                };
                let Some(rate) = rate.or(config.hourly_rate) else {
                    println!("Hourly rate required: start <participants> <rate>");
                    continue;
                };
                match SessionParameters::new(participants, rate) {
                    Ok(params) => {
                        session.start_meeting(params, Utc::now())?;
                        return Ok(true);
                    }
                    Err(error) => println!("{error}"),
                }
            }
        }
    }
}

/// Meeting phase. Owns the only tick source; dropping it on return cancels
/// the pending tick deterministically. Returns false when the program should
/// exit.
async fn meeting_loop(
    session: &mut Session,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    println!("Meeting started. Type 'help' for commands.");
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                print!("\r{:<100}", ticker_line(session)?);
                std::io::stdout().flush()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(false);
                };
                println!();
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_meeting_command(line) {
                    Err(message) => println!("{message}"),
                    Ok(command) => match handle_meeting_command(session, command)? {
                        Outcome::Stay => {}
                        Outcome::LeaveLoop => return Ok(true),
                        Outcome::Exit => return Ok(false),
                    },
                }
            }
        }
    }
}

/// What the meeting loop should do after a command.
enum Outcome {
    Stay,
    LeaveLoop,
    Exit,
}

fn handle_meeting_command(session: &mut Session, command: MeetingCommand) -> Result<Outcome> {
    let now = Utc::now();
    match command {
        MeetingCommand::Quit => return Ok(Outcome::Exit),
        MeetingCommand::Edit => {
            session.go_back()?;
            return Ok(Outcome::LeaveLoop);
        }
        MeetingCommand::Help => println!("{MEETING_HELP}"),
        MeetingCommand::Show => {
            let elapsed = session.elapsed_seconds(now)?;
            let schedule = session.schedule(now)?;
            println!("{}", render::cost_header(elapsed, session.parameters()));
            print!("{}", render::meeting_table(session.agenda(), &schedule));
        }
        MeetingCommand::Parking => {
            print!("{}", render::parking_table(session.parking()?));
        }
        MeetingCommand::Halt => {
            session.halt(now)?;
            println!("Clock halted at {}.", mt_core::format_clock(session.elapsed_seconds(now)?));
        }
        MeetingCommand::Park { index, owners } => match topic_id_at(session.agenda(), index) {
            Some(id) => {
                let form = park_form(session, &id, owners);
                match session.move_topic_to_parking(&id, form, now) {
                    Ok(entry) => println!("Moved '{}' to the parking lot.", entry.name),
                    Err(error) => println!("{error}"),
                }
            }
            None => println!("No topic #{index} on the agenda."),
        },
        MeetingCommand::Item(form) => match session.add_parking_entry(form) {
            Ok(entry) => println!("Parked '{}'.", entry.name),
            Err(error) => println!("{error}"),
        },
        MeetingCommand::Note { text } => {
            let notes = session.notes()?;
            let updated = if notes.is_empty() {
                text
            } else {
                format!("{notes}\n{text}")
            };
            session.set_notes(updated)?;
        }
        MeetingCommand::CopyNotes => {
            clipboard::copy_or_print("notes", session.notes()?);
        }
        MeetingCommand::CopyParking => {
            clipboard::copy_or_print("parking lot", &session.parking()?.clipboard_text());
        }
    }
    Ok(Outcome::Stay)
}

/// The live status line for the current instant.
fn ticker_line(session: &Session) -> Result<String> {
    let now = Utc::now();
    let elapsed = session.elapsed_seconds(now)?;
    let schedule = session.schedule(now)?;
    let params = *session
        .parameters()
        .context("meeting has no parameters")?;
    Ok(render::status_line(
        elapsed,
        &params,
        session.agenda(),
        &schedule,
        session.is_halted(),
    ))
}

/// Pre-fills the parking form from the topic being moved.
fn park_form(session: &Session, id: &TopicId, owners: String) -> ParkingLotForm {
    let mut form = session
        .agenda()
        .get(id)
        .map(ParkingLotForm::from_topic)
        .unwrap_or_default();
    form.owners = owners;
    form
}

fn print_agenda(session: &Session) {
    let agenda = session.agenda();
    if agenda.is_empty() {
        println!("Agenda is empty. Add topics with: add [minutes] <name> [| description]");
        return;
    }
    println!("Agenda ({} min total):", agenda.total_seconds() / 60.0);
    for (index, topic) in agenda.topics().iter().enumerate() {
        let description = if topic.description.is_empty() {
            String::new()
        } else {
            format!("  - {}", topic.description)
        };
        println!(
            "{:>3}. {} ({} min){description}",
            index + 1,
            topic.name,
            topic.duration_minutes
        );
    }
}

/// Resolves a 1-based agenda index to a topic ID.
fn topic_id_at(agenda: &Agenda, index: usize) -> Option<TopicId> {
    if index == 0 {
        return None;
    }
    agenda.topics().get(index - 1).map(|t| t.id.clone())
}

// ========== Command Parsing ==========

/// Splits a line into its first word and the remainder.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn parse_index(rest: &str, usage: &str) -> Result<usize, String> {
    rest.split_whitespace()
        .next()
        .and_then(|t| t.parse().ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| usage.to_string())
}

fn parse_setup_command(line: &str) -> Result<SetupCommand, String> {
    let (command, rest) = split_command(line);
    match command {
        "add" => {
            let mut parts = rest.splitn(2, '|');
            let head = parts.next().unwrap_or("").trim();
            let description = parts.next().unwrap_or("").trim().to_string();
            if head.is_empty() {
                return Err("usage: add [minutes] <name> [| description]".to_string());
            }
            let (minutes, name) = match head.split_once(char::is_whitespace) {
                Some((first, tail)) => match first.parse::<u32>() {
                    Ok(m) => (Some(m), tail.trim().to_string()),
                    Err(_) => (None, head.to_string()),
                },
                // A lone number is minutes without a name
                None if head.parse::<u32>().is_ok() => {
                    return Err("usage: add [minutes] <name> [| description]".to_string());
                }
                None => (None, head.to_string()),
            };
            if name.is_empty() {
                return Err("usage: add [minutes] <name> [| description]".to_string());
            }
            Ok(SetupCommand::Add {
                minutes,
                name,
                description,
            })
        }
        "del" | "delete" => Ok(SetupCommand::Delete {
            index: parse_index(rest, "usage: del <n>")?,
        }),
        "list" | "ls" => Ok(SetupCommand::List),
        "start" => {
            let tokens: Vec<&str> = rest.split_whitespace().collect();
            match tokens.as_slice() {
                [] => Ok(SetupCommand::Start {
                    participants: None,
                    rate: None,
                }),
                [p, r] => {
                    let participants = p
                        .parse()
                        .map_err(|_| format!("invalid participant count '{p}'"))?;
                    let rate = r.parse().map_err(|_| format!("invalid hourly rate '{r}'"))?;
                    Ok(SetupCommand::Start {
                        participants: Some(participants),
                        rate: Some(rate),
                    })
                }
                _ => Err("usage: start [<participants> <rate>]".to_string()),
            }
        }
        "help" | "?" => Ok(SetupCommand::Help),
        "quit" | "q" | "exit" => Ok(SetupCommand::Quit),
        _ => Err(format!("unknown command '{command}' (try 'help')")),
    }
}

fn parse_meeting_command(line: &str) -> Result<MeetingCommand, String> {
    let (command, rest) = split_command(line);
    match command {
        "show" => Ok(MeetingCommand::Show),
        "parking" => Ok(MeetingCommand::Parking),
        "halt" | "stop" => Ok(MeetingCommand::Halt),
        "edit" => Ok(MeetingCommand::Edit),
        "help" | "?" => Ok(MeetingCommand::Help),
        "quit" | "q" | "exit" => Ok(MeetingCommand::Quit),
        "park" => {
            let usage = "usage: park <n> <owners>";
            let (index_token, owners) = split_command(rest);
            let index: usize = index_token
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| usage.to_string())?;
            if owners.is_empty() {
                return Err(usage.to_string());
            }
            Ok(MeetingCommand::Park {
                index,
                owners: owners.to_string(),
            })
        }
        "item" => {
            let mut parts = rest.splitn(3, '|');
            let name = parts.next().unwrap_or("").trim().to_string();
            let owners = parts.next().unwrap_or("").trim().to_string();
            let description = parts.next().unwrap_or("").trim().to_string();
            if name.is_empty() || owners.is_empty() {
                return Err("usage: item <name> | <owners> [| description]".to_string());
            }
            Ok(MeetingCommand::Item(ParkingLotForm {
                name,
                description,
                owners,
            }))
        }
        "note" => {
            if rest.is_empty() {
                return Err("usage: note <text>".to_string());
            }
            Ok(MeetingCommand::Note {
                text: rest.to_string(),
            })
        }
        "copy" => match rest {
            "notes" => Ok(MeetingCommand::CopyNotes),
            "parking" => Ok(MeetingCommand::CopyParking),
            _ => Err("usage: copy notes | copy parking".to_string()),
        },
        _ => Err(format!("unknown command '{command}' (try 'help')")),
    }
}
