use std::collections::BTreeSet;

use clap::Subcommand;
use luna_core::date::format_date;
use luna_core::{DailyLog, Flow, LogEntry, MOODS, SYMPTOMS};
use serde_json::json;

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum LogAction {
    /// Show the log for a date
    Show {
        /// Date (YYYY-MM-DD); defaults to the reference date
        date: Option<String>,
    },
    /// Save the log form for a date. Omitted fields keep their saved value.
    Set {
        /// Date (YYYY-MM-DD); defaults to the reference date
        date: Option<String>,
        /// Flow: light, medium, heavy or none
        #[arg(long)]
        flow: Option<String>,
        /// Mood tag (repeatable, replaces saved moods)
        #[arg(long = "mood")]
        moods: Vec<String>,
        /// Symptom tag (repeatable, replaces saved symptoms)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        /// Drop the saved moods before applying --mood
        #[arg(long)]
        clear_moods: bool,
        /// Drop the saved symptoms before applying --symptom
        #[arg(long)]
        clear_symptoms: bool,
        /// Free-form note; an empty string clears it
        #[arg(long)]
        note: Option<String>,
        /// Intimacy mark
        #[arg(long)]
        intimacy: Option<bool>,
    },
    /// List the suggested mood and symptom tags
    Vocab,
}

fn parse_flow(input: &str) -> Result<Option<Flow>, String> {
    if input.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    input.parse().map(Some)
}

fn tags(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn join(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "-".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn print_log(log: &DailyLog) {
    println!("Date:      {}", format_date(log.date));
    println!(
        "Flow:      {}",
        log.flow.map(|f| f.to_string()).unwrap_or_else(|| "-".into())
    );
    println!("Mood:      {}", join(&log.mood));
    println!("Symptoms:  {}", join(&log.symptoms));
    println!("Note:      {}", log.note.as_deref().unwrap_or("-"));
    println!("Love:      {}", log.love_count);
    println!("Intimacy:  {}", if log.intimacy { "yes" } else { "no" });
}

pub fn run(ctx: &Context, action: LogAction) -> CliResult {
    match action {
        LogAction::Show { date } => {
            let config = ctx.config()?;
            let tracker = ctx.tracker(&config)?;
            let date = ctx.date_arg(date.as_deref());
            let log = tracker.log(date);

            if ctx.json {
                return ctx.print_json(&log);
            }
            match log {
                Some(log) => print_log(log),
                None => println!("nothing logged on {}", format_date(date)),
            }
        }
        LogAction::Set {
            date,
            flow,
            moods,
            symptoms,
            clear_moods,
            clear_symptoms,
            note,
            intimacy,
        } => {
            let config = ctx.config()?;
            let mut tracker = ctx.tracker(&config)?;
            let date = ctx.date_arg(date.as_deref());

            let mut entry = tracker.log(date).map(LogEntry::from_log).unwrap_or_default();
            if let Some(flow) = flow {
                entry.flow = parse_flow(&flow)?;
            }
            if clear_moods {
                entry.mood.clear();
            }
            if clear_symptoms {
                entry.symptoms.clear();
            }
            if !moods.is_empty() {
                entry.mood = tags(moods);
            }
            if !symptoms.is_empty() {
                entry.symptoms = tags(symptoms);
            }
            if let Some(note) = note {
                entry.note = Some(note);
            }
            if let Some(intimacy) = intimacy {
                entry.intimacy = intimacy;
            }

            let log = tracker.save_log(date, entry)?;
            if ctx.json {
                return ctx.print_json(&log);
            }
            print_log(&log);
        }
        LogAction::Vocab => {
            if ctx.json {
                return ctx.print_json(&json!({ "moods": MOODS, "symptoms": SYMPTOMS }));
            }
            println!("Moods:     {}", MOODS.join(", "));
            println!("Symptoms:  {}", SYMPTOMS.join(", "));
        }
    }
    Ok(())
}
