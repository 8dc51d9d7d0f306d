use clap::Subcommand;
use luna_core::date::format_date;
use luna_core::{EndOutcome, EndStamp, StartOutcome};

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum PeriodAction {
    /// Period started on the reference date
    Start,
    /// Period ended on the reference date
    End {
        /// Period actually ended the day before
        #[arg(long)]
        yesterday: bool,
    },
}

pub fn run(ctx: &Context, action: PeriodAction) -> CliResult {
    let config = ctx.config()?;
    let mut tracker = ctx.tracker(&config)?;

    match action {
        PeriodAction::Start => {
            let outcome = tracker.start_period()?;
            if ctx.json {
                return ctx.print_json(&outcome);
            }
            match outcome {
                StartOutcome::Inserted { start_date } => {
                    println!("period started on {}", format_date(start_date));
                }
                StartOutcome::MovedEarlier { from, to } => {
                    println!("period start moved from {} to {}", format_date(from), format_date(to));
                }
                StartOutcome::AlreadyRecorded { start_date } => {
                    println!("already recorded: period started on {}", format_date(start_date));
                }
            }
        }
        PeriodAction::End { yesterday } => {
            let stamp = if yesterday { EndStamp::Yesterday } else { EndStamp::Today };
            let outcome = tracker.end_period(stamp)?;
            if ctx.json {
                return ctx.print_json(&outcome);
            }
            match outcome {
                EndOutcome::NoActiveCycle => println!("no active period to end"),
                EndOutcome::Removed { start_date } => {
                    println!("period starting {} removed", format_date(start_date));
                }
                EndOutcome::Closed { start_date, end_date } => {
                    println!(
                        "period {} .. {} recorded",
                        format_date(start_date),
                        format_date(end_date)
                    );
                }
                EndOutcome::NotOngoing { start_date } => {
                    println!(
                        "period starting {} is already over; nothing changed",
                        format_date(start_date)
                    );
                }
            }
        }
    }
    Ok(())
}
