use chrono::Datelike;
use luna_core::date::parse_month;
use luna_core::{CalendarMonth, DayCell, Flow, LoveTier, MonthCursor};

use super::{CliResult, Context};

fn cell_text(cell: &DayCell) -> String {
    let mark = match cell.flow {
        Some(Flow::Heavy) => '#',
        Some(Flow::Medium) => '*',
        Some(Flow::Light) => '.',
        None => match cell.love_tier {
            LoveTier::Many => 'V',
            LoveTier::Few => 'v',
            LoveTier::Single => '\'',
            LoveTier::None if cell.intimacy => '+',
            LoveTier::None if cell.has_plain_log => '-',
            LoveTier::None => ' ',
        },
    };
    if cell.is_reference {
        format!("[{:>2}{mark}]", cell.date.day())
    } else {
        format!(" {:>2}{mark} ", cell.date.day())
    }
}

fn print_month(month: &CalendarMonth) {
    println!("{:^35}", month.title);
    println!("  Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    for week in month.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(cell) => cell_text(cell),
                None => "     ".to_string(),
            })
            .collect();
        println!("{}", row.trim_end());
    }
    println!();
    println!("# heavy  * medium  . light  ' v V love  + intimacy  - note  [ ] today");
}

pub fn run(ctx: &Context, month: Option<&str>, offset: i32) -> CliResult {
    let cursor = match month {
        Some(input) => {
            let (year, month) = parse_month(input)?;
            MonthCursor::new(year, month).ok_or_else(|| format!("invalid month '{input}'"))?
        }
        None => MonthCursor::containing(ctx.reference.date()),
    }
    .add_months(offset)
    .ok_or_else(|| format!("month offset {offset} is out of range"))?;

    let config = ctx.config()?;
    let tracker = ctx.tracker(&config)?;
    let calendar = tracker.calendar(cursor);

    if ctx.json {
        return ctx.print_json(&calendar);
    }
    print_month(&calendar);
    Ok(())
}
