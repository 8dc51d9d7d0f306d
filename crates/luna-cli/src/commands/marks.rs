//! One-tap marks for the reference date.

use luna_core::date::format_date;
use serde_json::json;

use super::{CliResult, Context};

pub fn love(ctx: &Context) -> CliResult {
    let config = ctx.config()?;
    let mut tracker = ctx.tracker(&config)?;
    let count = tracker.add_love()?;

    if ctx.json {
        return ctx.print_json(&json!({
            "date": tracker.reference(),
            "loveCount": count,
        }));
    }
    println!("love on {}: {count}", format_date(tracker.reference()));
    Ok(())
}

pub fn intimacy(ctx: &Context) -> CliResult {
    let config = ctx.config()?;
    let mut tracker = ctx.tracker(&config)?;
    let intimacy = tracker.toggle_intimacy()?;

    if ctx.json {
        return ctx.print_json(&json!({
            "date": tracker.reference(),
            "intimacy": intimacy,
        }));
    }
    println!(
        "intimacy on {}: {}",
        format_date(tracker.reference()),
        if intimacy { "yes" } else { "no" }
    );
    Ok(())
}
