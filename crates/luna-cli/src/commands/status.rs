use luna_core::date::format_date;
use luna_core::{insight_provider, InsightRequest, PhaseInfo};
use serde_json::json;

use super::{CliResult, Context};

pub fn run(ctx: &Context, ai: bool) -> CliResult {
    let config = ctx.config()?;
    let tracker = ctx.tracker(&config)?;
    let status = tracker.status();
    let info = PhaseInfo::of_state(&status.phase);

    let log = tracker.log(status.reference);
    let request = InsightRequest::from_status(
        &status,
        log.into_iter().flat_map(|l| l.symptoms.iter()),
        log.into_iter().flat_map(|l| l.mood.iter()),
    );
    let mut insights = config.insights.clone();
    insights.ai_enabled |= ai;
    let provider = insight_provider(&insights);
    tracing::debug!(provider = provider.primary_name(), "generating insight");
    let insight = provider.text(&request);

    if ctx.json {
        return ctx.print_json(&json!({
            "status": status,
            "info": info,
            "cycleLength": config.cycle.default_cycle_length,
            "insight": insight,
        }));
    }

    println!("Hello, {}.", config.profile.display_name);
    println!("Date:       {}", format_date(status.reference));
    match status.current_phase() {
        Some(_) => println!("Phase:      {} ({}, {})", info.name, info.season, info.days_range),
        None => println!("Phase:      {}", info.name),
    }
    if let Some(day) = status.cycle_day {
        println!("Cycle day:  {day} of ~{}", config.cycle.default_cycle_length);
    }
    println!(
        "Period:     {}",
        if status.period_ongoing { "ongoing" } else { "not ongoing" }
    );
    println!(
        "Love:       {}{}",
        status.love_count,
        if status.intimacy { "  (intimacy)" } else { "" }
    );
    println!();
    println!("{}", info.description);
    println!("{insight}");
    Ok(())
}
