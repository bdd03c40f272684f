use crate::types::BlockUsage;
use chrono::{DateTime, Duration, Local, Timelike};

// Format token counts in compact form. Single-decimal rounding follows Rust's
// `{:.1}` (round half to even).
pub fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

// Format a minute count as "2h 5m" / "2h" / "45m"
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "0m".to_string();
    }

    let (hours, mins) = (minutes / 60, minutes % 60);

    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

// Format currency
pub fn format_currency(value: f64) -> String {
    // Handle negative zero case
    let formatted_value = if value.abs() < 0.005 { 0.00 } else { value };
    format!("${:.2}", formatted_value)
}

/// Render a reset instant as 24-hour clock time ("16h30"). Instants within
/// two minutes of a full hour snap to it: ≥58 minutes past rounds up, ≤2
/// minutes past rounds down, both rendered as the bare hour ("16h").
pub fn format_reset_clock(t: DateTime<Local>) -> String {
    let minute = t.minute() as i64;

    if minute >= 58 {
        let t = t + Duration::minutes(60 - minute);
        return format!("{:02}h", t.hour());
    }
    if minute <= 2 {
        let t = t - Duration::minutes(minute);
        return format!("{:02}h", t.hour());
    }

    format!("{:02}h{:02}", t.hour(), t.minute())
}

/// Assemble the tooltip block: reset countdown, request count, token counts
/// and cost, one pango-bold line each.
pub fn format_tooltip(usage: &BlockUsage, now: DateTime<Local>) -> String {
    let reset_at = now + Duration::minutes(usage.remaining_minutes.max(0));

    format!(
        "<b>\u{f1b2} Active Block (resets in {} - {})</b>\n\
         <b>\u{f1d8} Requests:</b> {}\n\
         <b>\u{f145} Tokens:</b> {} ({} in / {} out)\n\
         <b>\u{f155} Cost:</b> {} @ {}/h",
        format_duration(usage.remaining_minutes),
        format_reset_clock(reset_at),
        usage.entries,
        format_compact_number(usage.total_tokens),
        format_compact_number(usage.input_tokens),
        format_compact_number(usage.output_tokens),
        format_currency(usage.cost_usd),
        format_currency(usage.cost_per_hour),
    )
}

// One-line summary for space-constrained bars
pub fn format_compact_text(usage: &BlockUsage) -> String {
    format!("{} req · {}", usage.entries, format_currency(usage.cost_usd))
}
