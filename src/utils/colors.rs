/// ANSI color helper utilities for terminal output.
use crate::core::calculator::payday::PaydayStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Payday badge colour: red when late or due within the alert window,
/// green once paid.
pub fn color_for_status(status: &PaydayStatus) -> &'static str {
    match status {
        PaydayStatus::AlreadyPaid => GREEN,
        PaydayStatus::Overdue(_) => RED,
        PaydayStatus::DueToday | PaydayStatus::DueSoon(_) => YELLOW,
        PaydayStatus::Upcoming(_) => RESET,
    }
}

/// Amount colour:
/// \>0 → reset
/// \<0 → red
/// 0 → grey
pub fn color_for_amount(value: f64) -> &'static str {
    if value < 0.0 {
        RED
    } else if value == 0.0 {
        GREY
    } else {
        RESET
    }
}

/// Grey out empty values.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}-{RESET}")
    } else {
        value.to_string()
    }
}
