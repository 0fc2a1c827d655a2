use crate::models::Document;
use crate::models::activity_log::ActivityLog;
use crate::utils::ids::next_id;
use chrono::NaiveDateTime;

/// Oldest audit lines beyond this count are dropped.
pub const MAX_LOGS: usize = 1000;

/// Write an audit line at the head of the document's activity log.
pub fn log_action(
    doc: &mut Document,
    at: NaiveDateTime,
    action: &str,
    user: &str,
    details: Option<&str>,
) {
    let id = next_id(doc.logs.iter().map(|l| l.id.as_str()));
    doc.logs.insert(
        0,
        ActivityLog {
            id,
            action: action.to_string(),
            user: user.to_string(),
            timestamp: at,
            details: details.map(str::to_string),
        },
    );
    doc.logs.truncate(MAX_LOGS);
}
