//! Same-day notification deduplication.
//!
//! Dedup is scoped to the calendar day of creation: the same alert may be
//! raised again on the next day, also across restarts.

use crate::models::notification::{Notification, NotificationDraft};
use crate::utils::ids::next_id;
use chrono::NaiveDateTime;

/// Maximum number of stored notifications; the oldest are dropped first.
pub const MAX_NOTIFICATIONS: usize = 50;

/// True when `existing` already covers `draft` on the day of `now`.
pub fn is_duplicate(
    existing: &[Notification],
    draft: &NotificationDraft,
    now: NaiveDateTime,
) -> bool {
    let today = now.date();
    existing
        .iter()
        .filter(|n| n.date.date() == today)
        .any(|n| {
            // imported documents keep the caller's id as the notification id
            let same_id = draft
                .idempotency_id
                .as_deref()
                .is_some_and(|id| n.idempotency_id.as_deref() == Some(id) || n.id == id);
            same_id || (n.title == draft.title && n.message == draft.message)
        })
}

/// Insert `draft` at the head of `list` unless it is a same-day duplicate.
///
/// Returns the id of the stored notification, or `None` when skipped.
pub fn push_notification(
    list: &mut Vec<Notification>,
    draft: NotificationDraft,
    now: NaiveDateTime,
) -> Option<String> {
    if is_duplicate(list, &draft, now) {
        return None;
    }

    let id = next_id(list.iter().map(|n| n.id.as_str()));
    list.insert(0, draft.into_notification(id.clone(), now));
    list.truncate(MAX_NOTIFICATIONS);
    Some(id)
}
