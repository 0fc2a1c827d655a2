use crate::core::auth::Actor;
use crate::db::backend::StorageBackend;
use crate::db::repository::Repository;
use crate::errors::AppResult;
use crate::models::activity_log::ActivityLog;
use crate::utils::date::format_timestamp;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

/// Widest action column before truncation.
const ACTION_MAX: usize = 40;

/// Colour for an audit action.
fn color_for_action(action: &str) -> Colour {
    match action {
        "CREATE_WORKER" => Colour::Green,
        "DELETE_WORKER" => Colour::Red,
        "UPDATE_WORKER" => Colour::Yellow,
        "PAYMENT" => Colour::Cyan,
        "USER_MGMT" | "PASSWORD_RESET" => Colour::Purple,
        "BACKUP_DOWNLOAD" | "RESTORE" => Colour::Blue,
        "REQUEST_REVIEW" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// One printable line: `id: timestamp | ACTION (user) => details`.
pub(crate) fn format_entry(entry: &ActivityLog, id_w: usize, action_w: usize) -> String {
    let label = format!("{} ({})", entry.action, entry.user);
    let visible = if label.chars().count() > ACTION_MAX {
        let mut s: String = label.chars().take(ACTION_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        label
    };

    // only the action word is coloured
    let color = color_for_action(&entry.action);
    let colored = match visible.split_once(' ') {
        Some((word, rest)) => format!("{} {}", color.paint(word), rest),
        None => color.paint(visible.as_str()).to_string(),
    };
    let padding = " ".repeat(action_w.saturating_sub(strip_ansi(&colored).chars().count()));

    format!(
        "{:>id_w$}: {} | {}{} => {}",
        entry.id,
        format_timestamp(&entry.timestamp),
        colored,
        padding,
        entry.details.as_deref().unwrap_or(""),
        id_w = id_w
    )
}

pub struct LogLogic;

impl LogLogic {
    /// Print the activity log, oldest entry first.
    pub fn print_log<B: StorageBackend>(repo: &mut Repository<B>, actor: &Actor) -> AppResult<()> {
        actor.require_manager()?;

        let logs = repo.logs()?;
        if logs.is_empty() {
            println!("📜 Activity log is empty.");
            return Ok(());
        }

        let id_w = logs.iter().map(|l| l.id.len()).max().unwrap_or(1);
        let action_w = logs
            .iter()
            .map(|l| l.action.len() + l.user.len() + 3)
            .max()
            .unwrap_or(10)
            .min(ACTION_MAX);

        println!("📜 Activity log:\n");
        for entry in logs.iter().rev() {
            println!("{}", format_entry(entry, id_w, action_w));
        }
        Ok(())
    }

    pub fn clear<B: StorageBackend>(repo: &mut Repository<B>, actor: &Actor) -> AppResult<usize> {
        actor.require_manager()?;
        repo.clear_logs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formatted_entry_pads_on_visible_width() {
        let entry = ActivityLog {
            id: "7".into(),
            action: "PAYMENT".into(),
            user: "manager".into(),
            timestamp: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            details: Some("Paid salary".into()),
        };
        let line = strip_ansi(&format_entry(&entry, 2, 20));
        assert_eq!(
            line,
            " 7: 2025-06-01T09:30:00 | PAYMENT (manager)    => Paid salary"
        );
    }
}
