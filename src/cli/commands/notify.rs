use crate::cli::parser::{Commands, NotifyCmd};
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{by_severity, info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::format_timestamp;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Notify { action } = cmd {
        let (mut repo, actor) = ctx.session()?;
        actor.require_staff()?;

        match action {
            NotifyCmd::List { unread } => {
                let list: Vec<_> = repo
                    .notifications()?
                    .into_iter()
                    .filter(|n| !*unread || !n.read)
                    .collect();
                if list.is_empty() {
                    info("No notifications.");
                    return Ok(());
                }

                for n in &list {
                    let marker = if n.read { " " } else { "●" };
                    by_severity(
                        n.severity,
                        format!(
                            "{marker} [{}] {} {}({} · {}){}\n     {}",
                            n.id,
                            n.title,
                            GREY,
                            format_timestamp(&n.date),
                            n.category.as_str(),
                            RESET,
                            n.message
                        ),
                    );
                }
            }
            NotifyCmd::Read => {
                let n = repo.mark_notifications_read()?;
                success(format!("{n} notification(s) marked as read"));
            }
            NotifyCmd::Del { id } => {
                repo.delete_notification(id)?;
                success(format!("Notification {id} deleted"));
            }
            NotifyCmd::Clear => {
                let n = repo.delete_all_notifications()?;
                success(format!("{n} notification(s) deleted"));
            }
        }
    }

    Ok(())
}
