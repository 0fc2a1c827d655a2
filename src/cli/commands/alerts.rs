use crate::cli::parser::Commands;
use crate::core::alerts::AlertLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if matches!(cmd, Commands::Alerts) {
        let (mut repo, actor) = ctx.session()?;
        actor.require_staff()?;

        let raised = AlertLogic::scan(&mut repo, ctx.now)?;
        if raised.is_empty() {
            info("No new payday reminders.");
        } else {
            warning(format!("{} payday reminder(s) raised", raised.len()));
        }
    }

    Ok(())
}
