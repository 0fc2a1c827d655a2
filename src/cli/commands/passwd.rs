use crate::cli::parser::Commands;
use crate::core::context::AppContext;
use crate::core::settings::SettingsLogic;
use crate::db::repository::AccountKind;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Passwd {
        worker,
        supervisor,
        new_password,
    } = cmd
    {
        let (kind, id) = match (worker, supervisor) {
            (Some(id), _) => (AccountKind::Worker, id),
            (None, Some(id)) => (AccountKind::Supervisor, id),
            (None, None) => {
                return Err(AppError::Validation(
                    "pass --worker <ID> or --supervisor <ID>".into(),
                ));
            }
        };

        let (mut repo, actor) = ctx.session()?;
        SettingsLogic::reset_password(&mut repo, &actor, kind, id, new_password, ctx.now)?;
        success(format!("Password updated for account {id}"));
    }

    Ok(())
}
