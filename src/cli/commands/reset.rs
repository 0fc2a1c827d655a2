use crate::cli::parser::Commands;
use crate::core::context::AppContext;
use crate::core::settings::SettingsLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::io::{self, Write};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Reset { yes } = cmd {
        let (mut repo, actor) = ctx.session()?;
        actor.require_manager()?;

        if !*yes {
            warning("This deletes every worker, payment, message and log entry.");
            print!("Type 'yes' to continue: ");
            io::stdout().flush().ok();

            let mut answer = String::new();
            io::stdin().read_line(&mut answer)?;
            if answer.trim() != "yes" {
                return Err(AppError::Validation("reset cancelled".into()));
            }
        }

        SettingsLogic::system_reset(&mut repo, &actor)?;
        success("All data deleted.");
    }

    Ok(())
}
