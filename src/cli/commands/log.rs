use crate::cli::parser::Commands;
use crate::core::context::AppContext;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Log { print, clear } = cmd {
        let (mut repo, actor) = ctx.session()?;

        if *print {
            LogLogic::print_log(&mut repo, &actor)?;
        }

        if *clear {
            let n = LogLogic::clear(&mut repo, &actor)?;
            success(format!("Activity log cleared ({n} entries removed)"));
        }
    }

    Ok(())
}
