use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Restore { file } = cmd {
        let (mut repo, actor) = ctx.session()?;
        BackupLogic::restore(&mut repo, &actor, file, ctx.now)?;
    }

    Ok(())
}
