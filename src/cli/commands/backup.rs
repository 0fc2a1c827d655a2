use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let (mut repo, actor) = ctx.session()?;
        BackupLogic::backup(&mut repo, &actor, file, *compress, ctx.now)?;
    }

    Ok(())
}
