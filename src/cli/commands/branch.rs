use crate::cli::parser::{BranchCmd, Commands};
use crate::core::branch::BranchLogic;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Branch { action } = cmd {
        let (mut repo, actor) = ctx.session()?;

        match action {
            BranchCmd::List => {
                actor.require_staff()?;
                let mut table = Table::new(
                    vec![
                        Column::left("ID"),
                        Column::left("Name"),
                        Column::left("Location"),
                        Column::right("Workers"),
                    ],
                    &ctx.cfg.separator_char,
                );
                for (b, count) in BranchLogic::with_head_count(&mut repo)? {
                    table.add_row(vec![
                        b.id,
                        b.name,
                        colorize_optional(b.location.as_deref().unwrap_or("")),
                        count.to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
            BranchCmd::Add { name, location } => {
                let b = BranchLogic::add(&mut repo, &actor, name, location.as_deref())?;
                success(format!("Branch '{}' added (id {})", b.name, b.id));
            }
            BranchCmd::Del { id } => {
                let b = BranchLogic::delete(&mut repo, &actor, id)?;
                success(format!("Branch '{}' deleted", b.name));
            }
        }
    }

    Ok(())
}
