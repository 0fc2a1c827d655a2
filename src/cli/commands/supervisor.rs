use crate::cli::parser::{Commands, SupervisorCmd};
use crate::core::context::AppContext;
use crate::core::supervisor::{PermissionChange, SupervisorLogic};
use crate::errors::AppResult;
use crate::models::supervisor::Permission;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREEN, RESET, YELLOW, colorize_optional};
use crate::utils::date::format_timestamp;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let Commands::Supervisor { action } = cmd else {
        return Ok(());
    };

    // registration is open to anyone
    if let SupervisorCmd::Register {
        name,
        username,
        password,
    } = action
    {
        let mut repo = ctx.open_repo()?;
        let s = SupervisorLogic::register(
            &mut repo,
            &ctx.cfg.manager_username,
            name,
            username,
            password,
            ctx.now,
        )?;
        success(format!("Supervisor account '{}' created (id {})", s.username, s.id));
        info("The account can log in once the manager approves it.");
        return Ok(());
    }

    let (mut repo, actor) = ctx.session()?;
    match action {
        SupervisorCmd::Register { .. } => {}
        SupervisorCmd::List => {
            actor.require_manager()?;
            let list = repo.supervisors()?;
            if list.is_empty() {
                info("No supervisor accounts.");
                return Ok(());
            }

            let mut table = Table::new(
                vec![
                    Column::left("ID"),
                    Column::left("Name"),
                    Column::left("Username"),
                    Column::left("Status"),
                    Column::left("Permissions"),
                    Column::left("Created"),
                ],
                &ctx.cfg.separator_char,
            );
            for s in &list {
                let status = if s.approved {
                    format!("{GREEN}approved{RESET}")
                } else {
                    format!("{YELLOW}pending{RESET}")
                };
                let perms: Vec<&str> = s.permissions.iter().map(|p| p.code()).collect();
                table.add_row(vec![
                    s.id.clone(),
                    s.name.clone(),
                    s.username.clone(),
                    status,
                    colorize_optional(&perms.join(", ")),
                    format_timestamp(&s.created_at),
                ]);
            }
            print!("{}", table.render());
        }
        SupervisorCmd::Approve { id } => {
            let s = SupervisorLogic::set_approval(&mut repo, &actor, id, true, ctx.now)?;
            success(format!("Supervisor '{}' approved", s.username));
        }
        SupervisorCmd::Suspend { id } => {
            let s = SupervisorLogic::set_approval(&mut repo, &actor, id, false, ctx.now)?;
            warning(format!("Supervisor '{}' suspended", s.username));
        }
        SupervisorCmd::Perm {
            id,
            permission,
            grant,
            revoke,
        } => {
            let perm = Permission::from_code(permission)?;
            let change = match (*grant, *revoke) {
                (true, _) => PermissionChange::Grant,
                (_, true) => PermissionChange::Revoke,
                _ => PermissionChange::Toggle,
            };
            let s = SupervisorLogic::change_permission(&mut repo, &actor, id, perm, change, ctx.now)?;
            let perms: Vec<&str> = s.permissions.iter().map(|p| p.code()).collect();
            success(format!(
                "Permissions of '{}': [{}]",
                s.username,
                perms.join(", ")
            ));
        }
        SupervisorCmd::Del { id } => {
            let s = SupervisorLogic::delete(&mut repo, &actor, id, ctx.now)?;
            success(format!("Supervisor '{}' deleted", s.username));
        }
    }

    Ok(())
}
