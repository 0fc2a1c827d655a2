use crate::cli::parser::{Commands, RequestCmd};
use crate::core::context::AppContext;
use crate::core::request::RequestLogic;
use crate::errors::AppResult;
use crate::models::request::RequestType;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::date::format_timestamp;
use crate::utils::formatting::group_thousands;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Request { action } = cmd {
        let (mut repo, actor) = ctx.session()?;

        match action {
            RequestCmd::Submit {
                kind,
                reason,
                amount,
            } => {
                let kind = RequestType::from_code(kind)?;
                let r = RequestLogic::submit(&mut repo, &actor, kind, *amount, reason, ctx.now)?;
                success(format!("{} request {} submitted", r.kind.code(), r.id));
            }
            RequestCmd::Pending => {
                let pending = RequestLogic::pending(&mut repo, &actor)?;
                if pending.is_empty() {
                    info("No pending requests.");
                    return Ok(());
                }

                let mut table = Table::new(
                    vec![
                        Column::left("Worker"),
                        Column::left("Name"),
                        Column::left("Req"),
                        Column::left("Type"),
                        Column::right("Amount"),
                        Column::left("Date"),
                        Column::left("Reason"),
                    ],
                    &ctx.cfg.separator_char,
                );
                for (w, r) in pending {
                    table.add_row(vec![
                        w.id,
                        w.name,
                        r.id,
                        r.kind.code().to_string(),
                        colorize_optional(&r.amount.map(group_thousands).unwrap_or_default()),
                        format_timestamp(&r.date),
                        r.reason,
                    ]);
                }
                print!("{}", table.render());
            }
            RequestCmd::Approve { worker, id } => {
                let r = RequestLogic::review(&mut repo, &actor, worker, id, true, ctx.now)?;
                success(format!("{} request {} approved", r.kind.code(), r.id));
            }
            RequestCmd::Reject { worker, id } => {
                let r = RequestLogic::review(&mut repo, &actor, worker, id, false, ctx.now)?;
                warning(format!("{} request {} rejected", r.kind.code(), r.id));
            }
        }
    }

    Ok(())
}
