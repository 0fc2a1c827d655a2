use crate::cli::parser::Commands;
use crate::core::context::AppContext;
use crate::core::report::{ReportFilter, ReportLogic};
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::export::{ExportFormat, ExportLogic};
use crate::models::payment::PaymentType;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{format_money, group_thousands};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Report {
        branch,
        worker,
        kind,
        range,
        export,
        file,
        force,
    } = cmd
    {
        let filter = ReportFilter {
            branch: branch.clone(),
            worker: worker.clone(),
            kind: kind.as_deref().map(PaymentType::from_code).transpose()?,
            range: range.as_deref().map(parse_range).transpose()?,
        };

        let (mut repo, actor) = ctx.session()?;
        let rows = ReportLogic::payments(&mut repo, &actor, &filter)?;

        if let Some(format) = export {
            let file = file
                .clone()
                .unwrap_or_else(|| default_file(*format));
            ExportLogic::export(&rows, *format, &file, *force)?;
            return Ok(());
        }

        if rows.is_empty() {
            info("No payments found for the selected filters.");
            return Ok(());
        }

        let mut table = Table::new(
            vec![
                Column::left("Date"),
                Column::left("Worker"),
                Column::left("Branch"),
                Column::left("Type"),
                Column::right("Amount"),
            ],
            &ctx.cfg.separator_char,
        );
        for r in &rows {
            table.add_row(vec![
                r.date.clone(),
                format!("{} ({})", r.worker, r.worker_id),
                r.branch.clone(),
                r.kind.clone(),
                group_thousands(r.amount),
            ]);
        }

        header("Financial report");
        print!("{}", table.render());

        let totals = ReportLogic::totals(&rows);
        println!();
        for (k, sum) in &totals.by_type {
            println!("{:<10}: {}", k.label(), format_money(*sum, &ctx.cfg.currency));
        }
        println!(
            "{:<10}: {} ({} payments)",
            "Total",
            format_money(totals.amount, &ctx.cfg.currency),
            totals.count
        );
    }

    Ok(())
}

fn default_file(format: ExportFormat) -> String {
    format!("samipro_report.{}", format.as_str())
}
