use crate::cli::parser::Commands;
use crate::core::alerts::AlertLogic;
use crate::core::context::AppContext;
use crate::core::dashboard::DashboardLogic;
use crate::core::log::format_entry;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{GREEN, GREY, RED, RESET};
use crate::utils::formatting::format_money;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if matches!(cmd, Commands::Dashboard) {
        let (mut repo, actor) = ctx.session()?;
        actor.require_staff()?;

        // opening the dashboard runs the payday scan
        let raised = AlertLogic::scan(&mut repo, ctx.now)?;
        if !raised.is_empty() {
            warning(format!("{} payday reminder(s) raised", raised.len()));
        }

        let s = DashboardLogic::summary(&mut repo, ctx.today)?;
        let money = |v: f64| format_money(v, &ctx.cfg.currency);

        header(format!("Dashboard · {}", ctx.today));
        println!("Workers            : {}", s.total_workers);
        println!("Active loans       : {}", money(s.total_loans));
        println!("Paid this month    : {GREEN}{}{RESET}", money(s.paid_this_month));
        println!("Unpaid workers     : {}", s.unpaid_workers);
        println!("Estimated remaining: {}", money(s.estimated_remaining));

        println!("\nUrgent payrolls:");
        if s.urgent.is_empty() {
            println!("  {GREY}none{RESET}");
        }
        for (w, days) in &s.urgent {
            let when = if *days == 0 {
                "today".to_string()
            } else {
                format!("in {days} day(s)")
            };
            println!("  {RED}●{RESET} {} ({}) · {} · {}", w.name, w.id, w.branch, when);
        }

        println!("\nRecent activity:");
        if s.recent_logs.is_empty() {
            println!("  {GREY}none{RESET}");
        }
        let id_w = s.recent_logs.iter().map(|l| l.id.len()).max().unwrap_or(1);
        for entry in &s.recent_logs {
            println!("  {}", format_entry(entry, id_w, 0));
        }
    }

    Ok(())
}
