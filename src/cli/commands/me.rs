use crate::cli::parser::Commands;
use crate::core::context::AppContext;
use crate::core::dashboard::DashboardLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, YELLOW};
use crate::utils::date::format_timestamp;
use crate::utils::formatting::format_money;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if matches!(cmd, Commands::Me) {
        let (mut repo, actor) = ctx.session()?;
        let home = DashboardLogic::worker_home(&mut repo, &actor, ctx.today)?;
        let money = |v: f64| format_money(v, &ctx.cfg.currency);
        let w = &home.worker;

        header(format!("Welcome, {}", w.name));
        println!("Branch        : {} · {}", w.branch, w.job_title);
        println!(
            "Next salary   : {YELLOW}{} day(s){RESET} (pay day {})",
            home.days_to_pay, w.pay_day
        );
        println!("Base salary   : {}", money(w.base_salary));
        println!("Active loan   : {}", money(w.active_loan));

        println!("\nRecent payments:");
        if home.recent_payments.is_empty() {
            println!("  {GREY}none{RESET}");
        }
        for p in &home.recent_payments {
            println!(
                "  {} · {} · {}",
                format_timestamp(&p.date),
                p.kind.label(),
                money(p.amount)
            );
        }

        println!("\nRecent requests:");
        if home.recent_requests.is_empty() {
            println!("  {GREY}none{RESET}");
        }
        for r in &home.recent_requests {
            println!(
                "  {} · {} · {} · {}",
                r.id,
                r.kind.code(),
                r.status.label(),
                r.reason
            );
        }
    }

    Ok(())
}
