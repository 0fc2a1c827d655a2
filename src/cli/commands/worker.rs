use crate::cli::parser::{Commands, WorkerArgs, WorkerCmd};
use crate::core::calculator::payday::payday_status;
use crate::core::context::AppContext;
use crate::core::worker::{WorkerInput, WorkerLogic};
use crate::errors::AppResult;
use crate::models::supervisor::Permission;
use crate::models::worker::Worker;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::formatting::{format_money, group_thousands};
use crate::utils::table::{Column, Table};

impl From<&WorkerArgs> for WorkerInput {
    fn from(a: &WorkerArgs) -> Self {
        WorkerInput {
            name: a.name.clone(),
            branch: a.branch.clone(),
            job_title: a.job_title.clone(),
            iqama: a.iqama.clone(),
            iqama_expiry_date: a.iqama_expiry_date.clone(),
            mobile: a.mobile.clone(),
            password: a.login_password.clone(),
            bank_name: a.bank.clone(),
            account_number: a.account.clone(),
            join_date: a.join_date.clone(),
            pay_day: a.pay_day,
            base_salary: a.salary,
            housing_allowance: a.housing,
            transport_allowance: a.transport,
            active_loan: a.loan,
            absences: a.absences,
            overtime_hours: a.overtime,
        }
    }
}

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Worker { action } = cmd {
        let (mut repo, actor) = ctx.session()?;

        match action {
            WorkerCmd::List { branch } => {
                actor.require(Permission::ManageWorkers)?;
                let workers: Vec<Worker> = repo
                    .workers()?
                    .into_iter()
                    .filter(|w| branch.as_ref().is_none_or(|b| &w.branch == b))
                    .collect();
                print_list(&workers, ctx);
            }
            WorkerCmd::Show { id } => {
                actor.require(Permission::ManageWorkers)?;
                let w = repo.worker(id)?;
                print_details(&w, ctx);
            }
            WorkerCmd::Add { fields } => {
                WorkerLogic::add(&mut repo, &ctx.cfg, &actor, &WorkerInput::from(fields), ctx.now)?;
            }
            WorkerCmd::Edit { id, fields } => {
                WorkerLogic::edit(&mut repo, &ctx.cfg, &actor, id, &WorkerInput::from(fields), ctx.now)?;
            }
            WorkerCmd::Del { id } => {
                WorkerLogic::delete(&mut repo, &actor, id, ctx.now)?;
            }
        }
    }

    Ok(())
}

fn print_list(workers: &[Worker], ctx: &AppContext) {
    if workers.is_empty() {
        info("No workers registered.");
        return;
    }

    let mut table = Table::new(
        vec![
            Column::left("ID"),
            Column::left("Name"),
            Column::left("Branch"),
            Column::left("Job"),
            Column::right("Base salary"),
            Column::right("Pay day"),
            Column::left("Status"),
        ],
        &ctx.cfg.separator_char,
    );

    for w in workers {
        let status = payday_status(w, ctx.today);
        table.add_row(vec![
            w.id.clone(),
            w.name.clone(),
            w.branch.clone(),
            colorize_optional(&w.job_title),
            group_thousands(w.base_salary),
            w.pay_day.to_string(),
            format!("{}{}{}", color_for_status(&status), status.describe(), RESET),
        ]);
    }

    print!("{}", table.render());
    println!("\n{} worker(s)", workers.len());
}

fn print_details(w: &Worker, ctx: &AppContext) {
    let money = |v: f64| format_money(v, &ctx.cfg.currency);
    let status = payday_status(w, ctx.today);

    header(format!("Worker {} · {}", w.id, w.name));
    println!("Branch       : {}", w.branch);
    println!("Job title    : {}", colorize_optional(&w.job_title));
    println!("Iqama        : {} (expires {})", w.iqama, colorize_optional(&w.iqama_expiry_date));
    println!("Mobile       : {}", w.mobile);
    println!("Bank         : {} {}", colorize_optional(&w.bank_name), w.account_number);
    println!("Joined       : {}", colorize_optional(&w.join_date));
    println!();
    println!("Base salary  : {}", money(w.base_salary));
    println!("Housing      : {}", money(w.housing_allowance));
    println!("Transport    : {}", money(w.transport_allowance));
    println!("Active loan  : {}", money(w.active_loan));
    println!("Absences     : {} day(s)", w.absences_this_month);
    println!("Overtime     : {} h", w.overtime_hours);
    println!(
        "Pay day      : {} ({}{}{})",
        w.pay_day,
        color_for_status(&status),
        status.describe(),
        RESET
    );
    println!("Payments     : {}", w.payments.len());
}
