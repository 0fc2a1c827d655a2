use crate::cli::parser::{Commands, FormArgs, PayCmd};
use crate::core::context::AppContext;
use crate::core::payroll::{FormOverrides, PaymentPreview, PayrollLogic};
use crate::errors::AppResult;
use crate::models::supervisor::Permission;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{RESET, color_for_amount, color_for_status};
use crate::utils::date::format_timestamp;
use crate::utils::formatting::{format_money, group_thousands};
use crate::utils::table::{Column, Table};

impl From<&FormArgs> for FormOverrides {
    fn from(a: &FormArgs) -> Self {
        FormOverrides {
            overtime_hours: a.overtime,
            bonuses: a.bonus,
            absence_deduction: a.absence_deduction,
            loan_deduction: a.loan_deduction,
            notes: a.notes.clone(),
        }
    }
}

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Pay { action } = cmd {
        let (mut repo, actor) = ctx.session()?;

        match action {
            PayCmd::Due => {
                let due = PayrollLogic::due(&mut repo, &actor, ctx.today)?;
                if due.is_empty() {
                    info("No salaries due.");
                    return Ok(());
                }

                let mut table = Table::new(
                    vec![
                        Column::left("ID"),
                        Column::left("Name"),
                        Column::left("Branch"),
                        Column::right("Package"),
                        Column::right("Pay day"),
                        Column::left("Status"),
                    ],
                    &ctx.cfg.separator_char,
                );
                for (w, status) in &due {
                    table.add_row(vec![
                        w.id.clone(),
                        w.name.clone(),
                        w.branch.clone(),
                        group_thousands(w.monthly_package()),
                        w.pay_day.to_string(),
                        format!("{}{}{}", color_for_status(status), status.describe(), RESET),
                    ]);
                }
                print!("{}", table.render());
            }
            PayCmd::Preview { id, form } => {
                let preview = PayrollLogic::preview(
                    &mut repo,
                    &actor,
                    id,
                    &FormOverrides::from(form),
                    ctx.today,
                )?;
                print_slip(&preview, &ctx.cfg.currency);
            }
            PayCmd::Confirm { id, form } => {
                let payment =
                    PayrollLogic::confirm(&mut repo, &actor, id, &FormOverrides::from(form), ctx.now)?;
                let worker = repo.worker(id)?;
                success(format!(
                    "Salary paid to {}: {} (payment {})",
                    worker.name,
                    format_money(payment.amount, &ctx.cfg.currency),
                    payment.id
                ));
            }
            PayCmd::History { id } => {
                actor.require(Permission::ProcessPayments)?;
                let worker = repo.worker(id)?;
                if worker.payments.is_empty() {
                    info(format!("No payments recorded for {}.", worker.name));
                    return Ok(());
                }

                let mut table = Table::new(
                    vec![
                        Column::left("ID"),
                        Column::left("Date"),
                        Column::left("Type"),
                        Column::right("Amount"),
                        Column::left("Notes"),
                    ],
                    &ctx.cfg.separator_char,
                );
                for p in worker.payments.iter().rev() {
                    table.add_row(vec![
                        p.id.clone(),
                        format_timestamp(&p.date),
                        p.kind.label().to_string(),
                        format!(
                            "{}{}{}",
                            color_for_amount(p.amount),
                            group_thousands(p.amount),
                            RESET
                        ),
                        p.details.notes.clone().unwrap_or_default(),
                    ]);
                }
                header(format!("Payments of {}", worker.name));
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}

fn print_slip(p: &PaymentPreview, currency: &str) {
    let money = |v: f64| format_money(v, currency);
    let w = &p.worker;

    header(format!("Salary slip · {} ({})", w.name, p.status.describe()));
    println!("Base salary        : {}", money(w.base_salary));
    println!("Housing            : {}", money(w.housing_allowance));
    println!("Transport          : {}", money(w.transport_allowance));
    println!(
        "Overtime ({:>4} h)  : {}",
        p.form.overtime_hours,
        money(p.totals.overtime_pay)
    );
    println!("Bonuses            : {}", money(p.form.bonuses));
    println!("Absence deduction  : -{}", money(p.form.absence_deduction));
    println!("Loan deduction     : -{}", money(p.form.loan_deduction));
    println!();
    println!("Earnings           : {}", money(p.totals.earnings));
    println!("Deductions         : {}", money(p.totals.deductions));
    println!(
        "Net pay            : {}{}{}",
        color_for_amount(p.totals.net),
        money(p.totals.net),
        RESET
    );
}
