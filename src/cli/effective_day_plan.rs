//! `kasl-timectl effective-day-plan`: read-only rhythm resolution for one
//! `(employee, date)` (spec §6.1 `effective_day_plan`), without persisting
//! anything. Useful for diagnosing why a day calculated the way it did.

use crate::cli::context::EngineContext;
use crate::cli::view::View;
use crate::model::EmployeeId;
use crate::repository::{EmployeeDayPlanRepository, TariffRepository};
use crate::rhythm;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct EffectiveDayPlanArgs {
    #[arg(long)]
    employee: EmployeeId,
    #[arg(long)]
    date: NaiveDate,
}

pub fn cmd(args: EffectiveDayPlanArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let db = &ctx.daily.employee_day_plans;
    let override_row = db.get_for_employee_date(args.employee, args.date)?;
    let tariff = ctx.daily.tariffs.get_active_for_employee(args.employee, args.date)?;

    let plan = rhythm::effective_day_plan(override_row.as_ref(), tariff.as_ref(), args.date, None);
    View::effective_plan(&plan);
    Ok(())
}
