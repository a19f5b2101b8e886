//! `kasl-timectl calculate-day`: directly invoke the Daily Calculation
//! Service for one `(employee, date)` (spec §6.1 `calculate_day`).

use crate::cli::context::EngineContext;
use crate::cli::view::View;
use crate::model::{EmployeeId, TenantId};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct CalculateDayArgs {
    /// Tenant the employee belongs to.
    #[arg(long)]
    tenant: TenantId,

    /// Employee to calculate.
    #[arg(long)]
    employee: EmployeeId,

    /// Date to calculate, `YYYY-MM-DD`.
    #[arg(long)]
    date: NaiveDate,

    /// Print the result as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: CalculateDayArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let value = ctx.daily.calculate_day(args.tenant, args.employee, args.date)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        View::daily_value(&value);
    }
    Ok(())
}
