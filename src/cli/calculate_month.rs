//! `kasl-timectl calculate-month`: directly invoke monthly aggregation for
//! one `(employee, year, month)` (spec §6.1 `calculate_month`).

use crate::cli::context::EngineContext;
use crate::cli::view::View;
use crate::model::{EmployeeId, TenantId};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CalculateMonthArgs {
    #[arg(long)]
    tenant: TenantId,

    #[arg(long)]
    employee: EmployeeId,

    #[arg(long)]
    year: i32,

    #[arg(long)]
    month: u32,

    #[arg(long)]
    json: bool,
}

pub fn cmd(args: CalculateMonthArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let value = ctx.recalc.calculate_month(args.tenant, args.employee, args.year, args.month)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        View::monthly_value(&value);
    }
    Ok(())
}
