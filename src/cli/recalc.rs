//! `kasl-timectl recalc-day` / `recalc-range` / `recalc-batch` /
//! `recalc-from-month`: the Recalculation Orchestrator's cascading entry
//! points (spec §6.1).

use crate::cli::context::EngineContext;
use crate::cli::view::View;
use crate::model::{EmployeeId, TenantId};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct RecalcDayArgs {
    #[arg(long)]
    tenant: TenantId,
    #[arg(long)]
    employee: EmployeeId,
    #[arg(long)]
    date: NaiveDate,
}

pub fn cmd_day(args: RecalcDayArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let result = ctx.recalc.recalc_day(args.tenant, args.employee, args.date);
    View::recalc_result(&result);
    Ok(())
}

#[derive(Debug, Args)]
pub struct RecalcRangeArgs {
    #[arg(long)]
    tenant: TenantId,
    #[arg(long)]
    employee: EmployeeId,
    #[arg(long)]
    from: NaiveDate,
    #[arg(long)]
    to: NaiveDate,
}

pub fn cmd_range(args: RecalcRangeArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let result = ctx.recalc.recalc_range(args.tenant, args.employee, args.from, args.to);
    View::recalc_result(&result);
    Ok(())
}

#[derive(Debug, Args)]
pub struct RecalcBatchArgs {
    #[arg(long)]
    tenant: TenantId,
    /// Repeat `--employee` for each employee in the batch.
    #[arg(long = "employee", required = true)]
    employees: Vec<EmployeeId>,
    #[arg(long)]
    from: NaiveDate,
    #[arg(long)]
    to: NaiveDate,
}

pub fn cmd_batch(args: RecalcBatchArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let result = ctx.recalc.recalc_batch(args.tenant, &args.employees, args.from, args.to);
    View::recalc_result(&result);
    Ok(())
}

#[derive(Debug, Args)]
pub struct RecalcFromMonthArgs {
    #[arg(long)]
    tenant: TenantId,
    #[arg(long)]
    employee: EmployeeId,
    #[arg(long = "start-year")]
    start_year: i32,
    #[arg(long = "start-month")]
    start_month: u32,
}

pub fn cmd_from_month(args: RecalcFromMonthArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    let result = ctx.recalc.recalc_from_month(args.tenant, args.employee, args.start_year, args.start_month);
    View::recalc_result(&result);
    Ok(())
}
