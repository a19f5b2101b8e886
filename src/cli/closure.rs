//! `kasl-timectl close-month` / `reopen-month`: the one-way-then-reversible
//! closure latch on a `MonthlyValue` (spec §6.1, §3.1 closure semantics).

use crate::cli::context::EngineContext;
use crate::model::{EmployeeId, UserId};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CloseMonthArgs {
    #[arg(long)]
    employee: EmployeeId,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
    /// User id recorded as the closer (spec §3.1 `closed_by`).
    #[arg(long = "by")]
    closed_by: UserId,
}

pub fn cmd_close(args: CloseMonthArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    ctx.recalc.close_month(args.employee, args.year, args.month, args.closed_by)?;
    println!("closed {}-{:02} for employee {}", args.year, args.month, args.employee);
    Ok(())
}

#[derive(Debug, Args)]
pub struct ReopenMonthArgs {
    #[arg(long)]
    employee: EmployeeId,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
    #[arg(long = "by")]
    reopened_by: UserId,
}

pub fn cmd_reopen(args: ReopenMonthArgs) -> Result<()> {
    let ctx = EngineContext::open()?;
    ctx.recalc.reopen_month(args.employee, args.year, args.month, args.reopened_by)?;
    println!("reopened {}-{:02} for employee {}", args.year, args.month, args.employee);
    Ok(())
}
