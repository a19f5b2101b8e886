//! `kasl-timectl`: a thin ops/demonstration CLI over the calculation core's
//! §6.1 service-level operations, structured like the teacher's
//! `Cli`/`Commands`/`Cli::menu()` (`commands/mod.rs`).
//!
//! This is not a configuration-entity CRUD surface (spec §1 keeps that out
//! of scope) — every subcommand maps 1:1 onto an operation already
//! specified in spec.md §6.1. Each command's repository work is
//! synchronous (`rusqlite` behind a mutex); `menu()` is `async` only so it
//! can dispatch that blocking work via `tokio::task::spawn_blocking`,
//! mirroring the teacher's `#[tokio::main]` entry point without pretending
//! the calculation core itself is async (spec §9, "naturally synchronous
//! per (employee, date)").

pub mod calculate_day;
pub mod calculate_month;
pub mod closure;
pub mod context;
pub mod effective_day_plan;
pub mod recalc;
pub mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the Daily Calculation Service for one employee/date.
    CalculateDay(calculate_day::CalculateDayArgs),
    /// Run the Monthly Calculator for one employee/year/month.
    CalculateMonth(calculate_month::CalculateMonthArgs),
    /// Recalculate a single day, then cascade into its month.
    RecalcDay(recalc::RecalcDayArgs),
    /// Recalculate every day in a date range, then cascade.
    RecalcRange(recalc::RecalcRangeArgs),
    /// Recalculate a date range across multiple employees.
    RecalcBatch(recalc::RecalcBatchArgs),
    /// Cascade the monthly recompute forward from a starting month.
    RecalcFromMonth(recalc::RecalcFromMonthArgs),
    /// Close a month, freezing its `DailyValue`/`MonthlyValue` rows.
    CloseMonth(closure::CloseMonthArgs),
    /// Reopen a previously closed month.
    ReopenMonth(closure::ReopenMonthArgs),
    /// Resolve the effective day plan for an employee/date without
    /// persisting anything.
    EffectiveDayPlan(effective_day_plan::EffectiveDayPlanArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Deterministic time-tracking calculation core", long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();

        tokio::task::spawn_blocking(move || match cli.command {
            Commands::CalculateDay(args) => calculate_day::cmd(args),
            Commands::CalculateMonth(args) => calculate_month::cmd(args),
            Commands::RecalcDay(args) => recalc::cmd_day(args),
            Commands::RecalcRange(args) => recalc::cmd_range(args),
            Commands::RecalcBatch(args) => recalc::cmd_batch(args),
            Commands::RecalcFromMonth(args) => recalc::cmd_from_month(args),
            Commands::CloseMonth(args) => closure::cmd_close(args),
            Commands::ReopenMonth(args) => closure::cmd_reopen(args),
            Commands::EffectiveDayPlan(args) => effective_day_plan::cmd(args),
        })
        .await?
    }
}
