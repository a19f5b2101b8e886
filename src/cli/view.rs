//! Console table rendering for `kasl-timectl`, grounded on the teacher's
//! `libs::view::View` (`prettytable-rs`, one static method per result
//! shape).

use crate::model::{DailyValue, MonthlyValue};
use crate::rhythm::EffectivePlan;
use crate::service::recalc::RecalcResult;
use prettytable::{format, row, Table};

pub struct View {}

impl View {
    pub fn daily_value(value: &DailyValue) {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["FIELD", "VALUE"]);
        table.add_row(row!["employee", value.employee]);
        table.add_row(row!["date", value.date]);
        table.add_row(row!["status", format!("{:?}", value.status)]);
        table.add_row(row!["gross_time", minutes(value.gross_time)]);
        table.add_row(row!["net_time", minutes(value.net_time)]);
        table.add_row(row!["target_time", minutes(value.target_time)]);
        table.add_row(row!["overtime", minutes(value.overtime)]);
        table.add_row(row!["undertime", minutes(value.undertime)]);
        table.add_row(row!["break_time", minutes(value.break_time)]);
        table.add_row(row!["booking_count", value.booking_count]);
        table.add_row(row!["has_error", value.has_error]);
        if !value.error_codes.is_empty() {
            table.add_row(row!["error_codes", value.error_codes.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")]);
        }
        if !value.warnings.is_empty() {
            table.add_row(row!["warnings", value.warnings.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")]);
        }
        table.printstd();
    }

    pub fn monthly_value(value: &MonthlyValue) {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["FIELD", "VALUE"]);
        table.add_row(row!["employee", value.employee]);
        table.add_row(row!["year-month", format!("{}-{:02}", value.year, value.month)]);
        table.add_row(row!["status", format!("{:?}", value.status)]);
        table.add_row(row!["opening_balance", value.opening_balance]);
        table.add_row(row!["sum_overtime", value.sum_overtime]);
        table.add_row(row!["sum_undertime", value.sum_undertime]);
        table.add_row(row!["credited_flextime", value.credited_flextime]);
        table.add_row(row!["closing_balance", value.closing_balance]);
        table.add_row(row!["vacation_taken", value.vacation_taken]);
        table.add_row(row!["sick_days", value.sick_days]);
        table.add_row(row!["other_absence_days", value.other_absence_days]);
        table.printstd();
    }

    pub fn recalc_result(result: &RecalcResult) {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["processed", "skipped_closed", "failed"]);
        table.add_row(row![result.processed, result.skipped_closed, result.failed]);
        table.printstd();

        if !result.errors.is_empty() {
            let mut errors = Table::new();
            errors.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
            errors.set_titles(row!["EMPLOYEE", "YEAR", "MONTH", "REASON"]);
            for e in &result.errors {
                errors.add_row(row![e.employee, e.year, e.month, e.reason]);
            }
            errors.printstd();
        }
    }

    pub fn effective_plan(plan: &EffectivePlan) {
        let text = match plan {
            EffectivePlan::DayPlan(id) => format!("day_plan: {id}"),
            EffectivePlan::OffDay => "off_day".to_string(),
            EffectivePlan::Holiday(category) => format!("holiday (category {category})"),
        };
        println!("{text}");
    }
}

/// Minutes-from-midnight style formatter (`HH:MM`), used for durations too
/// since both are plain minute counts in this data model (spec §3).
fn minutes(value: u16) -> String {
    format!("{:02}:{:02}", value / 60, value % 60)
}
