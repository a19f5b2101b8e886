//! Recalculation Orchestrator (spec §4.5): `recalc_day`, `recalc_range`,
//! `recalc_batch`, `recalc_from_month`, plus `calculate_month` itself.

use crate::calc::monthly::{self, DailyContribution};
use crate::config::CALCULATION_VERSION;
use crate::error::{CoreError, CoreResult};
use crate::model::{AbsenceSummary, EmployeeId, MonthlyStatus, MonthlyValue, TenantId, UserId};
use crate::repository::{AbsenceDayRepository, DailyValueRepository, MonthlyValueRepository, SettingsLookup, TariffRepository};
use crate::service::daily::DailyCalculationService;
use crate::service::KeyedLocks;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecalcError {
    pub employee: EmployeeId,
    pub year: i32,
    pub month: u32,
    pub reason: String,
}

/// `RecalcResult` (spec §6.1): `{processed, skipped_closed, failed, errors}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcResult {
    pub processed: u32,
    pub skipped_closed: u32,
    pub failed: u32,
    pub errors: Vec<RecalcError>,
}

impl RecalcResult {
    fn merge(&mut self, other: RecalcResult) {
        self.processed += other.processed;
        self.skipped_closed += other.skipped_closed;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }

    fn fail(&mut self, employee: EmployeeId, year: i32, month: u32, reason: String) {
        self.failed += 1;
        self.errors.push(RecalcError { employee, year, month, reason });
    }
}

pub struct RecalcOrchestrator {
    pub daily: Arc<DailyCalculationService>,
    pub daily_values: Arc<dyn DailyValueRepository + Send + Sync>,
    pub monthly_values: Arc<dyn MonthlyValueRepository + Send + Sync>,
    pub tariffs: Arc<dyn TariffRepository + Send + Sync>,
    pub absences: Arc<dyn AbsenceDayRepository + Send + Sync>,
    pub settings: Option<Arc<dyn SettingsLookup>>,
    month_leases: KeyedLocks<(EmployeeId, i32, u32)>,
}

impl RecalcOrchestrator {
    pub fn new(
        daily: Arc<DailyCalculationService>,
        daily_values: Arc<dyn DailyValueRepository + Send + Sync>,
        monthly_values: Arc<dyn MonthlyValueRepository + Send + Sync>,
        tariffs: Arc<dyn TariffRepository + Send + Sync>,
        absences: Arc<dyn AbsenceDayRepository + Send + Sync>,
        settings: Option<Arc<dyn SettingsLookup>>,
    ) -> Self {
        Self {
            daily,
            daily_values,
            monthly_values,
            tariffs,
            absences,
            settings,
            month_leases: KeyedLocks::new(),
        }
    }

    /// Direct daily mutation entry point: a month already closed fails
    /// with `MONTH_CLOSED` rather than being silently skipped (spec §8.3
    /// scenario F distinguishes direct mutation from cascading recalc).
    #[instrument(skip(self), fields(%employee, %date))]
    pub fn recalc_day(&self, tenant: TenantId, employee: EmployeeId, date: NaiveDate) -> RecalcResult {
        let mut result = RecalcResult::default();
        match self.monthly_values.is_month_closed(employee, date.year(), date.month()) {
            Ok(true) => {
                let reason = CoreError::MonthClosed { employee: employee.to_string(), year: date.year(), month: date.month() }.to_string();
                result.fail(employee, date.year(), date.month(), reason);
                return result;
            }
            Ok(false) => {}
            Err(err) => {
                result.fail(employee, date.year(), date.month(), err.to_string());
                return result;
            }
        }

        if let Err(err) = self.daily.calculate_day(tenant, employee, date) {
            result.fail(employee, date.year(), date.month(), err.to_string());
            return result;
        }
        result.processed += 1;

        result.merge(self.recalc_from_month(tenant, employee, date.year(), date.month()));
        result
    }

    #[instrument(skip(self), fields(%employee, %from, %to))]
    pub fn recalc_range(&self, tenant: TenantId, employee: EmployeeId, from: NaiveDate, to: NaiveDate) -> RecalcResult {
        let mut result = RecalcResult::default();
        let mut touched_months: BTreeSet<(i32, u32)> = BTreeSet::new();

        let mut date = from;
        while date <= to {
            match self.daily.calculate_day(tenant, employee, date) {
                Ok(_) => {
                    result.processed += 1;
                    touched_months.insert((date.year(), date.month()));
                }
                Err(err) => result.fail(employee, date.year(), date.month(), err.to_string()),
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        if let Some(&(year, month)) = touched_months.iter().next() {
            result.merge(self.recalc_from_month(tenant, employee, year, month));
        }
        result
    }

    #[instrument(skip(self, employees), fields(count = employees.len()))]
    pub fn recalc_batch(&self, tenant: TenantId, employees: &[EmployeeId], from: NaiveDate, to: NaiveDate) -> RecalcResult {
        let mut result = RecalcResult::default();
        for &employee in employees {
            result.merge(self.recalc_range(tenant, employee, from, to));
        }
        result
    }

    /// Cascades forward from `(start_year, start_month)` to the current
    /// month inclusive, skipping closed months and serializing each month
    /// via a per-`(employee, year, month)` lease (spec §4.5, §5).
    #[instrument(skip(self), fields(%employee, start_year, start_month))]
    pub fn recalc_from_month(&self, tenant: TenantId, employee: EmployeeId, start_year: i32, start_month: u32) -> RecalcResult {
        let mut result = RecalcResult::default();
        let today = chrono::Local::now().naive_local().date();
        let (current_year, current_month) = (today.year(), today.month());

        let mut year = start_year;
        let mut month = start_month;
        while (year, month) <= (current_year, current_month) {
            self.month_leases.with_lock((employee, year, month), || match self.monthly_values.is_month_closed(employee, year, month) {
                Ok(true) => result.skipped_closed += 1,
                Ok(false) => match self.calculate_month(tenant, employee, year, month) {
                    Ok(_) => result.processed += 1,
                    Err(err) => result.fail(employee, year, month, err.to_string()),
                },
                Err(err) => result.fail(employee, year, month, err.to_string()),
            });

            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
        result
    }

    /// `calculate_month(tenant, employee, year, month) → MonthlyValue`
    /// (spec §4.3 via the pure calculator, §4.6 repository wiring). Reads
    /// the previous month's closing balance as `previous_carryover`,
    /// defaulting to zero when no prior row exists.
    #[instrument(skip(self), fields(%employee, year, month))]
    pub fn calculate_month(&self, tenant: TenantId, employee: EmployeeId, year: i32, month: u32) -> CoreResult<MonthlyValue> {
        let previous_carryover = self.monthly_values.get_previous_month(employee, year, month)?.map(|m| m.closing_balance).unwrap_or(0);

        let days_in_month = days_in_month(year, month);
        let month_start = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar date");
        let month_end = NaiveDate::from_ymd_opt(year, month, days_in_month).expect("valid calendar date");

        let mut contributions = Vec::with_capacity(days_in_month as usize);
        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date");
            if let Some(value) = self.daily_values.get_by_employee_date(employee, date)? {
                contributions.push(DailyContribution {
                    gross_time: value.gross_time,
                    net_time: value.net_time,
                    target_time: value.target_time,
                    overtime: value.overtime,
                    undertime: value.undertime,
                    break_time: value.break_time,
                    has_error: value.has_error,
                });
            }
        }

        let absences = self.absences.get_by_employee_date_range(employee, month_start, month_end)?;
        let absence_summary = AbsenceSummary::from_days(&absences);

        let tariff = self.tariffs.get_active_for_employee(employee, month_end)?;
        let evaluation = tariff.as_ref().map(|t| t.evaluation);

        let mut monthly = monthly::calculate_month(&contributions, evaluation.as_ref(), previous_carryover, absence_summary);

        // The annual floor is a once-a-year clamp on the carryover chain,
        // not a monthly one; only December's closing balance feeds the
        // next year's opening balance, so only December needs clamping.
        if month == 12 {
            if let Some(floor) = self.annual_floor(tenant)? {
                monthly.flextime_end = crate::calc::monthly::apply_annual_floor(monthly.flextime_end, floor);
                monthly.flextime_carryover = monthly.flextime_end;
            }
        }

        let value = MonthlyValue {
            employee,
            year,
            month,
            status: MonthlyStatus::Open,
            opening_balance: monthly.flextime_start,
            sum_overtime: monthly.totals.overtime as i32,
            sum_undertime: monthly.totals.undertime as i32,
            credited_flextime: monthly.flextime_credited,
            closing_balance: monthly.flextime_end,
            gross_time: monthly.totals.gross_time as u32,
            net_time: monthly.totals.net_time as u32,
            target_time: monthly.totals.target_time as u32,
            break_time: monthly.totals.break_time as u32,
            work_days: monthly.totals.work_days,
            days_with_errors: monthly.totals.days_with_errors,
            vacation_taken: crate::calc::monthly::round_absence_half_day(monthly.absence.vacation_taken),
            sick_days: monthly.absence.sick_days,
            other_absence_days: monthly.absence.other_absence_days,
            closed_at: None,
            closed_by: None,
            reopened_at: None,
            reopened_by: None,
            calculation_version: CALCULATION_VERSION,
        };

        self.monthly_values.upsert(&value)?;
        Ok(value)
    }

    pub fn close_month(&self, employee: EmployeeId, year: i32, month: u32, by: UserId) -> CoreResult<()> {
        self.month_leases.with_lock((employee, year, month), || Ok(self.monthly_values.close_month(employee, year, month, by)?))
    }

    pub fn reopen_month(&self, employee: EmployeeId, year: i32, month: u32, by: UserId) -> CoreResult<()> {
        self.month_leases.with_lock((employee, year, month), || Ok(self.monthly_values.reopen_month(employee, year, month, by)?))
    }

    fn annual_floor(&self, tenant: TenantId) -> CoreResult<Option<i32>> {
        match &self.settings {
            Some(lookup) => Ok(lookup.annual_carryover_floor(tenant)?),
            None => Ok(None),
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next_month_start = NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid calendar date");
    let month_start = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar date");
    (next_month_start - month_start).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
