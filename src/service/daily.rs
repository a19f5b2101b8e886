//! Daily Calculation Service (spec §4.4): resolves the effective day plan,
//! loads bookings, runs the pure calculator, and persists the result.

use crate::calc::daily::{self, BookingInput, DailyCalcInput};
use crate::config::CALCULATION_VERSION;
use crate::error::{CoreError, CoreResult};
use crate::model::{
    AccountValueSource, Booking, DailyAccountValue, DailyStatus, DailyValue, EmployeeId, NoBookingBehavior, TenantId, WarningCode,
};
use crate::repository::{
    AbsenceDayRepository, BookingRepository, DailyAccountValueRepository, DailyValueRepository, DayPlanRepository,
    EmployeeDayPlanRepository, EmployeeRepository, HolidayRepository, Notifier, OrderBookingCreator, TariffRepository,
};
use crate::rhythm::{self, EffectivePlan};
use crate::service::KeyedLocks;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;

/// Everything the daily service depends on, injected once at construction
/// (spec §9 "single-assignment" repository references; no mutable session
/// state besides the day-lease table).
pub struct DailyCalculationService {
    pub bookings: Arc<dyn BookingRepository + Send + Sync>,
    pub daily_values: Arc<dyn DailyValueRepository + Send + Sync>,
    pub employee_day_plans: Arc<dyn EmployeeDayPlanRepository + Send + Sync>,
    pub day_plans: Arc<dyn DayPlanRepository + Send + Sync>,
    pub tariffs: Arc<dyn TariffRepository + Send + Sync>,
    pub absences: Arc<dyn AbsenceDayRepository + Send + Sync>,
    pub holidays: Arc<dyn HolidayRepository + Send + Sync>,
    pub employees: Arc<dyn EmployeeRepository + Send + Sync>,
    pub account_values: Arc<dyn DailyAccountValueRepository + Send + Sync>,
    pub order_booking_creator: Option<Arc<dyn OrderBookingCreator>>,
    pub notifier: Option<Arc<dyn Notifier>>,
    day_leases: KeyedLocks<(EmployeeId, NaiveDate)>,
}

impl DailyCalculationService {
    pub fn new(
        bookings: Arc<dyn BookingRepository + Send + Sync>,
        daily_values: Arc<dyn DailyValueRepository + Send + Sync>,
        employee_day_plans: Arc<dyn EmployeeDayPlanRepository + Send + Sync>,
        day_plans: Arc<dyn DayPlanRepository + Send + Sync>,
        tariffs: Arc<dyn TariffRepository + Send + Sync>,
        absences: Arc<dyn AbsenceDayRepository + Send + Sync>,
        holidays: Arc<dyn HolidayRepository + Send + Sync>,
        employees: Arc<dyn EmployeeRepository + Send + Sync>,
        account_values: Arc<dyn DailyAccountValueRepository + Send + Sync>,
        order_booking_creator: Option<Arc<dyn OrderBookingCreator>>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            bookings,
            daily_values,
            employee_day_plans,
            day_plans,
            tariffs,
            absences,
            holidays,
            employees,
            account_values,
            order_booking_creator,
            notifier,
            day_leases: KeyedLocks::new(),
        }
    }

    /// `calculate_day(tenant, employee, date) → DailyValue` (spec §4.4).
    /// Serialized per `(employee, date)` so a booking edit racing an
    /// explicit recalc never interleaves writes (spec §5).
    #[instrument(skip(self), fields(%employee, %date))]
    pub fn calculate_day(&self, tenant: TenantId, employee: EmployeeId, date: NaiveDate) -> CoreResult<DailyValue> {
        self.day_leases.with_lock((employee, date), || self.calculate_day_locked(tenant, employee, date))
    }

    fn calculate_day_locked(&self, tenant: TenantId, employee: EmployeeId, date: NaiveDate) -> CoreResult<DailyValue> {
        let emp = self.employees.get_by_id(employee)?.ok_or(CoreError::NotFound {
            kind: "employee",
            id: employee.to_string(),
        })?;

        // Step 1: holiday check.
        let holiday = self.holidays.get_for_date(tenant, date, emp.department)?;

        // Step 2: effective day plan via the rhythm resolver.
        let override_row = self.employee_day_plans.get_for_employee_date(employee, date)?;
        let tariff = self.tariffs.get_active_for_employee(employee, date)?;
        let effective = rhythm::effective_day_plan(override_row.as_ref(), tariff.as_ref(), date, holiday.as_ref().map(|h| h.category));

        let absences = self.absences.get_by_employee_date_range(employee, date, date)?;
        let is_absence_day = absences.iter().any(|a| a.is_approved());

        let day_plan_id = match effective {
            EffectivePlan::DayPlan(id) => id,
            EffectivePlan::OffDay | EffectivePlan::Holiday(_) => {
                return self.assemble_no_plan_day(employee, date);
            }
        };

        let mut day_plan = self
            .day_plans
            .get_with_details(day_plan_id)?
            .ok_or(CoreError::NotFound { kind: "day_plan", id: day_plan_id.to_string() })?;

        // Step 3: load bookings, plus the adjacent day when the plan can
        // pair across midnight.
        let mut bookings = self.bookings.get_by_employee_date(employee, date)?;
        bookings.sort_by_key(|b| b.edited_time);

        let earliest_in = bookings.iter().find(|b| b.direction() == crate::model::Direction::In).map(|b| b.edited_time);
        if let Some(shift_id) = daily::detect_shift_plan(&day_plan, earliest_in) {
            if let Some(shift_plan) = self.day_plans.get_with_details(shift_id)? {
                day_plan = shift_plan;
            }
        }

        let next_day_first_booking = if matches!(day_plan.day_change_behavior, crate::model::DayChangeBehavior::CrossMidnight) {
            let mut next_day = self.bookings.get_by_employee_date(employee, date.succ_opt().unwrap_or(date))?;
            next_day.sort_by_key(|b| b.edited_time);
            next_day.first().map(booking_to_input)
        } else {
            None
        };

        let is_holiday = holiday.is_some();

        // Step 4: branch.
        if bookings.is_empty() {
            if let Some(holiday) = &holiday {
                return self.assemble_holiday_credit_day(employee, date, &day_plan, is_absence_day, holiday.category);
            }
            return self.assemble_no_bookings_day(employee, date, &day_plan, is_absence_day);
        }

        let booking_inputs: Vec<BookingInput> = bookings.iter().map(booking_to_input).collect();
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: booking_inputs,
            next_day_first_booking,
            is_holiday,
            is_absence_day,
            employee_target_override: emp.target_override,
        };
        let mut result = daily::calculate_day(&input);

        // The calculator has no repository access, so a cross-midnight
        // auto-complete only signals the close it needs; materialize the
        // real row here and link both sides by its freshly assigned id
        // (spec §4.2(c), §3.2 pair symmetry). Clearing prior auto rows for
        // the target day first keeps recalculation idempotent.
        if let Some(open_id) = result.auto_complete_open_id {
            let auto_time = result.auto_complete_out.unwrap_or(0);
            let auto_date = date.succ_opt().unwrap_or(date);
            self.bookings.delete_auto_by_date(employee, auto_date)?;
            let synthetic_id = self.bookings.create_auto(employee, auto_date, crate::model::BookingType::go(), auto_time)?;
            if let Some(open_update) = result.booking_updates.iter_mut().find(|u| u.id == open_id) {
                open_update.pair_id = Some(synthetic_id);
            }
            result.booking_updates.push(daily::BookingUpdate { id: synthetic_id, calculated_time: auto_time, pair_id: Some(open_id) });
        }

        if !result.booking_updates.is_empty() {
            let updates: std::collections::HashMap<_, _> = result.booking_updates.iter().map(|u| (u.id, (u.calculated_time, u.pair_id))).collect();
            self.bookings.update_calculated_times(&updates)?;
        }

        let mut account_postings: Vec<DailyAccountValue> =
            result.account_postings.iter().map(|p| DailyAccountValue { employee, account: p.account, date, minutes: p.minutes, source: AccountValueSource::Bonus }).collect();
        if let Some(net_account) = day_plan.net_account {
            account_postings.push(DailyAccountValue { employee, account: net_account, date, minutes: result.net_time as i32, source: AccountValueSource::Overflow });
        }
        if let Some(cap_account) = day_plan.cap_account {
            let capped = result.capping.total();
            if capped > 0 {
                account_postings.push(DailyAccountValue { employee, account: cap_account, date, minutes: capped as i32, source: AccountValueSource::Overflow });
            }
        }

        let has_error = !result.error_codes.is_empty();
        let previous = self.daily_values.get_by_employee_date(employee, date)?;
        let mut warnings = result.warnings.clone();
        let status = next_status(previous.as_ref(), has_error, &mut warnings);

        let value = DailyValue {
            employee,
            date,
            status,
            gross_time: result.gross_time,
            net_time: result.net_time,
            target_time: result.target_time,
            overtime: result.overtime,
            undertime: result.undertime,
            break_time: result.break_time,
            capping: result.capping,
            first_come: result.first_come,
            last_go: result.last_go,
            booking_count: result.booking_count,
            has_error,
            error_codes: result.error_codes,
            warnings,
            calculated_at: chrono::Local::now().naive_local(),
            calculation_version: CALCULATION_VERSION,
        };

        // Steps 5-8: persist, post accounts, notify.
        self.daily_values.upsert_by_employee_date(&value)?;
        self.account_values.upsert_replacing_calculated_source(employee, date, &account_postings)?;
        self.notify_on_new_error(employee, date, previous.as_ref(), &value);

        Ok(value)
    }

    /// An off day (no day plan resolved at all, spec §4.1). A holiday
    /// marker on top of this carries no further effect: with no day plan
    /// there is no `holiday_credit` table to credit against, so the
    /// `Holiday` rhythm-resolution outcome collapses to the same shape as
    /// a plain off day here.
    fn assemble_no_plan_day(&self, employee: EmployeeId, date: NaiveDate) -> CoreResult<DailyValue> {
        let bookings = self.bookings.get_by_employee_date(employee, date)?;
        let mut warnings = vec![WarningCode::OffDay];
        let has_error = false;
        let previous = self.daily_values.get_by_employee_date(employee, date)?;
        let status = next_status(previous.as_ref(), has_error, &mut warnings);
        let value = DailyValue {
            employee,
            date,
            status,
            gross_time: 0,
            net_time: 0,
            target_time: 0,
            overtime: 0,
            undertime: 0,
            break_time: 0,
            capping: Default::default(),
            first_come: bookings.first().map(|b| b.edited_time),
            last_go: bookings.last().map(|b| b.edited_time),
            booking_count: bookings.len() as u32,
            has_error,
            error_codes: Vec::new(),
            warnings,
            calculated_at: chrono::Local::now().naive_local(),
            calculation_version: CALCULATION_VERSION,
        };
        self.daily_values.upsert_by_employee_date(&value)?;
        self.account_values.upsert_replacing_calculated_source(employee, date, &[])?;
        Ok(value)
    }

    fn assemble_holiday_credit_day(
        &self,
        employee: EmployeeId,
        date: NaiveDate,
        day_plan: &crate::model::DayPlan,
        is_absence_day: bool,
        holiday_category: u8,
    ) -> CoreResult<DailyValue> {
        let target = daily::resolve_target(day_plan, is_absence_day, None);
        let index = (holiday_category.max(1) - 1) as usize;
        let credit = day_plan.holiday_credit.get(index).copied().unwrap_or(0);
        let previous = self.daily_values.get_by_employee_date(employee, date)?;
        let mut warnings = Vec::new();
        let status = next_status(previous.as_ref(), false, &mut warnings);
        let value = DailyValue {
            employee,
            date,
            status,
            gross_time: credit,
            net_time: credit,
            target_time: target,
            overtime: 0,
            undertime: target.saturating_sub(credit),
            break_time: 0,
            capping: Default::default(),
            first_come: None,
            last_go: None,
            booking_count: 0,
            has_error: false,
            error_codes: Vec::new(),
            warnings,
            calculated_at: chrono::Local::now().naive_local(),
            calculation_version: CALCULATION_VERSION,
        };
        self.daily_values.upsert_by_employee_date(&value)?;
        self.account_values.upsert_replacing_calculated_source(employee, date, &[])?;
        Ok(value)
    }

    fn assemble_no_bookings_day(&self, employee: EmployeeId, date: NaiveDate, day_plan: &crate::model::DayPlan, is_absence_day: bool) -> CoreResult<DailyValue> {
        let target = daily::resolve_target(day_plan, is_absence_day, None);
        let previous = self.daily_values.get_by_employee_date(employee, date)?;

        let (net_time, undertime, has_error, error_codes, mut warnings) = match day_plan.no_booking_behavior {
            NoBookingBehavior::Error => (0, target, true, vec![crate::model::ErrorCode::NoBookings], Vec::new()),
            NoBookingBehavior::AdoptTarget => (target, 0, false, Vec::new(), Vec::new()),
            NoBookingBehavior::DeductTarget => (0, target, false, Vec::new(), Vec::new()),
            NoBookingBehavior::VocationalSchool | NoBookingBehavior::TargetWithOrder => {
                if let (Some(creator), Some(order)) = (&self.order_booking_creator, day_plan.default_order) {
                    creator.delete_auto_by_date(employee, date)?;
                    creator.create_auto(employee, date, order, target)?;
                }
                (target, 0, false, Vec::new(), Vec::new())
            }
        };

        let status = next_status(previous.as_ref(), has_error, &mut warnings);
        let value = DailyValue {
            employee,
            date,
            status,
            gross_time: net_time,
            net_time,
            target_time: target,
            overtime: 0,
            undertime,
            break_time: 0,
            capping: Default::default(),
            first_come: None,
            last_go: None,
            booking_count: 0,
            has_error,
            error_codes,
            warnings,
            calculated_at: chrono::Local::now().naive_local(),
            calculation_version: CALCULATION_VERSION,
        };
        self.daily_values.upsert_by_employee_date(&value)?;
        self.account_values.upsert_replacing_calculated_source(employee, date, &[])?;
        self.notify_on_new_error(employee, date, previous.as_ref(), &value);
        Ok(value)
    }

    fn notify_on_new_error(&self, employee: EmployeeId, date: NaiveDate, previous: Option<&DailyValue>, current: &DailyValue) {
        let was_clean = previous.map(|p| !p.has_error).unwrap_or(true);
        if was_clean && current.has_error {
            if let Some(notifier) = &self.notifier {
                notifier.notify_calculation_error(employee, date, &current.error_codes);
            }
        }
    }
}

fn booking_to_input(booking: &Booking) -> BookingInput {
    BookingInput {
        id: booking.id,
        direction: booking.direction(),
        category: booking.category(),
        edited_time: booking.edited_time,
    }
}

/// Preserves `Approved` across recalculation unless the new result
/// introduces an error, in which case it downgrades with
/// `STATUS_DOWNGRADED` (spec §9 open question, resolved in favor of
/// retaining approval).
fn next_status(previous: Option<&DailyValue>, has_error: bool, warnings: &mut Vec<WarningCode>) -> DailyStatus {
    match previous.map(|p| p.status) {
        Some(DailyStatus::Approved) if has_error => {
            warnings.push(WarningCode::StatusDowngraded);
            DailyStatus::Error
        }
        Some(DailyStatus::Approved) => DailyStatus::Approved,
        _ => {
            if has_error {
                DailyStatus::Error
            } else {
                DailyStatus::Calculated
            }
        }
    }
}
