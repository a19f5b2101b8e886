//! Pure Daily Calculator (spec §4.2): pairing, tolerance, rounding, break,
//! capping, bonus, and error logic for a single `(employee, date)`.
//!
//! Everything here is a plain function over owned/borrowed inputs — no
//! repository, no clock, no randomness. The Daily Calculation Service
//! (`crate::service::daily`) is the only caller and owns all I/O.

use crate::model::{
    AccountId, BonusCalculationType, BookingId, Category, DayPlan, DayPlanBonus, DayPlanBreak, Direction, ErrorCode, WarningCode,
};

/// One booking as seen by the calculator: just enough to pair, round, and
/// sum. The service is responsible for sorting `bookings` by `edited_time`
/// before calling [`calculate_day`] (spec §4.2 contract: "bookings sorted
/// by time").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingInput {
    pub id: BookingId,
    pub direction: Direction,
    pub category: Category,
    pub edited_time: u16,
}

/// A `calculated_time`/`pair_id` write the service must apply to the
/// originating `Booking` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingUpdate {
    pub id: BookingId,
    pub calculated_time: u16,
    pub pair_id: Option<BookingId>,
}

/// An account posting produced by a bonus window (spec §4.2(i)). Does not
/// include `day_plan.net_account`/`cap_account` postings, which the
/// service derives directly from `net_time`/capping totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPosting {
    pub account: AccountId,
    pub minutes: i32,
}

/// Everything the pure calculator needs for one day. `day_plan` is assumed
/// to already reflect stage (a)'s shift-alternative swap; see
/// [`detect_shift_plan`] for that step.
#[derive(Debug, Clone)]
pub struct DailyCalcInput<'a> {
    pub day_plan: &'a DayPlan,
    pub bookings: Vec<BookingInput>,
    /// First booking of the next calendar day, only consulted when
    /// `day_plan.day_change_behavior == CrossMidnight` (spec §4.2(c)).
    pub next_day_first_booking: Option<BookingInput>,
    pub is_holiday: bool,
    pub is_absence_day: bool,
    /// Explicit per-employee target override, outranking both
    /// `regular_hours` and `regular_hours_2` (spec §4.2(g)).
    pub employee_target_override: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyResult {
    pub booking_updates: Vec<BookingUpdate>,
    pub gross_time: u16,
    pub net_time: u16,
    pub target_time: u16,
    pub overtime: u16,
    pub undertime: u16,
    pub break_time: u16,
    pub first_come: Option<u16>,
    pub last_go: Option<u16>,
    pub booking_count: u32,
    pub capping: crate::model::CappingBreakdown,
    pub error_codes: Vec<ErrorCode>,
    pub warnings: Vec<WarningCode>,
    pub account_postings: Vec<AccountPosting>,
    /// Set when day-change auto-complete inserted a synthetic `out` at
    /// `day_plan.day_change_cutoff` (spec §4.2(c)).
    pub auto_complete_out: Option<u16>,
    /// The dangling `in` booking's id, set alongside `auto_complete_out`.
    /// The calculator has no repository access, so it cannot materialize the
    /// synthetic close itself; the service must call
    /// `BookingRepository::create_auto` for a fresh id and link it to this
    /// booking as `pair_id` on both sides (spec §4.2(c), §3.2 pair symmetry).
    pub auto_complete_open_id: Option<BookingId>,
}

/// Stage (a). Finds the alternative plan id to swap to, if the earliest
/// `in` event falls inside one of `day_plan.shift_alt_plans`' windows. The
/// service resolves the returned id via `DayPlanRepository` before calling
/// [`calculate_day`] with the substituted plan.
pub fn detect_shift_plan(day_plan: &DayPlan, earliest_in: Option<u16>) -> Option<crate::model::DayPlanId> {
    let earliest_in = earliest_in?;
    day_plan
        .shift_alt_plans
        .iter()
        .find(|(from, to, _)| *from <= earliest_in && earliest_in < *to)
        .map(|(_, _, plan_id)| *plan_id)
}

struct Pair {
    open: BookingInput,
    close: BookingInput,
}

/// Runs the full pipeline (b)-(j) over already-sorted bookings.
pub fn calculate_day(input: &DailyCalcInput<'_>) -> DailyResult {
    let day_plan = input.day_plan;
    let mut result = DailyResult::default();
    result.booking_count = input.bookings.len() as u32;

    if input.bookings.is_empty() {
        result.error_codes.push(ErrorCode::NoBookings);
        result.target_time = resolve_target(day_plan, input.is_absence_day, input.employee_target_override);
        result.undertime = result.target_time;
        return result;
    }

    // (b) Time assignment: tolerance then rounding, work events always,
    // break events only when `round_all_bookings` is set.
    let adjusted: Vec<BookingInput> = input
        .bookings
        .iter()
        .map(|booking| {
            let mut b = *booking;
            let tolerated = if b.category == Category::Work {
                apply_tolerance(day_plan, b)
            } else {
                b.edited_time
            };
            let should_round = b.category == Category::Work || day_plan.round_all_bookings;
            b.edited_time = if should_round { apply_rounding(day_plan, b.direction, tolerated) } else { tolerated };
            b
        })
        .collect();

    for b in &adjusted {
        result.booking_updates.push(BookingUpdate {
            id: b.id,
            calculated_time: b.edited_time,
            pair_id: None,
        });
    }

    // (c) Pairing, per category, stack discipline.
    let (work_pairs, work_unpaired_open, work_missing_come, work_overlapping) = pair_category(&adjusted, Category::Work, Direction::In);
    let (break_pairs, break_unpaired_open, break_missing_come, break_overlapping) = pair_category(&adjusted, Category::Break, Direction::Out);

    let mut work_pairs = work_pairs;
    let mut cross_day_widened: Option<(BookingId, u16)> = None;

    if !work_unpaired_open.is_empty() && day_plan.day_change_behavior == crate::model::DayChangeBehavior::CrossMidnight {
        // Only the chronologically last unmatched `in` is eligible for the
        // cross-midnight policy (spec §4.2(c)).
        if let Some(&dangling) = work_unpaired_open.last() {
            if let Some(next_out) = input.next_day_first_booking.filter(|b| b.category == Category::Work && b.direction == Direction::Out) {
                work_pairs.push(Pair { open: dangling, close: next_out });
                cross_day_widened = Some((dangling.id, next_out.edited_time));
            } else {
                let cutoff = day_plan.day_change_cutoff;
                // Placeholder id, purely so `pair_width_minutes` below has a
                // close to measure against; not written to `booking_updates`
                // (see the skip in the pair-id linking loop further down).
                let synthetic = BookingInput {
                    id: dangling.id,
                    direction: Direction::Out,
                    category: Category::Work,
                    edited_time: cutoff,
                };
                work_pairs.push(Pair { open: dangling, close: synthetic });
                cross_day_widened = Some((dangling.id, cutoff));
                result.auto_complete_out = Some(cutoff);
                result.auto_complete_open_id = Some(dangling.id);
                result.warnings.push(WarningCode::AutoCompleteDayChange);
            }
        }
    } else if !work_unpaired_open.is_empty() {
        result.error_codes.push(ErrorCode::MissingGo);
    }
    if work_missing_come {
        result.error_codes.push(ErrorCode::MissingCome);
    }
    if work_overlapping {
        result.error_codes.push(ErrorCode::OverlappingPairs);
    }
    if !break_unpaired_open.is_empty() {
        result.error_codes.push(ErrorCode::MissingBreakEnd);
    }
    if break_missing_come || break_overlapping {
        result.error_codes.push(ErrorCode::BreakUnbalanced);
    }

    // A cross-day pair's close legitimately precedes its open numerically
    // (e.g. GO at 01:00 closing a COME at 23:00); only flag OUT_BEFORE_IN
    // for same-day pairs.
    let widened_open_id = cross_day_widened.map(|(id, _)| id);
    for pair in work_pairs.iter().chain(break_pairs.iter()) {
        if Some(pair.open.id) == widened_open_id {
            continue;
        }
        if pair.close.edited_time < pair.open.edited_time {
            result.error_codes.push(ErrorCode::OutBeforeIn);
            break;
        }
    }

    for pair in &work_pairs {
        if Some(pair.open.id) == result.auto_complete_open_id {
            // The close side is a placeholder with no real booking row yet;
            // the service links both sides once it materializes it.
            continue;
        }
        set_pair_id(&mut result.booking_updates, pair.open.id, pair.close.id);
        set_pair_id(&mut result.booking_updates, pair.close.id, pair.open.id);
    }
    for pair in &break_pairs {
        set_pair_id(&mut result.booking_updates, pair.open.id, pair.close.id);
        set_pair_id(&mut result.booking_updates, pair.close.id, pair.open.id);
    }

    // (d) Gross and recorded break time.
    let work_windows: Vec<(u16, u16)> = work_pairs
        .iter()
        .map(|p| pair_width_minutes(p, cross_day_widened.map(|(id, _)| id) == Some(p.open.id)))
        .collect();
    result.gross_time = work_windows.iter().map(|(_, width)| *width).sum();

    let break_windows: Vec<(u16, u16)> = break_pairs.iter().map(|p| pair_width_minutes(p, false)).collect();
    let recorded_break: u16 = break_windows.iter().map(|(_, width)| *width).sum();

    result.first_come = adjusted.iter().filter(|b| b.category == Category::Work && b.direction == Direction::In).map(|b| b.edited_time).min();
    result.last_go = adjusted.iter().filter(|b| b.category == Category::Work && b.direction == Direction::Out).map(|b| b.edited_time).max();

    // (e) Break deduction.
    let added_deductions = compute_break_deductions(&day_plan.breaks, result.gross_time, recorded_break, &work_windows);
    result.break_time = recorded_break + added_deductions;
    if added_deductions > 0 && day_plan.breaks.iter().any(|b| b.kind == crate::model::BreakKind::Minimum) {
        result.warnings.push(WarningCode::MinBreakApplied);
    }

    // (f) Capping.
    result.capping = compute_capping(day_plan, result.first_come, result.last_go, result.gross_time.saturating_sub(result.break_time));
    if result.capping.early_arrival > 0 || result.capping.late_leave > 0 {
        result.error_codes.push(ErrorCode::TimeOutOfWindow);
    }
    let before_cap = result.gross_time.saturating_sub(result.break_time);
    result.net_time = before_cap.saturating_sub(result.capping.total());

    // (g) Target.
    result.target_time = resolve_target(day_plan, input.is_absence_day, input.employee_target_override);

    // (h) Overtime / undertime.
    result.overtime = result.net_time.saturating_sub(result.target_time);
    result.undertime = result.target_time.saturating_sub(result.net_time);

    if let Some(min_work) = day_plan.min_work_time {
        if result.net_time < min_work {
            result.error_codes.push(ErrorCode::MinWorkTimeNotMet);
        }
    }

    // (i) Bonuses.
    result.account_postings = compute_bonuses(&day_plan.bonuses, &work_windows, input.is_holiday);

    result.error_codes.sort_by_key(error_code_rank);
    result.error_codes.dedup();
    result
}

fn set_pair_id(updates: &mut [BookingUpdate], id: BookingId, partner: BookingId) {
    if let Some(update) = updates.iter_mut().find(|u| u.id == id) {
        update.pair_id = Some(partner);
    }
}

fn error_code_rank(code: &ErrorCode) -> u8 {
    *code as u8
}

/// Width of a pair's interval in minutes, widening by +1440 for a
/// cross-day pair whose close time is numerically smaller than its open
/// time (spec §4.2(d)).
fn pair_width_minutes(pair: &Pair, is_cross_day: bool) -> (u16, u16) {
    let open = pair.open.edited_time as i32;
    let close = pair.close.edited_time as i32;
    let width = if is_cross_day || close < open { close + 1440 - open } else { close - open };
    (pair.open.edited_time, width.max(0) as u16)
}

/// Stack-pairing for one category. `open_direction` is the direction that
/// pushes onto the stack (`In` for work, `Out` for break, per spec
/// §4.2(c)'s "note the inverted directions"). The two trailing bools
/// distinguish the unmatched-close cases spec §4.2(j) calls out separately:
/// a close with no preceding open at all (`missing_come`) versus a close
/// arriving after every open already paired off (`overlapping`).
fn pair_category(bookings: &[BookingInput], category: Category, open_direction: Direction) -> (Vec<Pair>, Vec<BookingInput>, bool, bool) {
    let mut stack: Vec<BookingInput> = Vec::new();
    let mut pairs = Vec::new();
    let mut saw_any_open = false;
    let mut missing_come = false;
    let mut overlapping = false;

    for &booking in bookings.iter().filter(|b| b.category == category) {
        if booking.direction == open_direction {
            saw_any_open = true;
            stack.push(booking);
        } else if let Some(open) = stack.pop() {
            pairs.push(Pair { open, close: booking });
        } else if saw_any_open {
            overlapping = true;
        } else {
            missing_come = true;
        }
    }

    (pairs, stack, missing_come, overlapping)
}

fn apply_tolerance(day_plan: &DayPlan, booking: BookingInput) -> u16 {
    let t = booking.edited_time as i32;
    match booking.direction {
        Direction::In => {
            if let Some(come_to) = day_plan.come_to {
                if t > come_to as i32 && t - come_to as i32 <= day_plan.tolerance_come_plus as i32 {
                    return come_to;
                }
            }
            if let Some(come_from) = day_plan.come_from {
                if !day_plan.variable_work_time && t < come_from as i32 && come_from as i32 - t <= day_plan.tolerance_come_minus as i32 {
                    return come_from;
                }
            }
            booking.edited_time
        }
        Direction::Out => {
            if let Some(go_from) = day_plan.go_from {
                if t < go_from as i32 && go_from as i32 - t <= day_plan.tolerance_go_minus as i32 {
                    return go_from;
                }
            }
            if let Some(go_to) = day_plan.go_to {
                if t > go_to as i32 && t - go_to as i32 <= day_plan.tolerance_go_plus as i32 {
                    return go_to;
                }
            }
            booking.edited_time
        }
    }
}

fn apply_rounding(day_plan: &DayPlan, direction: Direction, time: u16) -> u16 {
    let rule = match direction {
        Direction::In => &day_plan.rounding_come,
        Direction::Out => &day_plan.rounding_go,
    };
    rule.apply(time as i32) as u16
}

fn compute_break_deductions(breaks: &[DayPlanBreak], gross_time: u16, recorded_break: u16, work_windows: &[(u16, u16)]) -> u16 {
    let mut added = 0u16;
    for b in breaks {
        match b.kind {
            crate::model::BreakKind::Minimum => {
                if let Some(after) = b.after_work_minutes {
                    if gross_time >= after && recorded_break < b.duration {
                        added += b.duration - recorded_break;
                    }
                }
            }
            crate::model::BreakKind::Fixed => {
                if b.is_paid {
                    continue;
                }
                let overlaps_work = match (b.start_time, b.end_time) {
                    (Some(start), Some(end)) => work_windows.iter().any(|&(w_start, w_width)| {
                        let w_end = w_start as i32 + w_width as i32;
                        (start as i32) < w_end && (end as i32) > w_start as i32
                    }),
                    _ => true,
                };
                if overlaps_work {
                    added += b.duration;
                }
            }
            crate::model::BreakKind::Variable => {
                if b.auto_deduct && recorded_break < b.duration {
                    added += b.duration - recorded_break;
                }
            }
        }
    }
    added
}

fn compute_capping(day_plan: &DayPlan, first_come: Option<u16>, last_go: Option<u16>, gross_minus_break: u16) -> crate::model::CappingBreakdown {
    let mut capping = crate::model::CappingBreakdown::default();

    if !day_plan.variable_work_time {
        if let (Some(come_from), Some(first)) = (day_plan.come_from, first_come) {
            if first < come_from {
                capping.early_arrival = come_from - first;
            }
        }
    }

    if let (Some(go_to), Some(last)) = (day_plan.go_to, last_go) {
        if last > go_to {
            capping.late_leave = last - go_to;
        }
    }

    if let Some(max_net) = day_plan.max_net_work_time {
        if gross_minus_break > max_net {
            capping.max_net_time = gross_minus_break - max_net;
        }
    }

    capping
}

/// Employee override outranks both `regular_hours` and `regular_hours_2`
/// (spec §4.2(g)). Exposed for the daily service's no-booking branches,
/// which resolve a target without running the full pairing pipeline.
pub fn resolve_target(day_plan: &DayPlan, is_absence_day: bool, employee_target_override: Option<u16>) -> u16 {
    employee_target_override.unwrap_or_else(|| day_plan.base_target(is_absence_day))
}

fn compute_bonuses(bonuses: &[DayPlanBonus], work_windows: &[(u16, u16)], is_holiday: bool) -> Vec<AccountPosting> {
    let mut postings = Vec::new();
    for bonus in bonuses {
        if is_holiday && !bonus.applies_on_holiday {
            continue;
        }
        for &(start, width) in work_windows {
            let pair_start = start as i32;
            let pair_end = pair_start + width as i32;
            let overlap_start = pair_start.max(bonus.time_from as i32);
            let overlap_end = pair_end.min(bonus.time_to as i32);
            let overlap = (overlap_end - overlap_start).max(0);
            if overlap == 0 || (width as u16) < bonus.min_work_minutes {
                continue;
            }
            let minutes = match bonus.calculation_type {
                BonusCalculationType::Fixed => bonus.value,
                BonusCalculationType::PerMinute => bonus.value * overlap,
                BonusCalculationType::Percentage => (overlap * bonus.value) / 1000,
            };
            if minutes != 0 {
                postings.push(AccountPosting { account: bonus.account, minutes });
            }
        }
    }
    postings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayChangeBehavior, NoBookingBehavior, PlanType, RoundingRule};
    use rust_decimal::Decimal;

    fn blank_day_plan() -> DayPlan {
        DayPlan {
            id: crate::model::DayPlanId::new(),
            plan_type: PlanType::Flextime,
            come_from: None,
            come_to: None,
            go_from: None,
            go_to: None,
            core_start: None,
            core_end: None,
            regular_hours: Some(480),
            regular_hours_2: None,
            tolerance_come_plus: 0,
            tolerance_come_minus: 0,
            tolerance_go_plus: 0,
            tolerance_go_minus: 0,
            rounding_come: RoundingRule::NONE,
            rounding_go: RoundingRule::NONE,
            round_all_bookings: false,
            min_work_time: None,
            max_net_work_time: None,
            no_booking_behavior: NoBookingBehavior::Error,
            default_order: None,
            day_change_behavior: DayChangeBehavior::None,
            day_change_cutoff: 0,
            shift_alt_plans: vec![],
            holiday_credit: [0, 0, 0],
            vacation_deduction: Decimal::ZERO,
            variable_work_time: false,
            net_account: None,
            cap_account: None,
            breaks: vec![],
            bonuses: vec![],
        }
    }

    fn work_in(time: u16) -> BookingInput {
        BookingInput { id: BookingId::new(), direction: Direction::In, category: Category::Work, edited_time: time }
    }

    fn work_out(time: u16) -> BookingInput {
        BookingInput { id: BookingId::new(), direction: Direction::Out, category: Category::Work, edited_time: time }
    }

    /// Scenario A (spec §8.3): simple day, no rounding, no breaks.
    #[test]
    fn scenario_a_simple_day() {
        let day_plan = blank_day_plan();
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(480), work_out(1020)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert_eq!(result.gross_time, 540);
        assert_eq!(result.break_time, 0);
        assert_eq!(result.net_time, 540);
        assert_eq!(result.target_time, 480);
        assert_eq!(result.overtime, 60);
        assert_eq!(result.undertime, 0);
        assert!(result.error_codes.is_empty());
    }

    /// Scenario B (spec §8.3): fixed break deduction.
    #[test]
    fn scenario_b_fixed_break_deduction() {
        let mut day_plan = blank_day_plan();
        day_plan.breaks.push(DayPlanBreak {
            kind: crate::model::BreakKind::Fixed,
            duration: 30,
            start_time: Some(720),
            end_time: Some(750),
            after_work_minutes: None,
            auto_deduct: false,
            is_paid: false,
            minutes_difference: false,
        });
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(480), work_out(1020)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert_eq!(result.gross_time, 540);
        assert_eq!(result.break_time, 30);
        assert_eq!(result.net_time, 510);
        assert_eq!(result.overtime, 30);
    }

    /// Scenario C (spec §8.3): tolerance pulls, then rounding.
    #[test]
    fn scenario_c_tolerance_then_rounding() {
        let mut day_plan = blank_day_plan();
        day_plan.come_to = Some(480);
        day_plan.tolerance_come_plus = 5;
        day_plan.rounding_come = RoundingRule { kind: crate::model::RoundingKind::Up, interval: 15, add_value: 0 };

        let input_within_tolerance = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(484), work_out(1020)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input_within_tolerance);
        assert_eq!(result.booking_updates[0].calculated_time, 480);

        let input_outside_tolerance = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(490), work_out(1020)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input_outside_tolerance);
        assert_eq!(result.booking_updates[0].calculated_time, 495);
    }

    /// Scenario G (spec §8.3): cross-midnight pairing.
    #[test]
    fn scenario_g_cross_midnight_pair() {
        let mut day_plan = blank_day_plan();
        day_plan.day_change_behavior = DayChangeBehavior::CrossMidnight;
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(1380)],
            next_day_first_booking: Some(work_out(60)),
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert_eq!(result.gross_time, 120);
        assert!(result.error_codes.is_empty());
    }

    /// No next-day booking to pair against: the calculator signals the
    /// auto-complete close instead of fabricating a self-referential pair.
    #[test]
    fn cross_midnight_without_next_day_booking_signals_auto_complete() {
        let mut day_plan = blank_day_plan();
        day_plan.day_change_behavior = DayChangeBehavior::CrossMidnight;
        day_plan.day_change_cutoff = 360;
        let dangling = work_in(1380);
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![dangling],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert_eq!(result.auto_complete_out, Some(360));
        assert_eq!(result.auto_complete_open_id, Some(dangling.id));
        assert_eq!(result.gross_time, 420);
        assert!(result.warnings.contains(&WarningCode::AutoCompleteDayChange));
        assert!(!result.error_codes.contains(&ErrorCode::OutBeforeIn));
        // The dangling booking's own update carries no pair_id yet; the
        // service links it once it materializes the synthetic close.
        let open_update = result.booking_updates.iter().find(|u| u.id == dangling.id).unwrap();
        assert_eq!(open_update.pair_id, None);
    }

    /// A lone `GO` with no preceding `COME` is `MISSING_COME`, distinct
    /// from a `GO` arriving after every open already paired off.
    #[test]
    fn lone_go_with_no_preceding_come_is_missing_come() {
        let day_plan = blank_day_plan();
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_out(600)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert!(result.error_codes.contains(&ErrorCode::MissingCome));
        assert!(!result.error_codes.contains(&ErrorCode::OutBeforeIn));
    }

    /// A second `GO` after the first pair already closed has a preceding
    /// open, just not one still on the stack — `OVERLAPPING_PAIRS`.
    #[test]
    fn extra_go_after_pair_closed_is_overlapping_pairs() {
        let day_plan = blank_day_plan();
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(480), work_out(600), work_out(700)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert!(result.error_codes.contains(&ErrorCode::OverlappingPairs));
        assert!(!result.error_codes.contains(&ErrorCode::MissingCome));
    }

    #[test]
    fn missing_go_flags_error_without_cross_midnight() {
        let day_plan = blank_day_plan();
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![work_in(480)],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert!(result.error_codes.contains(&ErrorCode::MissingGo));
    }

    #[test]
    fn empty_bookings_is_no_bookings_error() {
        let day_plan = blank_day_plan();
        let input = DailyCalcInput {
            day_plan: &day_plan,
            bookings: vec![],
            next_day_first_booking: None,
            is_holiday: false,
            is_absence_day: false,
            employee_target_override: None,
        };
        let result = calculate_day(&input);
        assert_eq!(result.error_codes, vec![ErrorCode::NoBookings]);
        assert_eq!(result.undertime, 480);
    }
}
