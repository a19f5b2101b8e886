//! Pure Monthly Calculator (spec §4.3): aggregation and the four flextime
//! credit policies.

use crate::model::{AbsenceSummary, CreditType, MonthlyEvaluationConfig, WarningCode};
use crate::model::decimal::round_half_day;
use rust_decimal::Decimal;

/// One day's contribution to the monthly aggregate. A thin projection of
/// `DailyValue` — the service extracts this from each day's persisted
/// result before calling [`calculate_month`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyContribution {
    pub gross_time: u16,
    pub net_time: u16,
    pub target_time: u16,
    pub overtime: u16,
    pub undertime: u16,
    pub break_time: u16,
    pub has_error: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub gross_time: i64,
    pub net_time: i64,
    pub target_time: i64,
    pub overtime: i64,
    pub undertime: i64,
    pub break_time: i64,
    pub work_days: u32,
    pub days_with_errors: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyResult {
    pub totals: MonthlyTotals,
    pub flextime_start: i32,
    pub flextime_change: i32,
    pub flextime_credited: i32,
    pub flextime_forfeited: i32,
    pub flextime_end: i32,
    pub flextime_carryover: i32,
    pub absence: AbsenceSummary,
    pub warnings: Vec<WarningCode>,
}

/// Steps 1-8 of spec §4.3. `evaluation` is `None` when the tariff defines
/// no monthly-evaluation config at all (treated identically to
/// `CreditType::NoEvaluation`, per step 5/6).
pub fn calculate_month(days: &[DailyContribution], evaluation: Option<&MonthlyEvaluationConfig>, previous_carryover: i32, absence_summary: AbsenceSummary) -> MonthlyResult {
    let totals = aggregate(days);
    let flextime_start = previous_carryover;
    let flextime_change = (totals.overtime - totals.undertime) as i32;
    let flextime_raw = flextime_start + flextime_change;

    let (flextime_credited, flextime_forfeited, flextime_end, warnings) = match evaluation {
        None => (flextime_change, 0, flextime_raw, Vec::new()),
        Some(config) => apply_credit_policy(config, flextime_start, flextime_change, flextime_raw),
    };

    MonthlyResult {
        totals,
        flextime_start,
        flextime_change,
        flextime_credited,
        flextime_forfeited,
        flextime_end,
        flextime_carryover: flextime_end,
        absence: absence_summary,
        warnings,
    }
}

fn aggregate(days: &[DailyContribution]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for day in days {
        totals.gross_time += day.gross_time as i64;
        totals.net_time += day.net_time as i64;
        totals.target_time += day.target_time as i64;
        totals.overtime += day.overtime as i64;
        totals.undertime += day.undertime as i64;
        totals.break_time += day.break_time as i64;
        if day.gross_time > 0 || day.net_time > 0 {
            totals.work_days += 1;
        }
        if day.has_error {
            totals.days_with_errors += 1;
        }
    }
    totals
}

/// Applies `flextime_cap_positive`/`flextime_cap_negative` on top of an
/// already-credited balance, per the shared clause in §4.3 step 6's
/// `complete_carryover`/`after_threshold` bullets. Only the positive cap
/// contributes to `flextime_forfeited`; the negative cap is a floor only.
fn apply_caps(config: &MonthlyEvaluationConfig, flextime_end: i32, forfeited_so_far: i32, warnings: &mut Vec<WarningCode>) -> (i32, i32) {
    let mut end = flextime_end;
    let mut forfeited = forfeited_so_far;
    let mut capped = false;

    if let Some(positive_cap) = config.flextime_cap_positive {
        if end > positive_cap {
            forfeited += end - positive_cap;
            end = positive_cap;
            capped = true;
        }
    }
    if let Some(negative_cap) = config.flextime_cap_negative {
        let floor = -negative_cap;
        if end < floor {
            end = floor;
            capped = true;
        }
    }
    if capped {
        warnings.push(WarningCode::FlextimeCapped);
    }
    (end, forfeited)
}

fn apply_credit_policy(config: &MonthlyEvaluationConfig, flextime_start: i32, flextime_change: i32, flextime_raw: i32) -> (i32, i32, i32, Vec<WarningCode>) {
    let mut warnings = Vec::new();

    match config.credit_type {
        CreditType::NoEvaluation => (flextime_change, 0, flextime_raw, warnings),

        CreditType::CompleteCarryover => {
            let mut credited = flextime_change;
            let mut forfeited = 0;
            if let Some(cap) = config.max_flextime_per_month {
                if credited > cap {
                    forfeited += credited - cap;
                    credited = cap;
                    warnings.push(WarningCode::MonthlyCapReached);
                }
            }
            let raw_end = flextime_start + credited;
            let (end, forfeited) = apply_caps(config, raw_end, forfeited, &mut warnings);
            (credited, forfeited, end, warnings)
        }

        CreditType::AfterThreshold => {
            let threshold = config.flextime_threshold;
            let (credited, forfeited) = if flextime_change <= 0 {
                (flextime_change, 0)
            } else if flextime_change > threshold {
                (flextime_change - threshold, threshold)
            } else {
                warnings.push(WarningCode::BelowThreshold);
                (0, flextime_change)
            };
            let raw_end = flextime_start + credited;
            let (end, forfeited) = apply_caps(config, raw_end, forfeited, &mut warnings);
            (credited, forfeited, end, warnings)
        }

        CreditType::NoCarryover => {
            warnings.push(WarningCode::NoCarryover);
            (0, flextime_change, 0, warnings)
        }
    }
}

/// Annual carryover floor, applied separately from the monthly chain at
/// year boundaries (spec §4.3 "Annual carryover").
pub fn apply_annual_floor(balance: i32, annual_floor: i32) -> i32 {
    if balance < -annual_floor {
        -annual_floor
    } else {
        balance
    }
}

/// Rounds a decimal absence-duration quantity to the half-day grid used
/// when surfacing summaries (spec §6.3).
pub fn round_absence_half_day(value: Decimal) -> Decimal {
    round_half_day(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AbsenceSummary;

    fn config(credit_type: CreditType) -> MonthlyEvaluationConfig {
        MonthlyEvaluationConfig {
            credit_type,
            flextime_threshold: 120,
            max_flextime_per_month: None,
            flextime_cap_positive: None,
            flextime_cap_negative: None,
            upper_limit_annual: None,
            lower_limit_annual: None,
        }
    }

    fn day(overtime: u16, undertime: u16) -> DailyContribution {
        DailyContribution {
            gross_time: overtime,
            net_time: overtime,
            target_time: 0,
            overtime,
            undertime,
            break_time: 0,
            has_error: false,
        }
    }

    /// Scenario D (spec §8.3): after-threshold credit, over threshold.
    #[test]
    fn scenario_d_after_threshold_over() {
        let result = calculate_month(&[day(300, 0)], Some(&config(CreditType::AfterThreshold)), 0, AbsenceSummary::default());
        assert_eq!(result.flextime_change, 300);
        assert_eq!(result.flextime_credited, 180);
        assert_eq!(result.flextime_forfeited, 120);
        assert_eq!(result.flextime_end, 180);
        assert_eq!(result.flextime_carryover, 180);
    }

    /// Scenario D, second half: below threshold.
    #[test]
    fn scenario_d_after_threshold_below() {
        let result = calculate_month(&[day(90, 0)], Some(&config(CreditType::AfterThreshold)), 0, AbsenceSummary::default());
        assert_eq!(result.flextime_credited, 0);
        assert_eq!(result.flextime_forfeited, 90);
        assert_eq!(result.flextime_end, 0);
        assert!(result.warnings.contains(&WarningCode::BelowThreshold));
    }

    /// Scenario E (spec §8.3): complete-carryover monthly cap.
    #[test]
    fn scenario_e_complete_carryover_cap() {
        let mut cfg = config(CreditType::CompleteCarryover);
        cfg.max_flextime_per_month = Some(480);
        let result = calculate_month(&[day(600, 0)], Some(&cfg), 0, AbsenceSummary::default());
        assert_eq!(result.flextime_credited, 480);
        assert_eq!(result.flextime_forfeited, 120);
        assert_eq!(result.flextime_end, 480);
        assert!(result.warnings.contains(&WarningCode::MonthlyCapReached));
    }

    #[test]
    fn no_carryover_zeroes_the_balance_and_forfeits_all() {
        let result = calculate_month(&[day(200, 0)], Some(&config(CreditType::NoCarryover)), 50, AbsenceSummary::default());
        assert_eq!(result.flextime_credited, 0);
        assert_eq!(result.flextime_end, 0);
        assert_eq!(result.flextime_forfeited, 200);
        assert!(result.warnings.contains(&WarningCode::NoCarryover));
    }

    #[test]
    fn annual_floor_clamps_deep_negative_balances() {
        assert_eq!(apply_annual_floor(-500, 400), -400);
        assert_eq!(apply_annual_floor(-300, 400), -300);
    }

    #[test]
    fn no_evaluation_config_passes_change_through_unmodified() {
        let result = calculate_month(&[day(100, 40)], None, 10, AbsenceSummary::default());
        assert_eq!(result.flextime_change, 60);
        assert_eq!(result.flextime_end, 70);
        assert_eq!(result.flextime_carryover, 70);
    }
}
