//! Gross earnings computation for one employee-month.

use serde::Serialize;

use crate::database::models::SalaryStructure;
use crate::payroll::constants::DEFAULT_WORKING_DAYS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsBreakdown {
    pub basic_salary: f64,
    pub hra: f64,
    pub transport_allowance: f64,
    pub medical_allowance: f64,
    pub special_allowance: f64,
    pub bonus: f64,
    pub overtime_amount: f64,
    pub total_earnings: f64,
}

/// Derives gross earnings from a salary structure and attendance.
///
/// Basic pay is prorated by attendance: `(basic / working_days) * present_days`.
/// HRA scales with the basic actually earned rather than the structure's
/// nominal HRA. Transport, medical, special and bonus are passed through
/// unprorated. A non-positive `working_days` falls back to
/// [`DEFAULT_WORKING_DAYS`]; negative attendance and overtime inputs are
/// clamped to zero.
pub fn calculate_earnings(
    structure: &SalaryStructure,
    working_days: i32,
    present_days: i32,
    overtime_hours: f64,
) -> EarningsBreakdown {
    let working_days = if working_days > 0 {
        working_days
    } else {
        DEFAULT_WORKING_DAYS
    };
    let present_days = present_days.max(0);
    let overtime_hours = overtime_hours.max(0.0);

    let daily_rate = structure.basic_salary / f64::from(working_days);
    let basic_salary = daily_rate * f64::from(present_days);

    let hra = if structure.basic_salary > 0.0 {
        (structure.hra / structure.basic_salary) * basic_salary
    } else {
        0.0
    };

    let overtime_amount = overtime_hours * structure.overtime_rate;

    let total_earnings = basic_salary
        + hra
        + structure.transport_allowance
        + structure.medical_allowance
        + structure.special_allowance
        + structure.bonus
        + overtime_amount;

    EarningsBreakdown {
        basic_salary,
        hra,
        transport_allowance: structure.transport_allowance,
        medical_allowance: structure.medical_allowance,
        special_allowance: structure.special_allowance,
        bonus: structure.bonus,
        overtime_amount,
        total_earnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn structure(basic: f64, hra: f64) -> SalaryStructure {
        SalaryStructure {
            id: Uuid::new_v4(),
            username: "asha".to_string(),
            basic_salary: basic,
            hra,
            transport_allowance: 1600.0,
            medical_allowance: 1250.0,
            special_allowance: 3000.0,
            bonus: 2000.0,
            overtime_rate: 150.0,
            effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn basic_is_prorated_exactly() {
        let s = structure(30000.0, 12000.0);
        let e = calculate_earnings(&s, 30, 20, 0.0);
        assert_eq!(e.basic_salary, (30000.0 / 30.0) * 20.0);
    }

    #[test]
    fn full_attendance_earns_full_basic() {
        let s = structure(30000.0, 12000.0);
        let e = calculate_earnings(&s, 26, 26, 0.0);
        assert_eq!(e.basic_salary, 30000.0);
        assert_eq!(e.hra, 12000.0);
    }

    #[test]
    fn hra_scales_with_attendance() {
        let s = structure(30000.0, 12000.0);
        let half = calculate_earnings(&s, 30, 10, 0.0);
        let full = calculate_earnings(&s, 30, 20, 0.0);
        assert_eq!(full.hra, half.hra * 2.0);
    }

    #[test]
    fn allowances_are_not_prorated() {
        let s = structure(30000.0, 12000.0);
        let e = calculate_earnings(&s, 30, 1, 0.0);
        assert_eq!(e.transport_allowance, 1600.0);
        assert_eq!(e.medical_allowance, 1250.0);
        assert_eq!(e.special_allowance, 3000.0);
        assert_eq!(e.bonus, 2000.0);
    }

    #[test]
    fn overtime_uses_structure_rate() {
        let s = structure(30000.0, 12000.0);
        let e = calculate_earnings(&s, 30, 30, 8.0);
        assert_eq!(e.overtime_amount, 8.0 * 150.0);
    }

    #[test]
    fn zero_working_days_falls_back_to_default() {
        let s = structure(30000.0, 0.0);
        let e = calculate_earnings(&s, 0, 30, 0.0);
        assert_eq!(e.basic_salary, 30000.0);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let s = structure(30000.0, 12000.0);
        let e = calculate_earnings(&s, 30, -5, -2.0);
        assert_eq!(e.basic_salary, 0.0);
        assert_eq!(e.hra, 0.0);
        assert_eq!(e.overtime_amount, 0.0);
    }

    #[test]
    fn zero_basic_structure_yields_zero_hra() {
        let s = structure(0.0, 12000.0);
        let e = calculate_earnings(&s, 30, 20, 0.0);
        assert_eq!(e.hra, 0.0);
    }

    #[test]
    fn total_is_sum_of_components() {
        let s = structure(30000.0, 12000.0);
        let e = calculate_earnings(&s, 30, 30, 4.0);
        let expected = e.basic_salary
            + e.hra
            + e.transport_allowance
            + e.medical_allowance
            + e.special_allowance
            + e.bonus
            + e.overtime_amount;
        assert_eq!(e.total_earnings, expected);
    }
}
