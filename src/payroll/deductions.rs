//! Deduction resolution against gross earnings.
//!
//! Configured deduction records are loosely shaped: a record may carry a
//! fixed amount, a percentage, or nothing but a code that selects one of the
//! standard statutory formulas. Classification happens once, into
//! [`DeductionRule`], and a single exhaustive match turns the rule into a
//! monetary amount.

use serde::Serialize;

use crate::database::models::{CalculationType, DeductionRecord};
use crate::payroll::constants::{
    ESI_RATE, IT_ANNUAL_EXEMPTION, IT_SLAB_RATE, MONTHS_PER_YEAR, PF_RATE, PT_FLAT_AMOUNT,
};

/// What a deduction record resolved to, once its shape is pinned down.
#[derive(Debug, Clone, PartialEq)]
pub enum DeductionRule {
    Fixed { amount: f64 },
    Percentage { percentage: f64 },
    Formula { formula: StandardFormula },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StandardFormula {
    ProvidentFund,
    StateInsurance,
    IncomeTax,
    ProfessionalTax,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeduction {
    pub deduction_code: String,
    pub deduction_name: String,
    pub calculated_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionSummary {
    pub resolved: Vec<ResolvedDeduction>,
    pub total_deductions: f64,
}

/// Classifies a record by priority: an explicit or implied fixed amount wins
/// over a percentage, which wins over the standard-formula fallback. Records
/// that match nothing resolve as a fixed amount of whatever `amount` holds,
/// defaulting to zero. Malformed records never error.
pub fn classify(record: &DeductionRecord) -> DeductionRule {
    let amount = record.amount.unwrap_or(0.0);

    let implied_fixed = amount > 0.0
        && record.percentage.is_none()
        && record.calculation_type != CalculationType::Formula;
    if record.calculation_type == CalculationType::Fixed || implied_fixed {
        return DeductionRule::Fixed { amount };
    }

    if record.calculation_type == CalculationType::Percentage {
        if let Some(percentage) = record.percentage {
            if percentage > 0.0 {
                return DeductionRule::Percentage { percentage };
            }
        }
    }

    if let Some(formula) = match_standard_formula(record) {
        return DeductionRule::Formula { formula };
    }

    DeductionRule::Fixed { amount }
}

/// Code match is exact; name match is a case-sensitive contains-check.
fn match_standard_formula(record: &DeductionRecord) -> Option<StandardFormula> {
    let code = record.deduction_code.as_str();
    let name = record.deduction_name.as_str();

    if code == "PF" || name.contains("Provident Fund") {
        Some(StandardFormula::ProvidentFund)
    } else if code == "ESI" || name.contains("ESI") {
        Some(StandardFormula::StateInsurance)
    } else if code == "IT" || name.contains("Income Tax") {
        Some(StandardFormula::IncomeTax)
    } else if code == "PT" || name.contains("Professional Tax") {
        Some(StandardFormula::ProfessionalTax)
    } else {
        None
    }
}

/// Turns a classified rule into a monetary amount against this month's
/// gross and earned basic.
pub fn rule_amount(rule: &DeductionRule, total_earnings: f64, basic_salary: f64) -> f64 {
    match rule {
        DeductionRule::Fixed { amount } => *amount,
        DeductionRule::Percentage { percentage } => (percentage / 100.0) * total_earnings,
        DeductionRule::Formula { formula } => match formula {
            StandardFormula::ProvidentFund => PF_RATE * basic_salary,
            StandardFormula::StateInsurance => ESI_RATE * total_earnings,
            StandardFormula::IncomeTax => {
                // Simplified flat slab over annualized earnings; not a real
                // tax computation.
                let annual_income = total_earnings * MONTHS_PER_YEAR;
                if annual_income > IT_ANNUAL_EXEMPTION {
                    ((annual_income - IT_ANNUAL_EXEMPTION) * IT_SLAB_RATE) / MONTHS_PER_YEAR
                } else {
                    0.0
                }
            }
            StandardFormula::ProfessionalTax => PT_FLAT_AMOUNT,
        },
    }
}

/// Resolves every record in input order and sums the total. Order is part of
/// the contract: callers display the resolved list as configured.
pub fn resolve_deductions(
    records: &[DeductionRecord],
    total_earnings: f64,
    basic_salary: f64,
) -> DeductionSummary {
    let resolved: Vec<ResolvedDeduction> = records
        .iter()
        .map(|record| {
            let rule = classify(record);
            ResolvedDeduction {
                deduction_code: record.deduction_code.clone(),
                deduction_name: record.deduction_name.clone(),
                calculated_amount: rule_amount(&rule, total_earnings, basic_salary),
            }
        })
        .collect();

    let total_deductions = resolved.iter().map(|r| r.calculated_amount).sum();

    DeductionSummary {
        resolved,
        total_deductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        code: &str,
        name: &str,
        calculation_type: CalculationType,
        amount: Option<f64>,
        percentage: Option<f64>,
    ) -> DeductionRecord {
        DeductionRecord {
            deduction_code: code.to_string(),
            deduction_name: name.to_string(),
            calculation_type,
            amount,
            percentage,
        }
    }

    #[test]
    fn fixed_rule_wins_over_percentage() {
        let r = record("LOAN", "Loan EMI", CalculationType::Fixed, Some(500.0), Some(10.0));
        assert_eq!(classify(&r), DeductionRule::Fixed { amount: 500.0 });
    }

    #[test]
    fn positive_amount_implies_fixed_without_explicit_type() {
        let r = record("ADV", "Salary Advance", CalculationType::Percentage, Some(750.0), None);
        assert_eq!(classify(&r), DeductionRule::Fixed { amount: 750.0 });
    }

    #[test]
    fn percentage_resolves_against_gross() {
        let r = record("PF2", "Voluntary PF", CalculationType::Percentage, None, Some(5.0));
        let summary = resolve_deductions(&[r], 20000.0, 15000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 1000.0);
    }

    #[test]
    fn pf_formula_is_twelve_percent_of_basic() {
        let r = record("PF", "Provident Fund", CalculationType::Formula, None, None);
        let summary = resolve_deductions(&[r], 25000.0, 10000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 1200.0);
    }

    #[test]
    fn esi_formula_matches_by_name_substring() {
        let r = record("X1", "ESI Contribution", CalculationType::Formula, None, None);
        let summary = resolve_deductions(&[r], 20000.0, 15000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 0.0075 * 20000.0);
    }

    #[test]
    fn income_tax_above_exemption() {
        let r = record("IT", "Income Tax", CalculationType::Formula, None, None);
        let summary = resolve_deductions(&[r], 30000.0, 20000.0);
        let expected = ((30000.0 * 12.0 - 250000.0) * 0.10) / 12.0;
        assert!((summary.resolved[0].calculated_amount - expected).abs() < 1e-9);
        assert!((summary.resolved[0].calculated_amount - 916.666).abs() < 0.01);
    }

    #[test]
    fn income_tax_below_exemption_is_zero() {
        let r = record("IT", "Income Tax", CalculationType::Formula, None, None);
        let summary = resolve_deductions(&[r], 15000.0, 10000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 0.0);
    }

    #[test]
    fn professional_tax_is_flat() {
        let r = record("PT", "Professional Tax", CalculationType::Formula, None, None);
        let summary = resolve_deductions(&[r], 50000.0, 40000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 200.0);
    }

    #[test]
    fn name_match_is_case_sensitive() {
        // "provident fund" (lowercase) must not match the PF formula.
        let r = record("XX", "provident fund", CalculationType::Formula, None, Some(0.0));
        let summary = resolve_deductions(&[r], 25000.0, 10000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 0.0);
    }

    #[test]
    fn unmatched_record_falls_back_to_amount_or_zero() {
        let with_amount = record("MISC", "Canteen", CalculationType::Formula, Some(300.0), None);
        let without = record("MISC2", "Unknown", CalculationType::Formula, None, None);
        let summary = resolve_deductions(&[with_amount, without], 20000.0, 15000.0);
        assert_eq!(summary.resolved[0].calculated_amount, 300.0);
        assert_eq!(summary.resolved[1].calculated_amount, 0.0);
    }

    #[test]
    fn resolution_preserves_input_order() {
        let records = vec![
            record("PT", "Professional Tax", CalculationType::Formula, None, None),
            record("PF", "Provident Fund", CalculationType::Formula, None, None),
            record("LOAN", "Loan EMI", CalculationType::Fixed, Some(500.0), None),
        ];
        let summary = resolve_deductions(&records, 30000.0, 20000.0);
        let codes: Vec<&str> = summary
            .resolved
            .iter()
            .map(|r| r.deduction_code.as_str())
            .collect();
        assert_eq!(codes, vec!["PT", "PF", "LOAN"]);
    }

    #[test]
    fn total_is_sum_of_resolved_amounts() {
        let records = vec![
            record("PF", "Provident Fund", CalculationType::Formula, None, None),
            record("PT", "Professional Tax", CalculationType::Formula, None, None),
        ];
        let summary = resolve_deductions(&records, 30000.0, 10000.0);
        assert_eq!(summary.total_deductions, 1200.0 + 200.0);
    }
}
