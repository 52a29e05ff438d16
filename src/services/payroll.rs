use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::database::models::{GenerateSalaryInput, SalaryRecord};
use crate::database::repositories::{
    AttendanceRepository, DeductionRepository, SalaryRecordRepository, SalaryStructureRepository,
};
use crate::error::AppError;
use crate::payroll::constants::DEFAULT_WORKING_DAYS;
use crate::payroll::{calculate_earnings, resolve_deductions, ResolvedDeduction};

/// The persisted record plus the per-deduction breakdown, in configuration
/// order, for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSalary {
    pub record: SalaryRecord,
    pub deductions: Vec<ResolvedDeduction>,
}

/// First and last day of a `YYYY-MM` month.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid month '{}', expected YYYY-MM", month)))?;

    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .map(|next| next.pred_opt().expect("month end"))
    .ok_or_else(|| AppError::BadRequest(format!("Invalid month '{}'", month)))?;

    Ok((start, end))
}

#[derive(Clone)]
pub struct PayrollService {
    attendance_repository: AttendanceRepository,
    structure_repository: SalaryStructureRepository,
    deduction_repository: DeductionRepository,
    salary_repository: SalaryRecordRepository,
}

impl PayrollService {
    pub fn new(
        attendance_repository: AttendanceRepository,
        structure_repository: SalaryStructureRepository,
        deduction_repository: DeductionRepository,
        salary_repository: SalaryRecordRepository,
    ) -> Self {
        Self {
            attendance_repository,
            structure_repository,
            deduction_repository,
            salary_repository,
        }
    }

    /// Compute and persist one employee-month: attendance drives earnings,
    /// configured deductions resolve against the resulting gross, and
    /// `net = earnings − deductions` with no floor at zero.
    pub async fn generate(&self, input: GenerateSalaryInput) -> Result<GeneratedSalary, AppError> {
        let (month_start, month_end) = month_bounds(&input.month)?;

        let attendance = self
            .attendance_repository
            .monthly_summary(&input.username, month_start, month_end)
            .await?;

        let structure = self
            .structure_repository
            .active_on(&input.username, month_end)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No active salary structure for '{}'",
                    input.username
                ))
            })?;

        let deduction_records = self
            .deduction_repository
            .records_for_period(&input.username, month_start, month_end)
            .await?;

        let working_days = input.working_days.unwrap_or(DEFAULT_WORKING_DAYS);
        let overtime_hours = input.overtime_hours.unwrap_or(0.0);

        let earnings = calculate_earnings(
            &structure,
            working_days,
            attendance.present_days,
            overtime_hours,
        );

        let summary = resolve_deductions(
            &deduction_records,
            earnings.total_earnings,
            earnings.basic_salary,
        );

        let net_salary = earnings.total_earnings - summary.total_deductions;

        let record = self
            .salary_repository
            .upsert(
                &input.username,
                month_start,
                working_days,
                attendance.present_days,
                overtime_hours,
                &earnings,
                &summary,
                net_salary,
            )
            .await?;

        Ok(GeneratedSalary {
            record,
            deductions: summary.resolved,
        })
    }

    pub async fn find_record(
        &self,
        username: &str,
        month: &str,
    ) -> Result<Option<SalaryRecord>, AppError> {
        let (month_start, _) = month_bounds(month)?;

        let record = self.salary_repository.find(username, month_start).await?;

        Ok(record)
    }
}
