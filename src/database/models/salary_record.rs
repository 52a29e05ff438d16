use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum SalaryStatus {
        Draft => "draft",
        Pending => "pending",
        Approved => "approved",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

/// One computed payroll row per (username, salary_month). Regenerating a
/// month overwrites the existing row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    pub id: Uuid,
    pub username: String,
    /// First day of the month the record covers.
    pub salary_month: NaiveDate,
    pub working_days: i32,
    pub present_days: i32,
    pub overtime_hours: f64,
    pub basic_earned: f64,
    pub hra: f64,
    pub transport_allowance: f64,
    pub medical_allowance: f64,
    pub special_allowance: f64,
    pub bonus: f64,
    pub overtime_amount: f64,
    pub total_earnings: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    pub status: SalaryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSalaryInput {
    pub username: String,
    /// Month in `YYYY-MM` form.
    pub month: String,
    pub working_days: Option<i32>,
    pub overtime_hours: Option<f64>,
}
