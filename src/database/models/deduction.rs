use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum CalculationType {
        Fixed => "fixed",
        Percentage => "percentage",
        Formula => "formula",
    }
}

/// Catalog entry describing one kind of deduction (PF, ESI, unpaid leave...).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeductionType {
    pub id: Uuid,
    pub deduction_code: String,
    pub deduction_name: String,
    pub calculation_type: CalculationType,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionTypeInput {
    pub deduction_code: String,
    pub deduction_name: String,
    pub calculation_type: CalculationType,
    #[serde(default)]
    pub is_mandatory: bool,
}

/// A deduction type applied to one employee over a date range. An open-ended
/// range has `effective_to = NULL`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryDeduction {
    pub id: Uuid,
    pub username: String,
    pub deduction_type_id: Uuid,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub reason: Option<String>,
    pub created_by: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryDeductionInput {
    pub username: String,
    pub deduction_type_id: Uuid,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub reason: Option<String>,
}

/// A salary deduction joined with its catalog entry, as fed to the resolver.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeductionRecord {
    pub deduction_code: String,
    pub deduction_name: String,
    pub calculation_type: CalculationType,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
}
