use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee's active compensation component set. Superseded, never
/// deleted: a compensation change inserts a new row and deactivates the
/// previous one.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStructure {
    pub id: Uuid,
    pub username: String,
    pub basic_salary: f64,
    pub hra: f64,
    pub transport_allowance: f64,
    pub medical_allowance: f64,
    pub special_allowance: f64,
    pub bonus: f64,
    pub overtime_rate: f64,
    pub effective_from: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SalaryStructure {
    /// Nominal monthly gross: every component, unprorated.
    pub fn monthly_gross(&self) -> f64 {
        self.basic_salary
            + self.hra
            + self.transport_allowance
            + self.medical_allowance
            + self.special_allowance
            + self.bonus
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryStructureInput {
    pub username: String,
    pub basic_salary: f64,
    #[serde(default)]
    pub hra: f64,
    #[serde(default)]
    pub transport_allowance: f64,
    #[serde(default)]
    pub medical_allowance: f64,
    #[serde(default)]
    pub special_allowance: f64,
    #[serde(default)]
    pub bonus: f64,
    #[serde(default)]
    pub overtime_rate: f64,
    pub effective_from: NaiveDate,
}
