use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum LeaveType {
        Sick => "sick",
        Casual => "casual",
        Paid => "paid",
        Unpaid => "unpaid",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum LeaveStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub id: Uuid,
    pub username: String,
    pub leave_type: LeaveType,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    /// Inclusive day count, fixed at creation.
    pub total_days: i32,
    pub status: LeaveStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplicationInput {
    pub username: String,
    pub leave_type: LeaveType,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Per-employee, per-type allowance for one calendar year. Unpaid leave has
/// no policy row; it bypasses the balance check entirely.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeavePolicy {
    pub id: Uuid,
    pub username: String,
    pub leave_type: LeaveType,
    pub is_enabled: bool,
    pub allowed_days: i32,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeavePolicyInput {
    pub username: String,
    pub leave_type: LeaveType,
    pub is_enabled: bool,
    pub allowed_days: i32,
    pub year: i32,
}
