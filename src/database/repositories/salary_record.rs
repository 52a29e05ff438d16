use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{SalaryRecord, SalaryStatus},
    utils::sql,
};
use crate::payroll::{DeductionSummary, EarningsBreakdown};

#[derive(Clone)]
pub struct SalaryRecordRepository {
    pool: PgPool,
}

impl SalaryRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Write the computed row for one employee-month, overwriting any
    /// previous generation of the same month. Regenerated rows drop back to
    /// `draft`.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        username: &str,
        salary_month: NaiveDate,
        working_days: i32,
        present_days: i32,
        overtime_hours: f64,
        earnings: &EarningsBreakdown,
        deductions: &DeductionSummary,
        net_salary: f64,
    ) -> Result<SalaryRecord> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, SalaryRecord>(&sql(r#"
            INSERT INTO
                salary_records (
                    id,
                    username,
                    salary_month,
                    working_days,
                    present_days,
                    overtime_hours,
                    basic_earned,
                    hra,
                    transport_allowance,
                    medical_allowance,
                    special_allowance,
                    bonus,
                    overtime_amount,
                    total_earnings,
                    total_deductions,
                    net_salary,
                    status,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (username, salary_month) DO UPDATE
            SET
                working_days = EXCLUDED.working_days,
                present_days = EXCLUDED.present_days,
                overtime_hours = EXCLUDED.overtime_hours,
                basic_earned = EXCLUDED.basic_earned,
                hra = EXCLUDED.hra,
                transport_allowance = EXCLUDED.transport_allowance,
                medical_allowance = EXCLUDED.medical_allowance,
                special_allowance = EXCLUDED.special_allowance,
                bonus = EXCLUDED.bonus,
                overtime_amount = EXCLUDED.overtime_amount,
                total_earnings = EXCLUDED.total_earnings,
                total_deductions = EXCLUDED.total_deductions,
                net_salary = EXCLUDED.net_salary,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(salary_month)
        .bind(working_days)
        .bind(present_days)
        .bind(overtime_hours)
        .bind(earnings.basic_salary)
        .bind(earnings.hra)
        .bind(earnings.transport_allowance)
        .bind(earnings.medical_allowance)
        .bind(earnings.special_allowance)
        .bind(earnings.bonus)
        .bind(earnings.overtime_amount)
        .bind(earnings.total_earnings)
        .bind(deductions.total_deductions)
        .bind(net_salary)
        .bind(SalaryStatus::Draft)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find(&self, username: &str, salary_month: NaiveDate) -> Result<Option<SalaryRecord>> {
        let record = sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT
                *
            FROM
                salary_records
            WHERE
                username = $1
                AND salary_month = $2
            "#,
        )
        .bind(username)
        .bind(salary_month)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
