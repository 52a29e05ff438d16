use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{AttendanceRecord, AttendanceSummary},
    utils::sql,
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark a day worked. Re-recording the same day is a no-op.
    pub async fn record(&self, username: &str, work_date: NaiveDate) -> Result<AttendanceRecord> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
            INSERT INTO
                attendance_records (id, username, work_date, created_at)
            VALUES
                (?, ?, ?, ?)
            ON CONFLICT (username, work_date) DO UPDATE
            SET
                work_date = EXCLUDED.work_date
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(work_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Present-day count and worked dates for one employee-month.
    pub async fn monthly_summary(
        &self,
        username: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<AttendanceSummary> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT
                work_date
            FROM
                attendance_records
            WHERE
                username = $1
                AND work_date BETWEEN $2 AND $3
            ORDER BY
                work_date
            "#,
        )
        .bind(username)
        .bind(period_start)
        .bind(period_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(AttendanceSummary {
            username: username.to_string(),
            present_days: dates.len() as i32,
            dates_worked: dates.iter().map(|d| d.to_string()).collect(),
        })
    }
}
