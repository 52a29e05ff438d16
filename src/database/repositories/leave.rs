use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{LeaveApplication, LeaveStatus, LeaveType},
    utils::sql,
};

#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        username: &str,
        leave_type: LeaveType,
        from_date: NaiveDate,
        to_date: NaiveDate,
        total_days: i32,
    ) -> Result<LeaveApplication> {
        let now = Utc::now();

        let application = sqlx::query_as::<_, LeaveApplication>(&sql(r#"
            INSERT INTO
                leave_applications (
                    id,
                    username,
                    leave_type,
                    from_date,
                    to_date,
                    total_days,
                    status,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(leave_type)
        .bind(from_date)
        .bind(to_date)
        .bind(total_days)
        .bind(LeaveStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<LeaveApplication>> {
        let application =
            sqlx::query_as::<_, LeaveApplication>("SELECT * FROM leave_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(application)
    }

    pub async fn list(
        &self,
        username: Option<&str>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveApplication>> {
        let mut query = "SELECT * FROM leave_applications".to_string();

        let mut conditions = vec![];
        let mut params: Vec<String> = Vec::new();

        if let Some(name) = username {
            conditions.push(format!("username = ${}", params.len() + 1));
            params.push(name.to_string());
        }

        if let Some(s) = status {
            conditions.push(format!("status = ${}", params.len() + 1));
            params.push(s.to_string());
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut prepared = sqlx::query_as::<_, LeaveApplication>(&query);
        for param in params {
            prepared = prepared.bind(param);
        }

        let applications = prepared.fetch_all(&self.pool).await?;

        Ok(applications)
    }

    /// Transition pending → approved. Returns `None` when the row is not in
    /// `pending`, which callers surface as an invalid transition.
    pub async fn approve(&self, id: Uuid) -> Result<Option<LeaveApplication>> {
        let application = sqlx::query_as::<_, LeaveApplication>(
            r#"
            UPDATE leave_applications
            SET
                status = $1,
                updated_at = $2
            WHERE
                id = $3
                AND status = $4
            RETURNING
                *
            "#,
        )
        .bind(LeaveStatus::Approved)
        .bind(Utc::now())
        .bind(id)
        .bind(LeaveStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    /// Transition pending → rejected, recording the reason.
    pub async fn reject(&self, id: Uuid, reason: Option<&str>) -> Result<Option<LeaveApplication>> {
        let application = sqlx::query_as::<_, LeaveApplication>(
            r#"
            UPDATE leave_applications
            SET
                status = $1,
                rejection_reason = $2,
                updated_at = $3
            WHERE
                id = $4
                AND status = $5
            RETURNING
                *
            "#,
        )
        .bind(LeaveStatus::Rejected)
        .bind(reason)
        .bind(Utc::now())
        .bind(id)
        .bind(LeaveStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM leave_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Approved days already taken for this type within one calendar year.
    pub async fn approved_days_in_year(
        &self,
        username: &str,
        leave_type: LeaveType,
        year: i32,
    ) -> Result<i64> {
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
        let year_end = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");

        let taken = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT
                SUM(total_days)
            FROM
                leave_applications
            WHERE
                username = $1
                AND leave_type = $2
                AND status = $3
                AND from_date BETWEEN $4 AND $5
            "#,
        )
        .bind(username)
        .bind(leave_type)
        .bind(LeaveStatus::Approved)
        .bind(year_start)
        .bind(year_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken.unwrap_or(0))
    }
}
