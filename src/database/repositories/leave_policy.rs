use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{LeavePolicy, LeavePolicyInput, LeaveType},
    utils::sql,
};

#[derive(Clone)]
pub struct LeavePolicyRepository {
    pool: PgPool,
}

impl LeavePolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, input: LeavePolicyInput) -> Result<LeavePolicy> {
        let policy = sqlx::query_as::<_, LeavePolicy>(&sql(r#"
            INSERT INTO
                leave_policies (id, username, leave_type, is_enabled, allowed_days, year)
            VALUES
                (?, ?, ?, ?, ?, ?)
            ON CONFLICT (username, leave_type, year) DO UPDATE
            SET
                is_enabled = EXCLUDED.is_enabled,
                allowed_days = EXCLUDED.allowed_days
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(input.leave_type)
        .bind(input.is_enabled)
        .bind(input.allowed_days)
        .bind(input.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(policy)
    }

    pub async fn find(
        &self,
        username: &str,
        leave_type: LeaveType,
        year: i32,
    ) -> Result<Option<LeavePolicy>> {
        let policy = sqlx::query_as::<_, LeavePolicy>(
            r#"
            SELECT
                *
            FROM
                leave_policies
            WHERE
                username = $1
                AND leave_type = $2
                AND year = $3
            "#,
        )
        .bind(username)
        .bind(leave_type)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(policy)
    }

    pub async fn list_for_user(&self, username: &str) -> Result<Vec<LeavePolicy>> {
        let policies = sqlx::query_as::<_, LeavePolicy>(
            "SELECT * FROM leave_policies WHERE username = $1 ORDER BY year DESC, leave_type",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(policies)
    }
}
