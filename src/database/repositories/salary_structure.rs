use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{SalaryStructure, SalaryStructureInput},
    utils::sql,
};

#[derive(Clone)]
pub struct SalaryStructureRepository {
    pool: PgPool,
}

impl SalaryStructureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new structure, superseding any active one. The old row is
    /// deactivated, not deleted, so compensation history stays queryable.
    pub async fn create(&self, input: SalaryStructureInput) -> Result<SalaryStructure> {
        let now = Utc::now();

        sqlx::query("UPDATE salary_structures SET is_active = FALSE, updated_at = $1 WHERE username = $2 AND is_active")
            .bind(now)
            .bind(&input.username)
            .execute(&self.pool)
            .await?;

        let structure = sqlx::query_as::<_, SalaryStructure>(&sql(r#"
            INSERT INTO
                salary_structures (
                    id,
                    username,
                    basic_salary,
                    hra,
                    transport_allowance,
                    medical_allowance,
                    special_allowance,
                    bonus,
                    overtime_rate,
                    effective_from,
                    is_active,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?, ?)
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(input.basic_salary)
        .bind(input.hra)
        .bind(input.transport_allowance)
        .bind(input.medical_allowance)
        .bind(input.special_allowance)
        .bind(input.bonus)
        .bind(input.overtime_rate)
        .bind(input.effective_from)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(structure)
    }

    /// The structure governing a given date: the most recent active row with
    /// `effective_from` on or before it.
    pub async fn active_on(&self, username: &str, date: NaiveDate) -> Result<Option<SalaryStructure>> {
        let structure = sqlx::query_as::<_, SalaryStructure>(
            r#"
            SELECT
                *
            FROM
                salary_structures
            WHERE
                username = $1
                AND is_active
                AND effective_from <= $2
            ORDER BY
                effective_from DESC
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(structure)
    }

    /// The employee's latest active structure regardless of date.
    pub async fn latest_active(&self, username: &str) -> Result<Option<SalaryStructure>> {
        let structure = sqlx::query_as::<_, SalaryStructure>(
            r#"
            SELECT
                *
            FROM
                salary_structures
            WHERE
                username = $1
                AND is_active
            ORDER BY
                effective_from DESC
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(structure)
    }

    pub async fn list_for_user(&self, username: &str) -> Result<Vec<SalaryStructure>> {
        let structures = sqlx::query_as::<_, SalaryStructure>(
            r#"
            SELECT
                *
            FROM
                salary_structures
            WHERE
                username = $1
            ORDER BY
                effective_from DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(structures)
    }
}
