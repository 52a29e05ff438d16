use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{
        CalculationType, DeductionRecord, DeductionType, DeductionTypeInput, SalaryDeduction,
        SalaryDeductionInput,
    },
    utils::sql,
};

#[derive(Clone)]
pub struct DeductionRepository {
    pool: PgPool,
}

impl DeductionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_type(&self, input: DeductionTypeInput) -> Result<DeductionType> {
        let deduction_type = sqlx::query_as::<_, DeductionType>(&sql(r#"
            INSERT INTO
                deduction_types (
                    id,
                    deduction_code,
                    deduction_name,
                    calculation_type,
                    is_mandatory,
                    is_active,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?, TRUE, ?)
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(&input.deduction_code)
        .bind(&input.deduction_name)
        .bind(input.calculation_type)
        .bind(input.is_mandatory)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(deduction_type)
    }

    pub async fn find_type_by_code(&self, code: &str) -> Result<Option<DeductionType>> {
        let deduction_type = sqlx::query_as::<_, DeductionType>(
            "SELECT * FROM deduction_types WHERE deduction_code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deduction_type)
    }

    /// Fetch a catalog entry by code, lazily creating it the first time it is
    /// needed.
    pub async fn ensure_type(
        &self,
        code: &str,
        name: &str,
        calculation_type: CalculationType,
    ) -> Result<DeductionType> {
        if let Some(existing) = self.find_type_by_code(code).await? {
            return Ok(existing);
        }

        self.create_type(DeductionTypeInput {
            deduction_code: code.to_string(),
            deduction_name: name.to_string(),
            calculation_type,
            is_mandatory: false,
        })
        .await
    }

    pub async fn list_types(&self) -> Result<Vec<DeductionType>> {
        let types = sqlx::query_as::<_, DeductionType>(
            "SELECT * FROM deduction_types WHERE is_active ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    pub async fn create_deduction(
        &self,
        input: SalaryDeductionInput,
        created_by: &str,
    ) -> Result<SalaryDeduction> {
        let deduction = sqlx::query_as::<_, SalaryDeduction>(&sql(r#"
            INSERT INTO
                salary_deductions (
                    id,
                    username,
                    deduction_type_id,
                    amount,
                    percentage,
                    effective_from,
                    effective_to,
                    reason,
                    created_by,
                    is_active,
                    created_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?)
            RETURNING
                *
        "#))
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(input.deduction_type_id)
        .bind(input.amount)
        .bind(input.percentage)
        .bind(input.effective_from)
        .bind(input.effective_to)
        .bind(&input.reason)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(deduction)
    }

    /// An active deduction of the given type whose range covers `date`, if
    /// any. Used to suppress duplicate inserts for overlapping approvals.
    pub async fn active_covering(
        &self,
        username: &str,
        deduction_type_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<SalaryDeduction>> {
        let deduction = sqlx::query_as::<_, SalaryDeduction>(
            r#"
            SELECT
                *
            FROM
                salary_deductions
            WHERE
                username = $1
                AND deduction_type_id = $2
                AND is_active
                AND effective_from <= $3
                AND (effective_to IS NULL OR effective_to >= $3)
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(deduction_type_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deduction)
    }

    /// Active deduction records overlapping a month, joined with their
    /// catalog entries, in configuration order. The resolver preserves this
    /// order in its output.
    pub async fn records_for_period(
        &self,
        username: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Vec<DeductionRecord>> {
        let records = sqlx::query_as::<_, DeductionRecord>(
            r#"
            SELECT
                dt.deduction_code,
                dt.deduction_name,
                dt.calculation_type,
                sd.amount,
                sd.percentage
            FROM
                salary_deductions sd
                JOIN deduction_types dt ON dt.id = sd.deduction_type_id
            WHERE
                sd.username = $1
                AND sd.is_active
                AND dt.is_active
                AND sd.effective_from <= $3
                AND (sd.effective_to IS NULL OR sd.effective_to >= $2)
            ORDER BY
                sd.created_at
            "#,
        )
        .bind(username)
        .bind(period_start)
        .bind(period_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list_for_user(&self, username: &str) -> Result<Vec<SalaryDeduction>> {
        let deductions = sqlx::query_as::<_, SalaryDeduction>(
            r#"
            SELECT
                *
            FROM
                salary_deductions
            WHERE
                username = $1
            ORDER BY
                effective_from DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(deductions)
    }
}
