use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::database::models::GenerateSalaryInput;
use crate::handlers::shared::ApiResponse;
use crate::services::{Claims, PayrollService};

#[derive(Debug, Deserialize)]
pub struct SalaryQuery {
    pub username: Option<String>,
    pub month: String,
}

/// Fetch the computed payroll row for an employee-month. Employees can only
/// query their own.
pub async fn get_salary(
    claims: Claims,
    service: web::Data<PayrollService>,
    query: web::Query<SalaryQuery>,
) -> Result<HttpResponse> {
    let username = if claims.can_manage_payroll() {
        query
            .username
            .clone()
            .unwrap_or_else(|| claims.username.clone())
    } else {
        claims.username.clone()
    };

    match service.find_record(&username, &query.month).await? {
        Some(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(record))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "No salary record for that month",
        ))),
    }
}

/// Calculate-and-save for one employee-month (HR-side roles only).
pub async fn generate_salary(
    claims: Claims,
    service: web::Data<PayrollService>,
    input: web::Json<GenerateSalaryInput>,
) -> Result<HttpResponse> {
    if !claims.can_manage_payroll() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Insufficient permissions to generate salary",
        )));
    }

    let generated = service.generate(input.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(generated)))
}
