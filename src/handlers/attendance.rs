use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::database::models::AttendanceInput;
use crate::database::repositories::AttendanceRepository;
use crate::handlers::shared::ApiResponse;
use crate::services::payroll::month_bounds;
use crate::services::Claims;

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub month: String,
}

/// Mark a day worked. Employees record their own days; HR may record for
/// anyone.
pub async fn record_attendance(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    input: web::Json<AttendanceInput>,
) -> Result<HttpResponse> {
    let mut attendance_input = input.into_inner();

    if !claims.can_manage_payroll() {
        attendance_input.username = claims.username.clone();
    }

    match repo
        .record(&attendance_input.username, attendance_input.work_date)
        .await
    {
        Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(record))),
        Err(err) => {
            log::error!("Error recording attendance: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to record attendance")))
        }
    }
}

/// Monthly summary: present-day count plus the worked dates.
pub async fn get_attendance_summary(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    path: web::Path<String>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse> {
    let username = path.into_inner();

    if !claims.can_manage_payroll() && username != claims.username {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Cannot view another employee's attendance",
        )));
    }

    let (month_start, month_end) = month_bounds(&query.month)?;

    match repo.monthly_summary(&username, month_start, month_end).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(err) => {
            log::error!("Error fetching attendance summary: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch attendance summary")))
        }
    }
}
