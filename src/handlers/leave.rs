use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{LeaveApplicationInput, LeaveStatus};
use crate::database::repositories::LeaveRepository;
use crate::handlers::shared::ApiResponse;
use crate::services::{Claims, LeaveService};

#[derive(Debug, Deserialize)]
pub struct LeaveQuery {
    pub username: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectionRequest {
    pub reason: Option<String>,
}

/// File a new leave application. Employees can only file for themselves;
/// HR-side roles may file on behalf of anyone.
pub async fn create_leave(
    claims: Claims,
    service: web::Data<LeaveService>,
    input: web::Json<LeaveApplicationInput>,
) -> Result<HttpResponse> {
    let mut application_input = input.into_inner();

    if !claims.can_manage_payroll() {
        application_input.username = claims.username.clone();
    }

    let application = service.create_application(application_input).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(application)))
}

/// List leave applications. Employees see only their own.
pub async fn get_leaves(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    query: web::Query<LeaveQuery>,
) -> Result<HttpResponse> {
    let username = if claims.can_manage_payroll() {
        query.username.as_deref()
    } else {
        Some(claims.username.as_str())
    };

    let status_filter = if let Some(status_str) = &query.status {
        match status_str.parse::<LeaveStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return Ok(
                    HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid status"))
                )
            }
        }
    } else {
        None
    };

    match repo.list(username, status_filter).await {
        Ok(applications) => Ok(HttpResponse::Ok().json(ApiResponse::success(applications))),
        Err(err) => {
            log::error!("Error fetching leave applications: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch leave applications")))
        }
    }
}

pub async fn get_leave(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match repo.get_by_id(id).await {
        Ok(Some(application)) => {
            if !claims.can_manage_payroll() && application.username != claims.username {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
                    "Cannot view another employee's leave application",
                )));
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(application)))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Leave application not found"))),
        Err(err) => {
            log::error!("Error fetching leave application: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch leave application")))
        }
    }
}

/// Approve a pending application (HR-side roles only). Unpaid leave
/// approval also prices the leave into a salary deduction, best-effort.
pub async fn approve_leave(
    claims: Claims,
    service: web::Data<LeaveService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if !claims.can_manage_payroll() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Insufficient permissions to approve leave",
        )));
    }

    let application = service.approve(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(application)))
}

/// Reject a pending application (HR-side roles only).
pub async fn reject_leave(
    claims: Claims,
    service: web::Data<LeaveService>,
    path: web::Path<Uuid>,
    rejection: web::Json<RejectionRequest>,
) -> Result<HttpResponse> {
    if !claims.can_manage_payroll() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Insufficient permissions to reject leave",
        )));
    }

    let application = service
        .reject(path.into_inner(), rejection.into_inner().reason)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(application)))
}

/// Withdraw an application: only the owner, and only while pending.
pub async fn delete_leave(
    claims: Claims,
    service: web::Data<LeaveService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    service.delete(path.into_inner(), &claims.username).await?;

    Ok(HttpResponse::NoContent().finish())
}
