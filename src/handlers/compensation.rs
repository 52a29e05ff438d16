//! Compensation configuration: salary structures, the deduction catalog,
//! per-employee deductions and leave policies.

use actix_web::{web, HttpResponse, Result};

use crate::database::models::{
    DeductionTypeInput, LeavePolicyInput, SalaryDeductionInput, SalaryStructureInput,
};
use crate::database::repositories::{
    DeductionRepository, LeavePolicyRepository, SalaryStructureRepository,
};
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;

fn require_hr(claims: &Claims) -> Option<HttpResponse> {
    if claims.can_manage_payroll() {
        None
    } else {
        Some(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Insufficient permissions for compensation management",
        )))
    }
}

/// Create a salary structure, superseding the employee's current one.
pub async fn create_structure(
    claims: Claims,
    repo: web::Data<SalaryStructureRepository>,
    input: web::Json<SalaryStructureInput>,
) -> Result<HttpResponse> {
    if let Some(forbidden) = require_hr(&claims) {
        return Ok(forbidden);
    }

    match repo.create(input.into_inner()).await {
        Ok(structure) => Ok(HttpResponse::Created().json(ApiResponse::success(structure))),
        Err(err) => {
            log::error!("Error creating salary structure: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create salary structure")))
        }
    }
}

/// Structure history for an employee. HR sees anyone; employees see their
/// own.
pub async fn get_structures(
    claims: Claims,
    repo: web::Data<SalaryStructureRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();

    if !claims.can_manage_payroll() && username != claims.username {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Cannot view another employee's salary structures",
        )));
    }

    match repo.list_for_user(&username).await {
        Ok(structures) => Ok(HttpResponse::Ok().json(ApiResponse::success(structures))),
        Err(err) => {
            log::error!("Error fetching salary structures: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch salary structures")))
        }
    }
}

pub async fn create_deduction_type(
    claims: Claims,
    repo: web::Data<DeductionRepository>,
    input: web::Json<DeductionTypeInput>,
) -> Result<HttpResponse> {
    if let Some(forbidden) = require_hr(&claims) {
        return Ok(forbidden);
    }

    match repo.create_type(input.into_inner()).await {
        Ok(deduction_type) => Ok(HttpResponse::Created().json(ApiResponse::success(deduction_type))),
        Err(err) => {
            log::error!("Error creating deduction type: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create deduction type")))
        }
    }
}

pub async fn list_deduction_types(
    _claims: Claims,
    repo: web::Data<DeductionRepository>,
) -> Result<HttpResponse> {
    match repo.list_types().await {
        Ok(types) => Ok(HttpResponse::Ok().json(ApiResponse::success(types))),
        Err(err) => {
            log::error!("Error fetching deduction types: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch deduction types")))
        }
    }
}

pub async fn create_deduction(
    claims: Claims,
    repo: web::Data<DeductionRepository>,
    input: web::Json<SalaryDeductionInput>,
) -> Result<HttpResponse> {
    if let Some(forbidden) = require_hr(&claims) {
        return Ok(forbidden);
    }

    match repo.create_deduction(input.into_inner(), &claims.username).await {
        Ok(deduction) => Ok(HttpResponse::Created().json(ApiResponse::success(deduction))),
        Err(err) => {
            log::error!("Error creating salary deduction: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create salary deduction")))
        }
    }
}

pub async fn get_deductions(
    claims: Claims,
    repo: web::Data<DeductionRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();

    if !claims.can_manage_payroll() && username != claims.username {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Cannot view another employee's deductions",
        )));
    }

    match repo.list_for_user(&username).await {
        Ok(deductions) => Ok(HttpResponse::Ok().json(ApiResponse::success(deductions))),
        Err(err) => {
            log::error!("Error fetching salary deductions: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch salary deductions")))
        }
    }
}

pub async fn upsert_leave_policy(
    claims: Claims,
    repo: web::Data<LeavePolicyRepository>,
    input: web::Json<LeavePolicyInput>,
) -> Result<HttpResponse> {
    if let Some(forbidden) = require_hr(&claims) {
        return Ok(forbidden);
    }

    match repo.upsert(input.into_inner()).await {
        Ok(policy) => Ok(HttpResponse::Ok().json(ApiResponse::success(policy))),
        Err(err) => {
            log::error!("Error upserting leave policy: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to save leave policy")))
        }
    }
}

pub async fn get_leave_policies(
    claims: Claims,
    repo: web::Data<LeavePolicyRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();

    if !claims.can_manage_payroll() && username != claims.username {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "Cannot view another employee's leave policies",
        )));
    }

    match repo.list_for_user(&username).await {
        Ok(policies) => Ok(HttpResponse::Ok().json(ApiResponse::success(policies))),
        Err(err) => {
            log::error!("Error fetching leave policies: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch leave policies")))
        }
    }
}
