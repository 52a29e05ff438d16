use actix_web::{web, HttpResponse, Result};

use crate::database::models::{CreateUserInput, LoginInput, UserInfo};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::Claims;
use crate::AppState;

pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<CreateUserInput>,
) -> Result<HttpResponse> {
    match state.auth_service.register(input.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(ApiResponse::success(response))),
        Err(err) => {
            log::error!("Error registering user: {}", err);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(&err.to_string())))
        }
    }
}

pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    match state.auth_service.login(input.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(err) => {
            log::error!("Login failed: {}", err);
            Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::<()>::error("Invalid username or password")))
        }
    }
}

pub async fn me(claims: Claims, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = state
        .auth_service
        .find_user(claims.sub)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserInfo::from(user))))
}
