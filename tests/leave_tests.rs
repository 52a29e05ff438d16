use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;

use paylinkr::database::models::EmployeeRole;
use paylinkr::database::repositories::{
    DeductionRepository, LeavePolicyRepository, LeaveRepository, SalaryStructureRepository,
    UserRepository,
};
use paylinkr::handlers::leave;
use paylinkr::services::{LeaveService, NotificationService};
use paylinkr::AppState;

mod common;

macro_rules! leave_test_app {
    ($ctx:expr) => {{
        let app_state = web::Data::new(AppState {
            auth_service: $ctx.auth_service.clone(),
        });
        let leave_service = LeaveService::new(
            LeaveRepository::new($ctx.pool.clone()),
            LeavePolicyRepository::new($ctx.pool.clone()),
            SalaryStructureRepository::new($ctx.pool.clone()),
            DeductionRepository::new($ctx.pool.clone()),
            UserRepository::new($ctx.pool.clone()),
            NotificationService::new($ctx.config.email.clone()),
        );
        let leave_service_data = web::Data::new(leave_service);
        let leave_repo_data = web::Data::new(LeaveRepository::new($ctx.pool.clone()));
        let config_data = web::Data::new($ctx.config.clone());

        test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(leave_service_data)
                .app_data(leave_repo_data)
                .app_data(config_data)
                .service(
                    web::scope("/api/v1").service(
                        web::scope("/leaves")
                            .route("", web::post().to(leave::create_leave))
                            .route("", web::get().to(leave::get_leaves))
                            .route("/{id}", web::get().to(leave::get_leave))
                            .route("/{id}", web::delete().to(leave::delete_leave))
                            .route("/{id}/approve", web::post().to(leave::approve_leave))
                            .route("/{id}/reject", web::post().to(leave::reject_leave)),
                    ),
                ),
        )
        .await
    }};
}

#[actix_web::test]
#[serial]
async fn test_create_leave_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/leaves")
        .set_json(&json!({
            "username": "asha",
            "leaveType": "casual",
            "fromDate": "2024-06-03",
            "toDate": "2024-06-05"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_get_leaves_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/leaves").to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_get_leave_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/leaves/7e57d004-2b97-0e7a-b45f-5387367791cd")
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_delete_leave_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::delete()
        .uri("/api/v1/leaves/7e57d004-2b97-0e7a-b45f-5387367791cd")
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_approve_leave_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/leaves/7e57d004-2b97-0e7a-b45f-5387367791cd/approve")
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_reject_leave_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/leaves/7e57d004-2b97-0e7a-b45f-5387367791cd/reject")
        .set_json(&json!({ "reason": "Coverage gap" }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_approve_leave_forbidden_for_employee() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let token = common::AuthHelper::create_test_token("asha", EmployeeRole::Employee, &ctx.config);
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/leaves/7e57d004-2b97-0e7a-b45f-5387367791cd/approve")
        .insert_header(common::AuthHelper::auth_header(&token))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
#[serial]
async fn test_reject_leave_forbidden_for_employee() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let token = common::AuthHelper::create_test_token("asha", EmployeeRole::Employee, &ctx.config);
    let app = leave_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/leaves/7e57d004-2b97-0e7a-b45f-5387367791cd/reject")
        .insert_header(common::AuthHelper::auth_header(&token))
        .set_json(&json!({ "reason": "Coverage gap" }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
