use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;

use paylinkr::database::models::EmployeeRole;
use paylinkr::database::repositories::{
    AttendanceRepository, DeductionRepository, SalaryRecordRepository, SalaryStructureRepository,
};
use paylinkr::handlers::{compensation, salary};
use paylinkr::services::PayrollService;
use paylinkr::AppState;

mod common;

macro_rules! salary_test_app {
    ($ctx:expr) => {{
        let app_state = web::Data::new(AppState {
            auth_service: $ctx.auth_service.clone(),
        });
        let payroll_service = PayrollService::new(
            AttendanceRepository::new($ctx.pool.clone()),
            SalaryStructureRepository::new($ctx.pool.clone()),
            DeductionRepository::new($ctx.pool.clone()),
            SalaryRecordRepository::new($ctx.pool.clone()),
        );
        let payroll_service_data = web::Data::new(payroll_service);
        let structure_repo_data = web::Data::new(SalaryStructureRepository::new($ctx.pool.clone()));
        let config_data = web::Data::new($ctx.config.clone());

        test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(payroll_service_data)
                .app_data(structure_repo_data)
                .app_data(config_data)
                .service(
                    web::scope("/api/v1")
                        .service(
                            web::scope("/salary")
                                .route("", web::get().to(salary::get_salary))
                                .route("/generate", web::post().to(salary::generate_salary)),
                        )
                        .service(
                            web::scope("/salary-structures")
                                .route("", web::post().to(compensation::create_structure))
                                .route(
                                    "/{username}",
                                    web::get().to(compensation::get_structures),
                                ),
                        ),
                ),
        )
        .await
    }};
}

#[actix_web::test]
#[serial]
async fn test_get_salary_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = salary_test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/salary?month=2024-06")
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_generate_salary_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = salary_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/salary/generate")
        .set_json(&json!({
            "username": "asha",
            "month": "2024-06"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_generate_salary_forbidden_for_employee() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let token = common::AuthHelper::create_test_token("asha", EmployeeRole::Employee, &ctx.config);
    let app = salary_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/salary/generate")
        .insert_header(common::AuthHelper::auth_header(&token))
        .set_json(&json!({
            "username": "asha",
            "month": "2024-06"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
#[serial]
async fn test_create_structure_unauthorized() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = salary_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/salary-structures")
        .set_json(&json!({
            "username": "asha",
            "basicSalary": 30000.0,
            "hra": 12000.0,
            "effectiveFrom": "2024-01-01"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_create_structure_forbidden_for_employee() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let token = common::AuthHelper::create_test_token("asha", EmployeeRole::Employee, &ctx.config);
    let app = salary_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/salary-structures")
        .insert_header(common::AuthHelper::auth_header(&token))
        .set_json(&json!({
            "username": "asha",
            "basicSalary": 30000.0,
            "hra": 12000.0,
            "effectiveFrom": "2024-01-01"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
#[serial]
async fn test_get_structures_forbidden_for_other_employee() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let token = common::AuthHelper::create_test_token("asha", EmployeeRole::Employee, &ctx.config);
    let app = salary_test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/salary-structures/ravi")
        .insert_header(common::AuthHelper::auth_header(&token))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
