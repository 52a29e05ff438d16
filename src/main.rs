use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use paylinkr::database::{
    init_database,
    repositories::{
        AttendanceRepository, DeductionRepository, LeavePolicyRepository, LeaveRepository,
        SalaryRecordRepository, SalaryStructureRepository, UserRepository,
    },
};
use paylinkr::handlers::{attendance, auth, compensation, leave, salary};
use paylinkr::middleware::RequestIdMiddleware;
use paylinkr::services::{LeaveService, NotificationService, PayrollService};
use paylinkr::{AppState, AuthService, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("PayLinkr API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting PayLinkr API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let structure_repository = SalaryStructureRepository::new(pool.clone());
    let deduction_repository = DeductionRepository::new(pool.clone());
    let leave_repository = LeaveRepository::new(pool.clone());
    let leave_policy_repository = LeavePolicyRepository::new(pool.clone());
    let salary_record_repository = SalaryRecordRepository::new(pool.clone());
    let attendance_repository = AttendanceRepository::new(pool.clone());

    // Initialize services
    let auth_service = AuthService::new(user_repository.clone(), config.clone());
    let notification_service = NotificationService::new(config.email.clone());
    let leave_service = LeaveService::new(
        leave_repository.clone(),
        leave_policy_repository.clone(),
        structure_repository.clone(),
        deduction_repository.clone(),
        user_repository.clone(),
        notification_service.clone(),
    );
    let payroll_service = PayrollService::new(
        attendance_repository.clone(),
        structure_repository.clone(),
        deduction_repository.clone(),
        salary_record_repository.clone(),
    );

    let app_state = web::Data::new(AppState { auth_service });
    let structure_repo_data = web::Data::new(structure_repository);
    let deduction_repo_data = web::Data::new(deduction_repository);
    let leave_repo_data = web::Data::new(leave_repository);
    let leave_policy_repo_data = web::Data::new(leave_policy_repository);
    let attendance_repo_data = web::Data::new(attendance_repository);
    let leave_service_data = web::Data::new(leave_service);
    let payroll_service_data = web::Data::new(payroll_service);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(structure_repo_data.clone())
            .app_data(deduction_repo_data.clone())
            .app_data(leave_repo_data.clone())
            .app_data(leave_policy_repo_data.clone())
            .app_data(attendance_repo_data.clone())
            .app_data(leave_service_data.clone())
            .app_data(payroll_service_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Request-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T request_id=%{x-request-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/leaves")
                            .route("", web::post().to(leave::create_leave))
                            .route("", web::get().to(leave::get_leaves))
                            .route("/{id}", web::get().to(leave::get_leave))
                            .route("/{id}", web::delete().to(leave::delete_leave))
                            .route("/{id}/approve", web::post().to(leave::approve_leave))
                            .route("/{id}/reject", web::post().to(leave::reject_leave)),
                    )
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
                    )
                    .service(
                        web::scope("/deduction-types")
                            .route("", web::post().to(compensation::create_deduction_type))
                            .route("", web::get().to(compensation::list_deduction_types)),
                    )
                    .service(
                        web::scope("/deductions")
                            .route("", web::post().to(compensation::create_deduction))
                            .route("/{username}", web::get().to(compensation::get_deductions)),
                    )
                    .service(
                        web::scope("/leave-policies")
                            .route("", web::post().to(compensation::upsert_leave_policy))
                            .route(
                                "/{username}",
                                web::get().to(compensation::get_leave_policies),
                            ),
                    )
                    .service(
                        web::scope("/attendance")
                            .route("", web::post().to(attendance::record_attendance))
                            .route(
                                "/{username}",
                                web::get().to(attendance::get_attendance_summary),
                            ),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
