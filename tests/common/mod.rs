use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;
use uuid::Uuid;

use paylinkr::config::{Config, EmailConfig};
use paylinkr::database::models::{EmployeeRole, LeaveApplicationInput, LeaveType};
use paylinkr::services::{AuthService, Claims};
use paylinkr::database::repositories::UserRepository;

/// Shared fixture for handler tests. The pool is created lazily: requests
/// that are rejected before any query (missing token, role gate) never
/// touch a live database.
#[allow(dead_code)]
pub struct TestContext {
    pub pool: PgPool,
    pub config: Config,
    pub auth_service: AuthService,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let config = Config {
            database_url: env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| "postgres://@localhost:5432/paylinkr_test".to_string()),
            jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
            jwt_expiration_days: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            email: EmailConfig {
                enabled: false,
                provider: "console".to_string(),
                sendgrid_api_key: String::new(),
                sender_email: "no-reply@test.local".to_string(),
                sender_name: "PayLinkr Test".to_string(),
            },
        };

        let pool = PgPoolOptions::new().connect_lazy(&config.database_url)?;

        let auth_service = AuthService::new(UserRepository::new(pool.clone()), config.clone());

        Ok(TestContext {
            pool,
            config,
            auth_service,
        })
    }
}

// Mock data generators
#[allow(dead_code)]
pub struct MockData;

#[allow(dead_code)]
impl MockData {
    pub fn leave_application(username: &str) -> LeaveApplicationInput {
        LeaveApplicationInput {
            username: username.to_string(),
            leave_type: LeaveType::Casual,
            from_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        }
    }
}

// Authentication helpers
#[allow(dead_code)]
pub struct AuthHelper;

#[allow(dead_code)]
impl AuthHelper {
    pub fn create_test_token(username: &str, role: EmployeeRole, config: &Config) -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: username.to_string(),
            role,
            exp: (Utc::now() + Duration::days(config.jwt_expiration_days)).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .expect("Failed to encode test token")
    }

    pub fn auth_header(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}
