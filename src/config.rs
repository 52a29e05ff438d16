use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_days: i64,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub email: EmailConfig,
}

/// Settings for the best-effort notification sender. `console` logs instead
/// of sending, which is the development default.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub enabled: bool,
    pub provider: String,
    pub sendgrid_api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://@localhost:5432/paylinkr".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                "your-super-secret-jwt-key-change-this-in-production-12345".to_string()
            }),
            jwt_expiration_days: env::var("JWT_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            email: EmailConfig {
                enabled: env::var("EMAIL_ENABLED")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
                provider: env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "console".to_string()),
                sendgrid_api_key: env::var("SENDGRID_API_KEY").unwrap_or_default(),
                sender_email: env::var("EMAIL_SENDER")
                    .unwrap_or_else(|_| "no-reply@paylinkr.local".to_string()),
                sender_name: env::var("EMAIL_SENDER_NAME")
                    .unwrap_or_else(|_| "PayLinkr".to_string()),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
