use pretty_assertions::assert_eq;

use paylinkr::config::{Config, EmailConfig};

fn base_config() -> Config {
    Config {
        database_url: "postgres://@localhost:5432/paylinkr".to_string(),
        jwt_secret: "secret".to_string(),
        jwt_expiration_days: 30,
        host: "127.0.0.1".to_string(),
        port: 8080,
        environment: "development".to_string(),
        email: EmailConfig {
            enabled: false,
            provider: "console".to_string(),
            sendgrid_api_key: String::new(),
            sender_email: "no-reply@paylinkr.local".to_string(),
            sender_name: "PayLinkr".to_string(),
        },
    }
}

#[test]
fn server_address_joins_host_and_port() {
    let config = base_config();
    assert_eq!(config.server_address(), "127.0.0.1:8080");
}

#[test]
fn development_is_not_production() {
    let config = base_config();
    assert!(!config.is_production());
}

#[test]
fn production_flag_matches_environment() {
    let mut config = base_config();
    config.environment = "production".to_string();
    assert!(config.is_production());
}
