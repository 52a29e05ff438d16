//! Best-effort email notifications. Failures here are the caller's problem
//! to log and swallow; nothing in this module retries or blocks the primary
//! operation that triggered the send.

use anyhow::{anyhow, Result};

use crate::config::EmailConfig;
use crate::database::models::{LeaveApplication, LeaveStatus};

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone)]
pub struct NotificationService {
    config: EmailConfig,
}

impl NotificationService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub async fn send(&self, message: EmailMessage) -> Result<()> {
        if !self.config.enabled {
            log::debug!(
                "Email disabled, skipping send to {} ({})",
                message.to,
                message.subject
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(&message),
            "sendgrid" => self.send_sendgrid(&message).await,
            provider => Err(anyhow!("Unknown email provider: {}", provider)),
        }
    }

    /// Notify an employee that their leave application was decided.
    pub async fn send_leave_decision(
        &self,
        recipient_email: &str,
        application: &LeaveApplication,
    ) -> Result<()> {
        let decision = match application.status {
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Pending => return Ok(()),
        };

        let mut body = format!(
            "Your {} leave request for {} to {} ({} day(s)) has been {}.",
            application.leave_type,
            application.from_date,
            application.to_date,
            application.total_days,
            decision,
        );

        if let Some(reason) = &application.rejection_reason {
            body.push_str(&format!("\n\nReason: {}", reason));
        }

        self.send(EmailMessage {
            to: recipient_email.to_string(),
            subject: format!("Leave request {}", decision),
            body,
        })
        .await
    }

    fn send_console(&self, message: &EmailMessage) -> Result<()> {
        log::info!(
            "Email (console provider) to={} subject={:?} body={:?}",
            message.to,
            message.subject,
            message.body
        );
        Ok(())
    }

    async fn send_sendgrid(&self, message: &EmailMessage) -> Result<()> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(anyhow!("SendGrid API key not configured"));
        }

        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.body }]
        });

        let response = reqwest::Client::new()
            .post("https://api.sendgrid.com/v3/mail/send")
            .header(
                "Authorization",
                format!("Bearer {}", self.config.sendgrid_api_key),
            )
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Email sent to {} via SendGrid", message.to);
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            Err(anyhow!("SendGrid returned {}: {}", status, error_body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(enabled: bool) -> EmailConfig {
        EmailConfig {
            enabled,
            provider: "console".to_string(),
            sendgrid_api_key: String::new(),
            sender_email: "no-reply@test.local".to_string(),
            sender_name: "Test".to_string(),
        }
    }

    #[actix_web::test]
    async fn disabled_service_silently_succeeds() {
        let service = NotificationService::new(test_config(false));
        let result = service
            .send(EmailMessage {
                to: "asha@example.com".to_string(),
                subject: "Test".to_string(),
                body: "Test".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn console_provider_succeeds() {
        let service = NotificationService::new(test_config(true));
        let result = service
            .send(EmailMessage {
                to: "asha@example.com".to_string(),
                subject: "Test".to_string(),
                body: "Test".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn unknown_provider_errors() {
        let mut config = test_config(true);
        config.provider = "carrier-pigeon".to_string();
        let service = NotificationService::new(config);
        let result = service
            .send(EmailMessage {
                to: "asha@example.com".to_string(),
                subject: "Test".to_string(),
                body: "Test".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
