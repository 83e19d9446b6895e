//! Contact-form intake function: validates a posted lead and mails it to the office.

use crate::domain::model::LeadRequest;
use crate::domain::ports::{LeadEmail, Mailer};
use crate::utils::error::{Result, SiteError};
use crate::utils::format::escape_html;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MISSING_FIELDS_ERROR: &str = "Заполните все обязательные поля";
pub const MAIL_NOT_CONFIGURED_ERROR: &str = "Настройки email не заданы";
pub const MALFORMED_BODY_ERROR: &str = "Некорректный формат заявки";
pub const ACCEPTED_MESSAGE: &str = "Заявка успешно отправлена";

/// Stands in for a mailer whose transport could not be set up; every send fails with the reason.
#[derive(Debug, Clone)]
pub struct UnavailableMailer {
    pub reason: String,
}

#[async_trait]
impl Mailer for UnavailableMailer {
    async fn send(&self, _email: &LeadEmail) -> Result<()> {
        Err(SiteError::MailError {
            message: self.reason.clone(),
        })
    }
}

/// Serverless HTTP event as delivered by the function runtime.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl IntakeEvent {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            http_method: Some("POST".to_string()),
            body: Some(body.into()),
            headers: BTreeMap::new(),
        }
    }

    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or("GET")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl IntakeResponse {
    fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "POST, OPTIONS".to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type".to_string(),
            ),
            ("Access-Control-Max-Age".to_string(), "86400".to_string()),
        ]);

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    fn json(status_code: u16, body: serde_json::Value) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);

        Self {
            status_code,
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, serde_json::json!({ "error": message.into() }))
    }
}

pub fn compose_lead_email(lead: &LeadRequest, site_name: &str, received_at: DateTime<Utc>) -> LeadEmail {
    let name = escape_html(lead.name.trim());
    let phone = escape_html(lead.phone.trim());
    let email = lead
        .email()
        .map(escape_html)
        .unwrap_or_else(|| "Не указан".to_string());
    let message = escape_html(&lead.message);

    let html = format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; border-radius: 8px;">
      <h2 style="color: #2C5282; border-bottom: 2px solid #2C5282; padding-bottom: 10px;">Новая заявка с сайта</h2>
      <div style="margin: 20px 0;">
        <p style="margin: 10px 0;"><strong>Имя:</strong> {name}</p>
        <p style="margin: 10px 0;"><strong>Телефон:</strong> <a href="tel:{phone}">{phone}</a></p>
        <p style="margin: 10px 0;"><strong>Email:</strong> {email}</p>
      </div>
      <div style="margin: 20px 0; padding: 15px; background-color: #f5f5f5; border-radius: 5px;">
        <strong>Сообщение:</strong>
        <p style="margin: 10px 0; white-space: pre-wrap;">{message}</p>
      </div>
      <p style="margin-top: 30px; font-size: 12px; color: #666; border-top: 1px solid #ddd; padding-top: 10px;">
        Письмо отправлено автоматически с сайта "{site}" {received}
      </p>
    </div>
  </body>
</html>
"#,
        site = escape_html(site_name),
        received = received_at.format("%d.%m.%Y %H:%M UTC"),
    );

    LeadEmail {
        subject: format!("Новая заявка с сайта от {}", lead.name.trim()),
        html,
    }
}

/// Runs one intake request. `mailer` is `None` when the SMTP settings are absent.
pub async fn handle_intake<M: Mailer + ?Sized>(
    event: &IntakeEvent,
    mailer: Option<&M>,
    site_name: &str,
) -> IntakeResponse {
    match event.method() {
        "OPTIONS" => return IntakeResponse::preflight(),
        "POST" => {}
        other => {
            tracing::warn!(method = other, "rejecting non-POST intake request");
            return IntakeResponse::error(405, "Method not allowed");
        }
    }

    let raw_body = event.body.as_deref().filter(|b| !b.trim().is_empty()).unwrap_or("{}");
    let lead: LeadRequest = match serde_json::from_str(raw_body) {
        Ok(lead) => lead,
        Err(e) => {
            tracing::warn!(error = %e, "intake body is not a lead object");
            return IntakeResponse::error(400, MALFORMED_BODY_ERROR);
        }
    };

    if let Some(field) = lead.first_missing_field() {
        tracing::info!(field, "intake lead missing required field");
        return IntakeResponse::error(400, MISSING_FIELDS_ERROR);
    }

    let Some(mailer) = mailer else {
        tracing::error!("mail settings are not configured");
        return IntakeResponse::error(500, MAIL_NOT_CONFIGURED_ERROR);
    };

    let email = compose_lead_email(&lead, site_name, Utc::now());
    match mailer.send(&email).await {
        Ok(()) => {
            tracing::info!(subject = %email.subject, "lead email sent");
            IntakeResponse::json(
                200,
                serde_json::json!({ "success": true, "message": ACCEPTED_MESSAGE }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "lead email delivery failed");
            IntakeResponse::error(500, format!("Ошибка отправки: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lead() -> LeadRequest {
        LeadRequest {
            name: "Пётр <script>".to_string(),
            phone: "+79118449565".to_string(),
            email: String::new(),
            message: "Строка 1\nСтрока 2".to_string(),
        }
    }

    #[test]
    fn test_compose_lead_email_escapes_and_defaults_email() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let email = compose_lead_email(&lead(), "Кадастровые услуги", at);

        assert_eq!(email.subject, "Новая заявка с сайта от Пётр <script>");
        assert!(email.html.contains("Пётр &lt;script&gt;"));
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains(r#"<a href="tel:+79118449565">"#));
        assert!(email.html.contains("<strong>Email:</strong> Не указан"));
        assert!(email.html.contains("14.03.2025 09:30 UTC"));
    }

    #[test]
    fn test_missing_method_defaults_to_get() {
        assert_eq!(IntakeEvent::default().method(), "GET");
    }

    #[test]
    fn test_event_deserializes_runtime_shape() {
        let event: IntakeEvent = serde_json::from_value(serde_json::json!({
            "httpMethod": "POST",
            "body": "{\"name\":\"a\"}",
            "headers": {"Content-Type": "application/json"},
            "requestContext": {"requestId": "abc"}
        }))
        .unwrap();
        assert_eq!(event.method(), "POST");
        assert_eq!(event.body.as_deref(), Some("{\"name\":\"a\"}"));
    }

    #[test]
    fn test_response_serializes_runtime_shape() {
        let json = serde_json::to_value(IntakeResponse::error(405, "Method not allowed")).unwrap();
        assert_eq!(json["statusCode"], 405);
        assert_eq!(json["isBase64Encoded"], false);
        assert_eq!(json["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(json["body"], r#"{"error":"Method not allowed"}"#);
    }
}
