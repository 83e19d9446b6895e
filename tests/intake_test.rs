use async_trait::async_trait;
use cadastral_site::core::intake::{
    handle_intake, IntakeEvent, UnavailableMailer, ACCEPTED_MESSAGE, MAIL_NOT_CONFIGURED_ERROR, MISSING_FIELDS_ERROR,
};
use cadastral_site::domain::ports::{LeadEmail, Mailer};
use cadastral_site::SiteError;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<LeadEmail>>,
    fail_with: Option<String>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &LeadEmail) -> cadastral_site::Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(SiteError::MailError {
                message: message.clone(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

const SITE: &str = "Кадастровые услуги";

fn body(response_body: &str) -> serde_json::Value {
    serde_json::from_str(response_body).unwrap()
}

fn valid_lead() -> String {
    serde_json::json!({
        "name": "Сергей",
        "phone": "+79115550000",
        "email": "",
        "message": "Интересует вынос границ"
    })
    .to_string()
}

#[tokio::test]
async fn test_options_returns_cors_preflight() {
    let event = IntakeEvent {
        http_method: Some("OPTIONS".to_string()),
        ..Default::default()
    };

    let response = handle_intake::<RecordingMailer>(&event, None, SITE).await;

    assert_eq!(response.status_code, 200);
    assert!(response.body.is_empty());
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(response.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
    assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
    assert_eq!(response.headers["Access-Control-Max-Age"], "86400");
}

#[tokio::test]
async fn test_non_post_is_method_not_allowed() {
    let mailer = RecordingMailer::default();
    let response = handle_intake(&IntakeEvent::default(), Some(&mailer), SITE).await;

    assert_eq!(response.status_code, 405);
    assert_eq!(body(&response.body)["error"], "Method not allowed");
    assert_eq!(response.headers["Content-Type"], "application/json");
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_required_fields_is_bad_request() {
    let mailer = RecordingMailer::default();
    let event = IntakeEvent::post(r#"{"name": "Сергей", "phone": "", "message": "Вопрос"}"#);

    let response = handle_intake(&event, Some(&mailer), SITE).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response.body)["error"], MISSING_FIELDS_ERROR);
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_body_counts_as_missing_fields() {
    let event = IntakeEvent {
        http_method: Some("POST".to_string()),
        ..Default::default()
    };

    let response = handle_intake::<RecordingMailer>(&event, None, SITE).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response.body)["error"], MISSING_FIELDS_ERROR);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let response =
        handle_intake::<RecordingMailer>(&IntakeEvent::post("name=Сергей"), None, SITE).await;
    assert_eq!(response.status_code, 400);
}

#[tokio::test]
async fn test_unconfigured_mail_is_server_error() {
    let response =
        handle_intake::<RecordingMailer>(&IntakeEvent::post(valid_lead()), None, SITE).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body(&response.body)["error"], MAIL_NOT_CONFIGURED_ERROR);
}

#[tokio::test]
async fn test_delivery_failure_reports_reason() {
    let mailer = RecordingMailer {
        fail_with: Some("535 authentication failed".to_string()),
        ..Default::default()
    };

    let response = handle_intake(&IntakeEvent::post(valid_lead()), Some(&mailer), SITE).await;

    assert_eq!(response.status_code, 500);
    let error = body(&response.body)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Ошибка отправки: "));
    assert!(error.contains("535 authentication failed"));
}

#[tokio::test]
async fn test_valid_lead_is_mailed() {
    let mailer = RecordingMailer::default();

    let response = handle_intake(&IntakeEvent::post(valid_lead()), Some(&mailer), SITE).await;

    assert_eq!(response.status_code, 200);
    let json = body(&response.body);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], ACCEPTED_MESSAGE);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Новая заявка с сайта от Сергей");
    assert!(sent[0].html.contains("Интересует вынос границ"));
    assert!(sent[0].html.contains("Не указан"));
    assert!(sent[0].html.contains(SITE));
}

#[tokio::test]
async fn test_transport_setup_failure_is_delivery_error() {
    let mailer = UnavailableMailer {
        reason: "invalid mailbox for SMTP_FROM".to_string(),
    };

    let response = handle_intake(&IntakeEvent::post(valid_lead()), Some(&mailer), SITE).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        body(&response.body)["error"],
        "Ошибка отправки: Mail delivery failed: invalid mailbox for SMTP_FROM"
    );
}
