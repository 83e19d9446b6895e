use crate::config::lambda::IntakeConfig;
use crate::domain::ports::{LeadEmail, Mailer};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Delivers lead emails through an SMTP relay with STARTTLS and login.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &IntakeConfig) -> Result<Self> {
        let from = parse_mailbox("SMTP_FROM", config.sender())?;
        let to = parse_mailbox("EMAIL_TO", &config.email_to)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| SiteError::ConfigError {
                message: format!("SMTP relay {} rejected: {}", config.smtp_host, e),
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

fn parse_mailbox(field: &str, value: &str) -> Result<Mailbox> {
    value
        .parse()
        .map_err(|e: lettre::address::AddressError| SiteError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &LeadEmail) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone())
            .map_err(|e| SiteError::MailError {
                message: e.to_string(),
            })?;

        tracing::debug!(to = %self.to, "sending lead email");
        self.transport
            .send(message)
            .await
            .map_err(|e| SiteError::MailError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}
