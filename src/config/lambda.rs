use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_range, validate_required_field, Validate,
};
use std::env;

/// SMTP settings of the intake function, read from the environment on every invocation.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Login name for the relay; not necessarily a mailbox (e.g. `apikey`).
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_from: Option<String>,
    pub email_to: String,
    pub site_name: String,
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp_port = match get("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SiteError::InvalidConfigValueError {
                    field: "SMTP_PORT".to_string(),
                    value: raw.clone(),
                    reason: "Port must be a number between 1 and 65535".to_string(),
                })?,
            None => 587,
        };

        Ok(Self {
            smtp_host: validate_required_field("SMTP_HOST", &get("SMTP_HOST"))?.clone(),
            smtp_port,
            smtp_user: validate_required_field("SMTP_USER", &get("SMTP_USER"))?.clone(),
            smtp_password: validate_required_field("SMTP_PASSWORD", &get("SMTP_PASSWORD"))?
                .clone(),
            smtp_from: get("SMTP_FROM"),
            email_to: validate_required_field("EMAIL_TO", &get("EMAIL_TO"))?.clone(),
            site_name: get("SITE_NAME").unwrap_or_else(|| "Кадастровые услуги".to_string()),
        })
    }

    /// From address: `SMTP_FROM`, else the login when it is a mailbox, else the recipient.
    pub fn sender(&self) -> &str {
        match &self.smtp_from {
            Some(from) => from,
            None if validate_email("SMTP_USER", &self.smtp_user).is_ok() => &self.smtp_user,
            None => &self.email_to,
        }
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("SMTP_HOST", &self.smtp_host)?;
        validate_range("SMTP_PORT", self.smtp_port, 1, u16::MAX)?;
        validate_non_empty_string("SMTP_USER", &self.smtp_user)?;
        validate_non_empty_string("EMAIL_TO", &self.email_to)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const FULL: &[(&str, &str)] = &[
        ("SMTP_HOST", "smtp.example.ru"),
        ("SMTP_USER", "robot@example.ru"),
        ("SMTP_PASSWORD", "secret"),
        ("EMAIL_TO", "office@example.ru"),
    ];

    #[test]
    fn test_defaults_port_to_submission() {
        let config = IntakeConfig::from_lookup(lookup(FULL)).unwrap();
        assert_eq!(config.smtp_port, 587);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_host_is_reported() {
        let vars: Vec<_> = FULL.iter().copied().filter(|(k, _)| *k != "SMTP_HOST").collect();
        let err = IntakeConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, SiteError::MissingConfigError { ref field } if field == "SMTP_HOST"));
    }

    #[test]
    fn test_blank_password_counts_as_missing() {
        let mut vars = FULL.to_vec();
        vars.retain(|(k, _)| *k != "SMTP_PASSWORD");
        vars.push(("SMTP_PASSWORD", "  "));
        assert!(IntakeConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = FULL.to_vec();
        vars.push(("SMTP_PORT", "smtp"));
        assert!(matches!(
            IntakeConfig::from_lookup(lookup(&vars)),
            Err(SiteError::InvalidConfigValueError { .. })
        ));

        vars.pop();
        vars.push(("SMTP_PORT", "465"));
        assert_eq!(IntakeConfig::from_lookup(lookup(&vars)).unwrap().smtp_port, 465);
    }

    #[test]
    fn test_login_that_is_not_a_mailbox_is_accepted() {
        let mut vars = FULL.to_vec();
        vars.retain(|(k, _)| *k != "SMTP_USER");
        vars.push(("SMTP_USER", "apikey"));

        let config = IntakeConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.smtp_user, "apikey");
        assert_eq!(config.sender(), "office@example.ru");

        vars.push(("SMTP_FROM", "noreply@example.ru"));
        let config = IntakeConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.sender(), "noreply@example.ru");
    }

    #[test]
    fn test_mailbox_login_is_the_sender() {
        let config = IntakeConfig::from_lookup(lookup(FULL)).unwrap();
        assert_eq!(config.sender(), "robot@example.ru");
    }
}
