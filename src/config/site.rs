use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_url, Validate};
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://intake.cadastral.example/send-contact-form";

/// Facts about the business rendered into the page and used by the lead flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub tagline: String,
    pub lead_endpoint: String,
    pub messenger_url: String,
    pub contacts: ContactsConfig,
    pub copyright_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    pub phone_display: String,
    pub phone_dial: String,
    pub email: String,
    pub address: String,
    pub hours: Vec<String>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            phone_display: "+7 (911) 844-95-65".to_string(),
            phone_dial: "+79118449565".to_string(),
            email: "conti100@gmail.com".to_string(),
            address: "г. Москва, ул. Примерная, д. 1, офис 101".to_string(),
            hours: vec!["Пн-Пт: 9:00 - 18:00".to_string(), "Сб-Вс: выходной".to_string()],
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Кадастровые услуги".to_string(),
            tagline: "Точность, надёжность и соблюдение всех законодательных норм".to_string(),
            lead_endpoint: DEFAULT_ENDPOINT.to_string(),
            messenger_url: "https://wa.me/79118449565".to_string(),
            contacts: ContactsConfig::default(),
            copyright_year: chrono::Local::now().year(),
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML, replacing `${VAR}` with environment values first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }
}

/// Unset variables are left as written so validation can point at them.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
        message: format!("env substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("site_name", &self.site_name)?;
        validate_url("lead_endpoint", &self.lead_endpoint)?;
        validate_url("messenger_url", &self.messenger_url)?;
        validate_non_empty_string("contacts.phone_display", &self.contacts.phone_display)?;

        if !self
            .contacts
            .phone_dial
            .trim_start_matches('+')
            .chars()
            .all(|c| c.is_ascii_digit())
            || self.contacts.phone_dial.len() < 5
        {
            return Err(SiteError::InvalidConfigValueError {
                field: "contacts.phone_dial".to_string(),
                value: self.contacts.phone_dial.clone(),
                reason: "Dial number must be digits with an optional leading +".to_string(),
            });
        }

        validate_email("contacts.email", &self.contacts.email)?;

        tracing::debug!("Site configuration validation passed");
        Ok(())
    }
}
