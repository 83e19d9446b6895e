use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceId {
    LandPlot,
    TechPlan,
    Document,
    Consultation,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::LandPlot => "land-plot",
            ServiceId::TechPlan => "tech-plan",
            ServiceId::Document => "document",
            ServiceId::Consultation => "consultation",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownServiceId(pub String);

impl fmt::Display for UnknownServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service id: {}", self.0)
    }
}

impl std::error::Error for UnknownServiceId {}

impl FromStr for ServiceId {
    type Err = UnknownServiceId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "land-plot" => Ok(ServiceId::LandPlot),
            "tech-plan" => Ok(ServiceId::TechPlan),
            "document" => Ok(ServiceId::Document),
            "consultation" => Ok(ServiceId::Consultation),
            other => Err(UnknownServiceId(other.to_string())),
        }
    }
}

/// One priced offering of the calculator catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub label: &'static str,
    pub base_price: u32,
    pub price_per_unit: u32,
}

/// Estimated price for a service and an area in square metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub service: ServiceId,
    pub area: f64,
    pub amount: f64,
}

/// Contact form payload as it goes over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl LeadRequest {
    /// First required field that is blank, in form order.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    pub fn email(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }
}

/// Success body returned by the intake endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// Transient toast shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
