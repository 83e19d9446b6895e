use crate::domain::model::{Ack, LeadRequest};
use crate::utils::error::{Result, SubmitError};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where a lead goes once the visitor presses "send".
#[async_trait]
pub trait LeadGateway: Send + Sync {
    async fn submit_lead(&self, lead: &LeadRequest) -> std::result::Result<Ack, SubmitError>;
}

/// Rendered notification email for the office inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadEmail {
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &LeadEmail) -> Result<()>;
}
