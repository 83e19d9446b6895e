pub mod calculator;
pub mod catalog;
pub mod intake;
pub mod submission;

pub use crate::domain::model::{Ack, LeadRequest, Notification, Quote, Service, ServiceId};
pub use crate::domain::ports::{LeadGateway, Mailer, Storage};
pub use crate::utils::error::Result;
