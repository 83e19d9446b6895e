pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod page;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpLeadGateway, storage::LocalStorage};
pub use config::{lambda::IntakeConfig, site::SiteConfig};
pub use crate::core::calculator::{compute_quote, Calculator};
pub use crate::core::submission::{submit_lead, LeadFormController};
pub use utils::error::{Result, SiteError, SubmitError};
