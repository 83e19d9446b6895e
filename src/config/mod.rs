pub mod lambda;
pub mod site;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cadastral-site")]
#[command(about = "Cadastral services landing page: quotes, leads and static rendering")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Site configuration TOML file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Override the lead intake endpoint")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the priced services
    Services,

    /// Estimate the price for a service and an area
    Quote {
        #[arg(long)]
        service: String,

        #[arg(long, default_value = "", allow_hyphen_values = true)]
        area: String,
    },

    /// Send a lead to the intake endpoint
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long)]
        message: String,
    },

    /// Render the landing page into a directory
    Render {
        #[arg(long, default_value = "./public")]
        output: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Site configuration with CLI overrides applied.
    pub fn site_config(&self) -> crate::utils::error::Result<site::SiteConfig> {
        let mut site = match &self.config {
            Some(path) => site::SiteConfig::from_file(path)?,
            None => site::SiteConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            site.lead_endpoint = endpoint.clone();
        }

        Ok(site)
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::*;

        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }
        if let Command::Render { output } = &self.command {
            validate_path("output", output)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_parse_quote_command() {
        let config =
            CliConfig::parse_from(["cadastral-site", "quote", "--service", "land-plot", "--area", "100"]);
        match config.command {
            Command::Quote { service, area } => {
                assert_eq!(service, "land-plot");
                assert_eq!(area, "100");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_override() {
        let config = CliConfig::parse_from([
            "cadastral-site",
            "--endpoint",
            "http://127.0.0.1:9000/lead",
            "services",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.site_config().unwrap().lead_endpoint,
            "http://127.0.0.1:9000/lead"
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = CliConfig::parse_from(["cadastral-site", "services", "--endpoint", "nope"]);
        assert!(config.validate().is_err());
    }
}
