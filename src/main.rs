use cadastral_site::config::Command;
use cadastral_site::core::catalog::CATALOG;
use cadastral_site::domain::model::LeadRequest;
use cadastral_site::utils::error::{ErrorSeverity, SiteError};
use cadastral_site::utils::format::format_rub;
use cadastral_site::utils::{logger, validation::Validate};
use cadastral_site::{compute_quote, page, submit_lead, CliConfig, HttpLeadGateway, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let site = match config.site_config().and_then(|site| site.validate().map(|_| site)) {
        Ok(site) => site,
        Err(e) => fail(&e),
    };

    match config.command {
        Command::Services => {
            for service in CATALOG.iter() {
                println!(
                    "{:<14} {:<32} {:>8} + {} за м²",
                    service.id.as_str(),
                    service.label,
                    format_rub(f64::from(service.base_price)),
                    format_rub(f64::from(service.price_per_unit)),
                );
            }
        }
        Command::Quote { service, area } => match compute_quote(&service, &area) {
            Some(quote) => println!("Приблизительная стоимость: {}", format_rub(quote.amount)),
            None => {
                tracing::info!(service = %service, area = %area, "no quote");
                println!("Стоимость не рассчитана: проверьте услугу и площадь");
            }
        },
        Command::Submit {
            name,
            phone,
            email,
            message,
        } => {
            let gateway = HttpLeadGateway::new(site.lead_endpoint.clone());
            let lead = LeadRequest {
                name,
                phone,
                email,
                message,
            };

            let outcome = submit_lead(&gateway, &lead).await;
            let notification = cadastral_site::core::submission::notification_for(&outcome);
            match outcome {
                Ok(_) => println!("✅ {}: {}", notification.title, notification.description),
                Err(e) => {
                    let err = SiteError::from(e);
                    tracing::warn!("{} (Category: {:?}, Severity: {:?})", err, err.category(), err.severity());
                    eprintln!("❌ {}: {}", notification.title, notification.description);
                    eprintln!("💡 {}", err.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        Command::Render { output } => {
            let storage = LocalStorage::new(output.clone());
            match page::publish(&storage, &site).await {
                Ok(file) => {
                    tracing::info!("Page rendered to {}/{}", output, file);
                    println!("📁 Output saved to: {}/{}", output, file);
                }
                Err(e) => fail(&e),
            }
        }
    }

    Ok(())
}

fn fail(e: &SiteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
