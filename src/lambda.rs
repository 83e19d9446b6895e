#[cfg(feature = "lambda")]
use cadastral_site::adapters::mail::SmtpMailer;
#[cfg(feature = "lambda")]
use cadastral_site::config::lambda::IntakeConfig;
#[cfg(feature = "lambda")]
use cadastral_site::core::intake::{handle_intake, IntakeEvent, IntakeResponse, UnavailableMailer};
#[cfg(feature = "lambda")]
use cadastral_site::domain::ports::Mailer;
#[cfg(feature = "lambda")]
use cadastral_site::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
const DEFAULT_SITE_NAME: &str = "Кадастровые услуги";

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<IntakeEvent>) -> Result<IntakeResponse, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        method = event.payload.method(),
        "Contact form request received"
    );

    // mail settings are read per invocation
    let settings = IntakeConfig::from_env().and_then(|config| config.validate().map(|_| config));
    let (mailer, site_name): (Option<Box<dyn Mailer>>, String) = match settings {
        Ok(config) => match SmtpMailer::from_config(&config) {
            Ok(mailer) => (Some(Box::new(mailer) as Box<dyn Mailer>), config.site_name),
            Err(e) => {
                tracing::error!("SMTP transport setup failed: {}", e);
                let reason = e.to_string();
                (Some(Box::new(UnavailableMailer { reason }) as Box<dyn Mailer>), config.site_name)
            }
        },
        Err(e) => {
            tracing::error!("Mail settings unavailable: {}", e);
            (None, DEFAULT_SITE_NAME.to_string())
        }
    };

    let response = handle_intake(&event.payload, mailer.as_deref(), &site_name).await;
    tracing::info!(status = response.status_code, "Contact form request handled");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
