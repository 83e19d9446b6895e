use crate::domain::model::{Ack, LeadRequest, Notification};
use crate::domain::ports::LeadGateway;
use crate::utils::error::SubmitError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

pub const SUCCESS_TITLE: &str = "Заявка отправлена!";
pub const SUCCESS_DESCRIPTION: &str = "Мы свяжемся с вами в ближайшее время";
pub const FAILURE_TITLE: &str = "Ошибка";
pub const REJECTED_FALLBACK: &str = "Не удалось отправить заявку";
pub const TRANSPORT_FAILURE: &str = "Не удалось отправить заявку. Попробуйте позже";
pub const MISSING_FIELDS: &str = "Заполните все обязательные поля";
pub const IN_PROGRESS: &str = "Заявка уже отправляется";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

/// Sends one lead through the gateway. Single attempt, no retry.
pub async fn submit_lead<G: LeadGateway + ?Sized>(
    gateway: &G,
    lead: &LeadRequest,
) -> Result<Ack, SubmitError> {
    if let Some(field) = lead.first_missing_field() {
        return Err(SubmitError::MissingField { field });
    }
    gateway.submit_lead(lead).await
}

pub fn notification_for(outcome: &Result<Ack, SubmitError>) -> Notification {
    match outcome {
        Ok(_) => Notification::success(SUCCESS_TITLE, SUCCESS_DESCRIPTION),
        Err(SubmitError::Rejected { message, .. }) => {
            Notification::failure(FAILURE_TITLE, message.clone())
        }
        Err(SubmitError::Transport(_)) => Notification::failure(FAILURE_TITLE, TRANSPORT_FAILURE),
        Err(SubmitError::MissingField { .. }) => Notification::failure(FAILURE_TITLE, MISSING_FIELDS),
        Err(SubmitError::AlreadySubmitting) => Notification::failure(FAILURE_TITLE, IN_PROGRESS),
    }
}

/// Clears the in-flight flag when dropped, including when the submit future is cancelled.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Contact form state plus the submit button.
///
/// The form is cleared only after the endpoint accepts the lead. While a request is
/// outstanding the button is disabled: further `submit` calls fail fast with
/// [`SubmitError::AlreadySubmitting`] and send nothing.
pub struct LeadFormController<G: LeadGateway> {
    gateway: G,
    form: Mutex<LeadRequest>,
    in_flight: AtomicBool,
}

impl<G: LeadGateway> LeadFormController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            form: Mutex::new(LeadRequest::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn fill(&self, lead: LeadRequest) {
        *self.form.lock().await = lead;
    }

    pub async fn form(&self) -> LeadRequest {
        self.form.lock().await.clone()
    }

    pub fn phase(&self) -> SubmissionPhase {
        if self.in_flight.load(Ordering::Acquire) {
            SubmissionPhase::Submitting
        } else {
            SubmissionPhase::Idle
        }
    }

    pub async fn submit(&self) -> (Result<Ack, SubmitError>, Notification) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("submit ignored, previous lead still in flight");
            let outcome = Err(SubmitError::AlreadySubmitting);
            let notification = notification_for(&outcome);
            return (outcome, notification);
        }
        let guard = InFlightGuard(&self.in_flight);

        let lead = self.form.lock().await.clone();
        tracing::info!(name = %lead.name, "submitting lead");

        let outcome = submit_lead(&self.gateway, &lead).await;
        match &outcome {
            Ok(_) => {
                tracing::info!("lead accepted");
                let mut form = self.form.lock().await;
                // only clear what was sent; edits made during the request stay
                if *form == lead {
                    *form = LeadRequest::default();
                }
            }
            Err(e) => tracing::warn!(error = %e, "lead not delivered"),
        }

        drop(guard);
        let notification = notification_for(&outcome);
        (outcome, notification)
    }
}
