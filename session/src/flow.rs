use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use interaction_log::{InteractionLogger, InteractionRecord};
use roi_engine::{
    calculate_roi, validate_calculator_inputs, validate_contact, EmailData, ImprovementOptions,
    RoiResult,
};
use roi_notifier::Notifier;

use crate::store::{
    CalculatorSession, ContactField, FieldChange, ModalState, SessionError,
};

/// Artificial delay between contact submission and revealing results.
/// A UX pacing device, not a correctness mechanism.
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(1_000);

/// Orchestrates one session against the engine and an injected transport.
///
/// Control flow mirrors the estimator page: input events mutate the
/// store, a calculation request runs the validation gate and then the
/// engine, the contact modal gathers a [`roi_engine::ContactInfo`], and a
/// successful submission reveals the results and fires the email. The
/// email outcome never gates the reveal; failure is logged and journaled,
/// never retried.
pub struct RoiFlow {
    session: CalculatorSession,
    notifier: Arc<dyn Notifier>,
    journal: Option<Arc<InteractionLogger>>,
    recipient: String,
    pacing_delay: Duration,
}

impl RoiFlow {
    /// Creates a flow delivering submissions to `recipient` through the
    /// given transport.
    #[must_use]
    pub fn new(
        options: ImprovementOptions,
        notifier: Arc<dyn Notifier>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            session: CalculatorSession::new(options),
            notifier,
            journal: None,
            recipient: recipient.into(),
            pacing_delay: DEFAULT_PACING_DELAY,
        }
    }

    /// Overrides the pacing delay (tests pass zero).
    #[must_use]
    pub const fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Attaches an interaction journal.
    #[must_use]
    pub fn with_journal(mut self, journal: Arc<InteractionLogger>) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Read access to the session store.
    #[must_use]
    pub const fn session(&self) -> &CalculatorSession {
        &self.session
    }

    /// Routes one input-surface mutation into the store.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError::UnknownImprovement`] from the store.
    pub fn on_field_change(&mut self, change: FieldChange) -> Result<(), SessionError> {
        self.session.apply(change)?;
        self.track(InteractionRecord::new("input.changed"));
        Ok(())
    }

    /// Edits one contact form field while the modal is open.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError::ModalClosed`] from the store.
    pub fn edit_contact(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.session.edit_contact(field, value)
    }

    /// Handles the calculate click: validation gate first, engine only on
    /// success, then the contact modal opens over the fresh projection.
    ///
    /// # Errors
    ///
    /// Returns the first failing input check; the engine is never invoked
    /// and the stored result is left as-is.
    pub fn request_calculation(&mut self) -> Result<RoiResult, SessionError> {
        if let Err(err) = validate_calculator_inputs(self.session.input()) {
            self.track(
                InteractionRecord::new("calculate.rejected")
                    .with_detail("field", err.field().label()),
            );
            return Err(err.into());
        }
        let result = calculate_roi(self.session.input());
        self.session.store_result(result);
        self.session.open_modal();
        self.track(
            InteractionRecord::new("calculate.completed")
                .with_detail("improvement", self.session.input().improvement_percent),
        );
        Ok(result)
    }

    /// Handles contact form submission: validates the buffered contact,
    /// waits out the pacing delay, closes the modal, reveals the results,
    /// and then attempts delivery. Transport failure does not fail the
    /// submission.
    ///
    /// # Errors
    ///
    /// [`SessionError::ModalClosed`] when no modal is open,
    /// [`SessionError::NoResult`] when no calculation preceded the
    /// submission, or the first failing contact check (modal stays open).
    pub async fn submit_contact(&mut self) -> Result<RoiResult, SessionError> {
        if self.session.modal() == ModalState::Hidden {
            return Err(SessionError::ModalClosed);
        }
        let contact = self.session.contact_form().to_contact();
        if let Err(err) = validate_contact(&contact) {
            self.track(
                InteractionRecord::new("contact.rejected")
                    .with_detail("field", err.field().label()),
            );
            return Err(err.into());
        }
        let result = *self.session.result().ok_or(SessionError::NoResult)?;

        tokio::time::sleep(self.pacing_delay).await;
        self.session.close_modal();
        self.session.reveal_results();
        self.track(InteractionRecord::new("results.revealed"));

        let payload = EmailData::prepare(
            self.session.input(),
            &result,
            &contact,
            &self.recipient,
            Local::now(),
        );
        match self.notifier.send(&payload).await {
            Ok(ack) => {
                tracing::info!(status = ack.status, "submission emailed to sales contact");
                self.track(InteractionRecord::new("email.sent"));
            }
            Err(err) => {
                // Results are already on screen; delivery is best-effort.
                tracing::warn!(error = %err, "email delivery failed");
                self.track(
                    InteractionRecord::new("email.failed").with_detail("error", err.to_string()),
                );
            }
        }
        Ok(result)
    }

    /// Handles cancellation (button or escape key): closes the modal
    /// through the same deterministic reset path as a submission.
    pub fn cancel_contact(&mut self) {
        if self.session.modal() != ModalState::Hidden {
            self.session.close_modal();
            self.track(InteractionRecord::new("contact.cancelled"));
        }
    }

    fn track(&self, record: InteractionRecord) {
        if let Some(journal) = &self.journal {
            if let Err(err) = journal.record(&record) {
                tracing::error!(error = %err, "interaction journal write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_notifier::MemoryNotifier;
    use roi_engine::ValidationError;

    fn flow_with(notifier: Arc<MemoryNotifier>) -> RoiFlow {
        RoiFlow::new(
            ImprovementOptions::default(),
            notifier,
            "ventas@example.com",
        )
        .with_pacing_delay(Duration::ZERO)
    }

    fn fill_valid_inputs(flow: &mut RoiFlow) {
        flow.on_field_change(FieldChange::ActiveUsers(5_000)).unwrap();
        flow.on_field_change(FieldChange::MonthlySpend(100.0)).unwrap();
        flow.on_field_change(FieldChange::AcquisitionCost(50.0)).unwrap();
    }

    fn fill_valid_contact(flow: &mut RoiFlow) {
        flow.edit_contact(ContactField::FullName, "Ana López").unwrap();
        flow.edit_contact(ContactField::Email, "ana@example.com").unwrap();
        flow.edit_contact(ContactField::Phone, "555-0100").unwrap();
    }

    #[test]
    fn failed_gate_never_reaches_the_engine() {
        let mut flow = flow_with(Arc::new(MemoryNotifier::new()));
        flow.on_field_change(FieldChange::AcquisitionCost(50.0)).unwrap();
        let err = flow.request_calculation().unwrap_err();
        assert_eq!(
            err,
            SessionError::Validation(ValidationError::MissingMonthlySpend)
        );
        assert!(flow.session().result().is_none());
        assert_eq!(flow.session().modal(), ModalState::Hidden);
    }

    #[test]
    fn calculation_opens_modal_over_fresh_result() {
        let mut flow = flow_with(Arc::new(MemoryNotifier::new()));
        fill_valid_inputs(&mut flow);
        let result = flow.request_calculation().unwrap();
        assert!((result.total_benefit - 1_562_500.0).abs() < f64::EPSILON);
        assert_eq!(flow.session().result(), Some(&result));
        assert!(matches!(flow.session().modal(), ModalState::Open { .. }));
    }

    #[test]
    fn recalculation_replaces_the_result_wholesale() {
        let mut flow = flow_with(Arc::new(MemoryNotifier::new()));
        fill_valid_inputs(&mut flow);
        let first = flow.request_calculation().unwrap();
        flow.cancel_contact();
        flow.on_field_change(FieldChange::Improvement(40)).unwrap();
        let second = flow.request_calculation().unwrap();
        assert_ne!(first, second);
        assert_eq!(flow.session().result(), Some(&second));
    }

    #[tokio::test]
    async fn invalid_contact_keeps_modal_open() {
        let mut flow = flow_with(Arc::new(MemoryNotifier::new()));
        fill_valid_inputs(&mut flow);
        flow.request_calculation().unwrap();
        flow.edit_contact(ContactField::FullName, "Ana").unwrap();
        flow.edit_contact(ContactField::Email, "not-an-address").unwrap();
        flow.edit_contact(ContactField::Phone, "555").unwrap();

        let err = flow.submit_contact().await.unwrap_err();
        assert_eq!(err, SessionError::Validation(ValidationError::InvalidEmail));
        assert!(matches!(flow.session().modal(), ModalState::Open { .. }));
        assert!(!flow.session().results_revealed());
    }

    #[tokio::test]
    async fn submission_reveals_results_and_delivers_payload() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut flow = flow_with(Arc::clone(&notifier));
        fill_valid_inputs(&mut flow);
        flow.request_calculation().unwrap();
        fill_valid_contact(&mut flow);

        let result = flow.submit_contact().await.unwrap();
        assert!(flow.session().results_revealed());
        assert_eq!(flow.session().modal(), ModalState::Hidden);
        assert!(flow.session().contact_form().full_name.is_empty());
        assert!((result.total_benefit - 1_562_500.0).abs() < f64::EPSILON);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].get("to_email"), Some("ventas@example.com"));
        assert_eq!(sent[0].get("total_benefit"), Some("$1,562,500 MXN"));
    }

    #[tokio::test]
    async fn transport_failure_does_not_gate_the_reveal() {
        let notifier = Arc::new(MemoryNotifier::new());
        notifier.set_failing(true);
        let mut flow = flow_with(Arc::clone(&notifier));
        fill_valid_inputs(&mut flow);
        flow.request_calculation().unwrap();
        fill_valid_contact(&mut flow);

        assert!(flow.submit_contact().await.is_ok());
        assert!(flow.session().results_revealed());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn flow_steps_are_journaled() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Arc::new(InteractionLogger::new(dir.path().join("interactions.log")).unwrap());
        let mut flow = flow_with(Arc::new(MemoryNotifier::new())).with_journal(Arc::clone(&journal));

        let _ = flow.request_calculation();
        fill_valid_inputs(&mut flow);
        flow.request_calculation().unwrap();
        fill_valid_contact(&mut flow);
        flow.submit_contact().await.unwrap();

        let content = std::fs::read_to_string(journal.path()).unwrap();
        assert!(content.contains("\"action\":\"calculate.rejected\""));
        assert!(content.contains("\"field\":\"monthly_spend\""));
        assert!(content.contains("\"action\":\"calculate.completed\""));
        assert!(content.contains("\"action\":\"results.revealed\""));
        assert!(content.contains("\"action\":\"email.sent\""));
    }

    #[tokio::test]
    async fn submission_without_modal_is_rejected() {
        let mut flow = flow_with(Arc::new(MemoryNotifier::new()));
        assert_eq!(
            flow.submit_contact().await.unwrap_err(),
            SessionError::ModalClosed
        );
    }
}
