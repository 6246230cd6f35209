use serde::{Deserialize, Serialize};
use thiserror::Error;

use roi_engine::{
    CalculatorInput, ContactInfo, FieldId, ImprovementOptions, RoiResult, ValidationError,
};

/// Contact field focused when the capture modal opens.
pub const FIRST_CONTACT_FIELD: FieldId = FieldId::FullName;

/// Errors surfaced by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A validation gate rejected the current values.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The selected improvement is not in the configured option set.
    #[error("improvement value {0}% is not an offered option")]
    UnknownImprovement(u8),
    /// No calculation has been performed yet.
    #[error("no calculation has been performed yet")]
    NoResult,
    /// The contact modal is not open.
    #[error("contact form is not open")]
    ModalClosed,
}

/// One field mutation emitted by the input surface. Last write wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldChange {
    /// Active-users slider moved.
    ActiveUsers(u64),
    /// Current-retention slider moved.
    CurrentRetention(f64),
    /// Monthly spend per user edited.
    MonthlySpend(f64),
    /// Acquisition cost per user edited.
    AcquisitionCost(f64),
    /// Improvement option selected (mutually exclusive buttons).
    Improvement(u8),
}

/// Editable fields of the contact capture form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactField {
    /// Full name.
    FullName,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

/// Raw contact form buffer, cleared whenever the modal closes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormState {
    /// Full name as typed.
    pub full_name: String,
    /// Email as typed.
    pub email: String,
    /// Phone as typed.
    pub phone: String,
}

impl ContactFormState {
    fn clear(&mut self) {
        self.full_name.clear();
        self.email.clear();
        self.phone.clear();
    }

    /// Snapshot of the buffer as a contact record.
    #[must_use]
    pub fn to_contact(&self) -> ContactInfo {
        ContactInfo::new(&self.full_name, &self.email, &self.phone)
    }
}

/// Visibility of the contact capture modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalState {
    /// Modal hidden; contact fields are guaranteed empty.
    Hidden,
    /// Modal open with the given field designated for focus.
    Open {
        /// Field the input surface should focus.
        focus: FieldId,
    },
}

/// Mutable calculator state for one page session.
///
/// Replaces the ambient globals of a browser runtime with one explicit
/// record: current inputs, the last computed projection (replaced
/// wholesale on each request, never partially updated), and the contact
/// modal. Single-threaded by design – callers mutate through `&mut`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSession {
    input: CalculatorInput,
    options: ImprovementOptions,
    result: Option<RoiResult>,
    modal: ModalState,
    contact_form: ContactFormState,
    results_revealed: bool,
}

impl CalculatorSession {
    /// Creates a fresh session offering the given improvement options.
    #[must_use]
    pub fn new(options: ImprovementOptions) -> Self {
        let input = CalculatorInput {
            improvement_percent: options.default_value(),
            ..CalculatorInput::default()
        };
        Self {
            input,
            options,
            result: None,
            modal: ModalState::Hidden,
            contact_form: ContactFormState::default(),
            results_revealed: false,
        }
    }

    /// Current calculator inputs.
    #[must_use]
    pub const fn input(&self) -> &CalculatorInput {
        &self.input
    }

    /// Configured improvement option set.
    #[must_use]
    pub const fn options(&self) -> &ImprovementOptions {
        &self.options
    }

    /// Last computed projection, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&RoiResult> {
        self.result.as_ref()
    }

    /// Current modal visibility.
    #[must_use]
    pub const fn modal(&self) -> ModalState {
        self.modal
    }

    /// Current contact form buffer.
    #[must_use]
    pub const fn contact_form(&self) -> &ContactFormState {
        &self.contact_form
    }

    /// Whether the results section has been revealed.
    #[must_use]
    pub const fn results_revealed(&self) -> bool {
        self.results_revealed
    }

    /// Applies one input event, last write wins.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownImprovement`] when the selected improvement
    /// is outside the configured set; state is left untouched.
    pub fn apply(&mut self, change: FieldChange) -> Result<(), SessionError> {
        match change {
            FieldChange::ActiveUsers(value) => self.input.active_users = value,
            FieldChange::CurrentRetention(value) => self.input.current_retention_percent = value,
            FieldChange::MonthlySpend(value) => self.input.monthly_spend_per_user = value,
            FieldChange::AcquisitionCost(value) => self.input.acquisition_cost_per_user = value,
            FieldChange::Improvement(value) => {
                if !self.options.contains(value) {
                    return Err(SessionError::UnknownImprovement(value));
                }
                self.input.improvement_percent = value;
            }
        }
        Ok(())
    }

    /// Edits one contact field while the modal is open.
    ///
    /// # Errors
    ///
    /// [`SessionError::ModalClosed`] when the modal is hidden.
    pub fn edit_contact(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        if self.modal == ModalState::Hidden {
            return Err(SessionError::ModalClosed);
        }
        let value = value.into();
        match field {
            ContactField::FullName => self.contact_form.full_name = value,
            ContactField::Email => self.contact_form.email = value,
            ContactField::Phone => self.contact_form.phone = value,
        }
        Ok(())
    }

    /// Opens the contact modal: resets the form and designates the first
    /// field for focus.
    pub fn open_modal(&mut self) {
        self.contact_form.clear();
        self.modal = ModalState::Open {
            focus: FIRST_CONTACT_FIELD,
        };
    }

    /// Closes the contact modal, deterministically clearing the form –
    /// the reset happens on every close, success and cancellation alike.
    pub fn close_modal(&mut self) {
        self.contact_form.clear();
        self.modal = ModalState::Hidden;
    }

    pub(crate) fn store_result(&mut self, result: RoiResult) {
        self.result = Some(result);
    }

    pub(crate) fn reveal_results(&mut self) {
        self.results_revealed = true;
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(ImprovementOptions::default())
    }
}
