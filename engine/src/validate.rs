use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CalculatorInput, ContactInfo, FieldId};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// First validation failure found in a calculator or contact submission.
///
/// Checks run in a fixed order and only the first failure is reported per
/// call, matching the one-message-at-a-time input surface.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Monthly spend per user is zero or negative.
    #[error("monthly spend per user must be greater than zero")]
    MissingMonthlySpend,
    /// Acquisition cost per user is zero or negative.
    #[error("acquisition cost per user must be greater than zero")]
    MissingAcquisitionCost,
    /// Full name is empty after trimming.
    #[error("full name is required")]
    MissingFullName,
    /// Email is empty or does not match the address pattern.
    #[error("email address is missing or malformed")]
    InvalidEmail,
    /// Phone number is empty after trimming.
    #[error("phone number is required")]
    MissingPhone,
}

impl ValidationError {
    /// The field that should receive focus when this failure is surfaced.
    #[must_use]
    pub const fn field(self) -> FieldId {
        match self {
            Self::MissingMonthlySpend => FieldId::MonthlySpend,
            Self::MissingAcquisitionCost => FieldId::AcquisitionCost,
            Self::MissingFullName => FieldId::FullName,
            Self::InvalidEmail => FieldId::Email,
            Self::MissingPhone => FieldId::Phone,
        }
    }

    /// Localized es-MX message for the input surface.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::MissingMonthlySpend => "Por favor, ingresa el gasto mensual por usuario.",
            Self::MissingAcquisitionCost => {
                "Por favor, ingresa el costo de adquisición por usuario."
            }
            Self::MissingFullName => "Por favor, ingresa tu nombre completo.",
            Self::InvalidEmail => "Por favor, ingresa un correo electrónico válido.",
            Self::MissingPhone => "Por favor, ingresa tu número de teléfono.",
        }
    }
}

/// Gate in front of the projection engine.
///
/// # Errors
///
/// Returns the first failing check: [`ValidationError::MissingMonthlySpend`]
/// when `monthly_spend_per_user <= 0`, then
/// [`ValidationError::MissingAcquisitionCost`] when
/// `acquisition_cost_per_user <= 0`.
pub fn validate_calculator_inputs(input: &CalculatorInput) -> Result<(), ValidationError> {
    if input.monthly_spend_per_user <= 0.0 {
        return Err(ValidationError::MissingMonthlySpend);
    }
    if input.acquisition_cost_per_user <= 0.0 {
        return Err(ValidationError::MissingAcquisitionCost);
    }
    Ok(())
}

/// Gate in front of email-payload preparation.
///
/// # Errors
///
/// Checks name, then email, then phone, and returns on the first failure.
pub fn validate_contact(contact: &ContactInfo) -> Result<(), ValidationError> {
    if contact.full_name.trim().is_empty() {
        return Err(ValidationError::MissingFullName);
    }
    let email = contact.email.trim();
    if email.is_empty() || !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if contact.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    Ok(())
}

/// Whether `candidate` looks like an email address: non-whitespace local
/// part, `@`, domain containing at least one dot.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// Single-field re-check run when a form field loses focus, used by the
/// input surface to mark the field without interrupting the user.
#[must_use]
pub fn check_on_blur(field: FieldId, raw_value: &str) -> Option<ValidationError> {
    let value = raw_value.trim();
    if field == FieldId::Email && !value.is_empty() && !is_valid_email(value) {
        return Some(ValidationError::InvalidEmail);
    }
    if value.is_empty() {
        return Some(match field {
            FieldId::MonthlySpend => ValidationError::MissingMonthlySpend,
            FieldId::AcquisitionCost => ValidationError::MissingAcquisitionCost,
            FieldId::Email => ValidationError::InvalidEmail,
            FieldId::Phone => ValidationError::MissingPhone,
            _ => ValidationError::MissingFullName,
        });
    }
    None
}
