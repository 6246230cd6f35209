#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Retention-ROI core – projects the annual benefit of a hypothetical
//! retention improvement from a user base, per-user spend, and per-user
//! acquisition cost. Pure calculation, validation, and formatting only;
//! session orchestration and delivery live in sibling crates.

/// Calculator input, derived result, and contact records.
pub mod types;

/// Input and contact-form validation gate.
pub mod validate;

/// ROI projection formula.
pub mod engine;

/// Locale-style number and currency rendering.
pub mod format;

/// Flat email payload assembly.
pub mod payload;

pub use engine::calculate_roi;
pub use format::{format_currency, format_number};
pub use payload::EmailData;
pub use types::{
    CalculatorInput, ContactInfo, FieldId, ImprovementOptions, ImprovementOptionsError, RoiResult,
};
pub use validate::{
    check_on_blur, is_valid_email, validate_calculator_inputs, validate_contact, ValidationError,
};
