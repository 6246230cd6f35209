#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Session layer of the ROI estimator.
//!
//! Owns the one mutable record of the system – the calculator state for a
//! single page session – and drives the calculate → contact-capture →
//! reveal → email flow against an injected [`roi_notifier::Notifier`].
//! Everything here is single-threaded and event-driven: input events
//! mutate the store synchronously, and the only asynchrony is the UX
//! pacing delay and the fire-and-forget delivery.

/// Calculator state store and modal/contact buffers.
pub mod store;

/// Flow orchestration over the store, engine, and transport.
pub mod flow;

pub use flow::{RoiFlow, DEFAULT_PACING_DELAY};
pub use store::{
    CalculatorSession, ContactField, ContactFormState, FieldChange, ModalState, SessionError,
    FIRST_CONTACT_FIELD,
};
