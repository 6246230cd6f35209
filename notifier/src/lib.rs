#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Email delivery for the ROI estimator.
//!
//! The session flow talks to a [`Notifier`] trait object and never learns
//! which transport is behind it: the EmailJS-compatible REST transport in
//! production, an in-memory recorder in tests. Delivery is one-shot – a
//! failed send is reported to the caller for logging, never retried here.

/// Transport configuration loaded from the environment.
pub mod config;

/// Transport trait and implementations.
pub mod transport;

pub use config::{ConfigError, EmailJsConfig};
pub use transport::{DeliveryAck, EmailJsNotifier, MemoryNotifier, Notifier, TransportError};
