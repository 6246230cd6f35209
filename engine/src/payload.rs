use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::format::format_number;
use crate::types::{CalculatorInput, ContactInfo, RoiResult};

/// Timestamp rendering used in the outgoing payload (es-MX day-first).
const TIMESTAMP_FORMAT: &str = "%-d/%-m/%Y, %H:%M:%S";

/// Flat, ordered string-keyed payload handed to the email transport.
///
/// Pure snapshot of one submission: contact details plus every calculator
/// field and projection, pre-rendered with its currency or percent suffix.
/// Assembly never performs the send. A payload can only be built from an
/// existing [`RoiResult`], so "calculation not yet performed" is
/// unrepresentable here; the session layer enforces that precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailData {
    fields: IndexMap<String, String>,
}

impl EmailData {
    /// Assembles the payload for one submission.
    #[must_use]
    pub fn prepare(
        input: &CalculatorInput,
        result: &RoiResult,
        contact: &ContactInfo,
        recipient: &str,
        sent_at: DateTime<Local>,
    ) -> Self {
        let contact = contact.trimmed();
        let mut fields = IndexMap::new();
        let mut put = |key: &str, value: String| {
            fields.insert(key.to_owned(), value);
        };

        put("to_email", recipient.to_owned());
        put("from_name", contact.full_name);
        put("from_email", contact.email);
        put("phone", contact.phone);
        put("active_users", format_number(to_f64(input.active_users)));
        put(
            "current_retention",
            format!("{}%", format_number(input.current_retention_percent)),
        );
        put(
            "monthly_spend",
            currency(input.monthly_spend_per_user),
        );
        put(
            "acquisition_cost",
            currency(input.acquisition_cost_per_user),
        );
        put(
            "improvement_selected",
            format!("{}%", input.improvement_percent),
        );
        put(
            "annual_revenue_increase",
            currency(result.annual_revenue_increase),
        );
        put("acquisition_savings", currency(result.acquisition_savings));
        put("total_benefit", currency(result.total_benefit));
        put("timestamp", sent_at.format(TIMESTAMP_FORMAT).to_string());

        Self { fields }
    }

    /// Looks up one rendered field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Iterates fields in assembly order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of rendered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn currency(value: f64) -> String {
    format!("${} MXN", format_number(value))
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: u64) -> f64 {
    value as f64
}
