use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-base size preloaded into a fresh session.
pub const DEFAULT_ACTIVE_USERS: u64 = 5_000;

/// Retention slider position preloaded into a fresh session.
pub const DEFAULT_RETENTION_PERCENT: f64 = 60.0;

/// Input fields a validation failure can direct focus to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldId {
    /// Active-users slider.
    ActiveUsers,
    /// Current-retention slider.
    CurrentRetention,
    /// Monthly spend per user.
    MonthlySpend,
    /// Acquisition cost per user.
    AcquisitionCost,
    /// Contact full name.
    FullName,
    /// Contact email address.
    Email,
    /// Contact phone number.
    Phone,
}

impl FieldId {
    /// Returns a short stable label, usable as a UI element id.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ActiveUsers => "active_users",
            Self::CurrentRetention => "current_retention",
            Self::MonthlySpend => "monthly_spend",
            Self::AcquisitionCost => "acquisition_cost",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Errors raised while configuring the improvement-option set.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImprovementOptionsError {
    /// No selectable values were supplied.
    #[error("improvement option set must not be empty")]
    EmptySet,
    /// The default selection is not one of the supplied values.
    #[error("default improvement {0}% is not in the offered set")]
    DefaultNotOffered(u8),
}

/// Enumerated set of selectable improvement percentages.
///
/// The offered values are a domain constant of the deployment, not a UI
/// detail; the set is configurable but every selection must be a member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImprovementOptions {
    values: Vec<u8>,
    default_value: u8,
}

impl ImprovementOptions {
    /// Builds an option set with the given values and default selection.
    ///
    /// # Errors
    ///
    /// Rejects an empty set and a default outside the set.
    pub fn new(
        values: impl IntoIterator<Item = u8>,
        default_value: u8,
    ) -> Result<Self, ImprovementOptionsError> {
        let values: Vec<u8> = values.into_iter().collect();
        if values.is_empty() {
            return Err(ImprovementOptionsError::EmptySet);
        }
        if !values.contains(&default_value) {
            return Err(ImprovementOptionsError::DefaultNotOffered(default_value));
        }
        Ok(Self {
            values,
            default_value,
        })
    }

    /// Whether `candidate` is one of the offered percentages.
    #[must_use]
    pub fn contains(&self, candidate: u8) -> bool {
        self.values.contains(&candidate)
    }

    /// The "moderate" selection preloaded into a fresh session.
    #[must_use]
    pub const fn default_value(&self) -> u8 {
        self.default_value
    }

    /// All offered percentages, in presentation order.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

impl Default for ImprovementOptions {
    fn default() -> Self {
        Self {
            values: vec![10, 25, 40],
            default_value: 25,
        }
    }
}

/// Mutable calculator state for one page session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    /// Size of the user base.
    pub active_users: u64,
    /// Current retention in [0, 100]. Collected for context; never a
    /// term of the projection formula.
    pub current_retention_percent: f64,
    /// Monthly spend per user, in currency units.
    pub monthly_spend_per_user: f64,
    /// Cost to acquire one user, in currency units.
    pub acquisition_cost_per_user: f64,
    /// Selected hypothetical improvement, a member of the configured
    /// [`ImprovementOptions`] set.
    pub improvement_percent: u8,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            active_users: DEFAULT_ACTIVE_USERS,
            current_retention_percent: DEFAULT_RETENTION_PERCENT,
            monthly_spend_per_user: 0.0,
            acquisition_cost_per_user: 0.0,
            improvement_percent: ImprovementOptions::default().default_value(),
        }
    }
}

/// Immutable projection derived from one calculation request.
///
/// Replaced wholesale on every recalculation; never partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    /// Projected yearly revenue uplift.
    pub annual_revenue_increase: f64,
    /// Projected acquisition-cost savings.
    pub acquisition_savings: f64,
    /// Sum of the two projections above.
    pub total_benefit: f64,
}

/// Contact details captured by the modal form, consumed once by payload
/// preparation and then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Full name, required non-empty.
    pub full_name: String,
    /// Email address, required well-formed.
    pub email: String,
    /// Phone number, required non-empty.
    pub phone: String,
}

impl ContactInfo {
    /// Creates a record from raw form values.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Copy with surrounding whitespace stripped from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_matches_fresh_session() {
        let input = CalculatorInput::default();
        assert_eq!(input.active_users, 5_000);
        assert!((input.current_retention_percent - 60.0).abs() < f64::EPSILON);
        assert_eq!(input.improvement_percent, 25);
    }

    #[test]
    fn option_set_rejects_foreign_default() {
        let err = ImprovementOptions::new([10, 25, 40], 50).unwrap_err();
        assert_eq!(err, ImprovementOptionsError::DefaultNotOffered(50));
    }

    #[test]
    fn option_set_rejects_empty() {
        assert_eq!(
            ImprovementOptions::new([], 25).unwrap_err(),
            ImprovementOptionsError::EmptySet
        );
    }

    #[test]
    fn option_membership() {
        let options = ImprovementOptions::default();
        assert!(options.contains(25));
        assert!(!options.contains(33));
    }

    #[test]
    fn trimmed_strips_every_field() {
        let contact = ContactInfo::new("  Ana López ", " ana@example.com ", " 555-0100 ");
        let trimmed = contact.trimmed();
        assert_eq!(trimmed.full_name, "Ana López");
        assert_eq!(trimmed.email, "ana@example.com");
        assert_eq!(trimmed.phone, "555-0100");
    }
}
