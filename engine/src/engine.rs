use crate::types::{CalculatorInput, RoiResult};

/// Projects the annual benefit of the selected retention improvement.
///
/// Pure and total: no validation, no I/O, and identical input always
/// yields an identical result. Revenue uplift annualizes the monthly
/// per-user spend (× 12); acquisition savings are a one-time figure.
/// `current_retention_percent` is deliberately not a term – the selected
/// improvement already models the relative effect.
#[must_use]
pub fn calculate_roi(input: &CalculatorInput) -> RoiResult {
    #[allow(clippy::cast_precision_loss)]
    let active_users = input.active_users as f64;
    let factor = f64::from(input.improvement_percent) / 100.0;

    let annual_revenue_increase = active_users * input.monthly_spend_per_user * factor * 12.0;
    let acquisition_savings = active_users * input.acquisition_cost_per_user * factor;

    RoiResult {
        annual_revenue_increase,
        acquisition_savings,
        total_benefit: annual_revenue_increase + acquisition_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> CalculatorInput {
        CalculatorInput {
            active_users: 5_000,
            monthly_spend_per_user: 100.0,
            acquisition_cost_per_user: 50.0,
            improvement_percent: 25,
            ..CalculatorInput::default()
        }
    }

    #[test]
    fn reference_scenario() {
        let result = calculate_roi(&scenario());
        assert!((result.annual_revenue_increase - 1_500_000.0).abs() < f64::EPSILON);
        assert!((result.acquisition_savings - 62_500.0).abs() < f64::EPSILON);
        assert!((result.total_benefit - 1_562_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_is_exact_sum_of_parts() {
        for improvement in [10, 25, 40] {
            for users in [0, 1, 999, 250_000] {
                let input = CalculatorInput {
                    active_users: users,
                    monthly_spend_per_user: 37.5,
                    acquisition_cost_per_user: 12.25,
                    improvement_percent: improvement,
                    ..CalculatorInput::default()
                };
                let result = calculate_roi(&input);
                assert_eq!(
                    result.total_benefit,
                    result.annual_revenue_increase + result.acquisition_savings
                );
            }
        }
    }

    #[test]
    fn deterministic_across_calls() {
        let input = scenario();
        assert_eq!(calculate_roi(&input), calculate_roi(&input));
    }

    #[test]
    fn retention_percent_does_not_affect_result() {
        let mut input = scenario();
        let baseline = calculate_roi(&input);
        input.current_retention_percent = 5.0;
        assert_eq!(calculate_roi(&input), baseline);
    }

    #[test]
    fn zero_users_projects_zero() {
        let input = CalculatorInput {
            active_users: 0,
            ..scenario()
        };
        let result = calculate_roi(&input);
        assert_eq!(result.total_benefit, 0.0);
    }
}
