//! Threshold-based routing for approval requests.
//!
//! Each subject type carries a threshold table (role, authority level,
//! maximum approvable amount). A new request is routed to the
//! lowest-authority role able to cover its amount; a referral
//! escalates to the next authority above the current one.

use rust_decimal::Decimal;

use super::error::ApprovalError;
use super::types::ThresholdRule;

/// Stateless engine for routing and authorization checks.
pub struct RoutingEngine;

impl RoutingEngine {
    /// Find the initial approver slot for a request.
    ///
    /// Scans the threshold table ascending by authority and returns the
    /// first rule whose `max_amount` covers the amount.
    ///
    /// # Errors
    /// * `EmptyThresholdTable` if no rules are configured
    /// * `NoApproverAvailable` if the amount exceeds every threshold
    pub fn route(rules: &[ThresholdRule], amount: Decimal) -> Result<ThresholdRule, ApprovalError> {
        if rules.is_empty() {
            return Err(ApprovalError::EmptyThresholdTable);
        }
        rules
            .iter()
            .filter(|r| r.max_amount >= amount)
            .min_by_key(|r| r.authority)
            .cloned()
            .ok_or(ApprovalError::NoApproverAvailable { amount })
    }

    /// Find the escalation target for a referral.
    ///
    /// Returns the lowest-authority rule strictly above
    /// `current_authority` whose threshold covers the amount.
    ///
    /// # Errors
    /// * `NoHigherAuthority` if no such rule exists
    pub fn escalate(
        rules: &[ThresholdRule],
        amount: Decimal,
        current_authority: i16,
    ) -> Result<ThresholdRule, ApprovalError> {
        rules
            .iter()
            .filter(|r| r.authority > current_authority && r.max_amount >= amount)
            .min_by_key(|r| r.authority)
            .cloned()
            .ok_or(ApprovalError::NoHigherAuthority { amount })
    }

    /// Check that an actor may decide a request.
    ///
    /// The actor must occupy the assigned approver slot, and their own
    /// threshold must cover the amount. The threshold check is
    /// deliberately re-run here even though routing already selected a
    /// covering slot: upstream access control is not trusted to enforce
    /// monetary limits.
    ///
    /// # Errors
    /// * `NotAssignedApprover` if the actor does not hold the assigned slot
    /// * `ThresholdExceeded` if the actor's limit is below the amount
    pub fn authorize(
        is_assigned: bool,
        actor_threshold: Decimal,
        amount: Decimal,
    ) -> Result<(), ApprovalError> {
        if !is_assigned {
            return Err(ApprovalError::NotAssignedApprover);
        }
        if actor_threshold < amount {
            return Err(ApprovalError::ThresholdExceeded {
                amount,
                threshold: actor_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> Vec<ThresholdRule> {
        vec![
            ThresholdRule {
                role: "supervisor".to_string(),
                authority: 1,
                max_amount: dec!(100_000),
            },
            ThresholdRule {
                role: "branch_manager".to_string(),
                authority: 2,
                max_amount: dec!(1_000_000),
            },
            ThresholdRule {
                role: "finance_director".to_string(),
                authority: 3,
                max_amount: dec!(10_000_000),
            },
        ]
    }

    #[test]
    fn test_route_picks_lowest_covering_authority() {
        let rule = RoutingEngine::route(&table(), dec!(50_000)).unwrap();
        assert_eq!(rule.role, "supervisor");

        let rule = RoutingEngine::route(&table(), dec!(500_000)).unwrap();
        assert_eq!(rule.role, "branch_manager");

        let rule = RoutingEngine::route(&table(), dec!(5_000_000)).unwrap();
        assert_eq!(rule.role, "finance_director");
    }

    #[test]
    fn test_route_boundary_amount() {
        // Exactly at a threshold stays at that authority
        let rule = RoutingEngine::route(&table(), dec!(100_000)).unwrap();
        assert_eq!(rule.authority, 1);
    }

    #[test]
    fn test_route_amount_exceeds_all_thresholds() {
        let result = RoutingEngine::route(&table(), dec!(50_000_000));
        assert!(matches!(
            result,
            Err(ApprovalError::NoApproverAvailable { .. })
        ));
    }

    #[test]
    fn test_route_empty_table() {
        let result = RoutingEngine::route(&[], dec!(100));
        assert_eq!(result, Err(ApprovalError::EmptyThresholdTable));
    }

    #[test]
    fn test_route_unsorted_table() {
        let mut rules = table();
        rules.reverse();
        let rule = RoutingEngine::route(&rules, dec!(50_000)).unwrap();
        assert_eq!(rule.authority, 1);
    }

    #[test]
    fn test_escalate_to_next_authority() {
        let rule = RoutingEngine::escalate(&table(), dec!(50_000), 1).unwrap();
        assert_eq!(rule.role, "branch_manager");
    }

    #[test]
    fn test_escalate_skips_insufficient_thresholds() {
        // From authority 0, amount 500k: supervisor (1) cannot cover,
        // so escalation lands on branch_manager (2)
        let rule = RoutingEngine::escalate(&table(), dec!(500_000), 0).unwrap();
        assert_eq!(rule.authority, 2);
    }

    #[test]
    fn test_escalate_from_top_fails() {
        let result = RoutingEngine::escalate(&table(), dec!(50_000), 3);
        assert!(matches!(
            result,
            Err(ApprovalError::NoHigherAuthority { .. })
        ));
    }

    #[test]
    fn test_authorize_assigned_with_sufficient_threshold() {
        assert!(RoutingEngine::authorize(true, dec!(1_000_000), dec!(500_000)).is_ok());
    }

    #[test]
    fn test_authorize_not_assigned() {
        let result = RoutingEngine::authorize(false, dec!(1_000_000), dec!(500_000));
        assert_eq!(result, Err(ApprovalError::NotAssignedApprover));
    }

    #[test]
    fn test_authorize_threshold_exceeded() {
        let result = RoutingEngine::authorize(true, dec!(100_000), dec!(500_000));
        assert!(matches!(
            result,
            Err(ApprovalError::ThresholdExceeded { .. })
        ));
    }
}
