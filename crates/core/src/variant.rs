use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariantError {
    #[error("variant weight must be a whole percentage between 1 and 100, got {0}")]
    InvalidWeight(u32),
    #[error("variant weight budget exceeded: requested {requested}%, only {remaining}% remaining")]
    BudgetExceeded { requested: u32, remaining: u32 },
}

/// Traffic share not yet claimed by variants. The control gets this cut.
pub fn remaining_budget(existing_weights: &[u32]) -> u32 {
    100u32.saturating_sub(existing_weights.iter().sum())
}

/// Check that a new variant's weight fits the configuration's budget.
///
/// The sum of all variants' weights must stay at or below 100; a creation
/// that would push it over is rejected, never clamped. The error carries
/// the remaining capacity so the operator knows what would fit.
pub fn validate_new_variant(existing_weights: &[u32], weight: u32) -> Result<(), VariantError> {
    if weight == 0 || weight > 100 {
        return Err(VariantError::InvalidWeight(weight));
    }
    let remaining = remaining_budget(existing_weights);
    if weight > remaining {
        return Err(VariantError::BudgetExceeded {
            requested: weight,
            remaining,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_variant_may_take_the_whole_budget() {
        assert_eq!(validate_new_variant(&[], 100), Ok(()));
    }

    #[test]
    fn zero_and_oversized_weights_are_invalid() {
        assert_eq!(validate_new_variant(&[], 0), Err(VariantError::InvalidWeight(0)));
        assert_eq!(
            validate_new_variant(&[], 101),
            Err(VariantError::InvalidWeight(101))
        );
    }

    #[test]
    fn sixty_then_fifty_rejects_with_forty_remaining() {
        assert_eq!(validate_new_variant(&[], 60), Ok(()));
        let err = validate_new_variant(&[60], 50).unwrap_err();
        assert_eq!(
            err,
            VariantError::BudgetExceeded {
                requested: 50,
                remaining: 40
            }
        );
        assert!(err.to_string().contains("40% remaining"));
    }

    #[test]
    fn rejection_leaves_the_budget_usable() {
        let existing = [60u32];
        assert!(validate_new_variant(&existing, 50).is_err());
        // A fitting weight still goes through afterwards.
        assert_eq!(validate_new_variant(&existing, 40), Ok(()));
    }

    #[test]
    fn exact_fill_is_accepted() {
        assert_eq!(validate_new_variant(&[30, 30], 40), Ok(()));
        assert!(validate_new_variant(&[30, 30, 40], 1).is_err());
    }
}
