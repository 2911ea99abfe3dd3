//! Supply alert classification.
//!
//! Maps a days-remaining estimate onto an `AlertLevel` and produces the
//! banner text the dashboard shows for it.

use crate::model::{AlertLevel, DaysRemaining, InvalidInputError, ProjectionResult};
use serde::{Deserialize, Serialize};

/// Mitigation shown alongside a WARNING banner.
pub const WARNING_SUGGESTION: &str =
    "Activate a water-saving campaign and review agricultural use.";

/// Returns `Warning` if `days_remaining` is finite and strictly below
/// `threshold_days`, `Ok` otherwise.
///
/// Exactly `threshold_days` remaining is `Ok`. A NaN estimate carries no
/// depletion date and is `Ok`, the same as `Unlimited`.
pub fn classify_alert(days_remaining: DaysRemaining, threshold_days: f64) -> Result<AlertLevel, InvalidInputError> {
    if !(threshold_days.is_finite() && threshold_days > 0.0) {
        return Err(InvalidInputError::NonPositiveThreshold(threshold_days));
    }

    Ok(match days_remaining {
        DaysRemaining::Finite(days) if days.is_nan() => AlertLevel::Ok,
        DaysRemaining::Finite(days) if days < threshold_days => AlertLevel::Warning,
        DaysRemaining::Finite(_) | DaysRemaining::Unlimited => AlertLevel::Ok,
    })
}

/// Banner content for a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyAlert {
    pub level: AlertLevel,
    pub headline: String,
    pub suggestion: Option<String>,
}

impl SupplyAlert {
    pub fn from_projection(result: &ProjectionResult, threshold_days: f64) -> Self {
        match (result.alert_level, result.days_remaining) {
            (AlertLevel::Warning, DaysRemaining::Finite(days)) => SupplyAlert {
                level: AlertLevel::Warning,
                headline: format!(
                    "If nothing changes, water may run out in approximately {} days!",
                    days.trunc() as u64
                ),
                suggestion: Some(WARNING_SUGGESTION.to_string()),
            },
            (level, _) => SupplyAlert {
                level,
                headline: format!(
                    "Supply within normal levels for the next {} days.",
                    threshold_days
                ),
                suggestion: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_warns() {
        assert_eq!(classify_alert(DaysRemaining::Finite(29.9), 30.0), Ok(AlertLevel::Warning));
        assert_eq!(classify_alert(DaysRemaining::Finite(0.0), 30.0), Ok(AlertLevel::Warning));
    }

    #[test]
    fn test_at_or_above_threshold_is_ok() {
        assert_eq!(classify_alert(DaysRemaining::Finite(30.0), 30.0), Ok(AlertLevel::Ok));
        assert_eq!(classify_alert(DaysRemaining::Finite(365.0), 30.0), Ok(AlertLevel::Ok));
        assert_eq!(classify_alert(DaysRemaining::Unlimited, 30.0), Ok(AlertLevel::Ok));
    }

    #[test]
    fn test_nan_estimate_is_ok() {
        assert_eq!(classify_alert(DaysRemaining::Finite(f64::NAN), 30.0), Ok(AlertLevel::Ok));
    }

    #[test]
    fn test_threshold_must_be_positive() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    classify_alert(DaysRemaining::Finite(1.0), bad),
                    Err(InvalidInputError::NonPositiveThreshold(_))
                ),
                "threshold {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_warning_banner_truncates_days() {
        let result = ProjectionResult {
            daily_net_balance_m3: -1200.0,
            days_remaining: DaysRemaining::Finite(12.8),
            alert_level: AlertLevel::Warning,
        };
        let alert = SupplyAlert::from_projection(&result, 30.0);
        assert_eq!(alert.level, AlertLevel::Warning);
        assert!(alert.headline.contains("approximately 12 days"), "got: {}", alert.headline);
        assert_eq!(alert.suggestion.as_deref(), Some(WARNING_SUGGESTION));
    }

    #[test]
    fn test_ok_banner_has_no_suggestion() {
        let result = ProjectionResult {
            daily_net_balance_m3: 300.0,
            days_remaining: DaysRemaining::Unlimited,
            alert_level: AlertLevel::Ok,
        };
        let alert = SupplyAlert::from_projection(&result, 30.0);
        assert_eq!(alert.level, AlertLevel::Ok);
        assert_eq!(alert.headline, "Supply within normal levels for the next 30 days.");
        assert!(alert.suggestion.is_none());
    }
}
