//! Thresholds for plan diagnostics
//!
//! Defaults reproduce the fixed cutoffs of the analyzer; every value can be
//! overridden from the `[analysis]` section of the configuration file.

/// Threshold set shared by the cost filter and every operator rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleThresholds {
    /// Operators with `cost_percentage >=` this land in the expensive list
    pub expensive_percentage: f64,
    /// Clustered index scans warn above this cost share (strict)
    pub clustered_scan_percentage: f64,
    /// Sorts warn above this many estimated rows (strict)
    pub sort_row_limit: u64,
    /// Hash matches warn above this cost share (strict)
    pub hash_match_percentage: f64,
    /// Row estimates are off when actual/estimated is above this or below its inverse
    pub row_estimate_ratio: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            expensive_percentage: 10.0,
            clustered_scan_percentage: 20.0,
            sort_row_limit: 100_000,
            hash_match_percentage: 25.0,
            row_estimate_ratio: 10.0,
        }
    }
}

impl RuleThresholds {
    /// Default thresholds with a different expensive-operator cutoff
    pub fn with_expensive_percentage(expensive_percentage: f64) -> Self {
        Self { expensive_percentage, ..Self::default() }
    }

    pub fn is_expensive(&self, cost_percentage: f64) -> bool {
        cost_percentage >= self.expensive_percentage
    }

    /// True when `actual / estimated` is strictly outside the tolerated band
    pub fn is_estimate_off(&self, ratio: f64) -> bool {
        ratio > self.row_estimate_ratio || ratio < 1.0 / self.row_estimate_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expensive_cutoff_is_inclusive() {
        let thresholds = RuleThresholds::default();
        assert!(thresholds.is_expensive(10.0));
        assert!(!thresholds.is_expensive(9.999));
    }

    #[test]
    fn test_estimate_band_is_exclusive() {
        let thresholds = RuleThresholds::default();
        assert!(!thresholds.is_estimate_off(10.0));
        assert!(thresholds.is_estimate_off(10.01));
        assert!(!thresholds.is_estimate_off(0.1));
        assert!(thresholds.is_estimate_off(0.099));
    }

    #[test]
    fn test_with_expensive_percentage_keeps_rule_defaults() {
        let thresholds = RuleThresholds::with_expensive_percentage(5.0);
        assert_eq!(thresholds.expensive_percentage, 5.0);
        assert_eq!(thresholds.sort_row_limit, 100_000);
        assert_eq!(thresholds.hash_match_percentage, 25.0);
    }
}
