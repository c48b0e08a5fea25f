//! Cardinality estimation diagnostic rules (OP007)
//!
//! Only actual execution plans carry runtime row counts, so this rule is
//! silent on estimated plans.

use super::*;

/// OP007: Row estimation error
/// Condition: actual/estimated > 10 or < 0.1, both counts known and non-zero
pub struct OP007RowEstimationError;

impl OperatorRule for OP007RowEstimationError {
    fn id(&self) -> &str {
        "OP007"
    }
    fn name(&self) -> &str {
        "Row estimation error"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        operator.estimated_rows > 0 && matches!(operator.actual_rows, Some(actual) if actual > 0)
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        let estimated = context.operator.estimated_rows;
        let Some(actual) = context.operator.actual_rows else {
            return vec![];
        };

        let ratio = actual as f64 / estimated as f64;
        if !context.thresholds.is_estimate_off(ratio) {
            return vec![];
        }

        vec![self.warning(
            context,
            Severity::Medium,
            format!(
                "ROW ESTIMATION ERROR on {}: estimated {}, actual {} - Update statistics or check for parameter sniffing",
                context.operator.object_display(),
                format_count(estimated),
                format_count(actual)
            ),
        )]
    }
}

pub fn get_rules() -> Vec<Box<dyn OperatorRule>> {
    vec![Box::new(OP007RowEstimationError)]
}
