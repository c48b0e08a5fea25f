//! Implicit conversion diagnostic rules (OP006)

use super::*;
use once_cell::sync::Lazy;
use regex::Regex;

static CONVERT_IMPLICIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CONVERT_IMPLICIT").unwrap());

/// OP006: Implicit conversion
/// Condition: an operator-local warning mentions CONVERT_IMPLICIT.
/// One finding per matching warning, no deduplication.
pub struct OP006ImplicitConversion;

impl OperatorRule for OP006ImplicitConversion {
    fn id(&self) -> &str {
        "OP006"
    }
    fn name(&self) -> &str {
        "Implicit conversion"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        !operator.warnings.is_empty()
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        context
            .operator
            .warnings
            .iter()
            .filter(|text| CONVERT_IMPLICIT_REGEX.is_match(text))
            .map(|_| {
                self.warning(
                    context,
                    Severity::High,
                    format!(
                        "IMPLICIT CONVERSION on {} - Prevents index usage and degrades performance",
                        context.operator.object_display()
                    ),
                )
            })
            .collect()
    }
}

pub fn get_rules() -> Vec<Box<dyn OperatorRule>> {
    vec![Box::new(OP006ImplicitConversion)]
}
