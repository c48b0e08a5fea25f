//! Bookmark lookup diagnostic rules (OP003)

use super::*;

/// OP003: Key / RID lookup
/// Condition: PhysicalOp is "Key Lookup" or "RID Lookup"
pub struct OP003BookmarkLookup;

impl OperatorRule for OP003BookmarkLookup {
    fn id(&self) -> &str {
        "OP003"
    }
    fn name(&self) -> &str {
        "Bookmark lookup"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        matches!(operator.name.as_str(), "Key Lookup" | "RID Lookup")
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        vec![self.warning(
            context,
            Severity::Medium,
            format!(
                "{} on {} {} - Consider creating a covering index with INCLUDE columns",
                context.operator.name.to_uppercase(),
                context.operator.object_display(),
                context.rows_and_cost()
            ),
        )]
    }
}

pub fn get_rules() -> Vec<Box<dyn OperatorRule>> {
    vec![Box::new(OP003BookmarkLookup)]
}
