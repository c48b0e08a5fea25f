//! Join operator diagnostic rules (OP005)

use super::*;

/// OP005: Costly hash match
/// Condition: PhysicalOp = "Hash Match" and cost share > 25%
pub struct OP005CostlyHashMatch;

impl OperatorRule for OP005CostlyHashMatch {
    fn id(&self) -> &str {
        "OP005"
    }
    fn name(&self) -> &str {
        "Costly hash match"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        operator.name == "Hash Match"
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        if context.operator.cost_percentage <= context.thresholds.hash_match_percentage {
            return vec![];
        }

        vec![self.warning(
            context,
            Severity::Medium,
            format!(
                "HASH MATCH join {} - Consider adding indexes to enable merge or nested loop joins",
                context.rows_and_cost()
            ),
        )]
    }
}

pub fn get_rules() -> Vec<Box<dyn OperatorRule>> {
    vec![Box::new(OP005CostlyHashMatch)]
}
