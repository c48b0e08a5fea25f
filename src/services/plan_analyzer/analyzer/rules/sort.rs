//! Sort operator diagnostic rules (OP004)

use super::*;

/// OP004: Sort rows too large
/// Condition: PhysicalOp = "Sort" and estimated rows > 100,000
pub struct OP004LargeSort;

impl OperatorRule for OP004LargeSort {
    fn id(&self) -> &str {
        "OP004"
    }
    fn name(&self) -> &str {
        "Large sort"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        operator.name == "Sort"
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        if context.operator.estimated_rows <= context.thresholds.sort_row_limit {
            return vec![];
        }

        vec![self.warning(
            context,
            Severity::Medium,
            format!(
                "SORT operation on {} rows ({:.1}% cost) - Consider adding an index to avoid sorting",
                format_count(context.operator.estimated_rows),
                context.operator.cost_percentage
            ),
        )]
    }
}

pub fn get_rules() -> Vec<Box<dyn OperatorRule>> {
    vec![Box::new(OP004LargeSort)]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{operator, run};
    use super::*;

    #[test]
    fn test_sort_limit_is_strict() {
        assert!(run(&OP004LargeSort, &operator("Sort", 60.0, 100_000)).is_empty());

        let warnings = run(&OP004LargeSort, &operator("Sort", 12.34, 100_001));
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "SORT operation on 100,001 rows (12.3% cost) - Consider adding an index to avoid sorting"
        );
    }
}
