//! Scan operator diagnostic rules (OP001-OP002)
//!
//! ## Rule List:
//! - OP001: Table scan (heap read end to end)
//! - OP002: Costly clustered index scan

use super::*;

/// OP001: Table scan
/// Condition: PhysicalOp = "Table Scan", regardless of cost share
pub struct OP001TableScan;

impl OperatorRule for OP001TableScan {
    fn id(&self) -> &str {
        "OP001"
    }
    fn name(&self) -> &str {
        "Table scan"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        operator.name == "Table Scan"
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        vec![self.warning(
            context,
            Severity::High,
            format!(
                "TABLE SCAN on {} {} - Consider adding an index",
                context.operator.object_display(),
                context.rows_and_cost()
            ),
        )]
    }
}

/// OP002: Clustered index scan
/// Condition: PhysicalOp = "Clustered Index Scan" and cost share > 20%
pub struct OP002ClusteredIndexScan;

impl OperatorRule for OP002ClusteredIndexScan {
    fn id(&self) -> &str {
        "OP002"
    }
    fn name(&self) -> &str {
        "Clustered index scan"
    }

    fn applicable_to(&self, operator: &OperatorInfo) -> bool {
        operator.name == "Clustered Index Scan"
    }

    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning> {
        if context.operator.cost_percentage <= context.thresholds.clustered_scan_percentage {
            return vec![];
        }

        vec![self.warning(
            context,
            Severity::Medium,
            format!(
                "CLUSTERED INDEX SCAN on {} {} - Consider adding a non-clustered index",
                context.operator.object_display(),
                context.rows_and_cost()
            ),
        )]
    }
}

pub fn get_rules() -> Vec<Box<dyn OperatorRule>> {
    vec![Box::new(OP001TableScan), Box::new(OP002ClusteredIndexScan)]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{operator, run};
    use super::*;

    #[test]
    fn test_table_scan_fires_at_any_cost() {
        let warnings = run(&OP001TableScan, &operator("Table Scan", 0.5, 42));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::High);
        assert_eq!(
            warnings[0].message,
            "TABLE SCAN on [dbo].[Orders] (42 rows, 0.5% cost) - Consider adding an index"
        );
        assert_eq!(warnings[0].node_path.as_deref(), Some("Table Scan (NodeId=3)"));
    }

    #[test]
    fn test_clustered_scan_needs_more_than_twenty_percent() {
        assert!(run(&OP002ClusteredIndexScan, &operator("Clustered Index Scan", 20.0, 10)).is_empty());

        let warnings = run(&OP002ClusteredIndexScan, &operator("Clustered Index Scan", 20.5, 10));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Medium);
        assert!(warnings[0].message.starts_with("CLUSTERED INDEX SCAN on [dbo].[Orders]"));
    }

    #[test]
    fn test_scan_rules_ignore_other_operators() {
        assert!(run(&OP001TableScan, &operator("Index Scan", 90.0, 10)).is_empty());
        assert!(run(&OP002ClusteredIndexScan, &operator("Table Scan", 90.0, 10)).is_empty());
    }
}
