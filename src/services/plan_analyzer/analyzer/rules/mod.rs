//! Operator diagnostic rules
//!
//! Every rule sees every operator, whether or not the operator made it into
//! the expensive list. Rules are grouped by operator family.

pub mod cardinality;
pub mod conversion;
pub mod join;
pub mod lookup;
pub mod scan;
pub mod sort;

use super::thresholds::RuleThresholds;
use crate::services::plan_analyzer::models::*;
use crate::utils::format_count;

// ============================================================================
// Rule Trait and Types
// ============================================================================

/// Context for rule evaluation
pub struct RuleContext<'a> {
    pub operator: &'a OperatorInfo,
    pub thresholds: &'a RuleThresholds,
}

impl<'a> RuleContext<'a> {
    pub fn new(operator: &'a OperatorInfo, thresholds: &'a RuleThresholds) -> Self {
        Self { operator, thresholds }
    }

    /// "(1,234 rows, 42.0% cost)"
    pub fn rows_and_cost(&self) -> String {
        format!(
            "({} rows, {:.1}% cost)",
            format_count(self.operator.estimated_rows),
            self.operator.cost_percentage
        )
    }
}

/// Diagnostic rule trait
pub trait OperatorRule: Send + Sync {
    /// Rule ID (e.g., "OP001")
    fn id(&self) -> &str;

    /// Rule name
    fn name(&self) -> &str;

    /// Check if rule applies to this operator
    fn applicable_to(&self, operator: &OperatorInfo) -> bool;

    /// Evaluate the rule; a rule may report several findings for one operator
    fn evaluate(&self, context: &RuleContext) -> Vec<PlanWarning>;

    /// Build a finding located at the context's operator
    fn warning(&self, context: &RuleContext, severity: Severity, message: String) -> PlanWarning {
        PlanWarning {
            rule_id: self.id().to_string(),
            severity,
            node_path: Some(context.operator.node_path()),
            message,
        }
    }
}

// ============================================================================
// Rule Registry
// ============================================================================

/// Get all registered rules, in evaluation order
pub fn get_all_rules() -> Vec<Box<dyn OperatorRule>> {
    let mut rules: Vec<Box<dyn OperatorRule>> = Vec::new();

    // Operator kind rules (OP001-OP005), at most one fires per operator
    rules.extend(scan::get_rules());
    rules.extend(lookup::get_rules());
    rules.extend(sort::get_rules());
    rules.extend(join::get_rules());

    // Operator-local warning rules (OP006)
    rules.extend(conversion::get_rules());

    // Runtime statistics rules (OP007)
    rules.extend(cardinality::get_rules());

    rules
}
