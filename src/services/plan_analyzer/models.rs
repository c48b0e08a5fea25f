//! Plan analysis data models
//!
//! Every record here is built once during a single traversal of one showplan
//! and never updated afterwards.

use std::fmt;

// ============================================================================
// Operators
// ============================================================================

/// Auxiliary attributes of an operator, kept for display
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorDetails {
    pub logical_op: Option<String>,
    pub physical_op: String,
    /// Own subtree cost (`EstimatedTotalSubtreeCost`)
    pub estimated_cost: f64,
    pub estimated_cpu: Option<f64>,
    pub estimated_io: Option<f64>,
}

/// One row per `RelOp` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorInfo {
    /// `NodeId` attribute, when the plan carries one
    pub node_id: Option<i32>,
    /// Physical operator kind, e.g. "Table Scan"; may be empty
    pub name: String,
    /// Share of the statement cost in [0, 100]; 0 when the total is unknown
    pub cost_percentage: f64,
    /// Estimated rows, floored
    pub estimated_rows: u64,
    /// Only set for actual execution plans
    pub actual_rows: Option<u64>,
    pub object_name: String,
    pub index_name: String,
    /// Operator-local warnings (missing statistics, plan affecting converts)
    pub warnings: Vec<String>,
    pub details: OperatorDetails,
}

impl OperatorInfo {
    /// Human readable location used in warnings, e.g. "Sort (NodeId=4)"
    pub fn node_path(&self) -> String {
        let name = if self.name.is_empty() { "Operator" } else { self.name.as_str() };
        match self.node_id {
            Some(id) => format!("{} (NodeId={})", name, id),
            None => name.to_string(),
        }
    }

    /// Object name for display, "N/A" when the operator touches no object
    pub fn object_display(&self) -> &str {
        if self.object_name.is_empty() { "N/A" } else { &self.object_name }
    }
}

// ============================================================================
// Missing indexes
// ============================================================================

/// One missing-index suggestion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingIndex {
    /// Estimated improvement in percent
    pub impact: f64,
    /// Undecorated dotted identifier, e.g. "dbo.Employees"
    pub table_name: String,
    pub equality_columns: Vec<String>,
    pub inequality_columns: Vec<String>,
    pub included_columns: Vec<String>,
    /// Synthesized from the fields above
    pub create_statement: String,
}

// ============================================================================
// Warnings
// ============================================================================

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Medium = 1,
    High = 2,
}

impl Severity {
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Medium => "🟡",
            Severity::High => "🔴",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// A finding emitted by an operator rule or by the plan-level collector
#[derive(Debug, Clone, PartialEq)]
pub struct PlanWarning {
    /// Rule identifier, e.g. "OP001" or "PL001"
    pub rule_id: String,
    pub severity: Severity,
    /// Operator location, `None` for plan-level findings
    pub node_path: Option<String>,
    pub message: String,
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.message)
    }
}

// ============================================================================
// Analysis result
// ============================================================================

/// Statement level facts shown in the report header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSummary {
    /// `StatementSubTreeCost` of the first statement carrying one
    pub total_cost: f64,
    pub statement_text: Option<String>,
    pub optimization_level: Option<String>,
    /// True when at least one operator carries runtime counters
    pub is_actual_plan: bool,
    pub operator_count: usize,
}

/// Immutable result of one analysis call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanAnalysisResult {
    pub summary: PlanSummary,
    /// Threshold the expensive list was filtered with
    pub threshold_percentage: f64,
    /// Operators at or above the threshold, in encounter order
    pub expensive_operators: Vec<OperatorInfo>,
    /// Operator rule findings followed by plan-level findings
    pub warnings: Vec<PlanWarning>,
    /// Suggestions in encounter order
    pub missing_indexes: Vec<MissingIndex>,
}

impl PlanAnalysisResult {
    /// Expensive operators by cost share, highest first; ties keep encounter order
    pub fn expensive_operators_by_cost(&self) -> Vec<&OperatorInfo> {
        let mut ops: Vec<&OperatorInfo> = self.expensive_operators.iter().collect();
        ops.sort_by(|a, b| b.cost_percentage.total_cmp(&a.cost_percentage));
        ops
    }

    /// Missing indexes by impact, highest first; ties keep encounter order
    pub fn missing_indexes_by_impact(&self) -> Vec<&MissingIndex> {
        let mut indexes: Vec<&MissingIndex> = self.missing_indexes.iter().collect();
        indexes.sort_by(|a, b| b.impact.total_cmp(&a.impact));
        indexes
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.warnings.iter().filter(|w| w.severity == severity).count()
    }
}
