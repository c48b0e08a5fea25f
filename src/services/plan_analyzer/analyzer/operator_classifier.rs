//! Operator record extraction
//!
//! Turns one `RelOp` element into an [`OperatorInfo`]. Object references and
//! warnings are read from the operator's own subtree only; anything below a
//! nested `RelOp` belongs to that input operator.

use super::cost_model::CostModel;
use crate::services::plan_analyzer::models::{OperatorDetails, OperatorInfo};
use crate::services::plan_analyzer::parser::{PlanNode, ValueParser, elements};

/// Builds normalized operator records against one statement's cost
pub struct OperatorClassifier<'a> {
    cost_model: &'a CostModel,
}

impl<'a> OperatorClassifier<'a> {
    pub fn new(cost_model: &'a CostModel) -> Self {
        Self { cost_model }
    }

    pub fn extract<N: PlanNode>(&self, relop: &N) -> OperatorInfo {
        let physical_op = relop.attr_str("PhysicalOp");
        let estimated_cost = relop.attr_f64("EstimatedTotalSubtreeCost");
        let estimated_rows = ValueParser::parse_row_count(relop.attribute("EstimateRows")).unwrap_or(0);
        let (object_name, index_name) = Self::object_reference(relop);

        OperatorInfo {
            node_id: ValueParser::parse(relop.attribute("NodeId")),
            name: physical_op.clone(),
            cost_percentage: self.cost_model.cost_percentage(estimated_cost),
            estimated_rows,
            actual_rows: Self::actual_rows(relop),
            object_name,
            index_name,
            warnings: Self::local_warnings(relop),
            details: OperatorDetails {
                logical_op: relop.attribute("LogicalOp").map(str::to_string),
                physical_op,
                estimated_cost,
                estimated_cpu: ValueParser::parse_f64(relop.attribute("EstimateCPU")),
                estimated_io: ValueParser::parse_f64(relop.attribute("EstimateIO")),
            },
        }
    }

    /// (object, index) from the first object reference.
    ///
    /// The object prefers the `Table` attribute and falls back to `Index`.
    fn object_reference<N: PlanNode>(relop: &N) -> (String, String) {
        let Some(object) = relop.scoped_descendants(elements::OBJECT, elements::REL_OP).next() else {
            return (String::new(), String::new());
        };

        let index_name = object.attr_str("Index");
        let object_name = match object.attribute("Table") {
            Some(table) => table.to_string(),
            None => index_name.clone(),
        };
        (object_name, index_name)
    }

    /// Missing-statistics and plan-affecting-convert notices, in document order per block.
    ///
    /// Only `Warnings` owned by this operator are read. Conversion warnings
    /// that SQL Server reports under `QueryPlan/Warnings` belong to no
    /// operator, so the implicit-conversion rule never sees them.
    fn local_warnings<N: PlanNode>(relop: &N) -> Vec<String> {
        let mut warnings = Vec::new();

        for block in relop.scoped_descendants(elements::WARNINGS, elements::REL_OP) {
            for group in block.descendants_named(elements::COLUMNS_WITH_NO_STATISTICS) {
                for column in group.descendants_named(elements::COLUMN_REFERENCE) {
                    warnings.push(format!("No statistics on column: {}", column.attr_str("Column")));
                }
            }

            for convert in block.descendants_named(elements::PLAN_AFFECTING_CONVERT) {
                warnings.push(format!(
                    "Type conversion in expression ({}) may affect \"{}\" in query plan choice",
                    convert.attr_str("Expression"),
                    convert.attr_str("ConvertIssue")
                ));
            }
        }

        warnings
    }

    /// Runtime row count, from `ActualRows` or summed per-thread counters.
    ///
    /// The sum saturates at `u64::MAX`.
    fn actual_rows<N: PlanNode>(relop: &N) -> Option<u64> {
        if relop.has_attribute("ActualRows") {
            return ValueParser::parse_row_count(relop.attribute("ActualRows"));
        }

        let runtime = relop.children_named(elements::RUN_TIME_INFORMATION).next()?;
        runtime
            .children_named(elements::RUN_TIME_COUNTERS_PER_THREAD)
            .filter_map(|counter| ValueParser::parse_row_count(counter.attribute("ActualRows")))
            .reduce(|total, rows| total.saturating_add(rows))
    }
}
