//! Statement cost and per-operator cost share

use crate::services::plan_analyzer::parser::{PlanNode, elements};

const STATEMENT_SUBTREE_COST: &str = "StatementSubTreeCost";

/// Total statement cost, the denominator for every operator's cost share
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostModel {
    total_cost: f64,
}

impl CostModel {
    pub fn new(total_cost: f64) -> Self {
        Self { total_cost }
    }

    /// Locate the first statement carrying a subtree cost.
    ///
    /// Plans without one (or with an unparsable one) get a total of 0.0; the
    /// analysis still runs but every cost share becomes 0.
    pub fn from_plan<N: PlanNode>(root: &N) -> Self {
        let total_cost = root
            .descendants_named(elements::STMT_SIMPLE)
            .find(|stmt| {
                stmt.attribute(STATEMENT_SUBTREE_COST)
                    .is_some_and(|raw| !raw.trim().is_empty())
            })
            .map(|stmt| stmt.attr_f64(STATEMENT_SUBTREE_COST))
            .unwrap_or(0.0);

        if total_cost > 0.0 {
            tracing::debug!("Statement subtree cost: {:.4}", total_cost);
        } else {
            tracing::debug!("No positive statement cost found, cost percentages will be 0");
        }

        Self { total_cost }
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// `100 * subtree_cost / total_cost`, or 0 when the total is not positive
    pub fn cost_percentage(&self, subtree_cost: f64) -> f64 {
        if self.total_cost > 0.0 { 100.0 * subtree_cost / self.total_cost } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_total() {
        let model = CostModel::new(10.0);
        assert_eq!(model.cost_percentage(5.0), 50.0);
        assert_eq!(model.cost_percentage(10.0), 100.0);
        assert_eq!(model.cost_percentage(0.0), 0.0);
    }

    #[test]
    fn test_zero_total_yields_zero_percentages() {
        let model = CostModel::new(0.0);
        assert_eq!(model.cost_percentage(5.0), 0.0);
        assert_eq!(model.cost_percentage(1e9), 0.0);
    }

    #[test]
    fn test_percentage_is_reproducible() {
        let model = CostModel::new(0.0328);
        let first = model.cost_percentage(0.0071);
        let second = model.cost_percentage(0.0071);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_from_plan_uses_first_statement_with_cost() {
        use crate::services::plan_analyzer::parser::ShowplanNode;

        let xml = r#"<ShowPlanXML xmlns="http://schemas.microsoft.com/sqlserver/2004/07/showplan">
            <StmtSimple StatementText="SET NOCOUNT ON" StatementSubTreeCost="" />
            <StmtSimple StatementSubTreeCost="0.0328" />
            <StmtSimple StatementSubTreeCost="99" />
        </ShowPlanXML>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        assert_eq!(CostModel::from_plan(&ShowplanNode::root(&doc)).total_cost(), 0.0328);
    }

    #[test]
    fn test_from_plan_without_statement_cost() {
        use crate::services::plan_analyzer::parser::ShowplanNode;

        let xml = r#"<ShowPlanXML xmlns="http://schemas.microsoft.com/sqlserver/2004/07/showplan"><StmtSimple /></ShowPlanXML>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        assert_eq!(CostModel::from_plan(&ShowplanNode::root(&doc)).total_cost(), 0.0);
    }
}
