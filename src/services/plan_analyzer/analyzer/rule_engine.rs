//! Rule engine
//!
//! Drives one pass over a showplan: cost model first, then every operator
//! through the classifier and the operator rules, then missing indexes and
//! plan-level warnings. All findings go into accumulators owned by the call.

use super::cost_model::CostModel;
use super::missing_index::MissingIndexExtractor;
use super::operator_classifier::OperatorClassifier;
use super::plan_warnings::PlanWarningCollector;
use super::rules::{OperatorRule, RuleContext, get_all_rules};
use super::thresholds::RuleThresholds;
use crate::services::plan_analyzer::models::*;
use crate::services::plan_analyzer::parser::{PlanNode, elements};
use crate::utils::collapse_and_truncate;

/// Statement text is cut to this many characters in the summary
pub const STATEMENT_DISPLAY_LEN: usize = 200;

/// Rule engine for showplan diagnostics
pub struct RuleEngine {
    thresholds: RuleThresholds,
    rules: Vec<Box<dyn OperatorRule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Create a new rule engine with default thresholds
    pub fn new() -> Self {
        Self { thresholds: RuleThresholds::default(), rules: get_all_rules() }
    }

    pub fn with_thresholds(thresholds: RuleThresholds) -> Self {
        Self { thresholds, rules: get_all_rules() }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Analyze one parsed showplan.
    ///
    /// The engine holds no per-analysis state, so repeated calls on the same
    /// input produce equal results.
    pub fn analyze<N: PlanNode>(&self, root: &N) -> PlanAnalysisResult {
        let cost_model = CostModel::from_plan(root);
        let classifier = OperatorClassifier::new(&cost_model);

        let mut expensive_operators = Vec::new();
        let mut warnings = Vec::new();
        let mut missing_indexes = Vec::new();
        let mut operator_count = 0;
        let mut is_actual_plan = false;

        for relop in root.descendants_named(elements::REL_OP) {
            let operator = classifier.extract(&relop);
            operator_count += 1;
            is_actual_plan |= operator.actual_rows.is_some();

            self.evaluate_operator(&operator, &mut warnings);

            if self.thresholds.is_expensive(operator.cost_percentage) {
                tracing::debug!(
                    "Expensive operator {} at {:.1}%",
                    operator.node_path(),
                    operator.cost_percentage
                );
                expensive_operators.push(operator);
            }
        }
        tracing::debug!("Classified {} operators, {} findings", operator_count, warnings.len());

        MissingIndexExtractor::extract(root, &mut missing_indexes);
        PlanWarningCollector::collect(root, &mut warnings);

        let summary = PlanSummary {
            total_cost: cost_model.total_cost(),
            statement_text: Self::statement_attribute(root, "StatementText")
                .map(|text| collapse_and_truncate(&text, STATEMENT_DISPLAY_LEN)),
            optimization_level: Self::statement_attribute(root, "StatementOptmLevel"),
            is_actual_plan,
            operator_count,
        };

        tracing::info!(
            "Plan analyzed: {} operators, {} expensive, {} warnings, {} missing indexes",
            operator_count,
            expensive_operators.len(),
            warnings.len(),
            missing_indexes.len()
        );

        PlanAnalysisResult {
            summary,
            threshold_percentage: self.thresholds.expensive_percentage,
            expensive_operators,
            warnings,
            missing_indexes,
        }
    }

    /// Run every applicable rule against one operator, appending findings in rule order
    fn evaluate_operator(&self, operator: &OperatorInfo, warnings: &mut Vec<PlanWarning>) {
        let context = RuleContext::new(operator, &self.thresholds);

        for rule in self.rules.iter().filter(|rule| rule.applicable_to(operator)) {
            let findings = rule.evaluate(&context);
            if !findings.is_empty() {
                tracing::debug!(
                    "Rule {} ({}) fired {} time(s) on {}",
                    rule.id(),
                    rule.name(),
                    findings.len(),
                    operator.node_path()
                );
            }
            warnings.extend(findings);
        }
    }

    /// First non-blank value of `attribute` over the plan's statements
    fn statement_attribute<N: PlanNode>(root: &N, attribute: &str) -> Option<String> {
        root.descendants_named(elements::STMT_SIMPLE)
            .filter_map(|stmt| stmt.attribute(attribute).map(str::to_string))
            .find(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::plan_analyzer::parser::ShowplanNode;

    fn analyze_with(engine: &RuleEngine, body: &str) -> PlanAnalysisResult {
        let xml = format!(
            r#"<ShowPlanXML xmlns="http://schemas.microsoft.com/sqlserver/2004/07/showplan"><BatchSequence><Batch><Statements>{}</Statements></Batch></BatchSequence></ShowPlanXML>"#,
            body
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        engine.analyze(&ShowplanNode::root(&doc))
    }

    fn analyze(body: &str) -> PlanAnalysisResult {
        analyze_with(&RuleEngine::new(), body)
    }

    #[test]
    fn test_operator_findings_precede_plan_level_findings() {
        let result = analyze(
            r#"<StmtSimple StatementSubTreeCost="10">
                 <QueryPlan>
                   <Warnings><NoJoinPredicate /></Warnings>
                   <RelOp NodeId="0" PhysicalOp="Nested Loops" EstimatedTotalSubtreeCost="10">
                     <NestedLoops>
                       <RelOp NodeId="1" PhysicalOp="Table Scan" EstimateRows="50" EstimatedTotalSubtreeCost="4">
                         <TableScan><Object Table="[A]" /></TableScan>
                       </RelOp>
                       <RelOp NodeId="2" PhysicalOp="Table Scan" EstimateRows="60" EstimatedTotalSubtreeCost="5">
                         <TableScan><Object Table="[B]" /></TableScan>
                       </RelOp>
                     </NestedLoops>
                   </RelOp>
                 </QueryPlan>
               </StmtSimple>"#,
        );

        let ids: Vec<&str> = result.warnings.iter().map(|w| w.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["OP001", "OP001", "PL001"]);
        assert_eq!(result.warnings[0].node_path.as_deref(), Some("Table Scan (NodeId=1)"));
        assert_eq!(result.summary.operator_count, 3);
        assert_eq!(result.expensive_operators.len(), 3);
    }

    #[test]
    fn test_threshold_filters_expensive_list_but_not_rules() {
        let engine = RuleEngine::with_thresholds(RuleThresholds::with_expensive_percentage(50.0));
        let result = analyze_with(
            &engine,
            r#"<StmtSimple StatementSubTreeCost="100">
                 <RelOp NodeId="7" PhysicalOp="Table Scan" EstimateRows="10" EstimatedTotalSubtreeCost="1">
                   <TableScan><Object Table="[Tiny]" /></TableScan>
                 </RelOp>
               </StmtSimple>"#,
        );

        assert!(result.expensive_operators.is_empty());
        assert_eq!(result.threshold_percentage, 50.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].severity, Severity::High);
    }

    #[test]
    fn test_summary_fields() {
        let result = analyze(
            r#"<StmtSimple StatementText="SELECT *
                    FROM   dbo.Orders" StatementOptmLevel="FULL" StatementSubTreeCost="0.25">
                 <RelOp PhysicalOp="Index Seek" EstimateRows="1" ActualRows="1" EstimatedTotalSubtreeCost="0.25" />
               </StmtSimple>"#,
        );

        assert_eq!(result.summary.total_cost, 0.25);
        assert_eq!(result.summary.statement_text.as_deref(), Some("SELECT * FROM dbo.Orders"));
        assert_eq!(result.summary.optimization_level.as_deref(), Some("FULL"));
        assert!(result.summary.is_actual_plan);
    }

    #[test]
    fn test_estimated_plan_without_statement_text() {
        let result = analyze(r#"<StmtSimple StatementSubTreeCost="1"><RelOp PhysicalOp="Sort" /></StmtSimple>"#);
        assert_eq!(result.summary.statement_text, None);
        assert!(!result.summary.is_actual_plan);
    }

    #[test]
    fn test_repeated_analysis_is_identical() {
        let engine = RuleEngine::new();
        let body = r#"<StmtSimple StatementSubTreeCost="3">
                        <RelOp PhysicalOp="Key Lookup" EstimateRows="12" EstimatedTotalSubtreeCost="1">
                          <IndexScan Lookup="true"><Object Table="[T]" Index="[PK_T]" /></IndexScan>
                        </RelOp>
                      </StmtSimple>"#;

        let first = analyze_with(&engine, body);
        let second = analyze_with(&engine, body);
        assert_eq!(first, second);
        assert_eq!(first.warnings.len(), 1);
    }
}
