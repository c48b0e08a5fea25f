//! Plan-level warnings (PL001-PL002)
//!
//! Markers that describe the plan as a whole rather than one operator's
//! cost profile: missing join predicates and unmatched filtered indexes.
//!
//! ## Rule List:
//! - PL001: No join predicate (cartesian product)
//! - PL002: Unmatched indexes

use crate::services::plan_analyzer::models::{PlanWarning, Severity};
use crate::services::plan_analyzer::parser::{PlanNode, ValueParser, elements};

pub struct PlanWarningCollector;

impl PlanWarningCollector {
    /// Append plan-level findings for every `Warnings` block, in document order
    pub fn collect<N: PlanNode>(root: &N, warnings: &mut Vec<PlanWarning>) {
        for block in root.descendants_named(elements::WARNINGS) {
            if Self::has_no_join_predicate(&block) {
                warnings.push(PlanWarning {
                    rule_id: "PL001".to_string(),
                    severity: Severity::High,
                    node_path: None,
                    message: "NO JOIN PREDICATE - Cartesian product detected! This will multiply all rows from both tables."
                        .to_string(),
                });
            }

            for _ in 0..Self::unmatched_index_count(&block) {
                warnings.push(PlanWarning {
                    rule_id: "PL002".to_string(),
                    severity: Severity::Medium,
                    node_path: None,
                    message: "UNMATCHED INDEXES - Some indexes could not be matched to query".to_string(),
                });
            }
        }
    }

    /// Element or attribute form; one alert per block either way
    fn has_no_join_predicate<N: PlanNode>(block: &N) -> bool {
        block.has_descendant(elements::NO_JOIN_PREDICATE)
            || ValueParser::parse_bool(block.attribute(elements::NO_JOIN_PREDICATE))
    }

    /// One per `UnmatchedIndexes` element; the attribute alone counts once
    fn unmatched_index_count<N: PlanNode>(block: &N) -> usize {
        let count = block.descendants_named(elements::UNMATCHED_INDEXES).count();
        if count == 0 && ValueParser::parse_bool(block.attribute(elements::UNMATCHED_INDEXES)) {
            1
        } else {
            count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::plan_analyzer::parser::ShowplanNode;

    fn collect(xml_body: &str) -> Vec<PlanWarning> {
        let xml = format!(
            r#"<ShowPlanXML xmlns="http://schemas.microsoft.com/sqlserver/2004/07/showplan">{}</ShowPlanXML>"#,
            xml_body
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let mut out = Vec::new();
        PlanWarningCollector::collect(&ShowplanNode::root(&doc), &mut out);
        out
    }

    #[test]
    fn test_no_join_predicate_element() {
        let warnings = collect("<QueryPlan><Warnings><NoJoinPredicate /></Warnings></QueryPlan>");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule_id, "PL001");
        assert_eq!(warnings[0].severity, Severity::High);
        assert_eq!(warnings[0].node_path, None);
    }

    #[test]
    fn test_no_join_predicate_attribute_and_element_count_once() {
        let warnings = collect(r#"<Warnings NoJoinPredicate="true"><NoJoinPredicate /></Warnings>"#);
        assert_eq!(warnings.len(), 1);

        assert!(collect(r#"<Warnings NoJoinPredicate="false" />"#).is_empty());
    }

    #[test]
    fn test_each_unmatched_indexes_element_alerts() {
        let warnings = collect(
            r#"<Warnings UnmatchedIndexes="true">
                 <UnmatchedIndexes><Parameterization /></UnmatchedIndexes>
                 <UnmatchedIndexes><Parameterization /></UnmatchedIndexes>
               </Warnings>"#,
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.rule_id == "PL002" && w.severity == Severity::Medium));
    }

    #[test]
    fn test_unmatched_indexes_attribute_alone_alerts_once() {
        assert_eq!(collect(r#"<Warnings UnmatchedIndexes="1" />"#).len(), 1);
    }

    #[test]
    fn test_blocks_are_reported_in_document_order() {
        let warnings = collect(
            r#"<Warnings><UnmatchedIndexes /></Warnings>
               <RelOp><Warnings><NoJoinPredicate /></Warnings></RelOp>"#,
        );
        let ids: Vec<&str> = warnings.iter().map(|w| w.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["PL002", "PL001"]);
    }

    #[test]
    fn test_other_warning_markers_are_ignored() {
        assert!(collect(r#"<Warnings><SpillToTempDb SpillLevel="1" /></Warnings>"#).is_empty());
    }
}
