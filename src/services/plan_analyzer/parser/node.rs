//! PlanNode accessor
//!
//! The analyzers only ever need two things from the document tree: attribute
//! reads with typed defaults, and descendant search by element name inside
//! the showplan namespace. [`PlanNode`] captures exactly that, and
//! [`ShowplanNode`] implements it once over `roxmltree`.

use super::value_parser::ValueParser;
use std::str::FromStr;

/// XML namespace of every showplan element
pub const SHOWPLAN_NAMESPACE: &str = "http://schemas.microsoft.com/sqlserver/2004/07/showplan";

/// Element names used by the analyzers
pub mod elements {
    pub const STMT_SIMPLE: &str = "StmtSimple";
    pub const QUERY_PLAN: &str = "QueryPlan";
    pub const REL_OP: &str = "RelOp";
    pub const OBJECT: &str = "Object";
    pub const WARNINGS: &str = "Warnings";
    pub const COLUMNS_WITH_NO_STATISTICS: &str = "ColumnsWithNoStatistics";
    pub const COLUMN_REFERENCE: &str = "ColumnReference";
    pub const PLAN_AFFECTING_CONVERT: &str = "PlanAffectingConvert";
    pub const RUN_TIME_INFORMATION: &str = "RunTimeInformation";
    pub const RUN_TIME_COUNTERS_PER_THREAD: &str = "RunTimeCountersPerThread";
    pub const MISSING_INDEXES: &str = "MissingIndexes";
    pub const MISSING_INDEX_GROUP: &str = "MissingIndexGroup";
    pub const MISSING_INDEX: &str = "MissingIndex";
    pub const COLUMN_GROUP: &str = "ColumnGroup";
    pub const COLUMN: &str = "Column";
    pub const NO_JOIN_PREDICATE: &str = "NoJoinPredicate";
    pub const UNMATCHED_INDEXES: &str = "UnmatchedIndexes";
}

/// Minimal read-only view over one element of a parsed showplan
pub trait PlanNode: Copy + PartialEq {
    /// Local element name (without namespace prefix)
    fn name(&self) -> &str;

    /// Whether this element lives in the showplan namespace
    fn in_showplan_namespace(&self) -> bool;

    /// Raw attribute value, `None` when absent
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Strict descendants named `name` in the showplan namespace, in document order
    fn descendants_named(&self, name: &'static str) -> impl Iterator<Item = Self>;

    /// Direct children named `name` in the showplan namespace
    fn children_named(&self, name: &'static str) -> impl Iterator<Item = Self>;

    /// Direct child elements of any name or namespace, in document order
    fn child_elements(&self) -> impl Iterator<Item = Self>;

    fn is_named(&self, name: &str) -> bool {
        self.in_showplan_namespace() && self.name() == name
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// String attribute, empty when absent
    fn attr_str(&self, name: &str) -> String {
        self.attribute(name).unwrap_or_default().to_string()
    }

    /// Typed attribute with a caller supplied default for absent or unparsable values
    fn attr_or<T: FromStr>(&self, name: &str, default: T) -> T {
        ValueParser::parse_or(self.attribute(name), default)
    }

    /// Float attribute, 0.0 when absent or unparsable
    fn attr_f64(&self, name: &str) -> f64 {
        let raw = self.attribute(name);
        match ValueParser::parse_f64(raw) {
            Some(v) => v,
            None => {
                if let Some(raw) = raw
                    && !raw.trim().is_empty()
                {
                    tracing::debug!(
                        "Unparsable numeric attribute {}='{}' on <{}>, using 0",
                        name,
                        raw,
                        self.name()
                    );
                }
                0.0
            },
        }
    }

    fn first_descendant(&self, name: &'static str) -> Option<Self> {
        self.descendants_named(name).next()
    }

    fn has_descendant(&self, name: &'static str) -> bool {
        self.first_descendant(name).is_some()
    }

    /// Descendants named `name` that are not inside a nested `boundary` element.
    ///
    /// Used on operators so that a join does not pick up objects or warnings
    /// belonging to its input operators. A nested `boundary` element is itself
    /// yielded when it matches `name`, but never entered, so each node of the
    /// subtree is visited at most once.
    fn scoped_descendants(
        &self,
        name: &'static str,
        boundary: &'static str,
    ) -> impl Iterator<Item = Self> {
        let mut stack: Vec<Self> = self.child_elements().collect();
        stack.reverse();

        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                if !node.is_named(boundary) {
                    // reversed so the first child is popped next
                    let start = stack.len();
                    stack.extend(node.child_elements());
                    stack[start..].reverse();
                }
                if node.is_named(name) {
                    return Some(node);
                }
            }
            None
        })
    }
}

/// [`PlanNode`] over a `roxmltree` element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowplanNode<'a, 'input>(roxmltree::Node<'a, 'input>);

impl<'a, 'input> ShowplanNode<'a, 'input> {
    pub fn new(node: roxmltree::Node<'a, 'input>) -> Self {
        Self(node)
    }

    /// Root element of a parsed document
    pub fn root(document: &'a roxmltree::Document<'input>) -> Self {
        Self(document.root_element())
    }
}

fn matches_element(node: &roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(SHOWPLAN_NAMESPACE)
}

impl<'a, 'input> PlanNode for ShowplanNode<'a, 'input> {
    fn name(&self) -> &str {
        self.0.tag_name().name()
    }

    fn in_showplan_namespace(&self) -> bool {
        self.0.tag_name().namespace() == Some(SHOWPLAN_NAMESPACE)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.0.attribute(name)
    }

    fn descendants_named(&self, name: &'static str) -> impl Iterator<Item = Self> {
        // roxmltree yields the node itself first
        self.0
            .descendants()
            .skip(1)
            .filter(move |node| matches_element(node, name))
            .map(ShowplanNode)
    }

    fn children_named(&self, name: &'static str) -> impl Iterator<Item = Self> {
        self.0
            .children()
            .filter(move |node| matches_element(node, name))
            .map(ShowplanNode)
    }

    fn child_elements(&self) -> impl Iterator<Item = Self> {
        self.0.children().filter(|node| node.is_element()).map(ShowplanNode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<ShowPlanXML xmlns="http://schemas.microsoft.com/sqlserver/2004/07/showplan">
  <RelOp NodeId="0" PhysicalOp="Nested Loops" EstimateRows="12.7">
    <NestedLoops>
      <RelOp NodeId="1" PhysicalOp="Index Seek">
        <IndexScan><Object Table="[Orders]" Index="[IX_Orders]" /></IndexScan>
      </RelOp>
    </NestedLoops>
  </RelOp>
  <other:RelOp xmlns:other="urn:elsewhere" NodeId="9" />
</ShowPlanXML>"#;

    #[test]
    fn test_descendants_are_namespace_scoped_and_in_document_order() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let root = ShowplanNode::root(&doc);
        let ids: Vec<i32> = root.descendants_named(elements::REL_OP).map(|n| n.attr_or("NodeId", -1)).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_descendants_exclude_self() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let root = ShowplanNode::root(&doc);
        let outer = root.first_descendant(elements::REL_OP).unwrap();
        assert_eq!(outer.descendants_named(elements::REL_OP).count(), 1);
    }

    #[test]
    fn test_attribute_defaults() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let outer = ShowplanNode::root(&doc).first_descendant(elements::REL_OP).unwrap();
        assert_eq!(outer.attr_str("PhysicalOp"), "Nested Loops");
        assert_eq!(outer.attr_str("LogicalOp"), "");
        assert_eq!(outer.attr_f64("EstimateRows"), 12.7);
        assert_eq!(outer.attr_f64("EstimatedTotalSubtreeCost"), 0.0);
        assert_eq!(outer.attr_or("NodeId", -1), 0);
    }

    #[test]
    fn test_scoped_descendants_stop_at_nested_operators() {
        let doc = roxmltree::Document::parse(DOC).unwrap();
        let root = ShowplanNode::root(&doc);
        let ops: Vec<_> = root.descendants_named(elements::REL_OP).collect();

        assert_eq!(ops[0].scoped_descendants(elements::OBJECT, elements::REL_OP).count(), 0);
        assert_eq!(ops[1].scoped_descendants(elements::OBJECT, elements::REL_OP).count(), 1);
        // the unscoped search still sees the nested object
        assert!(ops[0].has_descendant(elements::OBJECT));
    }

    #[test]
    fn test_scoped_descendants_keep_document_order_around_nested_operators() {
        let doc = roxmltree::Document::parse(
            r#"<ShowPlanXML xmlns="http://schemas.microsoft.com/sqlserver/2004/07/showplan">
  <RelOp NodeId="0">
    <Hash>
      <Object Table="[A]" />
      <RelOp NodeId="1">
        <Object Table="[Inner]" />
        <RelOp NodeId="2"><TableScan><Object Table="[Deep]" /></TableScan></RelOp>
      </RelOp>
      <Wrapper><Object Table="[B]" /></Wrapper>
    </Hash>
    <Object Table="[C]" />
  </RelOp>
</ShowPlanXML>"#,
        )
        .unwrap();
        let outer = ShowplanNode::root(&doc).first_descendant(elements::REL_OP).unwrap();

        let tables: Vec<String> = outer
            .scoped_descendants(elements::OBJECT, elements::REL_OP)
            .map(|n| n.attr_str("Table"))
            .collect();
        assert_eq!(tables, vec!["[A]", "[B]", "[C]"]);

        // only the direct input operator is reachable, not its own inputs
        let inputs: Vec<i32> = outer
            .scoped_descendants(elements::REL_OP, elements::REL_OP)
            .map(|n| n.attr_or("NodeId", -1))
            .collect();
        assert_eq!(inputs, vec![1]);
    }
}
