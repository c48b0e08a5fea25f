//! Text report for one analysis result
//!
//! Formats stored values only; nothing is recomputed here.

use std::fmt;
use std::path::Path;

use super::models::{MissingIndex, OperatorInfo, PlanAnalysisResult};
use crate::utils::{format_count, format_threshold};

const RULE_WIDTH: usize = 80;

const BEST_PRACTICES: [&str; 6] = [
    "Focus on operators with >25% cost first",
    "Table scans and index scans indicate missing indexes",
    "Key lookups can be fixed with covering indexes (INCLUDE clause)",
    "Implicit conversions prevent index usage - match data types",
    "Large row estimation errors suggest outdated statistics",
    "Test index changes in non-production environment first",
];

/// Renders the banner and report for one analyzed file
pub struct ReportRenderer<'a> {
    path: &'a Path,
    result: &'a PlanAnalysisResult,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(path: &'a Path, result: &'a PlanAnalysisResult) -> Self {
        Self { path, result }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.result.summary;

        writeln!(f, "\n📊 Summary:")?;
        if let Some(text) = &summary.statement_text {
            writeln!(f, "   Statement: {}", text)?;
        }
        writeln!(f, "   Plan Type: {}", if summary.is_actual_plan { "Actual" } else { "Estimated" })?;
        if let Some(level) = &summary.optimization_level {
            writeln!(f, "   Optimization Level: {}", level)?;
        }
        writeln!(f, "   Operators: {}", format_count(summary.operator_count as u64))?;
        writeln!(f, "   Total Query Cost: {:.4}", summary.total_cost)?;
        writeln!(
            f,
            "   Expensive Operators (>{}%): {}",
            format_threshold(self.result.threshold_percentage),
            self.result.expensive_operators.len()
        )?;
        writeln!(f, "   Missing Indexes: {}", self.result.missing_indexes.len())?;
        writeln!(f, "   Warnings: {}", self.result.warnings.len())
    }

    fn write_operator(f: &mut fmt::Formatter<'_>, op: &OperatorInfo) -> fmt::Result {
        writeln!(f, "\n   Operator: {}", op.name)?;
        if let Some(id) = op.node_id {
            writeln!(f, "   Node Id: {}", id)?;
        }
        writeln!(f, "   Cost: {:.1}%", op.cost_percentage)?;
        writeln!(f, "   Object: {}", op.object_display())?;
        if !op.index_name.is_empty() {
            writeln!(f, "   Index: {}", op.index_name)?;
        }
        writeln!(f, "   Estimated Rows: {}", format_count(op.estimated_rows))?;
        if let Some(actual) = op.actual_rows {
            writeln!(f, "   Actual Rows: {}", format_count(actual))?;
        }
        for warning in &op.warnings {
            writeln!(f, "   ⚠️  {}", warning)?;
        }
        Ok(())
    }

    fn write_missing_index(f: &mut fmt::Formatter<'_>, position: usize, idx: &MissingIndex) -> fmt::Result {
        writeln!(f, "\n{}. Table: {}", position, idx.table_name)?;
        writeln!(f, "   Impact: {:.1}%", idx.impact)?;
        if !idx.equality_columns.is_empty() {
            writeln!(f, "   Equality Columns: {}", idx.equality_columns.join(", "))?;
        }
        if !idx.inequality_columns.is_empty() {
            writeln!(f, "   Inequality Columns: {}", idx.inequality_columns.join(", "))?;
        }
        if !idx.included_columns.is_empty() {
            writeln!(f, "   Include Columns: {}", idx.included_columns.join(", "))?;
        }
        writeln!(f, "\n   Suggested Index:\n   {}", idx.create_statement)
    }
}

impl fmt::Display for ReportRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy_rule = "=".repeat(RULE_WIDTH);
        let light_rule = "-".repeat(RULE_WIDTH);

        writeln!(f, "\nAnalyzing execution plan: {}", self.path.display())?;
        writeln!(f, "\n{}\nEXECUTION PLAN ANALYSIS REPORT\n{}", heavy_rule, heavy_rule)?;

        self.write_summary(f)?;

        if !self.result.expensive_operators.is_empty() {
            writeln!(
                f,
                "\n🔥 Expensive Operators (>{}% cost):\n{}",
                format_threshold(self.result.threshold_percentage),
                light_rule
            )?;
            for op in self.result.expensive_operators_by_cost() {
                Self::write_operator(f, op)?;
            }
        }

        if !self.result.warnings.is_empty() {
            writeln!(f, "\n⚠️  Warnings and Recommendations:\n{}", light_rule)?;
            for (i, warning) in self.result.warnings.iter().enumerate() {
                writeln!(f, "\n{}. {}", i + 1, warning)?;
            }
        }

        if !self.result.missing_indexes.is_empty() {
            writeln!(f, "\n📋 Missing Index Recommendations:\n{}", light_rule)?;
            for (i, idx) in self.result.missing_indexes_by_impact().into_iter().enumerate() {
                Self::write_missing_index(f, i + 1, idx)?;
            }
        }

        writeln!(f, "\n💡 Best Practices:\n{}", light_rule)?;
        for (i, practice) in BEST_PRACTICES.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, practice)?;
        }

        writeln!(f, "\n{}", heavy_rule)
    }
}
