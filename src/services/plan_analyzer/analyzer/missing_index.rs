//! Missing index extraction and CREATE INDEX synthesis

use crate::services::plan_analyzer::models::MissingIndex;
use crate::services::plan_analyzer::parser::{PlanNode, elements};
use crate::utils::{identifier_parts, quote_identifier, strip_decoration};

/// Synthesized index names are cut to this many characters
pub const MAX_INDEX_NAME_LEN: usize = 60;

/// Equality columns that contribute to the synthesized index name
const NAME_COLUMN_LIMIT: usize = 3;

/// Column usage tag of a `ColumnGroup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnUsage {
    Equality,
    Inequality,
    Include,
}

impl ColumnUsage {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "EQUALITY" => Some(ColumnUsage::Equality),
            "INEQUALITY" => Some(ColumnUsage::Inequality),
            "INCLUDE" => Some(ColumnUsage::Include),
            _ => None,
        }
    }
}

pub struct MissingIndexExtractor;

impl MissingIndexExtractor {
    /// Append one record per suggestion of every `MissingIndexes/MissingIndexGroup`
    pub fn extract<N: PlanNode>(root: &N, missing_indexes: &mut Vec<MissingIndex>) {
        for container in root.descendants_named(elements::MISSING_INDEXES) {
            for group in container.children_named(elements::MISSING_INDEX_GROUP) {
                let impact = group.attr_f64("Impact").max(0.0);
                tracing::debug!("Missing index group with impact {:.2}", impact);

                for suggestion in group.descendants_named(elements::MISSING_INDEX) {
                    missing_indexes.push(Self::build(impact, &suggestion));
                }
            }
        }
    }

    fn build<N: PlanNode>(impact: f64, suggestion: &N) -> MissingIndex {
        let table_parts = Self::table_parts(suggestion);

        let mut equality_columns = Vec::new();
        let mut inequality_columns = Vec::new();
        let mut included_columns = Vec::new();

        for group in suggestion.descendants_named(elements::COLUMN_GROUP) {
            let Some(usage) = ColumnUsage::from_tag(&group.attr_str("Usage")) else {
                tracing::debug!("Skipping column group with usage '{}'", group.attr_str("Usage"));
                continue;
            };

            for column in group.descendants_named(elements::COLUMN) {
                let name = strip_decoration(&column.attr_str("Name"));
                // a column keeps the first role it was reported with
                let seen = equality_columns.contains(&name)
                    || inequality_columns.contains(&name)
                    || included_columns.contains(&name);
                if name.is_empty() || seen {
                    continue;
                }

                match usage {
                    ColumnUsage::Equality => equality_columns.push(name),
                    ColumnUsage::Inequality => inequality_columns.push(name),
                    ColumnUsage::Include => included_columns.push(name),
                }
            }
        }

        let create_statement = generate_create_index(
            &table_parts,
            &equality_columns,
            &inequality_columns,
            &included_columns,
        );

        MissingIndex {
            impact,
            table_name: table_parts.join("."),
            equality_columns,
            inequality_columns,
            included_columns,
            create_statement,
        }
    }

    /// Undecorated identifier parts of the target table.
    ///
    /// A `Schema` attribute is prepended unless `Table` is already qualified.
    fn table_parts<N: PlanNode>(suggestion: &N) -> Vec<String> {
        let table = identifier_parts(&suggestion.attr_str("Table"));
        if table.len() > 1 {
            return table;
        }

        let mut parts = identifier_parts(&suggestion.attr_str("Schema"));
        parts.extend(table);
        parts
    }
}

/// `IX_<table>_<up to three equality columns>`, decoration removed, cut to 60 characters
pub fn generate_index_name(table_parts: &[String], equality: &[String]) -> String {
    let bare_table = table_parts.last().map(String::as_str).unwrap_or_default();
    let columns: Vec<&str> = equality.iter().take(NAME_COLUMN_LIMIT).map(String::as_str).collect();

    format!("IX_{}_{}", bare_table, columns.join("_"))
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"'))
        .take(MAX_INDEX_NAME_LEN)
        .collect()
}

/// Nonclustered index over equality then inequality columns, with an
/// INCLUDE clause only when there are included columns
pub fn generate_create_index(
    table_parts: &[String],
    equality: &[String],
    inequality: &[String],
    included: &[String],
) -> String {
    let index_name = generate_index_name(table_parts, equality);
    let table = table_parts.iter().map(|p| quote_identifier(p)).collect::<Vec<_>>().join(".");

    let key_columns = equality
        .iter()
        .chain(inequality)
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");

    let include_clause = if included.is_empty() {
        String::new()
    } else {
        let columns = included.iter().map(|c| quote_identifier(c)).collect::<Vec<_>>().join(", ");
        format!("\nINCLUDE ({})", columns)
    };

    format!("CREATE NONCLUSTERED INDEX {}\nON {} ({}){};", index_name, table, key_columns, include_clause)
}
