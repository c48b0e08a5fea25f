//! Showplan parser module
//!
//! Loads showplan XML and exposes it through the [`PlanNode`] accessor.

pub mod document;
pub mod error;
pub mod node;
pub mod value_parser;

// Re-export commonly used items
pub use document::PlanSource;
pub use error::{PlanError, PlanResult};
pub use node::{PlanNode, SHOWPLAN_NAMESPACE, ShowplanNode, elements};
pub use value_parser::ValueParser;
