//! SQL Server Execution Plan Analyzer
//!
//! Parses showplan XML (`.sqlplan`) documents and reports costly operators,
//! scan and lookup patterns, row estimation errors and missing indexes.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      analyze_plan()                       │
//! │                            │                              │
//! │        ┌───────────────────┼───────────────────┐          │
//! │        ▼                   ▼                   ▼          │
//! │  ┌───────────┐     ┌──────────────┐     ┌───────────┐     │
//! │  │  Parser   │     │   Analyzer   │     │  Report   │     │
//! │  │ PlanSource│ ──▶ │  CostModel   │ ──▶ │ Renderer  │     │
//! │  │ PlanNode  │     │  Classifier  │     │           │     │
//! │  │           │     │  Rules       │     │           │     │
//! │  │           │     │  MissingIdx  │     │           │     │
//! │  │           │     │  PlanWarnings│     │           │     │
//! │  └───────────┘     └──────────────┘     └───────────┘     │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use showplan_analyzer::services::plan_analyzer::{analyze_file, RuleThresholds};
//!
//! let result = analyze_file("plan.sqlplan", &RuleThresholds::default())?;
//! for warning in &result.warnings {
//!     println!("{}", warning);
//! }
//! ```

pub mod analyzer;
pub mod models;
pub mod parser;
pub mod report;


pub use analyzer::{RuleEngine, RuleThresholds};
pub use models::*;
pub use parser::{PlanError, PlanResult, PlanSource, ShowplanNode};
pub use report::ReportRenderer;

use std::path::Path;

/// Analyze an already loaded showplan document.
///
/// Fails only when the text is not well-formed XML; missing attributes and
/// elements fall back to defaults.
pub fn analyze_plan(source: &PlanSource, thresholds: &RuleThresholds) -> PlanResult<PlanAnalysisResult> {
    let document = source.parse()?;
    tracing::debug!("Parsed {}", source.path().display());

    let engine = RuleEngine::with_thresholds(*thresholds);
    Ok(engine.analyze(&ShowplanNode::root(&document)))
}

/// Read and analyze a showplan file
pub fn analyze_file(path: impl AsRef<Path>, thresholds: &RuleThresholds) -> PlanResult<PlanAnalysisResult> {
    let source = PlanSource::read(path)?;
    analyze_plan(&source, thresholds)
}
