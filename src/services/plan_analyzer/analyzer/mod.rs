//! Plan analyzer module
//!
//! Provides the cost model, operator classification rules, missing index
//! synthesis and plan-level warnings.

pub mod cost_model;
pub mod missing_index;
pub mod operator_classifier;
pub mod plan_warnings;
pub mod rule_engine;
pub mod rules;
pub mod thresholds;

pub use cost_model::CostModel;
pub use missing_index::{MissingIndexExtractor, generate_create_index, generate_index_name};
pub use operator_classifier::OperatorClassifier;
pub use plan_warnings::PlanWarningCollector;
pub use rule_engine::RuleEngine;
pub use rules::{OperatorRule, RuleContext};
pub use thresholds::RuleThresholds;
