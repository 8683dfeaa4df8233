//! Protocol Optimizer Common Library
//!
//! CLIとテストで共有される型・カタログ・パーサー・集計ロジック

pub mod types;
pub mod catalogue;
pub mod prompts;
pub mod parser;
pub mod analyzer;
pub mod export;

pub use types::{AnalysisResult, OptimizationKind, OptimizationRecord, Protocol, REMOTE_SOURCE};
pub use catalogue::{match_catalogue, matched_categories, CatalogueEntry, RecordTemplate, CATALOGUE};
pub use prompts::build_optimization_prompt;
pub use parser::{parse_optimization_response, MAX_REMOTE_SUGGESTIONS};
pub use analyzer::{merge_results, MAX_TOTAL_COST_REDUCTION, MAX_TOTAL_TIME_REDUCTION};
pub use export::{render_report, SavedReport};
