//! 集計ロジック
//!
//! カタログ由来とAI由来の提案をマージし、信頼度順に並べて集計値を計算する。

use crate::types::{AnalysisResult, OptimizationRecord};

/// 合計コスト削減率の上限
pub const MAX_TOTAL_COST_REDUCTION: f64 = 0.8;

/// 合計時間削減率の上限
pub const MAX_TOTAL_TIME_REDUCTION: f64 = 0.9;

/// カタログ結果 → AI結果の順に連結し、信頼度の降順で安定ソートする
pub fn merge_results(
    catalogue: Vec<OptimizationRecord>,
    remote: Vec<OptimizationRecord>,
) -> AnalysisResult {
    let mut optimizations = catalogue;
    optimizations.extend(remote);

    // 同値は元の順序を維持
    optimizations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let total_cost_reduction = optimizations
        .iter()
        .map(|o| o.estimated_cost_reduction)
        .sum::<f64>()
        .min(MAX_TOTAL_COST_REDUCTION);
    let total_time_reduction = optimizations
        .iter()
        .map(|o| o.estimated_time_reduction)
        .sum::<f64>()
        .min(MAX_TOTAL_TIME_REDUCTION);

    AnalysisResult {
        optimization_count: optimizations.len(),
        total_cost_reduction,
        total_time_reduction,
        average_confidence: average_confidence(&optimizations),
        optimizations,
    }
}

/// 平均信頼度（空なら 0.0）
pub fn average_confidence(records: &[OptimizationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|o| o.confidence).sum::<f64>() / records.len() as f64
}
