//! コンソールレポート生成（共通ライブラリ）
//!
//! 集計値のサマリと提案一覧をテキストに整形する。判断は行わない。

use crate::types::{AnalysisResult, Protocol};
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 80;

/// 割合を "12.3%" 形式に整形
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// 解析結果をレポート文字列に整形
pub fn render_report(result: &AnalysisResult, protocol: &Protocol) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    if write_report(&mut out, result, protocol).is_err() {
        out.clear();
    }
    out
}

/// 解析結果を任意の書き込み先に整形
pub fn write_report<W: Write>(out: &mut W, result: &AnalysisResult, protocol: &Protocol) -> fmt::Result {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out, "\n📊 OPTIMIZATION RESULTS FOR: {}", protocol.title)?;
    writeln!(out, "{}", heavy)?;

    writeln!(out, "📈 SUMMARY:")?;
    writeln!(out, "   • Optimizations Found: {}", result.optimization_count)?;
    writeln!(out, "   • Estimated Cost Reduction: {}", format_percent(result.total_cost_reduction))?;
    writeln!(out, "   • Estimated Time Reduction: {}", format_percent(result.total_time_reduction))?;
    writeln!(out, "   • Average Confidence: {}", format_percent(result.average_confidence))?;

    writeln!(out, "\n🚀 DETAILED OPTIMIZATIONS:")?;
    writeln!(out, "{}", light)?;

    for (i, opt) in result.optimizations.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, opt.kind.to_uppercase())?;
        writeln!(out, "   💡 Suggestion: {}", opt.suggestion)?;
        writeln!(out, "   💰 Savings: {}", opt.savings)?;
        writeln!(out, "   🎯 Confidence: {}", format_percent(opt.confidence))?;
        writeln!(out, "   📚 Source: {}", opt.source)?;

        if opt.estimated_cost_reduction > 0.0 {
            writeln!(out, "   💵 Est. Cost Reduction: {}", format_percent(opt.estimated_cost_reduction))?;
        }
        if opt.estimated_time_reduction > 0.0 {
            writeln!(out, "   ⏱️  Est. Time Reduction: {}", format_percent(opt.estimated_time_reduction))?;
        }
    }

    writeln!(out, "\n{}", heavy)
}
