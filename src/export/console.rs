use protocol_optimizer_common::{render_report, AnalysisResult, Protocol};

/// 解析結果をコンソールに出力
pub fn print_report(result: &AnalysisResult, protocol: &Protocol) {
    print!("{}", render_report(result, protocol));
}
