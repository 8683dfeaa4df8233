use crate::error::Result;
use chrono::{DateTime, Local};
use protocol_optimizer_common::{AnalysisResult, Protocol, SavedReport};
use std::path::{Path, PathBuf};

/// 既定の保存ファイル名（ローカル時刻）
pub fn default_report_path(now: &DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "protocol_optimization_{}.json",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// 解析結果をJSONに保存し、書き込んだパスを返す
///
/// パス省略時はカレントディレクトリに日時入りのファイル名で保存する。
/// 書き込みエラーはそのまま返す。
pub fn save_report(
    result: &AnalysisResult,
    protocol: &Protocol,
    path: Option<&Path>,
) -> Result<PathBuf> {
    let now = Local::now();
    let output = match path {
        Some(p) => p.to_path_buf(),
        None => default_report_path(&now),
    };

    let report = SavedReport::new(protocol, result, now.to_rfc3339());
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&output, json)?;

    tracing::debug!(path = %output.display(), "report saved");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_report_path() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 8, 5, 9).unwrap();
        assert_eq!(
            default_report_path(&now),
            PathBuf::from("protocol_optimization_20261019_080509.json")
        );
    }
}
