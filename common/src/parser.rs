//! AIレスポンスパーサー
//!
//! Geminiの自由形式テキストを `---` 区切りのセグメントに分割し、
//! ラベル付きフィールド（TYPE / SUGGESTION / SAVINGS / CONFIDENCE）を抽出する。
//! 各フィールドの抽出は独立した関数で、見つからなければ `None` を返す。

use crate::types::{OptimizationRecord, REMOTE_SOURCE};
use regex::Regex;

/// セグメント区切り
pub const SEGMENT_DELIMITER: &str = "---";

/// 1レスポンスから採用する提案の最大数
pub const MAX_REMOTE_SUGGESTIONS: usize = 5;

/// SAVINGS が無い場合の既定値
pub const DEFAULT_SAVINGS: &str = "Variable";

/// CONFIDENCE が無い・数値でない場合の既定値
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

lazy_static::lazy_static! {
    static ref TYPE_RE: Regex = Regex::new(r"(?i)TYPE:\s*(.+)").unwrap();
    // SUGGESTION はセグメント末尾まで（複数行）
    static ref SUGGESTION_RE: Regex = Regex::new(r"(?is)SUGGESTION:\s*(.+)").unwrap();
    static ref SAVINGS_TAIL_RE: Regex = Regex::new(r"(?is)SAVINGS:.*").unwrap();
    static ref SAVINGS_RE: Regex = Regex::new(r"(?i)SAVINGS:\s*(.+)").unwrap();
    static ref CONFIDENCE_RE: Regex = Regex::new(r"(?i)CONFIDENCE:\s*([\d.]+)").unwrap();

    static ref COST_PATTERNS: Vec<Regex> = [
        r"(\d+)%.*cost.*reduction",
        r"(\d+)%.*cheaper",
        r"save.*(\d+)%.*cost",
        r"reduce.*cost.*(\d+)%",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref TIME_PATTERNS: Vec<Regex> = [
        r"(\d+)%.*time.*reduction",
        r"(\d+)%.*faster",
        r"save.*(\d+)%.*time",
        r"reduce.*time.*(\d+)%",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// レスポンス全体をパースして提案リストを返す
///
/// TYPE または SUGGESTION が欠けたセグメントは黙って捨てる。
/// 結果は出現順に最大 `MAX_REMOTE_SUGGESTIONS` 件。
///
/// # Examples
/// ```
/// use protocol_optimizer_common::parse_optimization_response;
///
/// let text = "TYPE: Cost Reduction\nSUGGESTION: Buy reagents in bulk\n---";
/// let records = parse_optimization_response(text);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].suggestion, "Buy reagents in bulk");
/// ```
pub fn parse_optimization_response(text: &str) -> Vec<OptimizationRecord> {
    text.split(SEGMENT_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_segment)
        .take(MAX_REMOTE_SUGGESTIONS)
        .collect()
}

/// 1セグメントを提案に変換
pub fn parse_segment(segment: &str) -> Option<OptimizationRecord> {
    let kind = extract_type(segment)?;
    let suggestion = extract_suggestion(segment)?;

    Some(OptimizationRecord {
        kind,
        suggestion,
        savings: extract_savings(segment).unwrap_or_else(|| DEFAULT_SAVINGS.to_string()),
        confidence: extract_confidence(segment).unwrap_or(DEFAULT_CONFIDENCE),
        source: REMOTE_SOURCE.to_string(),
        estimated_cost_reduction: extract_cost_reduction(segment),
        estimated_time_reduction: extract_time_reduction(segment),
    })
}

/// `TYPE:` の行末まで
pub fn extract_type(segment: &str) -> Option<String> {
    capture_trimmed(&TYPE_RE, segment)
}

/// `SUGGESTION:` からセグメント末尾まで
///
/// 区切りが省略されて後続フィールドまで取り込んだ場合に備え、
/// `SAVINGS:` 以降は削除する。
pub fn extract_suggestion(segment: &str) -> Option<String> {
    let captured = capture_trimmed(&SUGGESTION_RE, segment)?;
    Some(SAVINGS_TAIL_RE.replace(&captured, "").trim().to_string())
}

/// `SAVINGS:` の行末まで
pub fn extract_savings(segment: &str) -> Option<String> {
    capture_trimmed(&SAVINGS_RE, segment)
}

/// `CONFIDENCE:` の数値
///
/// 数値として解釈できなければ `None`（呼び出し側で既定値を使う）。
/// 範囲外の値は 0.0-1.0 に丸める。
pub fn extract_confidence(segment: &str) -> Option<f64> {
    let cap = CONFIDENCE_RE.captures(segment)?;
    let value: f64 = cap[1].parse().ok()?;
    Some(value.clamp(0.0, 1.0))
}

/// コスト削減率の推定（該当なしは 0.0）
pub fn extract_cost_reduction(text: &str) -> f64 {
    first_percentage(&COST_PATTERNS, text)
}

/// 時間削減率の推定（該当なしは 0.0）
pub fn extract_time_reduction(text: &str) -> f64 {
    first_percentage(&TIME_PATTERNS, text)
}

fn capture_trimmed(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|cap| cap[1].trim().to_string())
}

/// 最初に一致したパターンの `N%` を割合に変換
fn first_percentage(patterns: &[Regex], text: &str) -> f64 {
    let lower = text.to_lowercase();
    patterns
        .iter()
        .find_map(|re| re.captures(&lower))
        .and_then(|cap| cap[1].parse::<f64>().ok())
        .map(|percent| percent / 100.0)
        .unwrap_or(0.0)
}
