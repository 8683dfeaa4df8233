//! 解析対象と解析結果の型定義
//!
//! CLIと共通ロジックで共有される型:
//! - Protocol: 解析対象の実験プロトコル
//! - OptimizationRecord: 最適化提案1件（カタログ由来 / AI由来）
//! - AnalysisResult: 最終出力（マージ・ソート済み提案 + 集計値）

use serde::{Deserialize, Serialize};
use std::fmt;

/// AI由来の提案に付与される出典マーカー
pub const REMOTE_SOURCE: &str = "Gemini AI Analysis";

/// 実験プロトコル
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Protocol {
    pub title: String,
    pub description: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub constraints: String,
}

impl Protocol {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        materials: Vec<String>,
        steps: Vec<String>,
        constraints: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            materials,
            steps,
            constraints: constraints.into(),
        }
    }

    /// カタログ照合に使うテキスト（タイトル + 説明 + 材料）
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.materials.join(" ")
        )
    }
}

/// 最適化の種類（分類用）
///
/// 提案が保持するのはTYPEの原文ラベルで、この型はそこから判定するだけ。
/// 既知の区分に一致しない場合は原文のまま `Other` になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationKind {
    CostReduction,
    TimeReduction,
    Efficiency,
    Automation,
    Equipment,
    Other(String),
}

impl OptimizationKind {
    /// ラベル文字列から種類を判定（大文字小文字無視）
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "cost reduction" => Self::CostReduction,
            "time reduction" => Self::TimeReduction,
            "efficiency" | "efficiency enhancement" => Self::Efficiency,
            "automation" => Self::Automation,
            "equipment" => Self::Equipment,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::CostReduction => "Cost Reduction",
            Self::TimeReduction => "Time Reduction",
            Self::Efficiency => "Efficiency",
            Self::Automation => "Automation",
            Self::Equipment => "Equipment",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for OptimizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 最適化提案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    /// TYPEラベル（原文のまま）
    #[serde(rename = "type")]
    pub kind: String,
    pub suggestion: String,
    pub savings: String,
    /// 信頼度（0.0-1.0）
    pub confidence: f64,
    /// 出典（カタログの引用元 or REMOTE_SOURCE）
    pub source: String,
    #[serde(default)]
    pub estimated_cost_reduction: f64,
    #[serde(default)]
    pub estimated_time_reduction: f64,
}

impl OptimizationRecord {
    /// ラベルから種類を判定
    pub fn category(&self) -> OptimizationKind {
        OptimizationKind::from_label(&self.kind)
    }
}

/// 解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub optimization_count: usize,
    /// 合計コスト削減率（上限0.8）
    pub total_cost_reduction: f64,
    /// 合計時間削減率（上限0.9）
    pub total_time_reduction: f64,
    pub average_confidence: f64,
    /// 信頼度の降順
    pub optimizations: Vec<OptimizationRecord>,
}
