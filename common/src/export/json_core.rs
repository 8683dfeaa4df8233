//! JSONレポートの構造（共通ライブラリ）

use crate::types::{AnalysisResult, Protocol};
use serde::{Deserialize, Serialize};

/// 保存用のプロトコル情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProtocol {
    pub title: String,
    pub description: String,
    pub materials: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    pub constraints: String,
    /// 保存時刻（ISO 8601）
    pub timestamp: String,
}

/// 保存ファイルの全体構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedReport {
    pub protocol: SavedProtocol,
    pub results: AnalysisResult,
}

impl SavedReport {
    pub fn new(protocol: &Protocol, result: &AnalysisResult, timestamp: impl Into<String>) -> Self {
        Self {
            protocol: SavedProtocol {
                title: protocol.title.clone(),
                description: protocol.description.clone(),
                materials: protocol.materials.clone(),
                steps: protocol.steps.clone(),
                constraints: protocol.constraints.clone(),
                timestamp: timestamp.into(),
            },
            results: result.clone(),
        }
    }
}
