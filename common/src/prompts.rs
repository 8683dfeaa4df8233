//! プロンプト生成モジュール
//!
//! Geminiへ送る最適化依頼プロンプト。同じプロトコルからは常に同じ文字列を生成する。

use crate::types::Protocol;

/// 材料が空の場合の表記
pub const MATERIALS_PLACEHOLDER: &str = "Not specified";

/// 応答に要求するフィールド（この順で出力させる）
pub const RESPONSE_FIELDS: &[&str] = &["TYPE", "SUGGESTION", "SAVINGS", "CONFIDENCE", "REASONING"];

/// 最適化依頼プロンプト生成
///
/// # Arguments
/// * `protocol` - 解析対象のプロトコル
///
/// # Returns
/// TYPE/SUGGESTION/SAVINGS/CONFIDENCE/REASONING 形式・`---` 区切りでの回答を求めるプロンプト
pub fn build_optimization_prompt(protocol: &Protocol) -> String {
    let materials = if protocol.materials.is_empty() {
        MATERIALS_PLACEHOLDER.to_string()
    } else {
        protocol.materials.join(", ")
    };

    // 手順は指定があるときだけ記載
    let steps = if protocol.steps.is_empty() {
        String::new()
    } else {
        let numbered = protocol
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("  {}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n");
        format!("\nSteps:\n{}", numbered)
    };

    format!(
        r#"As an expert lab protocol optimizer, analyze this protocol and provide specific optimizations:

PROTOCOL DETAILS:
Title: {title}
Description: {description}
Materials: {materials}
Constraints: {constraints}{steps}

TASK: Provide 3-5 specific, actionable optimizations focusing on:
1. Cost reduction (cheaper alternatives, volume reduction, bulk purchasing)
2. Time reduction (faster methods, parallel processing, automation)
3. Efficiency improvements (better yields, reduced errors, simplified steps)
4. Equipment alternatives (cheaper/more available instruments)

FORMAT EACH OPTIMIZATION AS:
TYPE: [Cost Reduction|Time Reduction|Efficiency|Equipment]
SUGGESTION: [Specific actionable recommendation]
SAVINGS: [Quantified benefit]
CONFIDENCE: [0.1-1.0 confidence score]
REASONING: [Brief scientific justification]
---

Be specific with numbers, brands, and techniques. Focus on practical, immediately implementable changes."#,
        title = protocol.title,
        description = protocol.description,
        materials = materials,
        constraints = protocol.constraints,
        steps = steps,
    )
}
