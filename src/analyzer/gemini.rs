//! Gemini API連携モジュール
//!
//! プロトコルからプロンプトを生成して generateContent に送り、
//! 自由形式の応答を共通パーサーで提案リストに変換する。
//!
//! `fetch_suggestions` は失敗理由を `Result` で返し、
//! `suggest` はそれを警告ログ + 空リストに落とす（呼び出し側には失敗を返さない）。

use crate::config::Config;
use crate::error::{OptimizerError, Result};
use protocol_optimizer_common::{
    build_optimization_prompt, parse_optimization_response, OptimizationRecord, Protocol,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            url: config.generate_content_url(),
            api_key: api_key.into(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// 提案を取得（失敗は警告ログを出して空リスト）
    pub async fn suggest(&self, protocol: &Protocol) -> Vec<OptimizationRecord> {
        match self.fetch_suggestions(protocol).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Gemini API error: {}", e);
                Vec::new()
            }
        }
    }

    /// 提案を取得（失敗理由を返す）
    pub async fn fetch_suggestions(&self, protocol: &Protocol) -> Result<Vec<OptimizationRecord>> {
        let prompt = build_optimization_prompt(protocol);
        tracing::debug!(prompt_chars = prompt.len(), "sending prompt to Gemini");

        let text = self.generate(&prompt).await?;
        tracing::debug!(response_chars = text.len(), "received Gemini response");

        let records = parse_optimization_response(&text);
        tracing::debug!(suggestions = records.len(), "parsed Gemini suggestions");
        Ok(records)
    }

    /// プロンプトを送信して応答テキストを返す
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| OptimizerError::ApiCall(e.to_string()))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(OptimizerError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        extract_response_text(&body)
    }
}

/// レスポンスJSONから candidates[0].content.parts[0].text を取り出す
pub fn extract_response_text(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| OptimizerError::ApiParse(format!("invalid JSON: {}", e)))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| OptimizerError::ApiParse("response text missing".into()))
}
