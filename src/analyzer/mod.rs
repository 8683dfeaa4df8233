pub mod gemini;

pub use gemini::{extract_response_text, GeminiClient};

use crate::config::Config;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use protocol_optimizer_common::{
    match_catalogue, matched_categories, merge_results, AnalysisResult, OptimizationRecord,
    Protocol,
};
use std::time::Duration;

/// プロトコルを解析する
///
/// Geminiクライアントを用意する（作れなければ警告してカタログのみ）
pub fn remote_client(config: &Config, api_key: String) -> Option<GeminiClient> {
    usable_client(GeminiClient::new(config, api_key))
}

fn usable_client(built: Result<GeminiClient>) -> Option<GeminiClient> {
    match built {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!("Gemini client unavailable, using catalogue only: {}", e);
            None
        }
    }
}

/// カタログ照合 → (クライアントがあれば) Gemini 問い合わせ → マージ・集計。
/// Gemini の失敗は空リストとして扱われ、この関数は失敗しない。
pub async fn analyze_protocol(protocol: &Protocol, client: Option<&GeminiClient>) -> AnalysisResult {
    let catalogue = catalogue_suggestions(protocol);

    let remote = match client {
        Some(client) => {
            let spinner = consulting_spinner();
            let records = client.suggest(protocol).await;
            spinner.finish_and_clear();
            records
        }
        None => Vec::new(),
    };

    tracing::debug!(
        catalogue = catalogue.len(),
        remote = remote.len(),
        "merging optimizations"
    );
    merge_results(catalogue, remote)
}

/// カタログ照合
pub fn catalogue_suggestions(protocol: &Protocol) -> Vec<OptimizationRecord> {
    let text = protocol.search_text();

    let categories: Vec<&str> = matched_categories(&text).iter().map(|c| c.category).collect();
    if categories.is_empty() {
        tracing::debug!("no catalogue category matched");
    } else {
        tracing::debug!(?categories, "catalogue categories matched");
    }

    match_catalogue(&text)
}

fn consulting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Consulting Gemini AI...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
