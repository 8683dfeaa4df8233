//! 対話式プロトコル入力モジュール

use crate::error::{OptimizerError, Result};
use dialoguer::Input;
use protocol_optimizer_common::Protocol;
use std::future::Future;

/// 対話入力の結果
pub struct InteractiveInput {
    pub protocol: Protocol,
    /// 空欄なら None
    pub api_key: Option<String>,
}

/// 対話式でプロトコルを入力
pub fn run_interactive_input() -> Result<InteractiveInput> {
    println!("🧪 LAB PROTOCOL OPTIMIZER");
    println!("{}", "=".repeat(50));
    println!("Enter your protocol details below:");

    let title = prompt_line("Protocol Title")?;
    let description = prompt_line("Protocol Description")?;

    println!("\nMaterials (press Enter on empty line to finish):");
    let mut materials = Vec::new();
    loop {
        let material = prompt_line("  -")?;
        if material.is_empty() {
            break;
        }
        materials.push(material);
    }

    let constraints = prompt_line("Budget/Time Constraints (optional)")?;

    // Input は raw モードで読むので Ctrl-C は Interrupted として返る
    println!("\nGemini API Key (optional, get a free key from https://makersuite.google.com/app/apikey)");
    let api_key = prompt_line("API Key")?;

    Ok(InteractiveInput {
        protocol: Protocol::new(title, description, materials, Vec::new(), constraints),
        api_key: normalize_optional(&api_key),
    })
}

/// 対話入力を別スレッドで実行（待機中も Ctrl-C を監視できるように）
pub async fn read_interactive_input() -> Result<InteractiveInput> {
    tokio::task::spawn_blocking(run_interactive_input)
        .await
        .map_err(|e| OptimizerError::Prompt(e.to_string()))?
}

/// Ctrl-C を受けたら `Cancelled` で打ち切る
///
/// シグナル監視を先に登録してから本処理をポーリングする。
pub async fn until_interrupted<T>(task: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::select! {
        biased;
        _ = tokio::signal::ctrl_c() => Err(OptimizerError::Cancelled),
        result = task => result,
    }
}

/// 1行入力（空欄可、前後の空白は除去）
fn prompt_line(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
