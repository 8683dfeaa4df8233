use crate::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// APIキーの環境変数
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    /// モデル一覧のベースURL（末尾に /{model}:generateContent を付ける）
    pub endpoint: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-pro".into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            temperature: 0.7,
            max_output_tokens: 2048,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OptimizerError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("protocol-optimizer").join("config.json"))
    }

    /// generateContent のURL
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// APIキーを解決する
    ///
    /// 優先順位: コマンドライン引数 > 環境変数 > 設定ファイル。空文字は未設定扱い。
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Option<String> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        pick_api_key(cli_key, env_key.as_deref(), self.api_key.as_deref())
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        if key.trim().is_empty() {
            return Err(OptimizerError::MissingApiKey);
        }
        self.api_key = Some(key);
        self.save()
    }
}

fn pick_api_key(cli: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [cli, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}
