use clap::{Args, Parser, Subcommand};
use protocol_optimizer_common::Protocol;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "protocol-optimizer")]
#[command(about = "Lab Protocol Optimizer - cost and time optimization suggestions", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub analyze: AnalyzeArgs,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// プロトコル解析の引数（サブコマンド省略時）
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// プロトコル名（省略時は対話モード）
    #[arg(long)]
    pub title: Option<String>,

    /// プロトコルの説明
    #[arg(long)]
    pub description: Option<String>,

    /// 使用材料
    #[arg(long, num_args = 0..)]
    pub materials: Vec<String>,

    /// 手順
    #[arg(long, num_args = 0..)]
    pub steps: Vec<String>,

    /// 予算・時間の制約
    #[arg(long)]
    pub constraints: Option<String>,

    /// Gemini APIキー（省略時は GEMINI_API_KEY → 設定ファイル）
    #[arg(long)]
    pub api_key: Option<String>,

    /// 結果をJSONに保存（パス省略時は protocol_optimization_<日時>.json）
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub save: Option<Option<PathBuf>>,

    /// 対話モードで入力
    #[arg(short, long)]
    pub interactive: bool,

    /// Geminiに問い合わせずカタログのみで解析
    #[arg(long)]
    pub no_ai: bool,
}

impl AnalyzeArgs {
    /// 対話モードで入力を受けるべきか
    pub fn wants_interactive(&self) -> bool {
        self.interactive || self.title.is_none()
    }

    /// 引数からプロトコルを組み立てる（タイトル未指定なら None）
    pub fn to_protocol(&self) -> Option<Protocol> {
        let title = self.title.as_ref()?;
        Some(Protocol::new(
            title.clone(),
            self.description.clone().unwrap_or_default(),
            self.materials.clone(),
            self.steps.clone(),
            self.constraints.clone().unwrap_or_default(),
        ))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("protocol-optimizer").chain(args.iter().copied()))
            .expect("parse failed")
    }

    #[test]
    fn test_parse_full_flags() {
        let cli = parse(&[
            "--title", "PCR",
            "--description", "Amplify insert",
            "--materials", "Taq", "dNTPs", "primers",
            "--constraints", "$50",
            "--api-key", "k",
        ]);
        assert!(cli.command.is_none());
        let protocol = cli.analyze.to_protocol().expect("protocol");
        assert_eq!(protocol.title, "PCR");
        assert_eq!(protocol.materials, vec!["Taq", "dNTPs", "primers"]);
        assert_eq!(protocol.constraints, "$50");
        assert_eq!(cli.analyze.api_key.as_deref(), Some("k"));
        assert!(!cli.analyze.wants_interactive());
        assert!(cli.analyze.save.is_none());
    }

    #[test]
    fn test_missing_title_means_interactive() {
        let cli = parse(&["--description", "x"]);
        assert!(cli.analyze.wants_interactive());
        assert!(cli.analyze.to_protocol().is_none());
    }

    #[test]
    fn test_interactive_flag() {
        let cli = parse(&["--title", "PCR", "--interactive"]);
        assert!(cli.analyze.wants_interactive());
    }

    #[test]
    fn test_save_with_and_without_path() {
        let cli = parse(&["--title", "PCR", "--save", "out.json"]);
        assert_eq!(cli.analyze.save, Some(Some(PathBuf::from("out.json"))));

        let cli = parse(&["--title", "PCR", "--save"]);
        assert_eq!(cli.analyze.save, Some(None));
    }

    #[test]
    fn test_defaults_are_empty() {
        let cli = parse(&["--title", "ELISA"]);
        let protocol = cli.analyze.to_protocol().expect("protocol");
        assert_eq!(protocol.description, "");
        assert!(protocol.materials.is_empty());
        assert!(protocol.steps.is_empty());
        assert_eq!(protocol.constraints, "");
    }

    #[test]
    fn test_config_subcommand() {
        let cli = parse(&["config", "--show"]);
        match cli.command {
            Some(Commands::Config { show, set_api_key }) => {
                assert!(show);
                assert!(set_api_key.is_none());
            }
            None => panic!("Expected config subcommand"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
