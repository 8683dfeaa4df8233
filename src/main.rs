use clap::Parser;
use protocol_optimizer::{analyzer, cli, config, error, export, interactive};
use cli::{AnalyzeArgs, Cli, Commands};
use config::Config;
use error::Result;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = interactive::until_interrupted(run(cli)).await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancellation() => {
            println!("\n\nOperation cancelled.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "protocol_optimizer=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Config { set_api_key, show }) => run_config(config, set_api_key, show),
        None => run_analyze(&cli.analyze, &config).await,
    }
}

async fn run_analyze(args: &AnalyzeArgs, config: &Config) -> Result<()> {
    // 1. 入力
    let (protocol, entered_key) = match args.to_protocol() {
        Some(protocol) if !args.wants_interactive() => (protocol, None),
        _ => {
            let input = interactive::read_interactive_input().await?;
            (input.protocol, input.api_key)
        }
    };

    // 2. Geminiクライアント（キーがなければカタログのみ）
    let api_key = config.resolve_api_key(entered_key.as_deref().or(args.api_key.as_deref()));
    let client = match api_key {
        Some(key) if !args.no_ai => analyzer::remote_client(config, key),
        Some(_) => None,
        None => {
            if !args.no_ai {
                println!("ℹ️  No Gemini API key found; showing catalogue suggestions only.");
            }
            None
        }
    };

    // 3. 解析
    println!("🔍 Analyzing protocol: {}", protocol.title);
    println!("{}", "=".repeat(60));
    let result = analyzer::analyze_protocol(&protocol, client.as_ref()).await;

    // 4. 出力
    export::print_report(&result, &protocol);

    if let Some(save) = &args.save {
        let path = export::save_report(&result, &protocol, save.as_deref())?;
        println!("📄 Results saved to: {}", path.display());
    }

    Ok(())
}

fn run_config(mut config: Config, set_api_key: Option<String>, show: bool) -> Result<()> {
    if let Some(key) = set_api_key {
        config.set_api_key(key)?;
        println!("✔ API key saved to {}", Config::config_path()?.display());
    }

    if show {
        println!("Config:");
        println!("  Model: {}", config.model);
        println!("  Endpoint: {}", config.endpoint);
        println!("  Temperature: {}", config.temperature);
        println!("  Max output tokens: {}", config.max_output_tokens);
        println!("  Timeout: {}s", config.timeout_seconds);
        println!("  API key: {}", if config.api_key.is_some() { "set" } else { "not set" });
    }

    Ok(())
}
