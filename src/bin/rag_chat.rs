use anyhow::Context;
use clap::Parser;
use drillbook::rag::chat_session;
use drillbook::utils::prompt::Prompter;
use drillbook::utils::{logger, validation::Validate};
use drillbook::{AgentEngine, LocalStorage, RagConfig};

#[derive(Parser)]
#[command(name = "rag-chat")]
#[command(about = "Agentic RAG chat with local knowledge and web search")]
struct Args {
    /// Path to TOML configuration file; falls back to GROQ_API_KEY / TAVILY_API_KEY
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Files to add to the knowledge base before chatting
    #[arg(long, num_args = 1..)]
    upload: Vec<String>,

    /// Print the sources behind every answer
    #[arg(long)]
    show_sources: bool,

    /// Print the reasoning steps behind every answer
    #[arg(long)]
    show_steps: bool,

    /// Emit JSON logs instead of the compact console format
    #[arg(long)]
    json_logs: bool,

    /// Dry run - show the configuration without calling any service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting agentic RAG chat");

    // 載入配置
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match RagConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::info!("📁 No config file given, reading API keys from the environment");
            RagConfig::from_env()
        }
    };

    // 命令列覆蓋設定
    config.knowledge_base.uploads.extend(args.upload.iter().cloned());
    config.display.show_sources |= args.show_sources;
    config.display.show_steps |= args.show_steps;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No service will be called");
        return Ok(());
    }

    let storage = LocalStorage::new(config.knowledge_base.base_path.as_str());
    let mut agent = match config.build_agent() {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code());
        }
    };

    if !config.knowledge_base.uploads.is_empty() {
        match agent
            .add_files(&storage, &config.knowledge_base.uploads)
            .await
        {
            Ok(chunks) => println!(
                "📄 Loaded {} file(s) into the knowledge base ({} chunks)",
                config.knowledge_base.uploads.len(),
                chunks
            ),
            Err(e) => {
                tracing::error!("❌ Upload failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                std::process::exit(e.severity().exit_code());
            }
        }
    }

    let mut engine = AgentEngine::new(agent);
    let mut prompter = Prompter::stdio();
    chat_session(&mut prompter, &mut engine, &storage, &config.display)
        .await
        .context("chat session failed")?;
    Ok(())
}

fn display_config_summary(config: &RagConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    for line in config.summary() {
        println!("  {}", line);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
}
