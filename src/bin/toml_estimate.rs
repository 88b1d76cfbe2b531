use clap::Parser;
use edd_calc::core::summary;
use edd_calc::utils::{logger, validation::Validate};
use edd_calc::{CalendarDate, EstimationEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-estimate")]
#[command(about = "Estimate a due date from a TOML case file")]
struct Args {
    /// Path to TOML case file
    #[arg(short, long, default_value = "case.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output format from the case file
    #[arg(long)]
    json: Option<bool>,

    /// Only load and validate the case file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based due date estimate");
    tracing::info!("📁 Loading case from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load case file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.severity().exit_code());
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Case validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.severity().exit_code());
    }

    tracing::info!("✅ Case loaded and validated successfully");
    if let Some(description) = &config.case.description {
        tracing::info!("📋 {}", description);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - mode: {}", config.case.mode);
        return Ok(());
    }

    let json = args.json.unwrap_or_else(|| config.json_output());
    let today = CalendarDate::from_naive(chrono::Utc::now().date_naive());
    let engine = EstimationEngine::new(config);

    match engine.run(today) {
        Ok(report) => {
            let output = if json {
                summary::render_json(&report)?
            } else {
                summary::render_text(&report)
            };
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
