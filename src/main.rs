use clap::Parser;
use edd_calc::core::summary;
use edd_calc::utils::error::EstimatorError;
use edd_calc::utils::logger;
use edd_calc::{CalendarDate, CliConfig, EstimationEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting edd-calc CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let json = config.json;
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
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &EstimatorError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
