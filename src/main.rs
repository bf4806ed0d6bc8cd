use clap::Parser;
use sprite_equalizer::core::engine::write_report;
use sprite_equalizer::core::{ConfigProvider, Pipeline};
use sprite_equalizer::utils::error::{EqualizerError, ErrorSeverity};
use sprite_equalizer::utils::logger::{self, LogFormat};
use sprite_equalizer::utils::validation::Validate;
use sprite_equalizer::{BatchEngine, CliConfig, LocalStorage, RecanvasPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::Compact, config.verbose);

    tracing::info!("Starting sprite-equalizer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let dry_run = config.dry_run;
    let report_path = config.report.clone();

    let storage = LocalStorage::new();
    let pipeline = RecanvasPipeline::new(storage.clone(), config);
    let engine = BatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        match engine.plan().await {
            Ok(plan) => {
                println!(
                    "Canvas: {}  Fill: {}  Inputs: {}",
                    plan.canvas,
                    engine.pipeline().config().fill_color(),
                    plan.files.len()
                );
                for file in &plan.files {
                    println!(
                        "  {} -> {}",
                        file.path.display(),
                        engine.pipeline().output_path(file).display()
                    );
                }
                return Ok(());
            }
            Err(e) => exit_with(e),
        }
    }

    match engine.run().await {
        Ok(report) => {
            if let Some(path) = report_path {
                if let Err(e) = write_report(&storage, &path, &report).await {
                    exit_with(e);
                }
                tracing::info!("📝 Report written to: {}", path.display());
            }

            tracing::info!("✅ Sprite equalization completed successfully!");
            println!(
                "✅ Equalized {} sprite(s) onto a {} canvas",
                report.processed.len(),
                report.canvas
            );
            if !report.skipped.is_empty() {
                println!("⏭️ Skipped {} sprite(s)", report.skipped.len());
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: EqualizerError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Sprite equalization failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
