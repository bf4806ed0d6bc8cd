use anyhow::Context;
use clap::Parser;
use sprite_equalizer::config::toml_config::TomlConfig;
use sprite_equalizer::core::engine::write_report;
use sprite_equalizer::core::{ConfigProvider, Pipeline};
use sprite_equalizer::domain::model::CanvasPolicy;
use sprite_equalizer::utils::error::ErrorSeverity;
use sprite_equalizer::utils::logger::{self, LogFormat};
use sprite_equalizer::utils::validation::Validate;
use sprite_equalizer::{BatchEngine, LocalStorage, RecanvasPipeline};

#[derive(Parser)]
#[command(name = "toml-equalizer")]
#[command(about = "Sprite equalizer driven by a TOML job file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "equalizer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of the compact format
    #[arg(long)]
    json_logs: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, args.verbose);

    tracing::info!("🚀 Starting TOML-based sprite equalizer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let report_path = config.report_path().map(|p| p.to_path_buf());
    let storage = LocalStorage::new();
    let pipeline = RecanvasPipeline::new(storage.clone(), config);
    let engine = BatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        let plan = engine
            .plan()
            .await
            .context("Failed to plan the sprite batch")?;
        println!("📋 {} sprite(s) on a {} canvas", plan.files.len(), plan.canvas);
        for file in &plan.files {
            println!(
                "  {} -> {}",
                file.path.display(),
                engine.pipeline().output_path(file).display()
            );
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(report) => {
            if let Some(path) = report_path {
                write_report(&storage, &path, &report)
                    .await
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                tracing::info!("📝 Report written to: {}", path.display());
            }
            println!(
                "✅ Equalized {} sprite(s), skipped {}",
                report.processed.len(),
                report.skipped.len()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Sprite equalization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        tracing::info!("   {}", description);
    }
    tracing::info!(
        "   Source: {}/{}",
        config.input_dir().display(),
        config.pattern()
    );
    match config.canvas_policy() {
        CanvasPolicy::Fixed(size) => tracing::info!("   Canvas: {}", size),
        CanvasPolicy::FitLargest => tracing::info!("   Canvas: fit largest input"),
    }
    tracing::info!("   Fill: {}", config.fill_color());
    tracing::info!(
        "   Output: {}/{}<name>",
        config.output_dir().display(),
        config.prefix()
    );
    tracing::info!("   On error: {}", config.error_policy());
}
