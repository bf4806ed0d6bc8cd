use clap::Parser;
use image::{Rgba, RgbaImage};
use sprite_equalizer::core::engine::write_report;
use sprite_equalizer::domain::model::BatchReport;
use sprite_equalizer::{BatchEngine, CliConfig, EqualizerError, LocalStorage, RecanvasPipeline};
use std::path::Path;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);

fn write_png(path: &Path, width: u32, height: u32, pixel: Rgba<u8>) {
    RgbaImage::from_pixel(width, height, pixel)
        .save(path)
        .unwrap();
}

fn cli_config(input: &Path, output: &Path, extra: &[&str]) -> CliConfig {
    let mut args = vec![
        "sprite-equalizer".to_string(),
        "--input-dir".to_string(),
        input.to_string_lossy().to_string(),
        "--output-dir".to_string(),
        output.to_string_lossy().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    CliConfig::parse_from(args)
}

#[tokio::test]
async fn test_end_to_end_ten_by_ten_scenario() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_png(
        &input.path().join("49192_idle.png"),
        10,
        10,
        Rgba([10, 200, 30, 255]),
    );

    let config = cli_config(input.path(), output.path(), &[]);
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));

    let report = assert_ok!(engine.run().await);
    assert_eq!(report.processed.len(), 1);

    let out_path = output.path().join("alt49192_idle.png");
    assert_eq!(report.processed[0].output, out_path);

    let out = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (23, 23));
    for (x, y, pixel) in out.enumerate_pixels() {
        if (6..16).contains(&x) && (13..23).contains(&y) {
            assert_eq!(*pixel, Rgba([10, 200, 30, 255]));
        } else {
            assert_eq!(*pixel, MAGENTA);
        }
    }

    // 原始檔案不受影響
    let original = image::open(input.path().join("49192_idle.png")).unwrap();
    assert_eq!((original.width(), original.height()), (10, 10));
}

#[tokio::test]
async fn test_only_matching_files_are_processed() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_png(&input.path().join("49192_a.png"), 4, 4, Rgba([0, 0, 0, 255]));
    write_png(&input.path().join("49192_b.png"), 5, 7, Rgba([0, 0, 0, 255]));
    write_png(&input.path().join("slice_1.png"), 5, 7, Rgba([0, 0, 0, 255]));

    let config = cli_config(input.path(), output.path(), &[]);
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));
    let report = engine.run().await.unwrap();

    assert_eq!(report.processed.len(), 2);
    assert!(output.path().join("alt49192_a.png").exists());
    assert!(output.path().join("alt49192_b.png").exists());
    assert!(!output.path().join("altslice_1.png").exists());
}

#[tokio::test]
async fn test_empty_match_set_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let config = cli_config(input.path(), output.path(), &[]);
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));
    let report = assert_ok!(engine.run().await);

    assert!(report.processed.is_empty());
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_corrupt_input_aborts_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("49192_a.png"), b"definitely not a png").unwrap();
    write_png(&input.path().join("49192_b.png"), 3, 3, Rgba([1, 2, 3, 255]));

    let config = cli_config(input.path(), output.path(), &[]);
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));

    let err = assert_err!(engine.run().await);
    assert!(matches!(err, EqualizerError::ImageError(_)));
    assert!(!output.path().join("alt49192_b.png").exists());
}

#[tokio::test]
async fn test_skip_policy_continues_and_reports() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("49192_a.png"), b"definitely not a png").unwrap();
    write_png(&input.path().join("49192_b.png"), 3, 3, Rgba([1, 2, 3, 255]));

    let config = cli_config(input.path(), output.path(), &["--on-error", "skip"]);
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));
    let report = engine.run().await.unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].input, input.path().join("49192_a.png"));
    assert!(output.path().join("alt49192_b.png").exists());

    let report_path = output.path().join("report.json");
    write_report(&LocalStorage::new(), &report_path, &report)
        .await
        .unwrap();
    let parsed: BatchReport =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.fill.to_string(), "rgb(255, 0, 255)");
}

#[tokio::test]
async fn test_fit_largest_custom_fill_and_prefix() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_png(&input.path().join("slice_1.png"), 8, 3, Rgba([9, 9, 9, 255]));
    write_png(&input.path().join("slice_2.png"), 2, 12, Rgba([9, 9, 9, 255]));

    let config = cli_config(
        input.path(),
        output.path(),
        &[
            "--pattern",
            "slice*",
            "--fit-largest",
            "--fill",
            "#000000",
            "--prefix",
            "eq_",
        ],
    );
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));
    let report = engine.run().await.unwrap();

    assert_eq!((report.canvas.width, report.canvas.height), (8, 12));

    let second = image::open(output.path().join("eq_slice_2.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(second.dimensions(), (8, 12));
    assert_eq!(*second.get_pixel(3, 0), Rgba([9, 9, 9, 255]));
    assert_eq!(*second.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    assert_eq!(report.processed[1].offset_x, 3);
}

#[tokio::test]
async fn test_dry_run_plan_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_png(&input.path().join("49192_a.png"), 4, 4, Rgba([0, 0, 0, 255]));

    let config = cli_config(input.path(), output.path(), &["--dry-run"]);
    let engine = BatchEngine::new(RecanvasPipeline::new(LocalStorage::new(), config));
    let plan = engine.plan().await.unwrap();

    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].file_name, "49192_a.png");
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}
