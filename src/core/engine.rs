use crate::core::{Pipeline, Storage};
use crate::domain::model::{
    BatchPlan, BatchReport, CanvasSize, ErrorPolicy, ProcessedSprite, SkippedSprite, SpriteFile,
};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::Path;

/// Drives a [`Pipeline`] over every discovered sprite, one file at a time.
pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Discover inputs and resolve the canvas without touching any output.
    pub async fn plan(&self) -> Result<BatchPlan> {
        let files = self.pipeline.discover().await?;
        let canvas = self.pipeline.resolve_canvas(&files).await?;
        Ok(BatchPlan { canvas, files })
    }

    pub async fn run(&self) -> Result<BatchReport> {
        tracing::info!("Starting sprite equalization...");
        self.monitor.log_stats("Start");

        let BatchPlan { canvas, files } = self.plan().await?;
        tracing::info!(
            "Found {} sprite(s), canvas {}, fill {}",
            files.len(),
            canvas,
            self.pipeline.fill_color()
        );
        self.monitor.log_stats("Discovery");

        let mut report = BatchReport::new(canvas, self.pipeline.fill_color());
        let policy = self.pipeline.error_policy();

        for file in files {
            let input = file.path.clone();
            match self.process_one(file, canvas).await {
                Ok(processed) => {
                    tracing::info!(
                        "✅ {} -> {}",
                        processed.input.display(),
                        processed.output.display()
                    );
                    report.processed.push(processed);
                }
                Err(e) if policy == ErrorPolicy::Skip => {
                    tracing::warn!("⏭️ Skipping {}: {}", input.display(), e);
                    report.skipped.push(SkippedSprite {
                        input,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!("❌ Failed on {}: {}", input.display(), e);
                    return Err(e);
                }
            }
        }

        report.finish();
        self.monitor.log_final_stats();
        tracing::info!(
            "Processed {} sprite(s), skipped {}",
            report.processed.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    async fn process_one(&self, file: SpriteFile, canvas: CanvasSize) -> Result<ProcessedSprite> {
        let input = file.path.clone();

        let source = self.pipeline.extract(&file).await?;
        let sprite = self.pipeline.transform(file, source, canvas).await?;
        let (source_width, source_height) = sprite.source_size;
        let (offset_x, offset_y) = sprite.offset;
        let output = self.pipeline.load(sprite).await?;

        Ok(ProcessedSprite {
            input,
            output,
            source_width,
            source_height,
            offset_x,
            offset_y,
        })
    }
}

pub async fn write_report<S: Storage>(storage: &S, path: &Path, report: &BatchReport) -> Result<()> {
    let json = report.to_json()?;
    storage.write_file(path, json.as_bytes()).await
}
