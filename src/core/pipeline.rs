use crate::core::recanvas::{self, compute_offset, largest_canvas, output_file_name};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    CanvasPolicy, CanvasSize, ErrorPolicy, FillColor, Recanvased, SpriteFile,
};
use crate::utils::error::{EqualizerError, Result};
use crate::utils::validation;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::PathBuf;

pub struct RecanvasPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RecanvasPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 只讀取檔頭取得尺寸，不做完整解碼
    async fn read_dimensions(&self, file: &SpriteFile) -> Result<(u32, u32)> {
        let bytes = self.storage.read_file(&file.path).await?;
        let dimensions = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(dimensions)
    }
}

/// Encode `image` in the format implied by the extension of `path`.
pub fn encode_for_path(image: &image::RgbaImage, path: &std::path::Path) -> Result<Vec<u8>> {
    let unsupported = || EqualizerError::UnsupportedOutputFormat {
        path: path.to_path_buf(),
    };
    let format = ImageFormat::from_path(path).map_err(|_| unsupported())?;
    // 副檔名可辨識但編碼器 feature 未開啟 (例如 webp、tiff)
    if !format.writing_enabled() {
        return Err(unsupported());
    }

    let mut buffer = Cursor::new(Vec::new());
    match format {
        // JPEG 不支援 alpha 通道；畫布本身是不透明的
        ImageFormat::Jpeg => {
            DynamicImage::ImageRgba8(image.clone())
                .to_rgb8()
                .write_to(&mut buffer, format)?;
        }
        _ => image.write_to(&mut buffer, format)?,
    }
    Ok(buffer.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RecanvasPipeline<S, C> {
    async fn discover(&self) -> Result<Vec<SpriteFile>> {
        let input_dir = self.config.input_dir();
        let pattern = self.config.pattern();

        tracing::debug!(
            "Searching {} for files matching '{}'",
            input_dir.display(),
            pattern
        );
        let paths = self.storage.list_matching(input_dir, pattern).await?;

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match SpriteFile::from_path(path) {
                Some(file) => files.push(file),
                None => tracing::warn!("Skipping match without a UTF-8 file name"),
            }
        }

        tracing::debug!("Discovered {} sprite(s)", files.len());
        Ok(files)
    }

    async fn resolve_canvas(&self, files: &[SpriteFile]) -> Result<CanvasSize> {
        match self.config.canvas_policy() {
            CanvasPolicy::Fixed(size) => Ok(size),
            CanvasPolicy::FitLargest => {
                let mut sizes = Vec::with_capacity(files.len());
                for file in files {
                    sizes.push(self.read_dimensions(file).await?);
                }
                // 沒有輸入時退回預設尺寸，反正不會寫出任何檔案
                let canvas = largest_canvas(sizes).unwrap_or_default();
                validation::validate_canvas_dimension("fit_largest.width", canvas.width)?;
                validation::validate_canvas_dimension("fit_largest.height", canvas.height)?;
                tracing::debug!("Fit-largest canvas resolved to {}", canvas);
                Ok(canvas)
            }
        }
    }

    async fn extract(&self, file: &SpriteFile) -> Result<DynamicImage> {
        let bytes = self.storage.read_file(&file.path).await?;
        tracing::debug!("Decoding {} ({} bytes)", file.path.display(), bytes.len());
        Ok(image::load_from_memory(&bytes)?)
    }

    async fn transform(
        &self,
        file: SpriteFile,
        source: DynamicImage,
        canvas: CanvasSize,
    ) -> Result<Recanvased> {
        let source_size = source.dimensions();
        let offset = compute_offset(canvas, source_size);

        if !canvas.fits(source_size) {
            tracing::warn!(
                "⚠️ {} is {}x{}, larger than the {} canvas; it will be clipped",
                file.file_name,
                source_size.0,
                source_size.1,
                canvas
            );
        }

        let image = recanvas::recanvas(&source, canvas, self.config.fill_color());

        Ok(Recanvased {
            source: file,
            source_size,
            offset,
            image,
        })
    }

    async fn load(&self, sprite: Recanvased) -> Result<PathBuf> {
        let output_path = self.output_path(&sprite.source);
        let data = encode_for_path(&sprite.image, &output_path)?;

        tracing::debug!(
            "Writing {} ({} bytes)",
            output_path.display(),
            data.len()
        );
        self.storage.write_file(&output_path, &data).await?;

        Ok(output_path)
    }

    fn output_path(&self, file: &SpriteFile) -> PathBuf {
        self.config
            .output_dir()
            .join(output_file_name(self.config.prefix(), &file.file_name))
    }

    fn fill_color(&self) -> FillColor {
        self.config.fill_color()
    }

    fn error_policy(&self) -> ErrorPolicy {
        self.config.error_policy()
    }
}
