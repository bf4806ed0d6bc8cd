use crate::domain::model::{
    CanvasPolicy, CanvasSize, ErrorPolicy, FillColor, Recanvased, SpriteFile,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use image::DynamicImage;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// Files directly inside `dir` whose names match `pattern`, sorted.
    fn list_matching(
        &self,
        dir: &Path,
        pattern: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>>> + Send;
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_dir(&self) -> &Path;
    fn pattern(&self) -> &str;
    fn output_dir(&self) -> &Path;
    fn prefix(&self) -> &str;
    fn canvas_policy(&self) -> CanvasPolicy;
    fn fill_color(&self) -> FillColor;
    fn error_policy(&self) -> ErrorPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn discover(&self) -> Result<Vec<SpriteFile>>;
    async fn resolve_canvas(&self, files: &[SpriteFile]) -> Result<CanvasSize>;
    async fn extract(&self, file: &SpriteFile) -> Result<DynamicImage>;
    async fn transform(
        &self,
        file: SpriteFile,
        source: DynamicImage,
        canvas: CanvasSize,
    ) -> Result<Recanvased>;
    async fn load(&self, sprite: Recanvased) -> Result<PathBuf>;

    fn output_path(&self, file: &SpriteFile) -> PathBuf;
    fn fill_color(&self) -> FillColor;
    fn error_policy(&self) -> ErrorPolicy;
}
