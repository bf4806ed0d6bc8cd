pub mod engine;
pub mod pipeline;
pub mod recanvas;

pub use crate::domain::model::{BatchReport, CanvasSize, FillColor, Recanvased, SpriteFile};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
