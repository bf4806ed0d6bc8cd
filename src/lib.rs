pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use core::{engine::BatchEngine, pipeline::RecanvasPipeline};
pub use utils::error::{EqualizerError, Result};
