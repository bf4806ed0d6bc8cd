pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::ConfigProvider;
    use crate::domain::model::{
        CanvasPolicy, CanvasSize, ErrorPolicy, FillColor, DEFAULT_CANVAS_HEIGHT,
        DEFAULT_CANVAS_WIDTH, DEFAULT_FILL, DEFAULT_PATTERN, DEFAULT_PREFIX,
    };
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "sprite-equalizer")]
    #[command(about = "Pad sprites onto a fixed-size matte canvas, centered and bottom-aligned")]
    pub struct CliConfig {
        #[arg(long, default_value = ".")]
        pub input_dir: PathBuf,

        #[arg(long, default_value = DEFAULT_PATTERN, help = "Glob pattern matched against file names")]
        pub pattern: String,

        #[arg(long, default_value = ".")]
        pub output_dir: PathBuf,

        #[arg(long, default_value = DEFAULT_PREFIX)]
        pub prefix: String,

        #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
        pub width: u32,

        #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
        pub height: u32,

        #[arg(long, help = "Size the canvas to the largest matched sprite")]
        pub fit_largest: bool,

        #[arg(long, default_value = DEFAULT_FILL, help = "Matte color, rgb(R, G, B) or #rrggbb")]
        pub fill: FillColor,

        #[arg(long, default_value = "abort", help = "What to do when a file fails: abort or skip")]
        pub on_error: ErrorPolicy,

        #[arg(long, help = "Write a JSON report of the batch to this path")]
        pub report: Option<PathBuf>,

        #[arg(long, help = "List what would be processed without writing anything")]
        pub dry_run: bool,

        #[arg(long, help = "Log CPU and memory usage")]
        pub monitor: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_dir(&self) -> &Path {
            &self.input_dir
        }

        fn pattern(&self) -> &str {
            &self.pattern
        }

        fn output_dir(&self) -> &Path {
            &self.output_dir
        }

        fn prefix(&self) -> &str {
            &self.prefix
        }

        fn canvas_policy(&self) -> CanvasPolicy {
            if self.fit_largest {
                CanvasPolicy::FitLargest
            } else {
                CanvasPolicy::Fixed(CanvasSize::new(self.width, self.height))
            }
        }

        fn fill_color(&self) -> FillColor {
            self.fill
        }

        fn error_policy(&self) -> ErrorPolicy {
            self.on_error
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input_dir", &self.input_dir)?;
            validation::validate_path("output_dir", &self.output_dir)?;
            validation::validate_pattern("pattern", &self.pattern)?;
            validation::validate_prefix("prefix", &self.prefix)?;
            if !self.fit_largest {
                validation::validate_canvas_dimension("width", self.width)?;
                validation::validate_canvas_dimension("height", self.height)?;
            }
            if let Some(report) = &self.report {
                validation::validate_path("report", report)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_match_original_script() {
            let config = CliConfig::parse_from(["sprite-equalizer"]);

            assert_eq!(config.pattern, "49192*");
            assert_eq!(config.prefix, "alt");
            assert_eq!(config.input_dir, PathBuf::from("."));
            assert_eq!(config.output_dir, PathBuf::from("."));
            assert_eq!(
                config.canvas_policy(),
                CanvasPolicy::Fixed(CanvasSize::new(23, 23))
            );
            assert_eq!(config.fill_color(), FillColor::MAGENTA);
            assert_eq!(config.error_policy(), ErrorPolicy::Abort);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_parse_overrides() {
            let config = CliConfig::parse_from([
                "sprite-equalizer",
                "--input-dir",
                "sprites",
                "--pattern",
                "slice*",
                "--fill",
                "#000000",
                "--on-error",
                "skip",
                "--fit-largest",
            ]);

            assert_eq!(config.input_dir, PathBuf::from("sprites"));
            assert_eq!(config.canvas_policy(), CanvasPolicy::FitLargest);
            assert_eq!(config.fill_color(), FillColor { r: 0, g: 0, b: 0 });
            assert_eq!(config.error_policy(), ErrorPolicy::Skip);
        }

        #[test]
        fn test_rejects_bad_fill() {
            let result = CliConfig::try_parse_from(["sprite-equalizer", "--fill", "purple"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_validation_rejects_zero_width() {
            let config = CliConfig::parse_from(["sprite-equalizer", "--width", "0"]);
            assert!(config.validate().is_err());
        }
    }
}
