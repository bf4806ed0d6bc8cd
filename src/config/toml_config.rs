use crate::core::ConfigProvider;
use crate::domain::model::{
    CanvasPolicy, CanvasSize, ErrorPolicy, FillColor, DEFAULT_CANVAS_HEIGHT,
    DEFAULT_CANVAS_WIDTH, DEFAULT_PREFIX,
};
use crate::utils::error::{EqualizerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub source: SourceConfig,
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "current_dir")]
    pub input_dir: PathBuf,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit_largest: Option<bool>,
    pub fill: Option<FillColor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_dir: Option<PathBuf>,
    pub prefix: Option<String>,
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_error: Option<ErrorPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn current_dir() -> PathBuf {
    PathBuf::from(".")
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EqualizerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EqualizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SPRITE_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EqualizerError::ProcessingError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_path("source.input_dir", &self.source.input_dir)?;
        validation::validate_pattern("source.pattern", &self.source.pattern)?;

        if !self.fit_largest() {
            // 檔案配置必須明確指定尺寸
            let width = validation::validate_required_field("canvas.width", &self.canvas.width)?;
            let height =
                validation::validate_required_field("canvas.height", &self.canvas.height)?;
            validation::validate_canvas_dimension("canvas.width", *width)?;
            validation::validate_canvas_dimension("canvas.height", *height)?;
        }

        if let Some(dir) = &self.output.output_dir {
            validation::validate_path("output.output_dir", dir)?;
        }
        if let Some(prefix) = &self.output.prefix {
            validation::validate_prefix("output.prefix", prefix)?;
        }
        if let Some(report) = &self.output.report {
            validation::validate_path("output.report", report)?;
        }

        Ok(())
    }

    pub fn fit_largest(&self) -> bool {
        self.canvas.fit_largest.unwrap_or(false)
    }

    pub fn report_path(&self) -> Option<&Path> {
        self.output.report.as_deref()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_dir(&self) -> &Path {
        &self.source.input_dir
    }

    fn pattern(&self) -> &str {
        &self.source.pattern
    }

    fn output_dir(&self) -> &Path {
        self.output.output_dir.as_deref().unwrap_or(Path::new("."))
    }

    fn prefix(&self) -> &str {
        self.output.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    fn canvas_policy(&self) -> CanvasPolicy {
        if self.fit_largest() {
            CanvasPolicy::FitLargest
        } else {
            CanvasPolicy::Fixed(CanvasSize::new(
                self.canvas.width.unwrap_or(DEFAULT_CANVAS_WIDTH),
                self.canvas.height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
            ))
        }
    }

    fn fill_color(&self) -> FillColor {
        self.canvas.fill.unwrap_or_default()
    }

    fn error_policy(&self) -> ErrorPolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_error)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
