use crate::utils::error::EqualizerError;
use chrono::{DateTime, Utc};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_CANVAS_WIDTH: u32 = 23;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 23;
pub const DEFAULT_PREFIX: &str = "alt";
pub const DEFAULT_PATTERN: &str = "49192*";
pub const DEFAULT_FILL: &str = "rgb(255, 0, 255)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 來源圖是否能完整放入畫布
    pub fn fits(&self, source: (u32, u32)) -> bool {
        source.0 <= self.width && source.1 <= self.height
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasPolicy {
    Fixed(CanvasSize),
    /// Largest width and largest height among the matched inputs.
    FitLargest,
}

/// Opaque matte color painted wherever no source pixel lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FillColor {
    pub const MAGENTA: FillColor = FillColor { r: 255, g: 0, b: 255 };

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for FillColor {
    fn default() -> Self {
        Self::MAGENTA
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for FillColor {
    type Err = EqualizerError;

    /// Accepts `rgb(R, G, B)` and `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EqualizerError::InvalidConfigValueError {
            field: "fill".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid("Hex colors must look like #rrggbb"));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid("Invalid hex digit"))
            };
            return Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            });
        }

        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| invalid("Expected rgb(R, G, B) or #rrggbb"))?;

        let channels = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| invalid("Channels must be integers between 0 and 255"))?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self {
                r: *r,
                g: *g,
                b: *b,
            }),
            _ => Err(invalid("rgb() takes exactly three channels")),
        }
    }
}

impl TryFrom<String> for FillColor {
    type Error = EqualizerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FillColor> for String {
    fn from(color: FillColor) -> Self {
        color.to_string()
    }
}

/// What happens to the rest of the batch when one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = EqualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(EqualizerError::InvalidConfigValueError {
                field: "on_error".to_string(),
                value: other.to_string(),
                reason: "Expected 'abort' or 'skip'".to_string(),
            }),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => f.write_str("abort"),
            ErrorPolicy::Skip => f.write_str("skip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SpriteFile {
    /// Returns `None` for paths without a UTF-8 file name.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        Some(Self { path, file_name })
    }
}

/// A composited sprite that has not been written yet.
#[derive(Debug, Clone)]
pub struct Recanvased {
    pub source: SpriteFile,
    pub source_size: (u32, u32),
    pub offset: (i64, i64),
    pub image: RgbaImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedSprite {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub offset_x: i64,
    pub offset_y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSprite {
    pub input: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub canvas: CanvasSize,
    pub fill: FillColor,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub processed: Vec<ProcessedSprite>,
    pub skipped: Vec<SkippedSprite>,
}

impl BatchReport {
    pub fn new(canvas: CanvasSize, fill: FillColor) -> Self {
        Self {
            canvas,
            fill,
            started_at: Utc::now(),
            finished_at: None,
            processed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Canvas and inputs resolved before any file is written.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub canvas: CanvasSize,
    pub files: Vec<SpriteFile>,
}
