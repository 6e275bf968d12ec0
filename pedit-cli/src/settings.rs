//! Editor settings file
//!
//! Keys use the same SCREAMING_SNAKE_CASE names as the desktop editor's
//! `settings.json`. Every key is optional and falls back to its default.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use pedit_core::{FlipAxis, BRIGHTNESS_RANGE, CONTRAST_RANGE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MainWindow {
    pub min_width: u32,
    pub min_height: u32,
    pub title: String,
}

impl Default for MainWindow {
    fn default() -> Self {
        Self {
            min_width: 800,
            min_height: 600,
            title: "Photo Editor".to_string(),
        }
    }
}

/// Degrees for the two rotate actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RotationDirection {
    pub cw: i32,
    pub ccw: i32,
}

impl Default for RotationDirection {
    fn default() -> Self {
        Self { cw: 90, ccw: -90 }
    }
}

/// Scale vectors for the two flip actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ReflectionDirection {
    pub horizontal: [f64; 2],
    pub vertical: [f64; 2],
}

impl Default for ReflectionDirection {
    fn default() -> Self {
        Self {
            horizontal: [-1.0, 1.0],
            vertical: [1.0, -1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EditorSettings {
    pub icon_path: PathBuf,
    pub zoom_factor: f64,
    pub main_window: MainWindow,
    pub rotation_direction: RotationDirection,
    pub reflection_direction: ReflectionDirection,
    pub brightness_min_value: i32,
    pub brightness_max_value: i32,
    pub contrast_min_value: i32,
    pub contrast_max_value: i32,
    #[serde(rename = "MOUSEWHEEL_UP")]
    pub mousewheel_up: i32,
    #[serde(rename = "MOUSEWHEEL_DOWN")]
    pub mousewheel_down: i32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            icon_path: PathBuf::from("../assets/icons"),
            zoom_factor: 0.25,
            main_window: MainWindow::default(),
            rotation_direction: RotationDirection::default(),
            reflection_direction: ReflectionDirection::default(),
            brightness_min_value: *BRIGHTNESS_RANGE.start(),
            brightness_max_value: *BRIGHTNESS_RANGE.end(),
            contrast_min_value: *CONTRAST_RANGE.start(),
            contrast_max_value: *CONTRAST_RANGE.end(),
            mousewheel_up: 120,
            mousewheel_down: -120,
        }
    }
}

impl EditorSettings {
    /// Read and validate a settings file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `path`, or the defaults when no file is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.zoom_factor > 0.0 && self.zoom_factor < 1.0) {
            return Err(SettingsError::Invalid {
                key: "ZOOM_FACTOR",
                reason: format!("{} is not in (0, 1)", self.zoom_factor),
            });
        }

        check_slider(
            "BRIGHTNESS_MIN_VALUE",
            self.brightness_min_value,
            self.brightness_max_value,
            &BRIGHTNESS_RANGE,
        )?;
        check_slider(
            "CONTRAST_MIN_VALUE",
            self.contrast_min_value,
            self.contrast_max_value,
            &CONTRAST_RANGE,
        )?;

        let reflection = &self.reflection_direction;
        for (key, scale) in [
            ("REFLECTION_DIRECTION.HORIZONTAL", reflection.horizontal),
            ("REFLECTION_DIRECTION.VERTICAL", reflection.vertical),
        ] {
            if flip_axis(scale).is_none() {
                return Err(SettingsError::Invalid {
                    key,
                    reason: format!("{scale:?} is not [-1, 1] or [1, -1]"),
                });
            }
        }

        if self.mousewheel_up == self.mousewheel_down {
            return Err(SettingsError::Invalid {
                key: "MOUSEWHEEL_UP",
                reason: "same delta as MOUSEWHEEL_DOWN".to_string(),
            });
        }
        Ok(())
    }

    pub fn brightness_range(&self) -> RangeInclusive<i32> {
        self.brightness_min_value..=self.brightness_max_value
    }

    pub fn contrast_range(&self) -> RangeInclusive<i32> {
        self.contrast_min_value..=self.contrast_max_value
    }

    pub fn horizontal_flip(&self) -> Option<FlipAxis> {
        flip_axis(self.reflection_direction.horizontal)
    }

    pub fn vertical_flip(&self) -> Option<FlipAxis> {
        flip_axis(self.reflection_direction.vertical)
    }
}

fn check_slider(
    key: &'static str,
    min: i32,
    max: i32,
    limits: &RangeInclusive<i32>,
) -> Result<()> {
    if min > max || !limits.contains(&min) || !limits.contains(&max) {
        return Err(SettingsError::Invalid {
            key,
            reason: format!(
                "slider {min}..={max} must be ordered and inside [{}, {}]",
                limits.start(),
                limits.end()
            ),
        });
    }
    Ok(())
}

/// Flip axis for a reflection scale vector
fn flip_axis(scale: [f64; 2]) -> Option<FlipAxis> {
    match scale {
        [x, y] if x == -1.0 && y == 1.0 => Some(FlipAxis::Horizontal),
        [x, y] if x == 1.0 && y == -1.0 => Some(FlipAxis::Vertical),
        _ => None,
    }
}
