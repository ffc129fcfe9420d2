//! Timeline configuration
//!
//! Every threshold and layout constant the components need, grouped in
//! sections and loadable from TOML. Missing sections and fields fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported config version '{0}'")]
    UnsupportedVersion(String),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    pub app: AppSection,
    pub layout: LayoutConfig,
    pub clustering: ClusteringConfig,
    pub viewport: ViewportConfig,
    pub annotations: AnnotationConfig,
    pub axes: AxesConfig,
}

impl TimelineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TimelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.app.is_supported_version() {
            return Err(ConfigError::UnsupportedVersion(self.app.version.clone()));
        }
        if !(self.layout.width > 0.0 && self.layout.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout size must be positive, got {}x{}",
                self.layout.width, self.layout.height
            )));
        }
        if self.clustering.max_clusters == 0 {
            return Err(ConfigError::Invalid("clustering.max_clusters must be at least 1".into()));
        }
        if !(self.clustering.merge_distance_secs >= 0.0) {
            return Err(ConfigError::Invalid(
                "clustering.merge_distance_secs must be non-negative".into(),
            ));
        }
        if !(self.viewport.initial_zoom > 0.0) {
            return Err(ConfigError::Invalid("viewport.initial_zoom must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.viewport.wheel_zoom_step) {
            return Err(ConfigError::Invalid(
                "viewport.wheel_zoom_step must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Config format metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSection {
    pub version: String,
}

impl AppSection {
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        matches!(self.version.as_str(), "1.0.0")
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}

/// Chart size in pixels. The overview strip (brush) sits at the right edge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub overview_width: f64,
}

impl LayoutConfig {
    /// Width available to the time-remaining axis.
    pub fn plot_width(&self) -> f64 {
        (self.width - self.overview_width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Horizontal midpoint used to decide which side labels open towards.
    pub fn label_midpoint(&self) -> f64 {
        (self.margin_left + self.width - self.margin_right) / 2.0
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin_top: 20.0,
            margin_right: 20.0,
            margin_bottom: 20.0,
            margin_left: 100.0,
            overview_width: 100.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Visible event counts up to this value skip partitioning.
    pub partition_cutoff: usize,
    /// Number of classes requested from the natural-breaks primitive.
    pub max_clusters: usize,
    /// Merge distance at zoom factor 1; divided by the current zoom factor.
    pub merge_distance_secs: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            partition_cutoff: 24,
            max_clusters: 10,
            merge_distance_secs: 6.0 * crate::time_domain::SECONDS_PER_HOUR,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub initial_zoom: f64,
    /// Fractional selection change per modifier+wheel tick.
    pub wheel_zoom_step: f64,
    /// Brush selections shorter than this (overview pixels) are ignored.
    pub min_selection_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_zoom: 2.0,
            wheel_zoom_step: 0.05,
            min_selection_px: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnnotationConfig {
    pub hit_radius: f64,
    pub label_dx: f64,
    pub label_dy: f64,
    pub show_details: bool,
}

impl AnnotationConfig {
    pub fn hit_radius_squared(&self) -> f64 {
        self.hit_radius * self.hit_radius
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            hit_radius: 16.0,
            label_dx: 35.0,
            label_dy: 15.0,
            show_details: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AxesConfig {
    pub ticks_x: usize,
    pub ticks_y_per_zoom: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            ticks_x: 16,
            ticks_y_per_zoom: 10.0,
        }
    }
}
