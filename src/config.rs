//! Layout configuration and TOML config file loading.
//!
//! Search order for [`load_config`]:
//! 1. Explicit path if provided (must exist)
//! 2. `scenario-timeline.toml` in the working directory
//! 3. `config.toml` in the platform-specific config directory
//! 4. Built-in defaults

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::focus::FocusRule;

const LOCAL_CONFIG: &str = "scenario-timeline.toml";

/// Geometry and policy knobs for a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Pixel width the whole date domain is mapped onto.
    pub timeline_width: f32,
    pub row_height: f32,
    pub row_gap: f32,
    /// Vertical inset so bars don't touch row edges.
    pub bar_inset: f32,
    /// Length of the horizontal lead-out at each end of an edge path.
    pub edge_stub: f32,
    pub focus_rule: FocusRule,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            timeline_width: 1200.0,
            row_height: 30.0,
            row_gap: 2.0,
            bar_inset: 3.0,
            edge_stub: 8.0,
            focus_rule: FocusRule::default(),
        }
    }
}

impl TimelineConfig {
    /// Distance between the tops of two consecutive rows.
    pub fn row_pitch(&self) -> f32 {
        self.row_height + self.row_gap
    }

    pub fn bar_height(&self) -> f32 {
        self.row_height - 2.0 * self.bar_inset
    }

    pub fn with_focus_rule(mut self, rule: FocusRule) -> Self {
        self.focus_rule = rule;
        self
    }

    pub fn with_timeline_width(mut self, width: f32) -> Self {
        self.timeline_width = width;
        self
    }

    /// Reject values that would produce degenerate geometry.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if !(self.timeline_width.is_finite() && self.timeline_width > 0.0) {
            return Err(TimelineError::Config(format!(
                "timeline_width must be positive, got {}",
                self.timeline_width
            )));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(TimelineError::Config(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if !(self.row_gap.is_finite() && self.row_gap >= 0.0) {
            return Err(TimelineError::Config(format!(
                "row_gap must not be negative, got {}",
                self.row_gap
            )));
        }
        if !(self.edge_stub.is_finite() && self.edge_stub >= 0.0) {
            return Err(TimelineError::Config(format!(
                "edge_stub must not be negative, got {}",
                self.edge_stub
            )));
        }
        if !(self.bar_inset.is_finite() && self.bar_inset >= 0.0 && self.bar_height() > 0.0) {
            return Err(TimelineError::Config(format!(
                "bar_inset {} leaves no bar height in a {} px row",
                self.bar_inset, self.row_height
            )));
        }
        Ok(())
    }
}

/// Find and load configuration, falling back to defaults.
///
/// # Errors
///
/// Returns error if:
/// - An explicit path is provided but the file doesn't exist
/// - A config file exists but cannot be read, parsed or validated
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<TimelineConfig, TimelineError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(system_config) = system_config_path() {
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(TimelineConfig::default())
}

/// Platform config file location, e.g. `~/.config/scenario-timeline/config.toml`.
pub fn system_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "scenario-timeline").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_config_file(path: &Path) -> Result<TimelineConfig, TimelineError> {
    if !path.exists() {
        return Err(TimelineError::Config(format!(
            "missing configuration file: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok(config)
}

/// Parse and validate a TOML configuration document.
pub fn parse_config(content: &str) -> Result<TimelineConfig, TimelineError> {
    let config: TimelineConfig = toml::from_str(content)
        .map_err(|e| TimelineError::Config(format!("failed to parse TOML configuration: {e}")))?;
    config.validate()?;
    Ok(config)
}
