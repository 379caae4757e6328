//! Router configuration.
//!
//! Defaults reproduce the router setup the diagram demo has always used:
//! orthogonal routing, a nudge distance of 14 and the penalty table below.

use avoidkit_core::{ConnectorLayout, RoutingPenalty, RoutingType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Routing cost table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltySettings {
    pub segment: f64,
    pub angle: f64,
    pub crossing: f64,
    pub fixed_shared_path: f64,
    pub port_direction: f64,
}

impl Default for PenaltySettings {
    fn default() -> Self {
        Self {
            segment: 40.0,
            angle: 400.0,
            crossing: 4000.0,
            fixed_shared_path: 8000.0,
            port_direction: 4000.0,
        }
    }
}

impl PenaltySettings {
    pub fn get(&self, kind: RoutingPenalty) -> f64 {
        match kind {
            RoutingPenalty::Segment => self.segment,
            RoutingPenalty::Angle => self.angle,
            RoutingPenalty::Crossing => self.crossing,
            RoutingPenalty::FixedSharedPath => self.fixed_shared_path,
            RoutingPenalty::PortDirection => self.port_direction,
        }
    }

    /// Every penalty paired with its kind.
    pub fn iter(&self) -> impl Iterator<Item = (RoutingPenalty, f64)> + '_ {
        RoutingPenalty::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Router settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Path style used by the router
    #[serde(default)]
    pub routing_type: RoutingType,
    /// Spacing between parallel orthogonal segments
    #[serde(default = "default_nudge_distance")]
    pub nudge_distance: f64,
    /// Clearance added around every box outline registered as an obstacle
    #[serde(default)]
    pub shape_margin: f64,
    /// How lines are split into router connectors
    #[serde(default)]
    pub connector_layout: ConnectorLayout,
    /// Cost table handed to the router
    #[serde(default)]
    pub penalties: PenaltySettings,
}

fn default_nudge_distance() -> f64 {
    14.0
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            routing_type: RoutingType::Orthogonal,
            nudge_distance: default_nudge_distance(),
            shape_margin: 0.0,
            connector_layout: ConnectorLayout::PerSegment,
            penalties: PenaltySettings::default(),
        }
    }
}

impl RouterSettings {
    /// Platform config location: `<config dir>/avoidkit/router.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("avoidkit")
            .join("router.toml")
    }

    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a `.toml` or `.json` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match extension(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::info!(path = %path.display(), "Router settings loaded");
        Ok(settings)
    }

    /// Save settings to a `.toml` or `.json` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "Router settings saved");
        Ok(())
    }

    /// Every numeric setting must be finite and non-negative.
    pub fn validate(&self) -> SettingsResult<()> {
        for (kind, value) in self.penalties.iter() {
            check_non_negative(&format!("penalties.{}", kind), value)?;
        }
        check_non_negative("nudge_distance", self.nudge_distance)?;
        check_non_negative("shape_margin", self.shape_margin)?;
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

fn extension(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn check_non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: format!("must be a finite value >= 0, got {}", value),
        });
    }
    Ok(())
}
