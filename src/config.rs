/// Cropper configuration
///
/// Loaded once at startup from `$PHOTO_CROPPER_CONFIG`, or from
/// `photo-cropper/config.json` in the user's config directory:
/// - Linux: ~/.config/photo-cropper/config.json
/// - macOS: ~/Library/Application Support/photo-cropper/config.json
/// - Windows: %APPDATA%\photo-cropper\config.json
///
/// A missing file means defaults. An unreadable or invalid file is logged
/// and also falls back to defaults so the form stays usable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CropperError, Result};
use crate::state::layout::{FrameSize, LayoutIntent, SurfaceKind};
use crate::state::transform::{FitPolicy, ZoomRange};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "PHOTO_CROPPER_CONFIG";

/// Size of one secondary display slot
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    pub kind: SurfaceKind,
    pub frame: FrameSize,
}

/// All tunables of the positioning tool
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CropperConfig {
    /// Free-fit (whole image visible) or fill-fit (frame covered)
    pub fit_policy: FitPolicy,
    /// Zoom slider bounds
    pub zoom: ZoomRange,
    /// Master preview frame. In fill-fit mode only the width is used and the
    /// height follows the layout's target aspect ratio.
    pub master_frame: FrameSize,
    /// Secondary preview slots
    pub surfaces: Vec<SurfaceConfig>,
    /// Layout selected when the form opens
    pub default_intent: LayoutIntent,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            fit_policy: FitPolicy::FreeFit,
            zoom: ZoomRange::default(),
            master_frame: FrameSize::new(400.0, 300.0),
            surfaces: vec![
                SurfaceConfig {
                    kind: SurfaceKind::Rectangle,
                    frame: FrameSize::new(200.0, 150.0),
                },
                SurfaceConfig {
                    kind: SurfaceKind::Square,
                    frame: FrameSize::new(150.0, 150.0),
                },
                SurfaceConfig {
                    kind: SurfaceKind::Circle,
                    frame: FrameSize::new(150.0, 150.0),
                },
            ],
            default_intent: LayoutIntent::Teaching,
        }
    }
}

impl CropperConfig {
    /// Master frame for a layout under the configured fit policy
    pub fn master_frame_for(&self, intent: LayoutIntent) -> FrameSize {
        match self.fit_policy {
            FitPolicy::FreeFit => self.master_frame,
            FitPolicy::FillFit => {
                let width = self.master_frame.width;
                FrameSize::new(width, width / intent.target_aspect())
            }
        }
    }

    /// Aspect ratio reported in the payload (fill-fit only)
    pub fn aspect_ratio_for(&self, intent: LayoutIntent) -> Option<f32> {
        match self.fit_policy {
            FitPolicy::FreeFit => None,
            FitPolicy::FillFit => Some(intent.target_aspect()),
        }
    }

    /// Check the geometry the tool cannot work without
    pub fn validate(&self) -> Result<()> {
        if !self.master_frame.is_valid() {
            return Err(CropperError::Config(format!(
                "master frame {}x{} must be positive",
                self.master_frame.width, self.master_frame.height
            )));
        }

        if !self.zoom.is_valid() {
            return Err(CropperError::Config(format!(
                "zoom range [{}, {}] step {} must be positive and contain 1.0",
                self.zoom.min, self.zoom.max, self.zoom.step
            )));
        }

        if let Some(bad) = self.surfaces.iter().find(|s| !s.frame.is_valid()) {
            return Err(CropperError::Config(format!(
                "{:?} preview frame {}x{} must be positive",
                bad.kind, bad.frame.width, bad.frame.height
            )));
        }

        for kind in SurfaceKind::ALL {
            if self.surfaces.iter().filter(|s| s.kind == kind).count() > 1 {
                return Err(CropperError::Config(format!("{:?} preview configured twice", kind)));
            }
        }

        Ok(())
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a config file; a missing file yields `Ok(None)`
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the effective configuration, never failing
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::info!("No config directory available, using defaults");
            return Self::default();
        };

        match Self::read_from(&path) {
            Ok(Some(config)) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Ok(None) => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Where the config file is looked up
    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()?;
        path.push("photo-cropper");
        path.push("config.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CropperConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CropperConfig::from_json(r#"{ "fit_policy": "fill-fit" }"#).unwrap();
        assert_eq!(config.fit_policy, FitPolicy::FillFit);
        assert_eq!(config.zoom, ZoomRange::default());
        assert_eq!(config.surfaces.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CropperConfig {
            default_intent: LayoutIntent::Leadership,
            ..Default::default()
        };
        let restored = CropperConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let config = CropperConfig {
            master_frame: FrameSize::new(0.0, 300.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CropperError::Config(_))));

        let mut config = CropperConfig::default();
        config.surfaces.push(SurfaceConfig {
            kind: SurfaceKind::Circle,
            frame: FrameSize::new(80.0, 80.0),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fill_fit_master_follows_intent_aspect() {
        let config = CropperConfig {
            fit_policy: FitPolicy::FillFit,
            ..Default::default()
        };
        assert_eq!(config.master_frame_for(LayoutIntent::Teaching), FrameSize::new(400.0, 300.0));
        assert_eq!(config.master_frame_for(LayoutIntent::Leadership), FrameSize::new(400.0, 400.0));
        assert_eq!(config.aspect_ratio_for(LayoutIntent::Leadership), Some(1.0));

        let free = CropperConfig::default();
        assert_eq!(free.master_frame_for(LayoutIntent::Leadership), FrameSize::new(400.0, 300.0));
        assert_eq!(free.aspect_ratio_for(LayoutIntent::Teaching), None);
    }

    #[test]
    fn test_missing_file_is_none() {
        let result = CropperConfig::read_from(Path::new("/nonexistent/photo-cropper.json")).unwrap();
        assert!(result.is_none());
    }
}
