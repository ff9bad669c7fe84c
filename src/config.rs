use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::camera::SpeedModifiers;

/// Physical voxel extents of the volume, in calibrated units per axis.
///
/// Camera math runs in normalized volume space (width = 1.0); this scale is
/// only used to convert positions and distances for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicalScale {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for PhysicalScale {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

impl PhysicalScale {
    /// Height as a fraction of width in normalized volume space.
    pub fn height_ratio(&self) -> f32 {
        if self.width > 0.0 {
            self.height / self.width
        } else {
            1.0
        }
    }

    /// Depth as a fraction of width in normalized volume space.
    pub fn depth_ratio(&self) -> f32 {
        if self.width > 0.0 {
            self.depth / self.width
        } else {
            1.0
        }
    }
}

/// Per-channel selection for volume compositing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub enabled: bool,
    /// Page offset of this channel within each slice group
    pub index: u32,
}

fn default_channels() -> Vec<ChannelConfig> {
    vec![ChannelConfig {
        enabled: true,
        index: 0,
    }]
}

/// Persisted viewer configuration.
///
/// Loaded once at startup and treated as immutable during the session, except
/// for the speed modifiers which are written back on exit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerSettings {
    #[serde(default)]
    pub volume_path: Option<PathBuf>,
    #[serde(default)]
    pub metadata_path: Option<PathBuf>,
    /// Pages per slice group in the TIFF stack (channel count)
    #[serde(default)]
    pub channel_stride: Option<u32>,
    /// Slices per channel
    #[serde(default)]
    pub images_per_channel: Option<u32>,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelConfig>,
    #[serde(default)]
    pub physical_scale: Option<PhysicalScale>,
    #[serde(default)]
    pub speed_modifiers: Option<SpeedModifiers>,
}

impl ViewerSettings {
    /// Load settings from a JSON file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                channels: default_channels(),
                ..Self::default()
            });
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings from {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ViewerSettings::load(&dir.path().join("absent.json")).unwrap();
        assert!(settings.volume_path.is_none());
        assert_eq!(settings.channels.len(), 1);
        assert!(settings.channels[0].enabled);
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cellview.json");

        let mut settings = ViewerSettings::default();
        settings.volume_path = Some(PathBuf::from("cells.tif"));
        settings.channel_stride = Some(5);
        settings.channels = vec![
            ChannelConfig {
                enabled: true,
                index: 0,
            },
            ChannelConfig {
                enabled: false,
                index: 2,
            },
        ];
        settings.physical_scale = Some(PhysicalScale {
            width: 200.0,
            height: 200.0,
            depth: 40.0,
        });
        settings.save(&path).unwrap();

        let loaded = ViewerSettings::load(&path).unwrap();
        assert_eq!(loaded.volume_path.as_deref(), Some(Path::new("cells.tif")));
        assert_eq!(loaded.channel_stride, Some(5));
        assert_eq!(loaded.channels.len(), 2);
        assert!(!loaded.channels[1].enabled);
        let scale = loaded.physical_scale.unwrap();
        assert_eq!(scale.depth, 40.0);
    }

    #[test]
    fn scale_ratios_guard_zero_width() {
        let scale = PhysicalScale {
            width: 0.0,
            height: 3.0,
            depth: 7.0,
        };
        assert_eq!(scale.height_ratio(), 1.0);
        assert_eq!(scale.depth_ratio(), 1.0);

        let scale = PhysicalScale {
            width: 100.0,
            height: 50.0,
            depth: 25.0,
        };
        assert!((scale.height_ratio() - 0.5).abs() < 1e-6);
        assert!((scale.depth_ratio() - 0.25).abs() < 1e-6);
    }
}
