use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const SIZE_X_KEY: &str = "HardwareSetting|ScannerSettingRecord|dblSizeX";
const SIZE_Y_KEY: &str = "HardwareSetting|ScannerSettingRecord|dblSizeY";
const SIZE_Z_KEY: &str = "HardwareSetting|ScannerSettingRecord|dblSizeZ";

/// Values extracted from the microscope metadata sidecar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeMetadata {
    pub channel_count: u32,
    pub images_per_channel: u32,
    /// Physical extents; 0.0 when the file does not carry them
    pub image_width: f32,
    pub image_height: f32,
    pub image_depth: f32,
}

impl Default for VolumeMetadata {
    fn default() -> Self {
        Self {
            channel_count: 0,
            images_per_channel: 0,
            image_width: 0.0,
            image_height: 0.0,
            image_depth: 0.0,
        }
    }
}

/// Parse the Leica-style key/value sidecar text file.
///
/// Lines are whitespace separated after tabs are normalized; unknown keys are
/// skipped. The physical-size lines carry a unit token between the key and
/// the value.
pub fn load_metadata(path: &Path) -> Result<VolumeMetadata> {
    log::info!("Loading metadata from {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading metadata from {}", path.display()))?;
    Ok(parse_metadata(&text))
}

fn parse_metadata(text: &str) -> VolumeMetadata {
    let mut result = VolumeMetadata::default();

    for line in text.lines() {
        let line = line.replace('\t', " ");
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else {
            continue;
        };

        match key {
            "SizeC" => {
                if let Some(value) = parts.next().and_then(|v| v.parse().ok()) {
                    result.channel_count = value;
                }
            }
            "SizeZ" => {
                if let Some(value) = parts.next().and_then(|v| v.parse().ok()) {
                    result.images_per_channel = value;
                }
            }
            SIZE_X_KEY => {
                if let Some(value) = parts.nth(1).and_then(|v| v.parse().ok()) {
                    result.image_width = value;
                }
            }
            SIZE_Y_KEY => {
                if let Some(value) = parts.nth(1).and_then(|v| v.parse().ok()) {
                    result.image_height = value;
                }
            }
            SIZE_Z_KEY => {
                if let Some(value) = parts.nth(1).and_then(|v| v.parse().ok()) {
                    result.image_depth = value;
                }
            }
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_channel_and_slice_counts() {
        let text = "SizeC 5\nSizeZ 40\n";
        let meta = parse_metadata(text);
        assert_eq!(meta.channel_count, 5);
        assert_eq!(meta.images_per_channel, 40);
    }

    #[test]
    fn parses_physical_sizes_with_unit_token() {
        let text = concat!(
            "HardwareSetting|ScannerSettingRecord|dblSizeX m 0.000216\n",
            "HardwareSetting|ScannerSettingRecord|dblSizeY m 0.000216\n",
            "HardwareSetting|ScannerSettingRecord|dblSizeZ m 0.000040\n",
        );
        let meta = parse_metadata(text);
        assert!((meta.image_width - 0.000216).abs() < 1e-9);
        assert!((meta.image_height - 0.000216).abs() < 1e-9);
        assert!((meta.image_depth - 0.000040).abs() < 1e-9);
    }

    #[test]
    fn tolerates_tabs_and_crlf() {
        let text = "SizeC\t3\r\nSizeZ\t12\r\n";
        let meta = parse_metadata(text);
        assert_eq!(meta.channel_count, 3);
        assert_eq!(meta.images_per_channel, 12);
    }

    #[test]
    fn unknown_keys_and_garbage_are_skipped() {
        let text = "Whatever 9\n\nSizeC notanumber\nSizeZ 7\n";
        let meta = parse_metadata(text);
        assert_eq!(meta.channel_count, 0);
        assert_eq!(meta.images_per_channel, 7);
    }
}
