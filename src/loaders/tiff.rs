use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::ColorType;

use crate::config::ChannelConfig;

/// Composited volume ready for 3D texture upload: interleaved RGBA8 voxels,
/// `depth` slices of `width * height` pixels.
#[derive(Debug, Clone, Default)]
pub struct VolumeLoadResult {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub data: Vec<u8>,
}

impl VolumeLoadResult {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Load a multi-page TIFF stack and composite the enabled channels.
///
/// Pages are grouped per slice: slice `s` of channel `c` lives at directory
/// `s * channel_stride + c.index`. Each enabled channel contributes its
/// luminance to one RGB component (first enabled channel to red, second to
/// green, third to blue; further channels wrap around), max-blended so
/// overlapping stains stay visible. Alpha is fully opaque.
///
/// `images_per_channel == 0` derives the slice count from the number of
/// directories in the file.
pub fn load_volume(
    path: &Path,
    channels: &[ChannelConfig],
    channel_stride: u32,
    images_per_channel: u32,
) -> Result<VolumeLoadResult> {
    log::info!("Loading multipage TIFF image from {}", path.display());

    let enabled: Vec<ChannelConfig> = channels.iter().copied().filter(|c| c.enabled).collect();
    if enabled.is_empty() || channel_stride == 0 {
        bail!("no channels enabled or zero channel stride");
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder =
        Decoder::new(BufReader::new(file)).context("reading TIFF header")?;

    let images_per_channel = if images_per_channel > 0 {
        images_per_channel
    } else {
        let total = count_directories(&mut decoder)?;
        (total / channel_stride as usize) as u32
    };
    if images_per_channel == 0 {
        bail!("TIFF stack has no complete slice group");
    }

    let (width, height) = decoder.dimensions().context("reading TIFF dimensions")?;
    let pixels_per_slice = (width * height) as usize;

    let mut result = VolumeLoadResult {
        width,
        height,
        depth: images_per_channel,
        data: vec![0u8; pixels_per_slice * images_per_channel as usize * 4],
    };
    // Opaque alpha throughout
    for voxel in result.data.chunks_exact_mut(4) {
        voxel[3] = 255;
    }

    for slice in 0..images_per_channel {
        for (slot, channel) in enabled.iter().enumerate() {
            let directory = (slice * channel_stride + channel.index) as usize;
            decoder
                .seek_to_image(directory)
                .with_context(|| format!("seeking to TIFF directory {}", directory))?;

            let (page_width, page_height) =
                decoder.dimensions().context("reading page dimensions")?;
            if (page_width, page_height) != (width, height) {
                bail!(
                    "TIFF page {} is {}x{}, expected {}x{}",
                    directory,
                    page_width,
                    page_height,
                    width,
                    height
                );
            }

            let color_type = decoder.colortype().context("reading page color type")?;
            let page = decoder
                .read_image()
                .with_context(|| format!("decoding TIFF directory {}", directory))?;
            let luminance = page_luminance(color_type, page, pixels_per_slice)?;

            let component = slot % 3;
            let base = slice as usize * pixels_per_slice * 4;
            for (pixel, lum) in luminance.iter().enumerate() {
                let offset = base + pixel * 4 + component;
                result.data[offset] = result.data[offset].max(*lum);
            }
        }
    }

    log::info!(
        "Loaded volume {}x{}x{} ({} channels)",
        width,
        height,
        images_per_channel,
        enabled.len()
    );
    Ok(result)
}

/// Count the directories in the file, leaving the decoder at directory 0.
fn count_directories(decoder: &mut Decoder<BufReader<File>>) -> Result<usize> {
    let mut total = 1;
    while decoder.more_images() {
        decoder.next_image().context("walking TIFF directories")?;
        total += 1;
    }
    decoder.seek_to_image(0).context("rewinding TIFF decoder")?;
    Ok(total)
}

/// Collapse one decoded page into per-pixel luminance.
fn page_luminance(
    color_type: ColorType,
    page: DecodingResult,
    expected_pixels: usize,
) -> Result<Vec<u8>> {
    let luminance = match (color_type, page) {
        (ColorType::Gray(8), DecodingResult::U8(buf)) => buf,
        (ColorType::Gray(16), DecodingResult::U16(buf)) => {
            buf.iter().map(|&v| (v >> 8) as u8).collect()
        }
        (ColorType::RGB(8), DecodingResult::U8(buf)) => buf
            .chunks_exact(3)
            .map(|px| px[0].max(px[1]).max(px[2]))
            .collect(),
        (ColorType::RGBA(8), DecodingResult::U8(buf)) => buf
            .chunks_exact(4)
            .map(|px| px[0].max(px[1]).max(px[2]))
            .collect(),
        (ColorType::RGB(16), DecodingResult::U16(buf)) => buf
            .chunks_exact(3)
            .map(|px| (px[0].max(px[1]).max(px[2]) >> 8) as u8)
            .collect(),
        (ct, _) => bail!("unsupported TIFF color type: {:?}", ct),
    };

    if luminance.len() != expected_pixels {
        bail!(
            "decoded page has {} pixels, expected {}",
            luminance.len(),
            expected_pixels
        );
    }
    Ok(luminance)
}
