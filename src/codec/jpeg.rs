use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use super::{ImageCodec, PixelMap};
use crate::error::StrategyError;

/// JPEG encoder backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegCodec;

impl JpegCodec {
    /// Map a [0, 1] quality to the encoder's percent scale.
    fn percent(quality: f32) -> u8 {
        (quality * 100.0).round().clamp(1.0, 95.0) as u8
    }
}

impl ImageCodec for JpegCodec {
    fn encode_jpeg(&self, pixels: &PixelMap, quality: f32) -> Result<Vec<u8>, StrategyError> {
        let mut buffer = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, Self::percent(quality));
        encoder
            .encode(
                &pixels.data,
                pixels.width,
                pixels.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| StrategyError::ImageEncode(e.to_string()))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelMap {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        PixelMap::new(width, height, data)
    }

    #[test]
    fn test_encode_produces_jpeg_magic() {
        let codec = JpegCodec;
        let bytes = codec.encode_jpeg(&solid(16, 16, [200, 10, 10]), 0.5).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_quality_mapping_clamps() {
        assert_eq!(JpegCodec::percent(0.0), 1);
        assert_eq!(JpegCodec::percent(0.5), 50);
        assert_eq!(JpegCodec::percent(1.0), 95);
    }
}
