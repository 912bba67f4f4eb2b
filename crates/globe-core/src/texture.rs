use crate::constants::GLOBE_FALLBACK_COLOR;
use crate::error::TextureError;
use image::imageops::FilterType;

/// Decoded RGBA8 image ready for upload.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decode a JPEG/PNG, downscaling so neither side exceeds `max_dimension`.
    pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Self, TextureError> {
        let mut img = image::load_from_memory(bytes)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(TextureError::Empty {
                width: img.width(),
                height: img.height(),
            });
        }
        let max = max_dimension.max(1);
        if img.width() > max || img.height() > max {
            log::info!(
                "[texture] downscaling {}x{} to fit {}",
                img.width(),
                img.height(),
                max
            );
            img = img.resize(max, max, FilterType::Triangle);
        }
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// 1x1 texture of a single colour.
    pub fn solid(rgb: [f32; 3]) -> Self {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            width: 1,
            height: 1,
            rgba: vec![to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]), 255],
        }
    }

    /// Stand-in used until (or instead of) the real globe image.
    pub fn fallback() -> Self {
        Self::solid(GLOBE_FALLBACK_COLOR)
    }
}
