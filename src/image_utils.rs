use std::path::Path;

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use zune_jpeg::zune_core::bytestream::ZCursor;
use zune_jpeg::JpegDecoder;

/// One slide, decoded and pre-scaled to the size it occupies on the surface.
pub struct LoadedSlide {
    pub index: usize,
    pub natural_size: egui::Vec2,
    pub display_size: egui::Vec2,
    pub pixels: egui::ColorImage,
}

pub fn decode_image(bytes: &[u8], path: &Path) -> Result<DynamicImage> {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("jpg") || s.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    // Try zune-jpeg first for JPEGs; fall back to the generic decoder for
    // anything it cannot hand back as plain RGB (grayscale, CMYK, ...).
    if is_jpeg {
        let mut decoder = JpegDecoder::new(ZCursor::new(bytes));
        if let Ok(pixels) = decoder.decode() {
            if let Some(info) = decoder.info() {
                if let Some(rgb) =
                    image::RgbImage::from_raw(info.width as u32, info.height as u32, pixels)
                {
                    return Ok(DynamicImage::ImageRgb8(rgb));
                }
            }
        }
    }

    image::load_from_memory(bytes).with_context(|| format!("Unable to decode {}", path.display()))
}

pub fn resize_to_display(image: &DynamicImage, width: u32, height: u32) -> Result<RgbaImage> {
    let rgba = image.to_rgba8();
    if rgba.width() == width && rgba.height() == height {
        return Ok(rgba);
    }

    let (src_width, src_height) = (rgba.width(), rgba.height());
    let src = Image::from_vec_u8(src_width, src_height, rgba.into_raw(), PixelType::U8x4)
        .map_err(|err| anyhow!("Unable to wrap {src_width}x{src_height} pixels: {err}"))?;
    let mut dst = Image::new(width, height, PixelType::U8x4);
    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, &ResizeOptions::default())
        .map_err(|err| anyhow!("Unable to resize to {width}x{height}: {err}"))?;

    RgbaImage::from_raw(width, height, dst.into_vec())
        .ok_or_else(|| anyhow!("Resized buffer has the wrong length"))
}

pub fn to_color_image(rgba: &RgbaImage) -> egui::ColorImage {
    let size = [rgba.width() as usize, rgba.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
