//! Premultiplied RGBA8 helpers for the working canvas: conversion, "over", resampling and
//! flattening onto an opaque background.

use image::{DynamicImage, RgbImage, RgbaImage, imageops::FilterType};

use crate::{
    foundation::{
        core::CanvasSize,
        error::{CaptionError, CaptionResult},
    },
    style::color::Color,
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Convert any decoded image into a premultiplied RGBA8 buffer.
pub fn to_premul_rgba8(image: &DynamicImage) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    premultiply_rgba8_in_place(&mut rgba);
    rgba
}

/// Premultiply straight-alpha RGBA8 bytes in place.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` over `dst`; both are premultiplied RGBA8 buffers of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> CaptionResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CaptionError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Resample a premultiplied canvas to `size` with a Lanczos3 filter.
///
/// Filtering premultiplied values keeps transparent pixels from bleeding color into edges.
pub fn resample_premul(canvas: &RgbaImage, size: CanvasSize) -> RgbaImage {
    if canvas.dimensions() == (size.width, size.height) {
        return canvas.clone();
    }
    image::imageops::resize(canvas, size.width, size.height, FilterType::Lanczos3)
}

/// Flatten a premultiplied canvas onto an opaque `background`.
///
/// Only the background's RGB channels are used.
pub fn flatten_premul(canvas: &RgbaImage, background: Color) -> RgbImage {
    let (w, h) = canvas.dimensions();
    let bg = [background.r, background.g, background.b];
    let mut out = RgbImage::new(w, h);
    for (dst, src) in out.chunks_exact_mut(3).zip(canvas.chunks_exact(4)) {
        let inv = 255u16 - u16::from(src[3]);
        for i in 0..3 {
            dst[i] = src[i].saturating_add(mul_div255(u16::from(bg[i]), inv));
        }
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
