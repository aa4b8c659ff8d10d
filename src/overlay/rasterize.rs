/*
 *  overlay/rasterize.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Class-index mask to RGBA bitmap conversion
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::RgbColor;
use log::warn;
use tiny_skia::{ColorU8, Pixmap};

use super::error::OverlayError;
use super::palette::{self, PALETTE_SIZE};

/// Alpha applied to every overlay pixel (half opaque)
pub const OVERLAY_ALPHA: u8 = 128;

/// Check that a mask buffer matches its declared geometry
pub fn validate_mask(mask: &[u8], width: u32, height: u32) -> Result<(), OverlayError> {
    if width == 0 || height == 0 {
        return Err(OverlayError::EmptyMask { width, height });
    }
    let expected = width as usize * height as usize;
    if mask.len() != expected {
        warn!("Rejecting mask: expected {} bytes, got {}", expected, mask.len());
        return Err(OverlayError::BufferSizeMismatch { expected, actual: mask.len() });
    }
    Ok(())
}

/// Colorize a mask, one RGBA pixel per input byte, row-major order kept
pub fn rasterize(mask: &[u8]) -> Vec<ColorU8> {
    mask.iter()
        .map(|&b| {
            let c = palette::entry_for(b).color;
            ColorU8::from_rgba(c.r(), c.g(), c.b(), OVERLAY_ALPHA)
        })
        .collect()
}

/// Build the unscaled overlay bitmap for a mask
pub fn to_pixmap(mask: &[u8], width: u32, height: u32) -> Result<Pixmap, OverlayError> {
    validate_mask(mask, width, height)?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or(OverlayError::PixmapAllocation { width, height })?;

    // tiny-skia stores premultiplied pixels
    pixmap
        .pixels_mut()
        .iter_mut()
        .zip(rasterize(mask))
        .for_each(|(dst, src)| *dst = src.premultiply());

    Ok(pixmap)
}

/// Distinct palette slots present in a mask, ascending
pub fn present_classes(mask: &[u8]) -> Vec<usize> {
    let mut seen = [false; PALETTE_SIZE];
    for &b in mask {
        seen[palette::class_index(b)] = true;
    }
    seen.iter()
        .enumerate()
        .filter_map(|(i, &hit)| hit.then_some(i))
        .collect()
}
