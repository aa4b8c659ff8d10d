/*
 *  overlay/surface.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Draw surfaces the overlay can be composited onto
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

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Point;
use tiny_skia::{BlendMode, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::vframebuf::VarFrameBuf;

/// Anything a rendered overlay can be composited onto
///
/// The overlay is always pre-scaled, so implementations copy it 1:1 with
/// source-over blending and clip whatever falls outside their bounds.
pub trait Surface {
    /// Surface dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Blend `overlay` with its top-left corner at (x, y)
    fn composite(&mut self, overlay: &Pixmap, x: i32, y: i32);
}

impl Surface for Pixmap {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn composite(&mut self, overlay: &Pixmap, x: i32, y: i32) {
        let paint = PixmapPaint {
            opacity: 1.0,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Nearest,
        };
        self.draw_pixmap(x, y, overlay.as_ref(), &paint, Transform::identity(), None);
    }
}

/// Source-over of one premultiplied channel onto an opaque one
#[inline]
fn over(src: u8, dst: u8, src_alpha: u8) -> u8 {
    let inv = 255 - src_alpha as u16;
    (src as u16 + (dst as u16 * inv + 127) / 255).min(255) as u8
}

impl Surface for VarFrameBuf<Rgb888> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width() as u32, self.height() as u32)
    }

    fn composite(&mut self, overlay: &Pixmap, x: i32, y: i32) {
        let ow = overlay.width() as usize;
        for (i, src) in overlay.pixels().iter().enumerate() {
            let a = src.alpha();
            if a == 0 {
                continue;
            }
            // offsets near i32::MAX clip instead of wrapping
            let p = Point::new(
                x.saturating_add((i % ow) as i32),
                y.saturating_add((i / ow) as i32),
            );
            let Some(idx) = self.idx(p) else { continue };
            let dst = self.as_slice()[idx];
            self.as_mut_slice()[idx] = Rgb888::new(
                over(src.red(), dst.r(), a),
                over(src.green(), dst.g(), a),
                over(src.blue(), dst.b(), a),
            );
        }
    }
}
