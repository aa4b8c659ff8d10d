/*
 *  overlay/scale.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Contain/cover scale planning and nearest-neighbour resampling
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

use tiny_skia::{BlendMode, FilterQuality, Pixmap, PixmapPaint, Transform};

use super::error::OverlayError;
use super::{FitMode, RunningMode};

/// Uniform scale and the resulting overlay size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePlan {
    pub factor: f32,
    pub width: u32,
    pub height: u32,
}

/// Uniform scale factor mapping `src` onto `dst` for a running mode
///
/// Returns `None` when any dimension is zero, typically a view that has
/// not been laid out yet.
pub fn plan_scale(src: (u32, u32), dst: (u32, u32), mode: RunningMode) -> Option<f32> {
    let (src_w, src_h) = src;
    let (dst_w, dst_h) = dst;
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return None;
    }

    let sx = dst_w as f32 / src_w as f32;
    let sy = dst_h as f32 / src_h as f32;

    let factor = match mode.fit() {
        FitMode::Contain => sx.min(sy),
        FitMode::Cover => sx.max(sy),
    };
    Some(factor)
}

/// Overlay size for a scale factor; `None` if either side rounds to zero
pub fn scaled_size(src: (u32, u32), factor: f32) -> Option<(u32, u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return None;
    }
    let w = (src.0 as f32 * factor).round();
    let h = (src.1 as f32 * factor).round();
    if w < 1.0 || h < 1.0 {
        return None;
    }
    Some((w as u32, h as u32))
}

/// Full plan: factor plus output size
pub fn plan(src: (u32, u32), dst: (u32, u32), mode: RunningMode) -> Option<ScalePlan> {
    let factor = plan_scale(src, dst, mode)?;
    let (width, height) = scaled_size(src, factor)?;
    Some(ScalePlan { factor, width, height })
}

/// Resample a bitmap to the planned size without filtering
///
/// Nearest sampling keeps class colors from blending across boundaries.
/// Each axis is scaled separately so the rounded output edge is filled.
pub fn scale_pixmap(src: &Pixmap, plan: &ScalePlan) -> Result<Pixmap, OverlayError> {
    let mut out = Pixmap::new(plan.width, plan.height)
        .ok_or(OverlayError::PixmapAllocation { width: plan.width, height: plan.height })?;

    let scale_x = plan.width as f32 / src.width() as f32;
    let scale_y = plan.height as f32 / src.height() as f32;
    let transform = Transform::from_scale(scale_x, scale_y);

    let paint = PixmapPaint {
        opacity: 1.0,
        blend_mode: BlendMode::Source,
        quality: FilterQuality::Nearest,
    };
    out.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);

    Ok(out)
}
