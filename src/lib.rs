/*
 *  lib.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
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

//! Segmentation mask overlays: class bytes are colorized through a fixed
//! palette at half opacity, scaled to the preview with contain or cover fit
//! and composited onto a host surface on demand.

pub mod config;
pub mod overlay;
pub mod vframebuf;

pub use overlay::{
    ColorLabel, OverlayError, OverlayListener, OverlayView, RunningMode, Surface, UpdateOutcome,
};
pub use vframebuf::VarFrameBuf;
