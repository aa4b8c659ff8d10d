/*
 *  overlay/mod.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Overlay subsystem - palette, rasterizer, scale planner and view state
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

use serde::{Deserialize, Serialize};

pub mod error;
pub mod palette;
pub mod rasterize;
pub mod scale;
pub mod surface;
pub mod listener;
pub mod state;

// Re-exports for convenience
pub use error::OverlayError;
pub use palette::{PaletteEntry, PALETTE, PALETTE_SIZE};
pub use rasterize::OVERLAY_ALPHA;
pub use scale::ScalePlan;
pub use surface::Surface;
pub use listener::{ColorLabel, OverlayListener};
pub use state::{OverlayView, RenderedOverlay, UpdateOutcome};

/// Where the frames behind the overlay come from
///
/// Selects how the mask is fitted to the preview.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum RunningMode {
    #[default]
    Image,       // single still
    Video,       // decoded file, letterboxed like a still
    LiveStream,  // camera preview filling the view
}

/// Scale policy derived from the running mode
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FitMode {
    /// Whole mask visible, may letterbox
    Contain,
    /// View fully covered, may crop
    Cover,
}

impl RunningMode {
    pub fn fit(self) -> FitMode {
        match self {
            RunningMode::Image | RunningMode::Video => FitMode::Contain,
            RunningMode::LiveStream => FitMode::Cover,
        }
    }
}
