/*
 *  overlay/listener.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Label notifications for hosts showing a legend
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

use embedded_graphics::pixelcolor::Rgb888;

use super::palette::PALETTE;

/// A class visible in the current overlay and the color it is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorLabel {
    pub class_index: usize,
    pub label: &'static str,
    pub color: Rgb888,
}

impl ColorLabel {
    pub fn for_class(class_index: usize) -> Self {
        let entry = &PALETTE[class_index % PALETTE.len()];
        Self { class_index, label: entry.label, color: entry.color }
    }
}

/// Receives the label set after every accepted mask update
pub trait OverlayListener {
    fn on_labels(&mut self, labels: &[ColorLabel]);
}

impl<F> OverlayListener for F
where
    F: FnMut(&[ColorLabel]),
{
    fn on_labels(&mut self, labels: &[ColorLabel]) {
        self(labels)
    }
}
