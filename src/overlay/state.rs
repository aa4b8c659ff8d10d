/*
 *  overlay/state.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Overlay view state - holds the latest scaled mask and draws it
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

use log::debug;
use tiny_skia::Pixmap;

use super::error::OverlayError;
use super::listener::{ColorLabel, OverlayListener};
use super::rasterize;
use super::scale::{self, ScalePlan};
use super::surface::Surface;
use super::RunningMode;

/// A mask that has been colorized and scaled for the current view
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    pixmap: Pixmap,
    source: (u32, u32),
    plan: ScalePlan,
    mode: RunningMode,
}

impl RenderedOverlay {
    pub fn pixmap(&self) -> &Pixmap { &self.pixmap }

    /// Mask dimensions before scaling
    pub fn source_size(&self) -> (u32, u32) { self.source }

    /// Dimensions as drawn
    pub fn size(&self) -> (u32, u32) { (self.plan.width, self.plan.height) }

    pub fn plan(&self) -> ScalePlan { self.plan }

    /// Running mode in effect when this overlay was built
    pub fn mode(&self) -> RunningMode { self.mode }
}

/// Result of a mask update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    /// New overlay installed at the planned size
    Installed(ScalePlan),
    /// View has no usable size yet; previous state kept
    Skipped,
}

enum OverlayState {
    Empty,
    Ready(RenderedOverlay),
}

/// Segmentation overlay for a preview surface
///
/// Single-threaded: the host pushes masks with [`OverlayView::update`],
/// polls [`OverlayView::take_redraw`] from its paint loop and calls
/// [`OverlayView::draw`] with whatever surface it is painting.
pub struct OverlayView {
    state: OverlayState,
    running_mode: RunningMode,
    view_size: (u32, u32),
    labels: Vec<ColorLabel>,
    listener: Option<Box<dyn OverlayListener>>,
    redraw: bool,
}

impl Default for OverlayView {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayView {
    pub fn new() -> Self {
        Self {
            state: OverlayState::Empty,
            running_mode: RunningMode::default(),
            view_size: (0, 0),
            labels: Vec::new(),
            listener: None,
            redraw: false,
        }
    }

    /// Create a view already laid out at `width` x `height`
    pub fn with_view_size(width: u32, height: u32) -> Self {
        let mut view = Self::new();
        view.set_view_size(width, height);
        view
    }

    pub fn set_listener(&mut self, listener: Box<dyn OverlayListener>) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Takes effect on the next update; the stored overlay is not rescaled
    pub fn set_running_mode(&mut self, mode: RunningMode) {
        self.running_mode = mode;
    }

    pub fn running_mode(&self) -> RunningMode {
        self.running_mode
    }

    /// Destination size from the host layout
    pub fn set_view_size(&mut self, width: u32, height: u32) {
        self.view_size = (width, height);
    }

    pub fn view_size(&self) -> (u32, u32) {
        self.view_size
    }

    /// Replace the overlay with a new mask result
    ///
    /// `mask` holds one class byte per pixel, row-major, and must be
    /// exactly `width * height` long. A length mismatch is rejected
    /// before any state changes. While the view has no usable size the
    /// update is skipped and the current overlay stays as it is.
    pub fn update(&mut self, mask: &[u8], width: u32, height: u32) -> Result<UpdateOutcome, OverlayError> {
        rasterize::validate_mask(mask, width, height)?;

        let Some(plan) = scale::plan((width, height), self.view_size, self.running_mode) else {
            debug!(
                "Skipping {}x{} mask, view size {:?} not usable",
                width, height, self.view_size
            );
            return Ok(UpdateOutcome::Skipped);
        };

        let unscaled = rasterize::to_pixmap(mask, width, height)?;
        let pixmap = scale::scale_pixmap(&unscaled, &plan)?;

        debug!(
            "Overlay {}x{} -> {}x{} (x{:.3}, {:?})",
            width, height, plan.width, plan.height, plan.factor, self.running_mode
        );

        // previous overlay dropped here
        self.state = OverlayState::Ready(RenderedOverlay {
            pixmap,
            source: (width, height),
            plan,
            mode: self.running_mode,
        });
        self.redraw = true;

        self.labels = rasterize::present_classes(mask)
            .into_iter()
            .map(ColorLabel::for_class)
            .collect();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_labels(&self.labels);
        }

        Ok(UpdateOutcome::Installed(plan))
    }

    /// Drop the overlay
    pub fn clear(&mut self) {
        debug!("Overlay cleared");
        self.state = OverlayState::Empty;
        self.labels.clear();
        self.redraw = true;
    }

    /// Composite the overlay at the surface origin
    ///
    /// Returns false (and touches nothing) when there is no overlay.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        match &self.state {
            OverlayState::Ready(overlay) => {
                surface.composite(&overlay.pixmap, 0, 0);
                true
            }
            OverlayState::Empty => false,
        }
    }

    pub fn overlay(&self) -> Option<&RenderedOverlay> {
        match &self.state {
            OverlayState::Ready(overlay) => Some(overlay),
            OverlayState::Empty => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, OverlayState::Ready(_))
    }

    /// Classes present in the installed overlay
    pub fn labels(&self) -> &[ColorLabel] {
        &self.labels
    }

    /// Whether an update or clear is waiting to be painted
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Read and reset the repaint request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::vframebuf::VarFrameBuf;

    #[test]
    fn test_draw_before_update_is_noop() {
        let view = OverlayView::with_view_size(8, 8);
        let mut fb = VarFrameBuf::new(8, 8, Rgb888::WHITE);
        assert!(!view.draw(&mut fb));
        assert!(fb.as_slice().iter().all(|&c| c == Rgb888::WHITE));
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_update_installs_scaled_overlay() {
        let mut view = OverlayView::with_view_size(200, 200);
        let mask = vec![1u8; 100 * 50];
        let outcome = view.update(&mask, 100, 50).unwrap();
        match outcome {
            UpdateOutcome::Installed(plan) => {
                assert_eq!(plan.factor, 2.0);
                assert_eq!((plan.width, plan.height), (200, 100));
            }
            UpdateOutcome::Skipped => panic!("update should not be skipped"),
        }
        let overlay = view.overlay().unwrap();
        assert_eq!(overlay.size(), (200, 100));
        assert_eq!(overlay.source_size(), (100, 50));
        assert_eq!(overlay.mode(), RunningMode::Image);
        assert!(view.take_redraw());
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_live_stream_covers_view() {
        let mut view = OverlayView::with_view_size(200, 200);
        view.set_running_mode(RunningMode::LiveStream);
        view.update(&vec![0u8; 100 * 50], 100, 50).unwrap();
        assert_eq!(view.overlay().unwrap().size(), (400, 200));
    }

    #[test]
    fn test_mode_change_does_not_rescale() {
        let mut view = OverlayView::with_view_size(200, 200);
        view.update(&vec![0u8; 100 * 50], 100, 50).unwrap();
        view.set_running_mode(RunningMode::LiveStream);
        assert_eq!(view.overlay().unwrap().size(), (200, 100));
        view.update(&vec![0u8; 100 * 50], 100, 50).unwrap();
        assert_eq!(view.overlay().unwrap().size(), (400, 200));
    }

    #[test]
    fn test_zero_view_size_skips() {
        let mut view = OverlayView::new();
        assert_eq!(view.update(&[0u8; 4], 2, 2).unwrap(), UpdateOutcome::Skipped);
        assert!(!view.is_ready());
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_unusable_view_keeps_installed_overlay() {
        let mut view = OverlayView::with_view_size(4, 4);
        view.update(&[1u8; 4], 2, 2).unwrap();
        view.take_redraw();
        let before = view.labels().to_vec();

        view.set_view_size(0, 4);
        assert_eq!(view.update(&[2u8; 4], 2, 2).unwrap(), UpdateOutcome::Skipped);
        assert!(view.is_ready());
        assert_eq!(view.labels(), before.as_slice());
        assert_eq!(view.labels()[0].class_index, 1);
        assert_eq!(view.overlay().unwrap().size(), (4, 4));
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_scaled_size_rounding_to_zero_skips() {
        let mut view = OverlayView::with_view_size(4, 4);
        view.update(&[3u8; 4], 2, 2).unwrap();
        view.take_redraw();

        // 100x1 contained in 4x4 is 4 x 0.04, height rounds to nothing
        assert_eq!(view.update(&[7u8; 100], 100, 1).unwrap(), UpdateOutcome::Skipped);
        assert!(view.is_ready());
        assert_eq!(view.overlay().unwrap().source_size(), (2, 2));
        assert_eq!(view.labels()[0].class_index, 3);
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_length_mismatch_leaves_state() {
        let mut view = OverlayView::with_view_size(4, 4);
        view.update(&[3u8; 4], 2, 2).unwrap();
        view.take_redraw();
        let err = view.update(&[3u8; 3], 2, 2).unwrap_err();
        assert_eq!(err, OverlayError::BufferSizeMismatch { expected: 4, actual: 3 });
        assert!(view.is_ready());
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_clear_then_draw_is_noop() {
        let mut view = OverlayView::with_view_size(4, 4);
        view.update(&[5u8; 16], 4, 4).unwrap();
        view.take_redraw();
        view.clear();
        assert!(view.take_redraw());
        assert!(view.labels().is_empty());

        let mut fb = VarFrameBuf::new(4, 4, Rgb888::BLACK);
        assert!(!view.draw(&mut fb));
        assert!(fb.as_slice().iter().all(|&c| c == Rgb888::BLACK));
    }

    #[test]
    fn test_listener_receives_present_labels() {
        let seen: Rc<RefCell<Vec<Vec<ColorLabel>>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut view = OverlayView::with_view_size(2, 2);
        view.set_listener(Box::new(move |labels: &[ColorLabel]| {
            sink.borrow_mut().push(labels.to_vec());
        }));
        view.update(&[15, 0, 15, 0xFF], 2, 2).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let names: Vec<_> = seen[0].iter().map(|l| l.label).collect();
        assert_eq!(names, vec!["background", "person", "train"]);
        assert_eq!(view.labels().len(), 3);
    }

    #[test]
    fn test_draw_blends_onto_surface() {
        let mut view = OverlayView::with_view_size(2, 2);
        view.update(&[9u8; 4], 2, 2).unwrap(); // chair, (192, 0, 0)
        let mut fb = VarFrameBuf::new(2, 2, Rgb888::BLACK);
        assert!(view.draw(&mut fb));
        let px = fb.pixel(1, 1).unwrap();
        assert!(px.r() > 80 && px.r() < 110);
        assert_eq!((px.g(), px.b()), (0, 0));
    }
}
