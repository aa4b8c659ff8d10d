/*
 *  overlay/error.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the overlay subsystem
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

use thiserror::Error;

/// Errors raised while turning a mask into an overlay bitmap
///
/// Degenerate view geometry is not an error; updates are skipped until the
/// host reports a usable size.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Mask length does not match the declared width * height
    #[error("Mask size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Mask declared with a zero dimension
    #[error("Mask has no pixels: {width}x{height}")]
    EmptyMask { width: u32, height: u32 },

    /// tiny-skia refused to allocate a bitmap of this size
    #[error("Failed to allocate {width}x{height} overlay bitmap")]
    PixmapAllocation { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OverlayError::BufferSizeMismatch { expected: 6, actual: 5 };
        assert_eq!(err.to_string(), "Mask size mismatch: expected 6 bytes, got 5");

        let err = OverlayError::EmptyMask { width: 0, height: 4 };
        assert_eq!(err.to_string(), "Mask has no pixels: 0x4");
    }
}
