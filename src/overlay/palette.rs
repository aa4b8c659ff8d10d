/*
 *  overlay/palette.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed class palette for segmentation masks
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

/// Number of palette slots; class ids wrap modulo this
pub const PALETTE_SIZE: usize = 20;

/// One palette slot: the class label and its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub label: &'static str,
    pub color: Rgb888,
}

const fn entry(label: &'static str, r: u8, g: u8, b: u8) -> PaletteEntry {
    PaletteEntry { label, color: Rgb888::new(r, g, b) }
}

/// PASCAL VOC color map, first 20 classes
pub static PALETTE: [PaletteEntry; PALETTE_SIZE] = [
    entry("background", 0, 0, 0),
    entry("aeroplane", 128, 0, 0),
    entry("bicycle", 0, 128, 0),
    entry("bird", 128, 128, 0),
    entry("boat", 0, 0, 128),
    entry("bottle", 128, 0, 128),
    entry("bus", 0, 128, 128),
    entry("car", 128, 128, 128),
    entry("cat", 64, 0, 0),
    entry("chair", 192, 0, 0),
    entry("cow", 64, 128, 0),
    entry("diningtable", 192, 128, 0),
    entry("dog", 64, 0, 128),
    entry("horse", 192, 0, 128),
    entry("motorbike", 64, 128, 128),
    entry("person", 192, 128, 128),
    entry("pottedplant", 0, 64, 0),
    entry("sheep", 128, 64, 0),
    entry("sofa", 0, 192, 0),
    entry("train", 128, 192, 0),
];

/// Map a raw mask byte to a palette slot
///
/// The byte is read as a signed 8-bit value and reduced with a
/// non-negative modulo, so 0x80..=0xFF still land on a valid slot
/// (0xFF is -1 and maps to the last entry).
#[inline]
pub fn class_index(byte: u8) -> usize {
    (byte as i8 as i32).rem_euclid(PALETTE_SIZE as i32) as usize
}

/// Color for any class index, wrapping modulo the palette size
#[inline]
pub fn color_at(index: usize) -> Rgb888 {
    PALETTE[index % PALETTE_SIZE].color
}

/// Label for any class index, wrapping modulo the palette size
pub fn label_at(index: usize) -> &'static str {
    PALETTE[index % PALETTE_SIZE].label
}

/// Palette entry selected by a raw mask byte
pub fn entry_for(byte: u8) -> &'static PaletteEntry {
    &PALETTE[class_index(byte)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_color_at_wraps() {
        assert_eq!(color_at(0), Rgb888::new(0, 0, 0));
        assert_eq!(color_at(1), Rgb888::new(128, 0, 0));
        assert_eq!(color_at(21), color_at(1));
        assert_eq!(color_at(PALETTE_SIZE * 7 + 15), PALETTE[15].color);
    }

    #[test]
    fn test_class_index_positive_bytes() {
        assert_eq!(class_index(0), 0);
        assert_eq!(class_index(19), 19);
        assert_eq!(class_index(20), 0);
        assert_eq!(class_index(127), 127 % 20);
    }

    #[test]
    fn test_class_index_negative_bytes() {
        // 0xFF == -1, 0x80 == -128
        assert_eq!(class_index(0xFF), 19);
        assert_eq!(class_index(0x80), 12);
        assert_eq!(class_index(0xEC), 0); // -20
    }

    #[test]
    fn test_class_index_always_in_range() {
        for b in 0..=u8::MAX {
            assert!(class_index(b) < PALETTE_SIZE);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_at(0), "background");
        assert_eq!(label_at(15), "person");
        assert_eq!(entry_for(0xFF).label, "train");
        assert_eq!(entry_for(0xFF).color.g(), 192);
    }
}
