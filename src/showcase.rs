//! Showcase sheet: every registered composer applied to the same images,
//! one square panel each.
//!
//! Panels are arranged in a near-square grid (see
//! [`balanced_factors`](crate::geometry::balanced_factors)), wider than
//! tall, separated and surrounded by a margin of background color.

use image::{Rgba, RgbaImage, imageops};
use log::debug;

use crate::canvas::RasterCanvas;
use crate::composer::ComposeError;
use crate::geometry::balanced_factors;
use crate::registry::Registry;

/// Sheet geometry and colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShowcaseOptions {
    /// Side length of each square panel.
    pub panel_size: u32,
    /// Gap between panels and around the sheet edge.
    pub margin: u32,
    pub background: Rgba<u8>,
}

impl Default for ShowcaseOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseOptions {
    pub const fn new() -> Self {
        Self {
            panel_size: 200,
            margin: 15,
            background: Rgba([255, 255, 255, 255]),
        }
    }

    pub const fn panel_size(mut self, size: u32) -> Self {
        self.panel_size = size;
        self
    }

    pub const fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub const fn background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }

    /// Sheet size for `columns × rows` panels.
    pub fn sheet_size(&self, columns: u32, rows: u32) -> (u32, u32) {
        let span = |n: u32| n * self.panel_size + (n + 1) * self.margin;
        (span(columns), span(rows))
    }
}

/// Render every composer in `registry` with as many of `images` as it
/// recommends.
///
/// Composers that cannot use the available images leave their panel
/// blank. The first composer error aborts the sheet.
pub fn render(
    registry: &Registry,
    images: &[RgbaImage],
    options: &ShowcaseOptions,
) -> Result<RgbaImage, ComposeError> {
    let Some((rows, columns)) = balanced_factors(registry.len()) else {
        let (w, h) = options.sheet_size(0, 0);
        return Ok(RgbaImage::from_pixel(w, h, options.background));
    };
    let (columns, rows) = (columns as u32, rows as u32);
    let (width, height) = options.sheet_size(columns, rows);
    debug!(
        composers = registry.len(), columns = columns, rows = rows, width = width, height = height;
        "Rendering showcase"
    );

    let mut sheet = RgbaImage::from_pixel(width, height, options.background);
    let stride = options.panel_size + options.margin;

    for (i, info) in registry.composers().iter().enumerate() {
        let i = i as u32;
        let x = options.margin + (i % columns) * stride;
        let y = options.margin + (i / columns) * stride;

        let count = info.recommend_image_count(images.len());
        if count == 0 {
            debug!(id = info.id(); "Leaving showcase panel blank");
            continue;
        }

        let mut panel = RasterCanvas::from_image(RgbaImage::from_pixel(
            options.panel_size,
            options.panel_size,
            options.background,
        ));
        info.compose(&mut panel, &images[..count])?;
        imageops::replace(&mut sheet, panel.image(), i64::from(x), i64::from(y));
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(16, 16, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn sheet_size_includes_margins() {
        let o = ShowcaseOptions::new().panel_size(100).margin(10);
        assert_eq!(o.sheet_size(5, 1), (5 * 100 + 6 * 10, 100 + 2 * 10));
    }

    #[test]
    fn builtin_sheet_is_one_row() {
        let images: Vec<_> = (0..6u8).map(|i| solid([i * 40, 0, 0])).collect();
        let o = ShowcaseOptions::new().panel_size(40).margin(5);
        let sheet = render(&Registry::builtin(), &images, &o).unwrap();
        assert_eq!(sheet.dimensions(), o.sheet_size(5, 1));
        // Margins stay background.
        assert_eq!(sheet.get_pixel(0, 0), &o.background);
        assert_eq!(sheet.get_pixel(45 + 2, 2), &o.background);
        // Perfect tiles (second panel) cover the whole panel.
        let px = sheet.get_pixel(5 + 45 + 1, 5 + 1);
        assert_eq!(px[3], 255);
        assert_ne!(px, &o.background);
    }

    #[test]
    fn unusable_composer_leaves_blank_panel() {
        let o = ShowcaseOptions::new().panel_size(20).margin(2);
        let sheet = render(&Registry::builtin(), &[solid([0, 0, 255])], &o).unwrap();
        // Focused (third panel) needs two images.
        let third_x = 2 + 2 * 22;
        assert_eq!(sheet.get_pixel(third_x + 10, 12), &o.background);
        // Perfect (second panel) draws the single image full size.
        assert_eq!(sheet.get_pixel(2 + 22 + 10, 12), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn empty_registry_is_margin_only() {
        let o = ShowcaseOptions::new().margin(3);
        let sheet = render(&Registry::new(), &[], &o).unwrap();
        assert_eq!(sheet.dimensions(), (3, 3));
    }
}
