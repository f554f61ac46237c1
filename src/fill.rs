//! Aspect-filling resize: scale an image to cover a target box and crop the
//! overflow so the output has exactly the requested dimensions.
//!
//! [`FillLayout`] is the pure geometry (which source region survives, what
//! size it is resampled to). [`resize_to_fill`] executes it on pixels with a
//! Lanczos3 filter.
//!
//! # Example
//!
//! ```
//! use zenmosaic::fill::{FillLayout, Size};
//!
//! let layout = FillLayout::compute(Size::new(1000, 500), Size::new(400, 300)).unwrap();
//!
//! // Source cropped to 4:3 around the center, then resized to exactly 400×300.
//! assert_eq!(layout.resize_to, Size::new(400, 300));
//! assert_eq!(layout.source_crop.unwrap().height, 500);
//! ```

use image::RgbaImage;
use image::imageops::{self, FilterType};
use thiserror::Error;

/// Pixel dimensions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when there is no pixel to draw.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Source region kept by a fill, in source pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the region is all of `source`.
    pub fn is_full(&self, source: Size) -> bool {
        (self.x, self.y) == (0, 0) && Size::new(self.width, self.height) == source
    }
}

/// Resize-to-fill precondition failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("source image has a zero dimension")]
    ZeroSourceDimension,
    #[error("fill target has a zero dimension")]
    ZeroTargetDimension,
}

/// Computed fill: which part of the source to keep and what to resample it to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FillLayout {
    /// Dimensions of the image being filled.
    pub source: Size,
    /// Part of the source that survives the crop. `None` keeps all of it.
    pub source_crop: Option<Rect>,
    /// Output dimensions. Always equal to the requested target.
    pub resize_to: Size,
}

impl FillLayout {
    /// Compute the fill of `source` into `target`. Any crop is centered.
    pub fn compute(source: Size, target: Size) -> Result<Self, FillError> {
        if source.is_empty() {
            return Err(FillError::ZeroSourceDimension);
        }
        if target.is_empty() {
            return Err(FillError::ZeroTargetDimension);
        }

        let crop = crop_to_aspect(source, target);
        Ok(Self {
            source,
            source_crop: Some(crop),
            resize_to: target,
        }
        .normalize())
    }

    /// Whether the kept region has to be resampled to reach `resize_to`.
    pub fn needs_resize(&self) -> bool {
        self.resize_to != self.effective_source()
    }

    /// Size of the kept region.
    pub fn effective_source(&self) -> Size {
        match &self.source_crop {
            Some(r) => Size::new(r.width, r.height),
            None => self.source,
        }
    }

    /// A crop of the whole source is no crop.
    fn normalize(mut self) -> Self {
        if let Some(r) = &self.source_crop
            && r.is_full(self.source)
        {
            self.source_crop = None;
        }
        self
    }
}

/// Produce a new image of exactly `width × height`, scaled to cover the box
/// and cropped around the center.
///
/// The source is never modified. Resampling uses Lanczos3.
pub fn resize_to_fill(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage, FillError> {
    let layout = FillLayout::compute(
        Size::new(image.width(), image.height()),
        Size::new(width, height),
    )?;
    Ok(apply(image, &layout))
}

/// Execute a computed [`FillLayout`] on pixels.
fn apply(image: &RgbaImage, layout: &FillLayout) -> RgbaImage {
    let target = layout.resize_to;
    match layout.source_crop {
        Some(crop) => {
            let cropped =
                imageops::crop_imm(image, crop.x, crop.y, crop.width, crop.height).to_image();
            if layout.needs_resize() {
                imageops::resize(&cropped, target.width, target.height, FilterType::Lanczos3)
            } else {
                cropped
            }
        }
        None if layout.needs_resize() => {
            imageops::resize(image, target.width, target.height, FilterType::Lanczos3)
        }
        None => image.clone(),
    }
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Largest centered region of `source` with the aspect ratio of `target`.
///
/// The free side is rounded to the nearest pixel in integer arithmetic, so
/// exact ratios never go through floating point.
fn crop_to_aspect(source: Size, target: Size) -> Rect {
    let (sw, sh) = (u64::from(source.width), u64::from(source.height));
    let (tw, th) = (u64::from(target.width), u64::from(target.height));

    if sw * th > sh * tw {
        // Wider than the target: trim left and right.
        let kept = clamp_side((sh * tw + th / 2) / th, source.width);
        let x = (source.width - kept) / 2;
        Rect::new(x, 0, kept, source.height)
    } else {
        // Taller (or equal): trim top and bottom.
        let kept = clamp_side((sw * th + tw / 2) / tw, source.height);
        let y = (source.height - kept) / 2;
        Rect::new(0, y, source.width, kept)
    }
}

fn clamp_side(side: u64, max: u32) -> u32 {
    u32::try_from(side).map_or(max, |s| s.clamp(1, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    // ── crop_to_aspect ──────────────────────────────────────────────────

    #[test]
    fn crop_aspect_wider_source() {
        // 1000×500 (2:1) to 4:3 → crop width to 500 * 4/3 ≈ 667.
        let r = crop_to_aspect(Size::new(1000, 500), Size::new(400, 300));
        // 500 · 4/3 = 666.7, centered in the 333 spare columns.
        assert_eq!(r, Rect::new(166, 0, 667, 500));
    }

    #[test]
    fn crop_aspect_taller_source() {
        // 500×1000 (1:2) to 4:3 → crop height to 375.
        let r = crop_to_aspect(Size::new(500, 1000), Size::new(400, 300));
        assert_eq!(r, Rect::new(0, 312, 500, 375));
    }

    #[test]
    fn crop_aspect_same_ratio() {
        let r = crop_to_aspect(Size::new(800, 600), Size::new(400, 300));
        assert!(r.is_full(Size::new(800, 600)));
    }

    #[test]
    fn crop_aspect_rounds_free_side() {
        // 1200 · 33/100 = 396 rows of a 400-row source.
        let r = crop_to_aspect(Size::new(1200, 400), Size::new(100, 33));
        assert_eq!(r, Rect::new(0, 2, 1200, 396));
    }

    #[test]
    fn crop_aspect_never_collapses() {
        let r = crop_to_aspect(Size::new(1, 1000), Size::new(1000, 1));
        assert_eq!((r.width, r.height), (1, 1));
    }

    // ── FillLayout ──────────────────────────────────────────────────────

    #[test]
    fn fill_same_aspect_has_no_crop() {
        let l = FillLayout::compute(Size::new(1000, 500), Size::new(400, 200)).unwrap();
        assert_eq!(l.source_crop, None);
        assert!(l.needs_resize());
    }

    #[test]
    fn fill_identity() {
        let l = FillLayout::compute(Size::new(64, 32), Size::new(64, 32)).unwrap();
        assert_eq!(l.source_crop, None);
        assert!(!l.needs_resize());
    }

    #[test]
    fn fill_crop_is_centered() {
        // One spare column is left over after halving; it goes to the right.
        let l = FillLayout::compute(Size::new(501, 500), Size::new(10, 10)).unwrap();
        assert_eq!(l.source_crop, Some(Rect::new(0, 0, 500, 500)));
        let l = FillLayout::compute(Size::new(100, 303), Size::new(1, 1)).unwrap();
        assert_eq!(l.source_crop, Some(Rect::new(0, 101, 100, 100)));
    }

    #[test]
    fn fill_rejects_zero_dimensions() {
        assert_eq!(
            FillLayout::compute(Size::new(0, 10), Size::new(5, 5)),
            Err(FillError::ZeroSourceDimension)
        );
        assert_eq!(
            FillLayout::compute(Size::new(10, 10), Size::new(5, 0)),
            Err(FillError::ZeroTargetDimension)
        );
    }

    // ── resize_to_fill ──────────────────────────────────────────────────

    #[test]
    fn resize_to_fill_exact_dimensions() {
        let img = RgbaImage::from_pixel(40, 10, Rgba([10, 20, 30, 255]));
        let out = resize_to_fill(&img, 17, 23).unwrap();
        assert_eq!(out.dimensions(), (17, 23));
        // Solid input stays solid (up to filter ringing at the border).
        assert_eq!(out.get_pixel(8, 11), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn resize_to_fill_crops_center() {
        // Left third red, middle third green, right third blue; filling a
        // square keeps only the middle.
        let img = RgbaImage::from_fn(30, 10, |x, _| match x / 10 {
            0 => Rgba([255, 0, 0, 255]),
            1 => Rgba([0, 255, 0, 255]),
            _ => Rgba([0, 0, 255, 255]),
        });
        let out = resize_to_fill(&img, 10, 10).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
        assert!(out.pixels().all(|p| p == &Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn resize_to_fill_zero_target() {
        let img = RgbaImage::new(4, 4);
        assert_eq!(
            resize_to_fill(&img, 0, 4),
            Err(FillError::ZeroTargetDimension)
        );
    }
}
