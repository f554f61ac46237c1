//! Layout algorithms.
//!
//! Each composer first computes a plan (a list of [`Placement`]s) from the
//! canvas size and image count alone, then executes it: resize the image to
//! the placement's size, install its mask, draw it at its origin.

pub mod diamond;
pub mod pie;
pub mod stripes;
pub mod tiles;

use image::RgbaImage;
use num_traits::ToPrimitive;

use crate::canvas::{Canvas, Path};
use crate::composer::ComposeError;
use crate::fill::{Size, resize_to_fill};
use crate::geometry::{Point, Rectangle};

/// Where and how one image lands on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index into the composer's image slice.
    pub image: usize,
    /// Mask installed before drawing. `None` draws unmasked.
    pub mask: Option<Path>,
    /// Size the image is filled to.
    pub size: Size,
    /// Top-left corner on the canvas, in pixels.
    pub origin: (i32, i32),
}

impl Placement {
    /// The area the filled image covers, before masking.
    pub fn rect(&self) -> Rectangle {
        Rectangle::from_origin_size(
            Point::new(f64::from(self.origin.0), f64::from(self.origin.1)),
            f64::from(self.size.width),
            f64::from(self.size.height),
        )
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }
}

/// Execute a plan sequentially.
pub(crate) fn draw_plan<C: Canvas + ?Sized>(
    canvas: &mut C,
    images: &[RgbaImage],
    plan: &[Placement],
) -> Result<(), ComposeError> {
    for placement in plan {
        if let Some(filled) = prepare(images, placement)? {
            paint(canvas, placement, &filled)?;
        }
    }
    Ok(())
}

/// Resize the placement's image. `None` for zero-area placements.
pub(crate) fn prepare(
    images: &[RgbaImage],
    placement: &Placement,
) -> Result<Option<RgbaImage>, ComposeError> {
    if placement.is_empty() {
        log::trace!(image = placement.image; "Skipping zero-area placement");
        return Ok(None);
    }
    let Some(image) = images.get(placement.image) else {
        return Ok(None);
    };
    resize_to_fill(image, placement.size.width, placement.size.height)
        .map(Some)
        .map_err(|error| ComposeError::Fill {
            index: placement.image,
            error,
        })
}

/// Install the placement's mask and draw the filled image.
pub(crate) fn paint<C: Canvas + ?Sized>(
    canvas: &mut C,
    placement: &Placement,
    filled: &RgbaImage,
) -> Result<(), ComposeError> {
    match &placement.mask {
        Some(mask) => canvas.set_mask(mask)?,
        None => canvas.clear_mask(),
    }
    canvas.draw_image(filled, placement.origin.0, placement.origin.1)?;
    Ok(())
}

/// Smallest whole-pixel rectangle containing `bounds`, as `(size, origin)`.
///
/// The edges round outward, so every pixel whose center lies inside
/// `bounds` is covered.
pub(crate) fn covering_pixels(bounds: &Rectangle) -> (Size, (i32, i32)) {
    let (left, top) = (bounds.min.x.floor(), bounds.min.y.floor());
    let (right, bottom) = (bounds.max.x.ceil(), bounds.max.y.ceil());
    (
        Size::new(pixels(right - left), pixels(bottom - top)),
        (coord(left), coord(top)),
    )
}

/// Truncate a non-negative length to whole pixels. Negative or non-finite
/// lengths become zero.
pub(crate) fn pixels(length: f64) -> u32 {
    length.to_u32().unwrap_or(0)
}

/// Truncate a coordinate toward zero, saturating at the `i32` range.
pub(crate) fn coord(value: f64) -> i32 {
    value
        .to_i32()
        .unwrap_or(if value.is_sign_negative() { i32::MIN } else { i32::MAX })
}
