//! Vertical stripes.
//!
//! Every image is filled to the whole canvas and revealed through one
//! equal-width band, so neighbouring bands show different parts of their
//! own full-canvas crops rather than crops local to the band.

use crate::canvas::Path;
use crate::fill::Size;
use crate::geometry::{Point, Rectangle};

use super::Placement;

/// The `count` bands of a `width × height` canvas, left to right.
pub fn bands(width: u32, height: u32, count: usize) -> Vec<Rectangle> {
    if count == 0 {
        return Vec::new();
    }
    let band = f64::from(width) / count as f64;
    (0..count)
        .map(|i| {
            Rectangle::new(
                Point::new(i as f64 * band, 0.0),
                Point::new((i + 1) as f64 * band, f64::from(height)),
            )
        })
        .collect()
}

pub(crate) fn plan(width: u32, height: u32, count: usize) -> Vec<Placement> {
    bands(width, height, count)
        .iter()
        .enumerate()
        .map(|(image, band)| {
            let mut mask = Path::new();
            mask.rectangle(band);
            Placement {
                image,
                mask: Some(mask),
                size: Size::new(width, height),
                origin: (0, 0),
            }
        })
        .collect()
}
