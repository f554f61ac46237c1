//! Pie: equal circle sectors around the canvas center.
//!
//! The circle is inscribed in the smaller canvas dimension. Each image is
//! filled into the bounding box of its own sector and masked to the sector.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::canvas::Path;
use crate::geometry::{Point, Rectangle, angle_strictly_between, inner_square_radius};

use super::{Placement, covering_pixels};

/// Directions of the circle's extreme points, paired with unit vectors.
const EXTREMES: [(f64, Point); 4] = [
    (0.0, Point::new(1.0, 0.0)),
    (FRAC_PI_2, Point::new(0.0, 1.0)),
    (PI, Point::new(-1.0, 0.0)),
    (3.0 * FRAC_PI_2, Point::new(0.0, -1.0)),
];

/// One sector of the pie.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slice {
    pub center: Point,
    pub radius: f64,
    /// Start angle in radians.
    pub start: f64,
    /// End angle in radians.
    pub end: f64,
    /// Smallest axis-aligned box containing the sector.
    pub bounds: Rectangle,
}

impl Slice {
    fn new(center: Point, radius: f64, start: f64, end: f64) -> Self {
        let bounds = if end - start >= TAU {
            Rectangle::square(2.0 * radius).translate(center - Point::new(radius, radius))
        } else {
            let hull = Rectangle::containing_points(&[
                center,
                Point::from_polar(radius, start) + center,
                Point::from_polar(radius, end) + center,
            ]);
            // The arc bulges past the chord wherever it crosses an axis.
            EXTREMES
                .iter()
                .filter(|(angle, _)| angle_strictly_between(*angle, start, end))
                .fold(hull, |r, (_, unit)| {
                    r.grow_to_contain(*unit * radius + center)
                })
        };
        Self {
            center,
            radius,
            start,
            end,
            bounds,
        }
    }

    /// The filled sector as a path.
    pub fn path(&self) -> Path {
        let mut path = Path::new();
        path.pie_slice(self.center, self.radius, self.start, self.end);
        path
    }
}

/// Split the inscribed circle of a `width × height` canvas into `count`
/// equal sectors, starting at angle zero.
pub fn slices(width: u32, height: u32, count: usize) -> Vec<Slice> {
    if count == 0 {
        return Vec::new();
    }
    let side = width.min(height);
    let radius = inner_square_radius(f64::from(side));
    let center = Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
    let angle = TAU / count as f64;

    (0..count)
        .map(|i| {
            let start = i as f64 * angle;
            Slice::new(center, radius, start, start + angle)
        })
        .collect()
}

pub(crate) fn plan(width: u32, height: u32, count: usize) -> Vec<Placement> {
    slices(width, height, count)
        .into_iter()
        .enumerate()
        .map(|(image, slice)| {
            let (size, origin) = covering_pixels(&slice.bounds);
            Placement {
                image,
                size,
                origin,
                mask: Some(slice.path()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn three_slices_share_center() {
        let s = slices(250, 250, 3);
        assert_eq!(s.len(), 3);
        for (i, slice) in s.iter().enumerate() {
            assert_eq!(slice.center, Point::new(125.0, 125.0));
            assert_approx_eq!(f64, slice.radius, 125.0);
            assert_approx_eq!(f64, slice.end - slice.start, TAU / 3.0, ulps = 4);
            assert_approx_eq!(f64, slice.start, i as f64 * TAU / 3.0, ulps = 4);
        }
    }

    #[test]
    fn first_of_three_grows_to_bottom() {
        // 0..120° spans the downward (on screen) extreme at 90°.
        let b = slices(250, 250, 3)[0].bounds;
        assert_approx_eq!(f64, b.min.x, 62.5, epsilon = 1e-9);
        assert_approx_eq!(f64, b.min.y, 125.0, epsilon = 1e-9);
        assert_approx_eq!(f64, b.max.x, 250.0, epsilon = 1e-9);
        assert_approx_eq!(f64, b.max.y, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn quarter_slices_are_quadrants() {
        let s = slices(200, 100, 4);
        // Circle radius follows the smaller side.
        assert_approx_eq!(f64, s[0].radius, 50.0);
        let b = s[2].bounds;
        assert_approx_eq!(f64, b.min.x, 50.0, epsilon = 1e-9);
        assert_approx_eq!(f64, b.min.y, 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, b.width(), 50.0, epsilon = 1e-9);
        assert_approx_eq!(f64, b.height(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn single_slice_covers_circle() {
        let b = slices(100, 100, 1)[0].bounds;
        assert_eq!(b, Rectangle::square(100.0));
    }

    #[test]
    fn plan_covers_sector_bounds() {
        let p = plan(250, 250, 3);
        // Bounds 62.5..250 round out to 62..250.
        assert_eq!(p[0].size, crate::fill::Size::new(188, 125));
        assert_eq!(p[0].origin, (62, 125));
        assert!(p.iter().all(|pl| pl.mask.is_some()));
        assert_eq!(p.iter().map(|pl| pl.image).collect::<Vec<_>>(), [0, 1, 2]);
    }
}
