//! Plane geometry for composition layouts.
//!
//! Points, axis-aligned rectangles and polygons in canvas coordinates
//! (x grows right, y grows down). Every operation returns a new value;
//! nothing here allocates except [`Polygon`] vertex storage.
//!
//! Angles are radians. Rotation is counter-clockwise in the mathematical
//! sense: `rotate(p, θ) = (x·cosθ − y·sinθ, x·sinθ + y·cosθ)`. On a canvas
//! with y pointing down this appears clockwise on screen, which matches the
//! direction arcs are swept by [`Path::arc`](crate::canvas::Path::arc).

use core::f64::consts::{SQRT_2, TAU};
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Tolerance used when comparing normalized angles.
const ANGLE_EPSILON: f64 = 1e-9;

/// Radius of the circle inscribed in a square with the given side length.
pub fn inner_square_radius(side: f64) -> f64 {
    side / 2.0
}

/// Radius of the circle circumscribing a square with the given side length.
pub fn outer_square_radius(side: f64) -> f64 {
    (2.0 * side * side).sqrt() / 2.0
}

/// Find the factor pair `(a, b)` of `value` with `a ≤ b`, `a·b = value`,
/// and the smallest possible `b − a`.
///
/// Square numbers yield `(√value, √value)`, primes yield `(1, value)`.
/// Returns `None` for zero, which has no meaningful factorization.
///
/// ```
/// use zenmosaic::geometry::balanced_factors;
///
/// assert_eq!(balanced_factors(6), Some((2, 3)));
/// assert_eq!(balanced_factors(9), Some((3, 3)));
/// assert_eq!(balanced_factors(11), Some((1, 11)));
/// assert_eq!(balanced_factors(0), None);
/// ```
pub fn balanced_factors(value: usize) -> Option<(usize, usize)> {
    if value == 0 {
        return None;
    }

    let mut a = (value as f64).sqrt().ceil() as usize;
    // Float rounding can overshoot for very large inputs.
    while a > 1 && (a - 1).saturating_mul(a - 1) >= value {
        a -= 1;
    }

    loop {
        if value % a == 0 {
            let b = value / a;
            return Some((a.min(b), a.max(b)));
        }
        a -= 1;
    }
}

/// Whether `angle` lies strictly inside the counter-clockwise sweep from
/// `low` to `high`.
///
/// All three angles are taken modulo 2π, so adding whole turns to any
/// argument does not change the result. Both endpoints are excluded, and a
/// sweep whose length is a whole number of turns is treated as empty.
pub fn angle_strictly_between(angle: f64, low: f64, high: f64) -> bool {
    let span = normalize_angle(high - low);
    let rel = normalize_angle(angle - low);
    rel > ANGLE_EPSILON && rel < span - ANGLE_EPSILON
}

/// Map an angle to `[0, 2π)`, snapping values within tolerance of a whole
/// turn to zero.
fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if TAU - a < ANGLE_EPSILON { 0.0 } else { a }
}

// ============================================================================
// Point
// ============================================================================

/// A point (or vector) in cartesian coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point from cartesian coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from polar coordinates.
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(radius * cos, radius * sin)
    }

    /// Polar form as `(radius, angle)`.
    pub fn polar(self) -> (f64, f64) {
        (self.x.hypot(self.y), self.y.atan2(self.x))
    }

    /// Component-wise multiplication.
    pub fn scale(self, factors: Point) -> Self {
        Self::new(self.x * factors.x, self.y * factors.y)
    }

    /// Rotate counter-clockwise around the origin.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate counter-clockwise around `origin`.
    pub fn rotate_around(self, angle: f64, origin: Point) -> Self {
        (self - origin).rotate(angle) + origin
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:.3}, {:.3}>", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, divisor: f64) -> Point {
        Point::new(self.x / divisor, self.y / divisor)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

// ============================================================================
// Rectangle
// ============================================================================

/// Axis-aligned rectangle spanned by two corner points.
///
/// Invariant: `min.x ≤ max.x` and `min.y ≤ max.y`. Constructors that accept
/// arbitrary points compute the true bounding box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    /// The rectangle spanned by two opposite corners, in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Rectangle at the origin with the given width (`size.x`) and height
    /// (`size.y`).
    pub fn with_side_lengths(size: Point) -> Self {
        Self::new(Point::ORIGIN, size)
    }

    /// Square at the origin.
    pub fn square(side: f64) -> Self {
        Self::with_side_lengths(Point::new(side, side))
    }

    /// Rectangle at `origin` with the given size.
    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin, origin + Point::new(width, height))
    }

    /// Smallest rectangle containing every point. Empty input yields the
    /// zero rectangle at the origin.
    pub fn containing_points(points: &[Point]) -> Self {
        match points.split_first() {
            None => Self::default(),
            Some((first, rest)) => Self {
                min: *first,
                max: *first,
            }
            .grow_to_contain_all(rest),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f64 {
        self.width().min(self.height())
    }

    /// Length of the longer side.
    pub fn max_side(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn top_left(&self) -> Point {
        self.min
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.max.x, self.min.y)
    }

    pub fn bottom_right(&self) -> Point {
        self.max
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.min.x, self.max.y)
    }

    /// The four corners, clockwise (on screen) from the top left.
    pub fn vertices(&self) -> [Point; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }

    /// Whether `p` lies inside or on the border.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Expand to contain `p`. Returns an identical rectangle if `p` is
    /// already inside.
    pub fn grow_to_contain(self, p: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Expand to contain every point.
    pub fn grow_to_contain_all(self, points: &[Point]) -> Self {
        points.iter().fold(self, |r, &p| r.grow_to_contain(p))
    }

    pub fn translate(self, offset: Point) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Scale around the origin. Negative factors are normalized back into
    /// a valid rectangle.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    /// Scale around `origin`.
    pub fn scale_from(self, factor: f64, origin: Point) -> Self {
        self.translate(-origin).scale(factor).translate(origin)
    }

    /// Scale around the rectangle's own center.
    pub fn scale_from_center(self, factor: f64) -> Self {
        self.scale_from(factor, self.center())
    }

    /// The corners after a counter-clockwise rotation around `origin`.
    ///
    /// Rotation breaks axis alignment, so the result is a [`Polygon`].
    pub fn rotate_around(&self, angle: f64, origin: Point) -> Polygon {
        Polygon::new(
            self.vertices()
                .iter()
                .map(|v| v.rotate_around(angle, origin))
                .collect(),
        )
    }

    /// The corners after a counter-clockwise rotation around the center.
    pub fn rotate_around_center(&self, angle: f64) -> Polygon {
        self.rotate_around(angle, self.center())
    }

    /// The largest square that fits inside, sharing this rectangle's center.
    pub fn inner_center_square(&self) -> Self {
        let half = self.min_side() / 2.0;
        let diag = Point::new(half, half);
        let c = self.center();
        Self {
            min: c - diag,
            max: c + diag,
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({} / {})", self.min, self.max)
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// An arbitrary polygon given by its vertices in drawing order.
///
/// The closing edge from the last vertex back to the first is implied; it is
/// not stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn bounding_rect(&self) -> Rectangle {
        Rectangle::containing_points(&self.vertices)
    }

    /// Arithmetic mean of the vertices. The origin for an empty polygon.
    pub fn center(&self) -> Point {
        if self.vertices.is_empty() {
            return Point::ORIGIN;
        }
        let sum = self.vertices.iter().fold(Point::ORIGIN, |sum, &v| sum + v);
        sum / self.vertices.len() as f64
    }

    fn map_vertices(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(self.vertices.iter().map(|&v| f(v)).collect())
    }

    pub fn translate(&self, offset: Point) -> Self {
        self.map_vertices(|v| v + offset)
    }

    /// Scale around the origin.
    pub fn scale(&self, factor: f64) -> Self {
        self.map_vertices(|v| v * factor)
    }

    /// Scale around `origin`: translate to the origin, scale, translate back.
    pub fn scale_from(&self, factor: f64, origin: Point) -> Self {
        self.translate(-origin)
            .scale(factor)
            .translate(origin)
    }

    /// Scale around the centroid. The centroid is preserved.
    pub fn scale_from_center(&self, factor: f64) -> Self {
        self.scale_from(factor, self.center())
    }

    /// Rotate counter-clockwise around `origin`.
    pub fn rotate_around(&self, angle: f64, origin: Point) -> Self {
        self.map_vertices(|v| v.rotate_around(angle, origin))
    }
}

/// Scale factor from the largest inscribed square of a canvas to the side
/// of the central diamond in the diamond tiling.
///
/// Chosen so that the central diamond, one ring of equal diamonds and two
/// rings of 2/3-sized diamonds exactly span the square's diagonal extent.
pub fn diamond_scale() -> f64 {
    3.0 * SQRT_2 / (13.0 + SQRT_2)
}
