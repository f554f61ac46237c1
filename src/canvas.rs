//! Drawing surface contract and the raster implementation composers draw on.
//!
//! Composers build a [`Path`] (move/line/arc/close), install it as the
//! canvas mask, and then draw resized images through it. A mask replaces
//! the previous one; draws outside the mask are discarded.
//!
//! Paths are plain values built off the canvas, so worker threads can
//! prepare their geometry without holding the canvas lock.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use zenmosaic::canvas::{Canvas, Path, RasterCanvas};
//! use zenmosaic::geometry::Rectangle;
//!
//! let mut canvas = RasterCanvas::new(4, 4);
//! let mut mask = Path::new();
//! mask.rectangle(&Rectangle::square(2.0));
//! canvas.set_mask(&mask).unwrap();
//!
//! let red = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
//! canvas.draw_image(&red, 0, 0).unwrap();
//!
//! assert_eq!(canvas.image().get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
//! assert_eq!(canvas.image().get_pixel(3, 3), &Rgba([0, 0, 0, 0]));
//! ```

use core::f64::consts::TAU;

use image::{Rgba, RgbaImage};
use num_traits::ToPrimitive;
use thiserror::Error;

use crate::geometry::{Point, Polygon, Rectangle};

/// Maximum distance (pixels) between an arc and its flattened polyline.
const ARC_TOLERANCE: f64 = 0.25;
/// Upper bound on segments emitted for a single arc.
const MAX_ARC_SEGMENTS: usize = 4096;

/// Failure reported by a drawing surface.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum CanvasError {
    /// A path vertex was NaN or infinite.
    #[error("path contains a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
    /// An image position could not be represented in pixel coordinates.
    #[error("image position ({x}, {y}) is outside the addressable range")]
    InvalidPosition { x: f64, y: f64 },
}

// ============================================================================
// Path
// ============================================================================

/// A sequence of polyline subpaths.
///
/// Subpaths are closed implicitly when filled; [`close`](Self::close) only
/// ends the current subpath so the next segment starts a new one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<Vec<Point>>,
    open: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new subpath at `p`.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.subpaths.push(vec![p]);
        self.open = true;
        self
    }

    /// Straight segment from the current point to `p`. Starts a subpath if
    /// there is no current point.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        match self.subpaths.last_mut() {
            Some(sub) if self.open => sub.push(p),
            _ => {
                self.move_to(p);
            }
        }
        self
    }

    /// Circular arc around `center` from angle `start` to `end`.
    ///
    /// Points are `center + (r·cos a, r·sin a)`; with y pointing down,
    /// increasing angles sweep clockwise on screen. A straight segment joins
    /// the current point to the arc's first point.
    pub fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> &mut Self {
        let sweep = end - start;
        let step = if radius > ARC_TOLERANCE {
            2.0 * (1.0 - ARC_TOLERANCE / radius).acos()
        } else {
            TAU
        };
        let segments = (sweep.abs() / step)
            .ceil()
            .to_usize()
            .unwrap_or(1)
            .clamp(1, MAX_ARC_SEGMENTS);

        for i in 0..=segments {
            let a = start + sweep * (i as f64 / segments as f64);
            self.line_to(center + Point::from_polar(radius, a));
        }
        self
    }

    /// End the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.open = false;
        self
    }

    /// Add a closed axis-aligned rectangle.
    pub fn rectangle(&mut self, rect: &Rectangle) -> &mut Self {
        self.polyline(&rect.vertices())
    }

    /// Add a closed polygon.
    pub fn polygon(&mut self, polygon: &Polygon) -> &mut Self {
        self.polyline(polygon.vertices())
    }

    /// Add a pie slice: center, arc from `start` to `end`, back to center.
    pub fn pie_slice(&mut self, center: Point, radius: f64, start: f64, end: f64) -> &mut Self {
        self.move_to(center)
            .arc(center, radius, start, end)
            .line_to(center)
            .close()
    }

    fn polyline(&mut self, points: &[Point]) -> &mut Self {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for &p in rest {
                self.line_to(p);
            }
            self.close();
        }
        self
    }

    pub fn subpaths(&self) -> &[Vec<Point>] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.len() < 2)
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// A mutable raster surface with mask-gated drawing.
///
/// Every operation is synchronous. Implementations shared across threads
/// must be `Send` and are wrapped in a lock by the caller.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill `path` (non-zero winding) with a solid color, respecting the
    /// active mask.
    fn fill_path(&mut self, path: &Path, color: Rgba<u8>) -> Result<(), CanvasError>;

    /// Replace the active mask with the filled area of `path`.
    fn set_mask(&mut self, path: &Path) -> Result<(), CanvasError>;

    /// Remove the active mask; subsequent draws cover the whole surface.
    fn clear_mask(&mut self);

    /// Draw `image` with its top-left corner at `(x, y)`, through the mask.
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) -> Result<(), CanvasError>;

    /// Draw `image` so that the point at fractions `(ax, ay)` of its size
    /// lands on `(x, y)`. `(0.5, 0.5)` centers the image on the point.
    fn draw_image_anchored(
        &mut self,
        image: &RgbaImage,
        x: i32,
        y: i32,
        ax: f64,
        ay: f64,
    ) -> Result<(), CanvasError> {
        let dx = (ax * f64::from(image.width())).to_i32();
        let dy = (ay * f64::from(image.height())).to_i32();
        match (dx, dy) {
            (Some(dx), Some(dy)) => self.draw_image(image, x - dx, y - dy),
            _ => Err(CanvasError::InvalidPosition { x: ax, y: ay }),
        }
    }

    /// Draw `image` with its top-left corner at `p`, truncating toward zero.
    fn draw_image_at(&mut self, image: &RgbaImage, p: Point) -> Result<(), CanvasError> {
        let (x, y) = pixel_position(p)?;
        self.draw_image(image, x, y)
    }

    /// Reset every pixel to transparent. The mask is left untouched.
    fn clear(&mut self);
}

/// Truncate a point to integer pixel coordinates.
pub fn pixel_position(p: Point) -> Result<(i32, i32), CanvasError> {
    match (p.x.to_i32(), p.y.to_i32()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(CanvasError::InvalidPosition { x: p.x, y: p.y }),
    }
}

/// In-memory RGBA canvas with an optional coverage mask.
#[derive(Clone, Debug)]
pub struct RasterCanvas {
    image: RgbaImage,
    mask: Option<Vec<u8>>,
}

impl RasterCanvas {
    /// Transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    /// Canvas drawing onto an existing image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image, mask: None }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Coverage of the active mask at `(x, y)`: 0 or 255. `None` when no
    /// mask is installed.
    pub fn mask_at(&self, x: u32, y: u32) -> Option<u8> {
        let mask = self.mask.as_ref()?;
        if x >= self.image.width() || y >= self.image.height() {
            return Some(0);
        }
        mask.get(self.index(x, y)).copied()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.image.width() as usize + x as usize
    }

    fn coverage(&self, x: u32, y: u32) -> u8 {
        match &self.mask {
            Some(mask) => mask[self.index(x, y)],
            None => 255,
        }
    }
}

impl Canvas for RasterCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_path(&mut self, path: &Path, color: Rgba<u8>) -> Result<(), CanvasError> {
        let area = rasterize(path, self.width(), self.height())?;
        for (i, covered) in area.iter().enumerate() {
            if *covered == 0 {
                continue;
            }
            let x = (i % self.image.width() as usize) as u32;
            let y = (i / self.image.width() as usize) as u32;
            let coverage = self.coverage(x, y);
            if coverage > 0 {
                blend_over(self.image.get_pixel_mut(x, y), color, coverage);
            }
        }
        Ok(())
    }

    fn set_mask(&mut self, path: &Path) -> Result<(), CanvasError> {
        self.mask = Some(rasterize(path, self.width(), self.height())?);
        Ok(())
    }

    fn clear_mask(&mut self) {
        self.mask = None;
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) -> Result<(), CanvasError> {
        let (cw, ch) = (i64::from(self.width()), i64::from(self.height()));
        for (sx, sy, pixel) in image.enumerate_pixels() {
            let dx = i64::from(x) + i64::from(sx);
            let dy = i64::from(y) + i64::from(sy);
            if dx < 0 || dy < 0 || dx >= cw || dy >= ch {
                continue;
            }
            let (dx, dy) = (dx as u32, dy as u32);
            let coverage = self.coverage(dx, dy);
            if coverage > 0 {
                blend_over(self.image.get_pixel_mut(dx, dy), *pixel, coverage);
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Source-over compositing of `src`, scaled by `coverage / 255`, onto `dst`.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    let alpha = f32::from(src[3]) / 255.0 * f32::from(coverage) / 255.0;
    if alpha >= 1.0 {
        *dst = src;
        return;
    }
    if alpha <= 0.0 {
        return;
    }

    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    let channel = |s: u8, d: u8| {
        let v = (f32::from(s) * alpha + f32::from(d) * dst_alpha * (1.0 - alpha)) / out_alpha;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ]);
}

/// Scanline-fill `path` with the non-zero winding rule, sampling pixel
/// centers. Returns one byte per pixel: 255 inside, 0 outside.
fn rasterize(path: &Path, width: u32, height: u32) -> Result<Vec<u8>, CanvasError> {
    let mut edges = Vec::new();
    for sub in path.subpaths() {
        for p in sub {
            if !p.is_finite() {
                return Err(CanvasError::NonFiniteCoordinate { x: p.x, y: p.y });
            }
        }
        if sub.len() < 2 {
            continue;
        }
        for (i, &a) in sub.iter().enumerate() {
            let b = sub[(i + 1) % sub.len()];
            if a.y != b.y {
                edges.push((a, b));
            }
        }
    }

    let (w, h) = (width as usize, height as usize);
    let mut out = vec![0u8; w * h];
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for row in 0..h {
        let sy = row as f64 + 0.5;
        crossings.clear();
        for &(a, b) in &edges {
            let (top, bottom, dir) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
            if sy < top.y || sy >= bottom.y {
                continue;
            }
            let x = top.x + (sy - top.y) * (bottom.x - top.x) / (bottom.y - top.y);
            crossings.push((x, dir));
        }
        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }
            // Pixel x is covered when its center x + 0.5 lies in [start, end).
            let start = (pair[0].0 - 0.5).ceil().max(0.0);
            let end = (pair[1].0 - 0.5).ceil().min(w as f64);
            if end <= start {
                continue;
            }
            let line = &mut out[row * w..(row + 1) * w];
            line[start as usize..end as usize].fill(255);
        }
    }

    Ok(out)
}
