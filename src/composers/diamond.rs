//! Diamond: concentric rings of rotated squares.
//!
//! ```text
//!   ring 0   1 image    central diamond
//!   ring 1   4 images   same size, diagonal neighbours      (from 5 images)
//!   ring 2   4 images   2/3 size, axis neighbours            (from 9 images)
//!   ring 3   4 images   2/3 size, outer diagonal positions   (from 13 images)
//! ```
//!
//! The central diamond's side is the canvas' inscribed square scaled by
//! `3·√2 / (13 + √2)`, which makes the four rings span the square exactly.
//! Positions within a ring are a quarter turn apart.
//!
//! The central image and ring 1 are drawn on the calling thread. Rings 2
//! and 3 each run on a scoped worker that computes its own geometry and
//! resizes its images, taking the canvas lock only to install a mask and
//! draw through it. Diamonds within a ring never overlap, so a mask never
//! has to be cleared between positions.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use core::ops::Range;
use std::sync::{Mutex, PoisonError};
use std::thread;

use image::RgbaImage;
use log::debug;

use crate::canvas::{Canvas, Path};
use crate::composer::{ComposeError, Composer};
use crate::geometry::{Point, Polygon, Rectangle, diamond_scale};

use super::{Placement, covering_pixels, draw_plan, paint, prepare};

/// Positions per ring.
const RING_SIZE: usize = 4;

/// Geometry shared by every ring for one canvas size.
#[derive(Clone, Debug, PartialEq)]
pub struct DiamondLayout {
    /// Canvas center.
    pub center: Point,
    /// Side of the central square before rotation.
    pub side: f64,
    /// Central diamond.
    pub diamond: Polygon,
    /// 2/3-scaled diamond used by the outer rings, centered like `diamond`.
    pub small: Polygon,
}

/// One ring of four diamonds.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    /// Ring number, 1 to 3.
    pub index: usize,
    /// Images drawn by this ring, in angular order.
    pub images: Range<usize>,
    /// Diamond shape, centered on the canvas center.
    pub diamond: Polygon,
    /// Distance from the canvas center to each diamond's center.
    pub radius: f64,
    /// Angle of the first position.
    pub start_angle: f64,
}

impl DiamondLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let square = Rectangle::with_side_lengths(Point::new(f64::from(width), f64::from(height)))
            .inner_center_square();
        let dia_square = square.scale_from_center(diamond_scale());
        let diamond = dia_square.rotate_around_center(FRAC_PI_4);
        let small = diamond.scale_from_center(2.0 / 3.0);
        Self {
            center: square.center(),
            side: dia_square.width(),
            diamond,
            small,
        }
    }

    /// Placement of image 0, centered on the canvas.
    pub fn central(&self) -> Placement {
        masked(0, &self.diamond)
    }

    /// The rings that `count` images fill completely.
    pub fn rings(&self, count: usize) -> Vec<Ring> {
        let large = self.diamond.bounding_rect().width();
        let small = self.small.bounding_rect().width();
        let specs = [
            (&self.diamond, self.side, FRAC_PI_4),
            (&self.small, (large + small) / 2.0, 0.0),
            (&self.small, self.side * 11.0 / 6.0, FRAC_PI_4),
        ];

        specs
            .into_iter()
            .enumerate()
            .map(|(i, (diamond, radius, start_angle))| {
                let first = 1 + i * RING_SIZE;
                Ring {
                    index: i + 1,
                    images: first..first + RING_SIZE,
                    diamond: diamond.clone(),
                    radius,
                    start_angle,
                }
            })
            .take_while(|ring| ring.images.end <= count)
            .collect()
    }
}

impl Ring {
    /// Placements of this ring's images around the canvas center.
    pub fn placements(&self) -> Vec<Placement> {
        self.images
            .clone()
            .enumerate()
            .map(|(k, image)| {
                let offset = Point::from_polar(self.radius, self.start_angle + k as f64 * FRAC_PI_2);
                masked(image, &self.diamond.translate(offset))
            })
            .collect()
    }
}

/// Fill the pixels covering `diamond` and mask to it.
fn masked(image: usize, diamond: &Polygon) -> Placement {
    let (size, origin) = covering_pixels(&diamond.bounding_rect());
    let mut mask = Path::new();
    mask.polygon(diamond);
    Placement {
        image,
        mask: Some(mask),
        size,
        origin,
    }
}

/// Full plan for `count` images, central diamond first.
pub(crate) fn plan(width: u32, height: u32, count: usize) -> Vec<Placement> {
    if count == 0 {
        return Vec::new();
    }
    let layout = DiamondLayout::new(width, height);
    let mut plan = vec![layout.central()];
    for ring in layout.rings(count) {
        plan.extend(ring.placements());
    }
    plan
}

pub(crate) fn compose<C: Canvas + Send>(
    canvas: &mut C,
    images: &[RgbaImage],
) -> Result<(), ComposeError> {
    Composer::TilesDiamond.check_count(images.len())?;

    let layout = DiamondLayout::new(canvas.width(), canvas.height());
    draw_plan(canvas, images, &[layout.central()])?;

    let (inline, workers): (Vec<Ring>, Vec<Ring>) = layout
        .rings(images.len())
        .into_iter()
        .partition(|ring| ring.index == 1);
    for ring in &inline {
        draw_plan(canvas, images, &ring.placements())?;
    }
    if workers.is_empty() {
        return Ok(());
    }

    let shared = Mutex::new(canvas);
    let results: Vec<Result<(), ComposeError>> = thread::scope(|scope| {
        let handles: Vec<_> = workers
            .iter()
            .map(|ring| {
                let shared = &shared;
                let handle = scope.spawn(move || draw_ring(shared, images, ring));
                (ring.index, handle)
            })
            .collect();

        // Join every worker before looking at any result.
        handles
            .into_iter()
            .map(|(ring, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(ComposeError::WorkerPanicked { ring }))
            })
            .collect()
    });

    // First failure in ring order.
    results.into_iter().collect()
}

fn draw_ring<C: Canvas + ?Sized>(
    canvas: &Mutex<&mut C>,
    images: &[RgbaImage],
    ring: &Ring,
) -> Result<(), ComposeError> {
    debug!(ring = ring.index; "Ring worker started");
    for placement in ring.placements() {
        let Some(filled) = prepare(images, &placement)? else {
            continue;
        };
        // A worker that panicked mid-draw is reported by its join handle.
        let mut guard = canvas.lock().unwrap_or_else(PoisonError::into_inner);
        paint(&mut **guard, &placement, &filled)?;
    }
    debug!(ring = ring.index; "Ring worker finished");
    Ok(())
}
