//! Rectangular tilings: the balanced grid and the focus layout.

use crate::composer::{ComposeError, Composer};
use crate::fill::Size;
use crate::geometry::{Point, balanced_factors};

use super::{Placement, pixels};

/// Grid dimensions for `count` cells: `(columns, rows)` with
/// `columns ≤ rows`.
pub fn grid(count: usize) -> Option<(usize, usize)> {
    balanced_factors(count)
}

/// Equal cells in row-major order: image `i` goes to column `i mod cols`,
/// row `i div cols`. Cell sizes are whole pixels; any remainder of the
/// canvas stays untouched.
pub(crate) fn perfect_plan(
    width: u32,
    height: u32,
    count: usize,
) -> Result<Vec<Placement>, ComposeError> {
    let (cols, rows) = grid(count).ok_or(ComposeError::InvalidImageCount {
        composer: Composer::TilesPerfect.id(),
        count,
        minimum: 1,
    })?;
    let cell_w = width / cols as u32;
    let cell_h = height / rows as u32;

    Ok((0..count)
        .map(|i| {
            let column = (i % cols) as u32;
            let row = (i / cols) as u32;
            Placement {
                image: i,
                mask: None,
                size: Size::new(cell_w, cell_h),
                origin: ((column * cell_w) as i32, (row * cell_h) as i32),
            }
        })
        .collect())
}

/// Focus-and-satellites layout.
///
/// Image 0 takes a large cell anchored at the bottom left, image 1 the cell
/// at the top right. The rest alternate: even indices fill the top edge
/// right to left, odd indices fill the right edge top to bottom.
///
/// The focus size comes from parity-adjusted counts, so two or three images
/// yield a zero-height focus cell that is skipped when drawing.
pub(crate) fn focused_plan(width: u32, height: u32, count: usize) -> Vec<Placement> {
    if count < 2 {
        return Vec::new();
    }
    let (w, h) = (width as i32, height as i32);
    let total = Point::new(f64::from(width), f64::from(height));

    let even_diff = count % 2;
    let even = (count - even_diff) as f64;
    let uneven = (count - (1 - even_diff)) as f64;
    let horizontal_ratio = (uneven - 1.0) / (uneven + 1.0);
    let vertical_ratio = (even - 2.0) / even;

    let focus = total.scale(Point::new(horizontal_ratio, vertical_ratio));
    let (focus_x, focus_y) = (pixels(focus.x), pixels(focus.y));
    let other = total - focus;
    let (other_x, other_y) = (pixels(other.x), pixels(other.y));
    let other_size = Size::new(other_x, other_y);

    let mut plan = Vec::with_capacity(count);
    plan.push(Placement {
        image: 0,
        mask: None,
        size: Size::new(focus_x, focus_y),
        origin: (0, h - focus_y as i32),
    });
    plan.push(Placement {
        image: 1,
        mask: None,
        size: other_size,
        origin: (focus_x as i32, 0),
    });

    for (step, top) in (2..count).step_by(2).enumerate() {
        let slot = step as i32 + 1;
        plan.push(Placement {
            image: top,
            mask: None,
            size: other_size,
            // Right edge of the cell sits `slot` cells left of the canvas edge.
            origin: (w - slot * other_x as i32 - other_x as i32, 0),
        });
        let right = top + 1;
        if right < count {
            plan.push(Placement {
                image: right,
                mask: None,
                size: other_size,
                origin: (focus_x as i32, slot * other_y as i32),
            });
        }
    }

    plan
}
