//! End-to-end composition on a raster canvas.
//!
//! Every source image is a single solid color, so the color found at a
//! canvas pixel identifies which image owns that pixel. Sample points sit
//! well inside each region to stay clear of mask edges.

use image::{Rgba, RgbaImage};
use zenmosaic::*;

// ---- Helpers ----

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn color(i: usize) -> Rgba<u8> {
    let i = i as u8;
    Rgba([i * 19, 255 - i * 19, i * 7, 255])
}

/// `n` solid images with a non-square aspect, so every fill crops.
fn solids(n: usize) -> Vec<RgbaImage> {
    (0..n)
        .map(|i| RgbaImage::from_pixel(40, 30, color(i)))
        .collect()
}

fn compose(composer: Composer, size: u32, images: &[RgbaImage]) -> RasterCanvas {
    let mut canvas = RasterCanvas::new(size, size);
    composer.compose(&mut canvas, images).unwrap();
    canvas
}

#[track_caller]
fn assert_owner(canvas: &RasterCanvas, (x, y): (u32, u32), image: usize) {
    assert_eq!(
        canvas.image().get_pixel(x, y),
        &color(image),
        "pixel ({x}, {y}) should belong to image {image}"
    );
}

// ---- Perfect tiles ----

#[test]
fn perfect_four_images_quadrants_in_order() {
    let canvas = compose(Composer::TilesPerfect, 250, &solids(4));
    for (image, quadrant) in [(62, 62), (187, 62), (62, 187), (187, 187)]
        .into_iter()
        .enumerate()
    {
        assert_owner(&canvas, quadrant, image);
    }
    // Cell borders are exact: 125×125 each, nothing uncovered.
    assert_owner(&canvas, (124, 124), 0);
    assert_owner(&canvas, (125, 124), 1);
    assert_owner(&canvas, (124, 125), 2);
    assert_owner(&canvas, (249, 249), 3);
}

#[test]
fn perfect_covers_divisible_canvas_exactly_once() {
    let plan = Composer::TilesPerfect.plan(300, 300, 6).unwrap();
    let mut hits = vec![0u8; 300 * 300];
    for p in &plan {
        let (x0, y0) = (p.origin.0 as usize, p.origin.1 as usize);
        for y in y0..y0 + p.size.height as usize {
            for x in x0..x0 + p.size.width as usize {
                hits[y * 300 + x] += 1;
            }
        }
    }
    assert!(hits.iter().all(|&h| h == 1));
}

// ---- Pie ----

#[test]
fn pie_three_sectors_share_center() {
    let canvas = compose(Composer::CirclesPie, 250, &solids(3));
    // Sector i spans i·120° to (i+1)·120°, angles growing clockwise on screen.
    assert_owner(&canvas, (165, 194), 0); // 60°
    assert_owner(&canvas, (45, 125), 1); // 180°
    assert_owner(&canvas, (165, 56), 2); // 300°
    // Outside the inscribed circle nothing is drawn.
    assert_eq!(canvas.image().get_pixel(2, 2), &TRANSPARENT);
    assert_eq!(canvas.image().get_pixel(247, 247), &TRANSPARENT);
}

#[test]
fn pie_single_image_is_a_disc() {
    let canvas = compose(Composer::CirclesPie, 100, &solids(1));
    assert_owner(&canvas, (50, 50), 0);
    assert_owner(&canvas, (50, 2), 0);
    assert_eq!(canvas.image().get_pixel(1, 1), &TRANSPARENT);
}

// ---- Focused tiles ----

#[test]
fn focused_rejects_single_image() {
    let mut canvas = RasterCanvas::new(50, 50);
    assert!(matches!(
        Composer::TilesFocused.compose(&mut canvas, &solids(1)),
        Err(ComposeError::InvalidImageCount { count: 1, minimum: 2, .. })
    ));
}

#[test]
fn focused_two_images_succeeds() {
    let canvas = compose(Composer::TilesFocused, 250, &solids(2));
    // The focus cell is empty; image 1 takes the whole canvas.
    assert_owner(&canvas, (10, 240), 1);
    assert_owner(&canvas, (240, 10), 1);
}

#[test]
fn focused_four_images_focus_bottom_left() {
    let canvas = compose(Composer::TilesFocused, 250, &solids(4));
    assert_owner(&canvas, (62, 187), 0);
    assert_owner(&canvas, (187, 62), 1);
    assert_owner(&canvas, (62, 62), 2);
    assert_owner(&canvas, (187, 187), 3);
}

// ---- Diamond ----

#[test]
fn diamond_single_image_draws_center_only() {
    let canvas = compose(Composer::TilesDiamond, 250, &solids(1));
    assert_owner(&canvas, (125, 125), 0);
    assert_eq!(canvas.image().get_pixel(177, 177), &TRANSPARENT);
    assert_eq!(canvas.image().get_pixel(211, 125), &TRANSPARENT);
}

#[test]
fn diamond_thirteen_images_fill_every_ring() {
    let canvas = compose(Composer::TilesDiamond, 250, &solids(13));
    let expected = [
        // central
        (125, 125),
        // ring 1: diagonal neighbours, quarter turns from 45°
        (177, 177),
        (73, 177),
        (73, 73),
        (177, 73),
        // ring 2: axis neighbours, quarter turns from 0°
        (211, 125),
        (125, 211),
        (38, 125),
        (125, 38),
        // ring 3: outer diagonals
        (220, 220),
        (29, 220),
        (29, 29),
        (220, 29),
    ];
    for (image, point) in expected.into_iter().enumerate() {
        assert_owner(&canvas, point, image);
    }
}

#[test]
fn diamond_is_deterministic_across_runs() {
    let images = solids(13);
    let first = compose(Composer::TilesDiamond, 180, &images).into_image();
    for _ in 0..4 {
        assert_eq!(compose(Composer::TilesDiamond, 180, &images).into_image(), first);
    }
}

#[test]
fn diamond_reports_fill_errors_after_joining() {
    let mut images = solids(13);
    images[10] = RgbaImage::new(0, 0);
    let mut canvas = RasterCanvas::new(250, 250);
    assert!(matches!(
        Composer::TilesDiamond.compose(&mut canvas, &images),
        Err(ComposeError::Fill { index: 10, .. })
    ));
}

#[test]
fn diamond_reports_first_failing_ring_every_run() {
    // Rings 2 and 3 both fail; ring 2 must win however the workers race.
    let mut images = solids(13);
    images[6] = RgbaImage::new(0, 0);
    images[11] = RgbaImage::new(0, 0);
    for run in 0..20 {
        let mut canvas = RasterCanvas::new(250, 250);
        let result = Composer::TilesDiamond.compose(&mut canvas, &images);
        assert!(
            matches!(result, Err(ComposeError::Fill { index: 6, .. })),
            "run {run}: {result:?}"
        );
    }
}

// ---- Mask coverage ----

/// Every pixel inside a placement's mask is painted opaque.
#[track_caller]
fn assert_masks_fully_painted(composer: Composer, size: u32, count: usize) {
    let canvas = compose(composer, size, &solids(count));
    for placement in composer.plan(size, size, count).unwrap() {
        let Some(mask) = &placement.mask else {
            continue;
        };
        let mut coverage = RasterCanvas::new(size, size);
        coverage.set_mask(mask).unwrap();
        for y in 0..size {
            for x in 0..size {
                if coverage.mask_at(x, y) == Some(255) {
                    assert_eq!(
                        canvas.image().get_pixel(x, y)[3],
                        255,
                        "{composer:?} at {size}: image {} left ({x}, {y}) unpainted",
                        placement.image
                    );
                }
            }
        }
    }
}

#[test]
fn pie_masks_are_fully_painted() {
    assert_masks_fully_painted(Composer::CirclesPie, 250, 3);
    assert_masks_fully_painted(Composer::CirclesPie, 250, 5);
    assert_masks_fully_painted(Composer::CirclesPie, 301, 7);
}

#[test]
fn diamond_masks_are_fully_painted() {
    assert_masks_fully_painted(Composer::TilesDiamond, 250, 13);
    assert_masks_fully_painted(Composer::TilesDiamond, 300, 13);
}

// ---- Stripes ----

#[test]
fn stripes_show_full_canvas_crops() {
    // Red encodes the source column, green the image.
    let images: Vec<RgbaImage> = (0..3u8)
        .map(|i| RgbaImage::from_fn(240, 60, |x, _| Rgba([x as u8, i * 80, 0, 255])))
        .collect();
    let mut canvas = RasterCanvas::new(240, 60);
    Composer::StripesVertical.compose(&mut canvas, &images).unwrap();

    for (x, image) in [(10u32, 0u8), (120, 1), (230, 2)] {
        let px = canvas.image().get_pixel(x, 30);
        assert_eq!(px[1], image * 80, "band owner at x={x}");
        // Same column of the source: the band shows the full-canvas fill.
        assert_eq!(px[0], x as u8);
    }
}

// ---- Registry ----

#[test]
fn recommended_composer_composes() {
    let registry = Registry::builtin();
    let images = solids(10);
    for r in registry.recommend(images.len()) {
        let mut canvas = RasterCanvas::new(120, 90);
        r.info
            .compose(&mut canvas, &images[..r.count])
            .unwrap_or_else(|e| panic!("{} failed: {e}", r.info.id()));
    }
}

#[test]
fn mask_is_cleared_after_compose() {
    let canvas = compose(Composer::StripesVertical, 60, &solids(3));
    assert_eq!(canvas.mask_at(0, 0), None);
}
