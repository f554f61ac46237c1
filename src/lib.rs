//! Image collage composition: lay out a variable number of images on one
//! fixed-size canvas with pie, tile, diamond, and stripe composers.
//!
//! # Modules
//!
//! - [`geometry`]: Points, rectangles, polygons, balanced factors, angle helpers
//! - [`fill`]: Aspect-fill crop computation and Lanczos resize-to-fill
//! - [`canvas`]: Path builder, `Canvas` trait, mask-gated RGBA raster
//! - [`composer`]: Composer variants, metadata, image-count recommendation
//! - [`composers`]: Layout algorithms and their placement plans
//! - [`registry`]: Explicit composer registry and selection
//! - [`showcase`]: Every composer on one sheet
//! - [`load`]: Concurrent image loading with per-index results
//! - `svg`: SVG rendering of placement plans (feature `svg`)
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use zenmosaic::{RasterCanvas, Registry};
//!
//! let images: Vec<RgbaImage> = (0..7u8)
//!     .map(|i| RgbaImage::from_pixel(32, 24, Rgba([i * 30, 0, 0, 255])))
//!     .collect();
//!
//! let registry = Registry::builtin();
//! let choice = registry.select("tiles-perfect", images.len()).unwrap();
//! assert_eq!(choice.count, 6);
//!
//! let mut canvas = RasterCanvas::new(300, 300);
//! choice.info.compose(&mut canvas, &images[..choice.count]).unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod canvas;
pub mod composer;
pub mod composers;
pub mod fill;
pub mod geometry;
pub mod load;
pub mod registry;
pub mod showcase;

#[cfg(feature = "svg")]
pub mod svg;

pub use canvas::{Canvas, CanvasError, Path, RasterCanvas};
pub use composer::{ComposeError, Composer, ComposerInfo};
pub use composers::Placement;
pub use fill::{FillError, FillLayout, Size, resize_to_fill};
pub use geometry::{Point, Polygon, Rectangle, angle_strictly_between, balanced_factors};
pub use load::{LoadError, load_image, load_images};
pub use registry::{Recommendation, Registry};
pub use showcase::ShowcaseOptions;
