//! Composer identity, metadata and image-count recommendation.
//!
//! A [`Composer`] is one layout algorithm. [`ComposerInfo`] wraps it with the
//! id it is registered under and the image counts it is tuned for.

use image::RgbaImage;
use log::{debug, trace};
use thiserror::Error;

use crate::canvas::{Canvas, CanvasError};
use crate::composers::{self, Placement, diamond, pie, stripes, tiles};
use crate::fill::FillError;

/// Composition failure.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ComposeError {
    /// Fewer images than the composer's structural minimum.
    #[error("{composer} needs at least {minimum} image(s), got {count}")]
    InvalidImageCount {
        composer: &'static str,
        count: usize,
        minimum: usize,
    },
    /// The drawing surface rejected an operation.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    /// An image could not be resized into its cell.
    #[error("image {index} could not be filled: {error}")]
    Fill { index: usize, error: FillError },
    /// No composer is registered under the requested id.
    #[error("no composer {0:?} found")]
    ComposerNotFound(String),
    /// A concurrent ring worker panicked.
    #[error("worker for ring {ring} panicked")]
    WorkerPanicked { ring: usize },
}

/// The built-in layout algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Composer {
    /// Equal circle sectors around the canvas center.
    CirclesPie,
    /// Near-square grid of equal cells.
    TilesPerfect,
    /// One large focus tile with the rest along the top and right edges.
    TilesFocused,
    /// Concentric rings of rotated squares.
    TilesDiamond,
    /// Equal-width vertical bands.
    StripesVertical,
}

impl Composer {
    /// Id used in registries and error messages.
    pub const fn id(self) -> &'static str {
        match self {
            Self::CirclesPie => "circles-pie",
            Self::TilesPerfect => "tiles-perfect",
            Self::TilesFocused => "tiles-focused",
            Self::TilesDiamond => "tiles-diamond",
            Self::StripesVertical => "stripes-vertical",
        }
    }

    /// Smallest image count the layout can be built from.
    pub const fn minimum_images(self) -> usize {
        match self {
            Self::TilesFocused => 2,
            _ => 1,
        }
    }

    /// Draw `images` onto `canvas` in order.
    ///
    /// `images` should already be trimmed to the intended count (see
    /// [`ComposerInfo::recommend_image_count`]). On error the canvas content
    /// is unspecified. On success the canvas mask is cleared.
    pub fn compose<C: Canvas + Send>(
        self,
        canvas: &mut C,
        images: &[RgbaImage],
    ) -> Result<(), ComposeError> {
        debug!(
            composer = self.id(), images = images.len(), width = canvas.width(), height = canvas.height();
            "Composing"
        );
        match self {
            Self::TilesDiamond => diamond::compose(canvas, images)?,
            _ => {
                let plan = self.plan(canvas.width(), canvas.height(), images.len())?;
                composers::draw_plan(canvas, images, &plan)?;
            }
        }
        canvas.clear_mask();
        Ok(())
    }

    /// The placements this composer would draw for `count` images on a
    /// `width × height` canvas, without touching pixels.
    pub fn plan(self, width: u32, height: u32, count: usize) -> Result<Vec<Placement>, ComposeError> {
        self.check_count(count)?;
        let plan = match self {
            Self::CirclesPie => pie::plan(width, height, count),
            Self::TilesPerfect => tiles::perfect_plan(width, height, count)?,
            Self::TilesFocused => tiles::focused_plan(width, height, count),
            Self::TilesDiamond => diamond::plan(width, height, count),
            Self::StripesVertical => stripes::plan(width, height, count),
        };
        trace!(composer = self.id(), placements = plan.len(); "Planned");
        Ok(plan)
    }

    pub(crate) fn check_count(self, count: usize) -> Result<(), ComposeError> {
        let minimum = self.minimum_images();
        if count < minimum {
            return Err(ComposeError::InvalidImageCount {
                composer: self.id(),
                count,
                minimum,
            });
        }
        Ok(())
    }
}

/// A [`Composer`] together with its registration metadata.
///
/// Built with const `with_*` methods; read through the accessors. The id is
/// always the wrapped composer's own.
#[derive(Copy, Clone, Debug)]
pub struct ComposerInfo {
    composer: Composer,
    name: &'static str,
    description: &'static str,
    image_count_human: Option<&'static str>,
    check_image_count: Option<fn(usize) -> bool>,
    recommended_image_counts: &'static [usize],
}

impl ComposerInfo {
    /// Metadata accepting any count.
    pub const fn new(composer: Composer, name: &'static str) -> Self {
        Self {
            composer,
            name,
            description: "",
            image_count_human: None,
            check_image_count: None,
            recommended_image_counts: &[],
        }
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn with_image_count_human(mut self, hint: &'static str) -> Self {
        self.image_count_human = Some(hint);
        self
    }

    /// Restrict the accepted counts. Without a check every count is accepted.
    pub const fn with_image_count_check(mut self, check: fn(usize) -> bool) -> Self {
        self.check_image_count = Some(check);
        self
    }

    /// Counts the composer looks best with.
    pub const fn with_recommended_image_counts(mut self, counts: &'static [usize]) -> Self {
        self.recommended_image_counts = counts;
        self
    }

    pub const fn composer(&self) -> Composer {
        self.composer
    }

    /// Registry id, the same as [`Composer::id`].
    pub const fn id(&self) -> &'static str {
        self.composer.id()
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Human-readable hint for the accepted image counts.
    pub const fn image_count_human(&self) -> Option<&'static str> {
        self.image_count_human
    }

    pub const fn recommended_image_counts(&self) -> &'static [usize] {
        self.recommended_image_counts
    }

    /// Whether the composer accepts `count` images.
    pub fn accepts_image_count(&self, count: usize) -> bool {
        self.check_image_count.is_none_or(|check| check(count))
    }

    /// A suitable number of images to use when `available` are at hand.
    ///
    /// Never exceeds `available`. Zero means the composer cannot be used.
    ///
    /// 1. The largest recommended count `≤ available`.
    /// 2. Otherwise `available` itself when there is no count check.
    /// 3. Otherwise the largest count `≤ available` the check accepts.
    pub fn recommend_image_count(&self, available: usize) -> usize {
        let best = self
            .recommended_image_counts
            .iter()
            .copied()
            .filter(|&c| c > 0 && c <= available)
            .max();
        if let Some(best) = best {
            return best;
        }

        match self.check_image_count {
            None => available,
            Some(check) => (1..=available).rev().find(|&c| check(c)).unwrap_or(0),
        }
    }

    /// Draw `images` with the wrapped composer.
    pub fn compose<C: Canvas + Send>(
        &self,
        canvas: &mut C,
        images: &[RgbaImage],
    ) -> Result<(), ComposeError> {
        self.composer.compose(canvas, images)
    }
}
