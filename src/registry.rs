//! Composer registry.
//!
//! An explicit, append-only table of [`ComposerInfo`]. Build it once (usually
//! with [`Registry::builtin`]) and share it by reference; lookups and
//! recommendations only need `&Registry`, so concurrent readers are fine.

use log::debug;

use crate::composer::{ComposeError, Composer, ComposerInfo};

/// Ids that ask [`Registry::select`] to pick a composer.
const AUTO_IDS: [&str; 2] = ["", "random"];

fn at_least_two(count: usize) -> bool {
    count >= 2
}

/// The built-in composers, in registration order.
pub const BUILTIN: [ComposerInfo; 5] = [
    ComposerInfo::new(Composer::CirclesPie, "Pie (Circle)")
        .with_description("Equal slices of a circle inscribed in the canvas.")
        .with_recommended_image_counts(&[3, 5]),
    ComposerInfo::new(Composer::TilesPerfect, "Perfect (Tile)")
        .with_description("A near-square grid of equally sized tiles.")
        .with_recommended_image_counts(&[4, 6, 9, 12, 16]),
    ComposerInfo::new(Composer::TilesFocused, "Focused (Tile)")
        .with_description("One large tile in the bottom left, the rest along the top and right edges.")
        .with_image_count_human("more than two, optimally more than three")
        .with_image_count_check(at_least_two)
        .with_recommended_image_counts(&[4, 5, 6, 7, 8, 9]),
    ComposerInfo::new(Composer::TilesDiamond, "Diamond (Tile)")
        .with_description("A central diamond surrounded by up to three rings of diamonds.")
        .with_recommended_image_counts(&[5, 9, 13]),
    ComposerInfo::new(Composer::StripesVertical, "Vertical (Stripes)")
        .with_description("Equal-width vertical stripes, each a window onto a full-canvas image.")
        .with_recommended_image_counts(&[3, 4, 5]),
];

/// A composer paired with the image count it should be given.
#[derive(Copy, Clone, Debug)]
pub struct Recommendation<'a> {
    pub info: &'a ComposerInfo,
    pub count: usize,
}

/// Registered composers, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    composers: Vec<ComposerInfo>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`BUILTIN`].
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for info in BUILTIN {
            registry.register(info);
        }
        registry
    }

    /// Append `info`. Ids are not deduplicated; lookups return the first.
    pub fn register(&mut self, info: ComposerInfo) {
        debug!(id = info.id(), name = info.name(); "Registering composer");
        self.composers.push(info);
    }

    pub fn composers(&self) -> &[ComposerInfo] {
        &self.composers
    }

    pub fn len(&self) -> usize {
        self.composers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ComposerInfo> {
        self.composers.iter().find(|info| info.id() == id)
    }

    /// Like [`get`](Self::get), failing with
    /// [`ComposeError::ComposerNotFound`].
    pub fn lookup(&self, id: &str) -> Result<&ComposerInfo, ComposeError> {
        self.get(id)
            .ok_or_else(|| ComposeError::ComposerNotFound(id.to_owned()))
    }

    /// Composers usable with `available` images, fewest images first.
    ///
    /// Composers whose recommended count is zero are left out. Ties keep
    /// registration order.
    pub fn recommend(&self, available: usize) -> Vec<Recommendation<'_>> {
        let mut recommended: Vec<Recommendation<'_>> = self
            .composers
            .iter()
            .map(|info| Recommendation {
                info,
                count: info.recommend_image_count(available),
            })
            .filter(|r| r.count > 0)
            .collect();
        recommended.sort_by_key(|r| r.count);
        debug!(available = available, usable = recommended.len(); "Recommended composers");
        recommended
    }

    /// Resolve `id` to a composer and image count for `available` images.
    ///
    /// An empty id or `"random"` picks the first entry of
    /// [`recommend`](Self::recommend).
    pub fn select(&self, id: &str, available: usize) -> Result<Recommendation<'_>, ComposeError> {
        let selected = if AUTO_IDS.contains(&id) {
            self.recommend(available)
                .into_iter()
                .next()
                .ok_or_else(|| ComposeError::ComposerNotFound(id.to_owned()))?
        } else {
            let info = self.lookup(id)?;
            Recommendation {
                info,
                count: info.recommend_image_count(available),
            }
        };
        debug!(id = selected.info.id(), count = selected.count; "Selected composer");
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(recommended: &[Recommendation<'_>]) -> Vec<&'static str> {
        recommended.iter().map(|r| r.info.id()).collect()
    }

    #[test]
    fn builtin_order_and_ids() {
        let registry = Registry::builtin();
        let ids: Vec<_> = registry.composers().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            [
                "circles-pie",
                "tiles-perfect",
                "tiles-focused",
                "tiles-diamond",
                "stripes-vertical"
            ]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn lookup_unknown_fails() {
        let registry = Registry::builtin();
        assert_eq!(registry.lookup("tiles-perfect").unwrap().name(), "Perfect (Tile)");
        assert_eq!(
            registry.lookup("hexagons").unwrap_err(),
            ComposeError::ComposerNotFound("hexagons".into())
        );
        assert!(Registry::new().get("circles-pie").is_none());
    }

    // ── recommend ───────────────────────────────────────────────────────

    #[test]
    fn recommend_sorts_by_count_stably() {
        let registry = Registry::builtin();
        let r = registry.recommend(4);
        // pie 3, stripes 4 ... ties keep registration order.
        let counts: Vec<_> = r.iter().map(|r| (r.info.id(), r.count)).collect();
        assert_eq!(
            counts,
            [
                ("circles-pie", 3),
                ("tiles-perfect", 4),
                ("tiles-focused", 4),
                ("tiles-diamond", 4),
                ("stripes-vertical", 4),
            ]
        );
    }

    #[test]
    fn recommend_drops_unusable() {
        let registry = Registry::builtin();
        // Focused needs two images.
        assert!(!ids(&registry.recommend(1)).contains(&"tiles-focused"));
        assert!(registry.recommend(0).is_empty());
    }

    #[test]
    fn recommend_many_images() {
        let registry = Registry::builtin();
        let r = registry.recommend(20);
        assert_eq!(
            ids(&r),
            [
                "circles-pie",
                "stripes-vertical",
                "tiles-focused",
                "tiles-diamond",
                "tiles-perfect"
            ]
        );
        assert_eq!(r.last().unwrap().count, 16);
    }

    // ── select ──────────────────────────────────────────────────────────

    #[test]
    fn select_by_id() {
        let registry = Registry::builtin();
        let s = registry.select("tiles-diamond", 10).unwrap();
        assert_eq!(s.info.id(), "tiles-diamond");
        assert_eq!(s.count, 9);
    }

    #[test]
    fn select_auto_picks_first_recommendation() {
        let registry = Registry::builtin();
        for id in ["", "random"] {
            let s = registry.select(id, 7).unwrap();
            assert_eq!(s.info.id(), "circles-pie");
            assert_eq!(s.count, 5);
        }
    }

    #[test]
    fn select_auto_with_no_candidates_fails() {
        assert!(matches!(
            Registry::builtin().select("random", 0),
            Err(ComposeError::ComposerNotFound(_))
        ));
    }
}
