//! Configuration and lifecycle of the carousel widget.
//!
//! The pipeline only produces an item count and breakpoint table, serialized
//! onto the shelf container for whatever widget the hosting site attaches.

use std::collections::BTreeMap;

use serde::Serialize;

/// Minimum viewport width (px) at which a breakpoint applies.
pub const BREAKPOINTS: [(u32, usize); 3] = [(0, 1), (640, 2), (1024, 3)];

/// Gap between slides in pixels.
const SPACE_BETWEEN_PX: u32 = 24;

/// Per-breakpoint widget options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointOptions {
    /// Cards visible at once.
    pub slides_per_view: usize,
}

/// Options passed to the carousel on initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Number of cards in the shelf.
    pub item_count: usize,
    /// Gap between cards in pixels.
    pub space_between: u32,
    /// Whether pagination and navigation controls are shown.
    pub navigation: bool,
    /// Options keyed by minimum viewport width.
    pub breakpoints: BTreeMap<u32, BreakpointOptions>,
}

impl CarouselConfig {
    /// Builds the configuration for `item_count` cards.
    ///
    /// Slides per view never exceed the item count so a short shelf does not
    /// leave empty slots.
    #[must_use]
    pub fn for_items(item_count: usize) -> Self {
        let breakpoints = BREAKPOINTS
            .iter()
            .map(|&(width, per_view)| {
                (
                    width,
                    BreakpointOptions {
                        slides_per_view: per_view.min(item_count.max(1)),
                    },
                )
            })
            .collect();

        Self {
            item_count,
            space_between: SPACE_BETWEEN_PX,
            navigation: item_count > 1,
            breakpoints,
        }
    }

    /// JSON form placed on the container's `data-carousel` attribute.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Serializing plain integer/bool maps cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A mounted carousel. Each render destroys the previous instance and
/// mounts a new one with a fresh generation number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselInstance {
    /// Monotonic mount counter.
    pub generation: u64,
    /// Options the instance was created with.
    pub config: CarouselConfig,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_caps_slides_to_item_count() {
        let config = CarouselConfig::for_items(2);
        let per_view: Vec<usize> = config
            .breakpoints
            .values()
            .map(|b| b.slides_per_view)
            .collect();
        assert_eq!(per_view, vec![1, 2, 2]);
        assert!(config.navigation);
    }

    #[test]
    fn test_config_for_empty_shelf() {
        let config = CarouselConfig::for_items(0);
        assert_eq!(config.item_count, 0);
        assert!(!config.navigation);
        assert!(config.breakpoints.values().all(|b| b.slides_per_view == 1));
    }

    #[test]
    fn test_config_json_uses_widget_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&CarouselConfig::for_items(5).to_json()).unwrap();
        assert_eq!(json["itemCount"], 5);
        assert_eq!(json["spaceBetween"], 24);
        assert_eq!(json["breakpoints"]["1024"]["slidesPerView"], 3);
        assert_eq!(json["breakpoints"]["640"]["slidesPerView"], 2);
    }
}
