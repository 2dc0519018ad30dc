//! Presentation modes for the canvas session.

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// The active presentation mode.
///
/// A single enum rather than independent flags, so turnstile and carousel
/// are mutually exclusive by construction: enabling one replaces the other,
/// and entering either starts with a reset focus/index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ViewMode {
    /// Free placement: items sit at their stored geometry and can be
    /// dragged, resized, and deleted.
    #[default]
    Free,

    /// Circular focus-one-at-a-time presentation.
    Turnstile {
        /// The item currently pulled to the center, if any.
        focused: Option<ItemId>,
    },

    /// Linear one-at-a-time slideshow.
    Carousel {
        /// Index of the current slide.
        index: usize,
    },
}

impl ViewMode {
    /// Whether items can be dragged, resized, and deleted right now.
    #[must_use]
    pub fn allows_editing(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Whether turnstile mode is active.
    #[must_use]
    pub fn is_turnstile(&self) -> bool {
        matches!(self, Self::Turnstile { .. })
    }

    /// Whether carousel mode is active.
    #[must_use]
    pub fn is_carousel(&self) -> bool {
        matches!(self, Self::Carousel { .. })
    }
}

/// Carousel slide transition styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Horizontal slide.
    #[default]
    Slide,
    /// Cross-fade.
    Fade,
    /// Zoom in/out.
    Scale,
}

/// Session-level carousel presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSettings {
    /// Whether slides advance automatically.
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub interval_ms: u64,
    /// Whether the thumbnail strip is shown.
    pub thumbnails: bool,
    /// Slide transition style.
    pub transition: Transition,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            autoplay: false,
            interval_ms: 3000,
            thumbnails: true,
            transition: Transition::Slide,
        }
    }
}
