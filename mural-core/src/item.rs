//! Canvas items - the placed building blocks of a board.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::render::Renderable;

/// Unique identifier for a canvas item.
///
/// Ids are human-readable `"{kind}-{n}"` strings. The store assigns `n` as
/// the smallest positive integer not already in use for that kind, so a
/// deleted `note-1` is reassigned before `note-2` is ever minted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Build the id for the `n`-th item of a kind.
    #[must_use]
    pub fn new(kind: ItemKind, n: usize) -> Self {
        Self(format!("{}-{n}", kind.label()))
    }

    /// Wrap an existing id string (e.g. read back from a saved canvas).
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The family of content an item carries.
///
/// The kind discriminates which renderer and which (de)serializer apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// An embedded external website.
    Url,
    /// A data chart.
    Chart,
    /// A sticky note.
    Note,
    /// A legacy config component (opaque passthrough).
    Component,
    /// A registry-backed universal component.
    Universal,
}

impl ItemKind {
    /// Stable lowercase label, used for id prefixes and config grouping.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Chart => "chart",
            Self::Note => "note",
            Self::Component => "component",
            Self::Universal => "universal",
        }
    }
}

/// Chart flavors supported by the built-in chart renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Vertical bar chart.
    Bar,
    /// Line chart with point markers.
    Line,
    /// Pie chart.
    Pie,
    /// Donut chart (pie with a hole).
    Donut,
    /// Grid of labelled metric tiles.
    Metrics,
    /// Single KPI tile.
    Kpi,
}

impl ChartType {
    /// Stable lowercase label matching the config document vocabulary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Metrics => "metrics",
            Self::Kpi => "kpi",
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "pie" => Ok(Self::Pie),
            "donut" => Ok(Self::Donut),
            "metrics" => Ok(Self::Metrics),
            "kpi" => Ok(Self::Kpi),
            _ => Err(format!("Unknown chart type: {s}")),
        }
    }
}

/// Sticky-note color swatches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    /// Classic yellow sticky.
    #[default]
    Yellow,
    /// Blue sticky.
    Blue,
    /// Green sticky.
    Green,
    /// Pink sticky.
    Pink,
    /// Purple sticky.
    Purple,
}

/// Top-left anchored position and size in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// X position (pixels from the left edge of the canvas).
    pub x: f32,
    /// Y position (pixels from the top edge of the canvas).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Geometry {
    /// Construct a geometry rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Covered area in square pixels.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check if a point (in canvas coordinates) falls inside this rectangle.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(0.0, 0.0, 300.0, 200.0)
    }
}

/// Kind-specific content of an item.
///
/// Modelled as a tagged union rather than an open dictionary so that layout
/// and persistence code never need runtime type assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemPayload {
    /// An embedded external website.
    Url {
        /// Page address.
        url: String,
        /// Display title.
        title: String,
    },

    /// A data chart.
    Chart {
        /// Chart flavor.
        chart_type: ChartType,
        /// Display title.
        title: String,
        /// Series data as JSON (`values`/`labels` or `metrics`).
        data: serde_json::Value,
    },

    /// A sticky note.
    Note {
        /// Display title.
        title: String,
        /// Body text.
        content: String,
        /// Swatch color.
        color: NoteColor,
    },

    /// A legacy config component, carried through save/export opaquely.
    Component {
        /// Declared component type.
        type_name: String,
        /// Opaque prop bag.
        props: serde_json::Map<String, serde_json::Value>,
    },

    /// A registry-backed universal component.
    Universal {
        /// Registry type name.
        type_name: String,
        /// Prop bag consumed by the registered renderer.
        props: serde_json::Map<String, serde_json::Value>,
    },
}

impl ItemPayload {
    /// The kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Url { .. } => ItemKind::Url,
            Self::Chart { .. } => ItemKind::Chart,
            Self::Note { .. } => ItemKind::Note,
            Self::Component { .. } => ItemKind::Component,
            Self::Universal { .. } => ItemKind::Universal,
        }
    }

    /// Display title, where the payload carries one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Url { title, .. } | Self::Chart { title, .. } | Self::Note { title, .. } => {
                Some(title)
            }
            Self::Component { .. } | Self::Universal { .. } => None,
        }
    }
}

/// One placed element on the canvas.
///
/// `renderable` is a derived presentation handle: it is rebuilt from the
/// payload and geometry whenever either changes in a way that affects
/// appearance, and it is never serialized, snapshotted, or compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasItem {
    /// Unique identifier, stable for the item's lifetime.
    pub id: ItemId,
    /// Kind-specific content.
    pub payload: ItemPayload,
    /// Position and size.
    pub geometry: Geometry,
    /// Derived presentation handle (never persisted).
    #[serde(skip)]
    pub renderable: Option<Renderable>,
}

impl CanvasItem {
    /// Create an item without a renderable; the store builds one on insert.
    #[must_use]
    pub fn new(id: ItemId, payload: ItemPayload, geometry: Geometry) -> Self {
        Self {
            id,
            payload,
            geometry,
            renderable: None,
        }
    }

    /// The item's kind.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    /// Check if a point (in canvas coordinates) is within this item.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.geometry.contains_point(x, y)
    }

    /// Clone with the renderable handle dropped (for snapshots and saves).
    #[must_use]
    pub fn stripped(&self) -> Self {
        Self {
            id: self.id.clone(),
            payload: self.payload.clone(),
            geometry: self.geometry,
            renderable: None,
        }
    }
}

impl PartialEq for CanvasItem {
    /// Equality ignores the derived `renderable` handle.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.payload == other.payload && self.geometry == other.geometry
    }
}
