//! Serialized document shapes: the import/export config and the saved canvas.
//!
//! Both formats are tolerant on read: optional fields default rather than
//! failing, so documents written by other versions still load best-effort.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CanvasResult;
use crate::item::{CanvasItem, ChartType, NoteColor};
use crate::registry::Props;

/// Schema version tagged onto saved canvases.
pub const SCHEMA_VERSION: &str = "2.0";

/// Fixed key the saved canvas is stored under.
pub const STORAGE_KEY: &str = "canvas-layout";

/// One website entry in a config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Page address.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Width in pixels (kind default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height in pixels (kind default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// X position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// One chart entry in a config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart flavor.
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    /// Display title.
    pub title: String,
    /// Series data (`values`/`labels` or `metrics`).
    pub data: serde_json::Value,
    /// Width in pixels (kind default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height in pixels (kind default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// X position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// One note entry in a config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteConfig {
    /// Display title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Swatch color (yellow when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    /// Width in pixels (kind default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height in pixels (kind default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// X position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// One legacy component entry in a config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Declared component type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Opaque prop bag.
    #[serde(default)]
    pub props: Props,
    /// Width in pixels (default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height in pixels (default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// X position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// One universal-component instance in a config document.
///
/// The registry type name is the key of the enclosing map, so instances
/// only carry props and geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversalInstance {
    /// Serialized prop bag.
    #[serde(default)]
    pub props: Props,
    /// Width in pixels (registry default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height in pixels (registry default when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// X position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position (randomized when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// The import/export config document, grouped by item kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Website entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<UrlConfig>,
    /// Chart entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartConfig>,
    /// Note entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<NoteConfig>,
    /// Legacy component entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentConfig>,
    /// Universal-component instances, keyed by registry type name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub universal: BTreeMap<String, Vec<UniversalInstance>>,
}

impl CanvasConfig {
    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a config document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or does not match the schema.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the document describes no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
            && self.charts.is_empty()
            && self.notes.is_empty()
            && self.components.is_empty()
            && self.universal.values().all(Vec::is_empty)
    }
}

/// The saved-canvas record written to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCanvas {
    /// All items, renderables stripped, universal props serialized.
    pub items: Vec<CanvasItem>,
    /// Save time, epoch milliseconds.
    #[serde(default)]
    pub timestamp: u64,
    /// Schema version the record was written with.
    #[serde(default)]
    pub version: String,
}
