//! Persistence adapter: config import/export and the saved-canvas store.
//!
//! The adapter reads and writes item-store state on demand; it never
//! mutates live item geometry except on load, and a failed load leaves the
//! store untouched. All operations are synchronous fail-or-succeed.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use thiserror::Error;

use crate::item::{CanvasItem, Geometry, ItemId, ItemKind, ItemPayload};
use crate::registry::ComponentRegistry;
use crate::schema::{
    CanvasConfig, ChartConfig, ComponentConfig, NoteConfig, SavedCanvas, UniversalInstance,
    UrlConfig, SCHEMA_VERSION, STORAGE_KEY,
};

/// Default size for websites coming from a config document.
const CONFIG_URL_SIZE: (f32, f32) = (400.0, 300.0);
/// Default size for charts coming from a config document.
const CONFIG_CHART_SIZE: (f32, f32) = (350.0, 250.0);
/// Default size for notes coming from a config document.
const CONFIG_NOTE_SIZE: (f32, f32) = (300.0, 200.0);
/// Default size for legacy components coming from a config document.
const CONFIG_COMPONENT_SIZE: (f32, f32) = (300.0, 200.0);

/// Range entries without coordinates are scattered over.
const RANDOM_POSITION_RANGE: std::ops::Range<f32> = 100.0..400.0;

/// Errors from persistence operations.
///
/// These stay inside the adapter; the controller converts them into
/// user-visible [`Notification`]s rather than letting them escape.
#[derive(Debug, Error)]
pub enum PersistError {
    /// No saved canvas exists under the storage key.
    #[error("no saved canvas found")]
    NoSavedCanvas,
    /// Reading or writing the backing file failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    /// The saved payload or config document did not parse.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// User-visible outcome of a save/load/export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The canvas was saved.
    Saved,
    /// The canvas was loaded.
    Loaded,
    /// A config document was produced.
    Exported,
    /// Saving failed.
    SaveFailed(String),
    /// Loading failed.
    LoadFailed(String),
    /// There was nothing to load.
    NoSavedCanvas,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved => write!(f, "Canvas saved successfully!"),
            Self::Loaded => write!(f, "Canvas loaded successfully!"),
            Self::Exported => write!(f, "Canvas configuration exported!"),
            Self::SaveFailed(reason) => write!(f, "Error saving canvas: {reason}"),
            Self::LoadFailed(reason) => write!(f, "Error loading canvas: {reason}"),
            Self::NoSavedCanvas => write!(f, "No saved canvas found!"),
        }
    }
}

/// Group the item collection into a config document.
///
/// Universal props go through the registry's serializer; geometry is
/// written out verbatim so a re-import reproduces the layout.
#[must_use]
pub fn export_config(registry: &ComponentRegistry, items: &[CanvasItem]) -> CanvasConfig {
    let mut config = CanvasConfig::default();

    for item in items {
        let g = item.geometry;
        match &item.payload {
            ItemPayload::Url { url, title } => config.urls.push(UrlConfig {
                url: url.clone(),
                title: title.clone(),
                width: Some(g.width),
                height: Some(g.height),
                x: Some(g.x),
                y: Some(g.y),
            }),
            ItemPayload::Chart {
                chart_type,
                title,
                data,
            } => config.charts.push(ChartConfig {
                chart_type: *chart_type,
                title: title.clone(),
                data: data.clone(),
                width: Some(g.width),
                height: Some(g.height),
                x: Some(g.x),
                y: Some(g.y),
            }),
            ItemPayload::Note {
                title,
                content,
                color,
            } => config.notes.push(NoteConfig {
                title: title.clone(),
                content: content.clone(),
                color: Some(*color),
                width: Some(g.width),
                height: Some(g.height),
                x: Some(g.x),
                y: Some(g.y),
            }),
            ItemPayload::Component { type_name, props } => {
                config.components.push(ComponentConfig {
                    type_name: type_name.clone(),
                    props: props.clone(),
                    width: Some(g.width),
                    height: Some(g.height),
                    x: Some(g.x),
                    y: Some(g.y),
                });
            }
            ItemPayload::Universal { type_name, props } => {
                config
                    .universal
                    .entry(type_name.clone())
                    .or_default()
                    .push(UniversalInstance {
                        props: registry.serialize_props(type_name, props),
                        width: Some(g.width),
                        height: Some(g.height),
                        x: Some(g.x),
                        y: Some(g.y),
                    });
            }
        }
    }

    config
}

/// Materialize a config document into canvas items.
///
/// Entries without coordinates are scattered pseudo-randomly over a fixed
/// default range; missing sizes fall back to kind defaults (or the
/// registry's dimensions for universal instances). Universal entries whose
/// type is not registered are skipped with a warning. Renderables are left
/// unbuilt - the store rebuilds them when it takes the items.
#[must_use]
pub fn items_from_config(config: &CanvasConfig, registry: &ComponentRegistry) -> Vec<CanvasItem> {
    let mut builder = ItemBuilder::default();

    for entry in &config.urls {
        builder.push(
            ItemPayload::Url {
                url: entry.url.clone(),
                title: entry.title.clone(),
            },
            entry.x,
            entry.y,
            entry.width,
            entry.height,
            CONFIG_URL_SIZE,
        );
    }

    for entry in &config.charts {
        builder.push(
            ItemPayload::Chart {
                chart_type: entry.chart_type,
                title: entry.title.clone(),
                data: entry.data.clone(),
            },
            entry.x,
            entry.y,
            entry.width,
            entry.height,
            CONFIG_CHART_SIZE,
        );
    }

    for entry in &config.notes {
        builder.push(
            ItemPayload::Note {
                title: entry.title.clone(),
                content: entry.content.clone(),
                color: entry.color.unwrap_or_default(),
            },
            entry.x,
            entry.y,
            entry.width,
            entry.height,
            CONFIG_NOTE_SIZE,
        );
    }

    for entry in &config.components {
        builder.push(
            ItemPayload::Component {
                type_name: entry.type_name.clone(),
                props: entry.props.clone(),
            },
            entry.x,
            entry.y,
            entry.width,
            entry.height,
            CONFIG_COMPONENT_SIZE,
        );
    }

    for (type_name, instances) in &config.universal {
        if !registry.has(type_name) {
            tracing::warn!("Skipping unregistered universal component type {type_name:?}");
            continue;
        }
        let dims = registry.dimensions_for(type_name).unwrap_or_default();
        for instance in instances {
            builder.push(
                ItemPayload::Universal {
                    type_name: type_name.clone(),
                    props: registry.deserialize_props(type_name, instance.props.clone()),
                },
                instance.x,
                instance.y,
                instance.width,
                instance.height,
                (dims.width, dims.height),
            );
        }
    }

    builder.items
}

/// Builds config items with per-kind id counters and default placement.
#[derive(Default)]
struct ItemBuilder {
    items: Vec<CanvasItem>,
    counters: std::collections::HashMap<ItemKind, usize>,
}

impl ItemBuilder {
    fn push(
        &mut self,
        payload: ItemPayload,
        x: Option<f32>,
        y: Option<f32>,
        width: Option<f32>,
        height: Option<f32>,
        default_size: (f32, f32),
    ) {
        let kind = payload.kind();
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        let id = ItemId::new(kind, *counter);

        let mut rng = rand::rng();
        let geometry = Geometry::new(
            x.unwrap_or_else(|| rng.random_range(RANDOM_POSITION_RANGE)),
            y.unwrap_or_else(|| rng.random_range(RANDOM_POSITION_RANGE)),
            width.unwrap_or(default_size.0),
            height.unwrap_or(default_size.1),
        );

        self.items.push(CanvasItem::new(id, payload, geometry));
    }
}

/// Saved-canvas storage under a fixed key in a data directory.
///
/// One JSON file, `canvas-layout.json`, in the embedder-chosen directory.
#[derive(Debug, Clone)]
pub struct CanvasStorage {
    data_dir: PathBuf,
}

impl CanvasStorage {
    /// Create a storage rooted at `data_dir`, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Path of the saved-canvas file.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(format!("{STORAGE_KEY}.json"))
    }

    /// Whether a saved canvas exists.
    #[must_use]
    pub fn has_saved(&self) -> bool {
        self.record_path().exists()
    }

    /// Save the item collection under the fixed key.
    ///
    /// Renderables are stripped and universal props run through the
    /// registry's serializer; the record is tagged with the current schema
    /// version and a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] or [`PersistError::Serialization`] on
    /// failure. In-memory state is never touched by a save.
    pub fn save(
        &self,
        registry: &ComponentRegistry,
        items: &[CanvasItem],
    ) -> Result<(), PersistError> {
        let items = items
            .iter()
            .map(|item| {
                let mut stripped = item.stripped();
                if let ItemPayload::Universal { type_name, props } = &mut stripped.payload {
                    *props = registry.serialize_props(type_name, props);
                }
                stripped
            })
            .collect();

        let record = SavedCanvas {
            items,
            timestamp: current_timestamp_ms(),
            version: SCHEMA_VERSION.to_string(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(self.record_path(), json)?;
        Ok(())
    }

    /// Load the saved canvas record.
    ///
    /// A record written by a different schema version is accepted
    /// best-effort (missing fields default) with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::NoSavedCanvas`] if nothing was saved, or a
    /// parse/IO error for a corrupt record.
    pub fn load(&self) -> Result<SavedCanvas, PersistError> {
        let path = self.record_path();
        if !path.exists() {
            return Err(PersistError::NoSavedCanvas);
        }
        let contents = std::fs::read_to_string(&path)?;
        let record: SavedCanvas = serde_json::from_str(&contents)?;
        if record.version != SCHEMA_VERSION {
            tracing::warn!(
                "Saved canvas has schema version {:?} (current {SCHEMA_VERSION:?}); loading best-effort",
                record.version
            );
        }
        Ok(record)
    }

    /// Remove the saved canvas, if any.
    pub fn delete_saved(&self) {
        let path = self.record_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete saved canvas {}: {e}", path.display());
            }
        }
    }

    /// The directory this storage writes into.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        // Will not exceed u64 for millennia
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ChartType, NoteColor};
    use crate::registry::{ComponentEntry, Props};
    use crate::render::{Renderable, RenderNode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry_with(type_name: &str) -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register(
            type_name,
            ComponentEntry::new(Box::new(|_, _| {
                Ok(Renderable::new(RenderNode::Text {
                    content: String::new(),
                    style: None,
                }))
            }))
            .with_dimensions(280.0, 200.0),
        );
        registry
    }

    fn sample_items() -> Vec<CanvasItem> {
        vec![
            CanvasItem::new(
                ItemId::new(ItemKind::Note, 1),
                ItemPayload::Note {
                    title: "Reminder".to_string(),
                    content: "ship it".to_string(),
                    color: NoteColor::Pink,
                },
                Geometry::new(100.0, 100.0, 300.0, 200.0),
            ),
            CanvasItem::new(
                ItemId::new(ItemKind::Chart, 1),
                ItemPayload::Chart {
                    chart_type: ChartType::Bar,
                    title: "Sales".to_string(),
                    data: json!({"values": [1, 2, 3], "labels": ["a", "b", "c"]}),
                },
                Geometry::new(500.0, 100.0, 400.0, 300.0),
            ),
        ]
    }

    #[test]
    fn export_groups_by_kind() {
        let registry = ComponentRegistry::new();
        let config = export_config(&registry, &sample_items());
        assert_eq!(config.notes.len(), 1);
        assert_eq!(config.charts.len(), 1);
        assert!(config.urls.is_empty());
        assert_eq!(config.notes[0].color, Some(NoteColor::Pink));
        assert_eq!(config.charts[0].x, Some(500.0));
    }

    #[test]
    fn config_round_trip_preserves_items() {
        let registry = ComponentRegistry::new();
        let items = sample_items();
        let config = export_config(&registry, &items);
        let restored = items_from_config(&config, &registry);

        assert_eq!(restored.len(), items.len());
        // Import walks the grouped document, so match sources by kind.
        for source in &items {
            let twin = restored
                .iter()
                .find(|item| item.kind() == source.kind())
                .expect("kind survived the round trip");
            assert_eq!(twin.payload, source.payload);
            assert_eq!(twin.geometry, source.geometry);
        }
    }

    #[test]
    fn import_randomizes_missing_positions() {
        let registry = ComponentRegistry::new();
        let config = CanvasConfig::from_json(
            r#"{ "notes": [{ "title": "A", "content": "" }, { "title": "B", "content": "" }] }"#,
        )
        .expect("parse");

        let items = items_from_config(&config, &registry);
        assert_eq!(items.len(), 2);
        for item in &items {
            assert!(item.geometry.x >= 100.0 && item.geometry.x < 400.0);
            assert!(item.geometry.y >= 100.0 && item.geometry.y < 400.0);
            assert!((item.geometry.width - 300.0).abs() < f32::EPSILON);
            assert!((item.geometry.height - 200.0).abs() < f32::EPSILON);
        }
        assert_eq!(items[0].id.as_str(), "note-1");
        assert_eq!(items[1].id.as_str(), "note-2");
    }

    #[test]
    fn import_skips_unregistered_universal_types() {
        let registry = registry_with("weather");
        let mut config = CanvasConfig::default();
        config
            .universal
            .insert("weather".to_string(), vec![UniversalInstance::default()]);
        config
            .universal
            .insert("ghost".to_string(), vec![UniversalInstance::default()]);

        let items = items_from_config(&config, &registry);
        assert_eq!(items.len(), 1);
        assert!(matches!(
            &items[0].payload,
            ItemPayload::Universal { type_name, .. } if type_name == "weather"
        ));
        // Registry default dimensions apply.
        assert!((items[0].geometry.width - 280.0).abs() < f32::EPSILON);
    }

    #[test]
    fn storage_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = CanvasStorage::new(dir.path()).expect("storage");
        let registry = ComponentRegistry::new();

        storage.save(&registry, &sample_items()).expect("save");
        assert!(storage.has_saved());

        let record = storage.load().expect("load");
        assert_eq!(record.version, SCHEMA_VERSION);
        assert!(record.timestamp > 0);
        assert_eq!(record.items, sample_items());
        assert!(record.items.iter().all(|item| item.renderable.is_none()));
    }

    #[test]
    fn load_without_record_reports_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = CanvasStorage::new(dir.path()).expect("storage");
        assert!(matches!(storage.load(), Err(PersistError::NoSavedCanvas)));
    }

    #[test]
    fn load_tolerates_other_versions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = CanvasStorage::new(dir.path()).expect("storage");
        std::fs::write(
            storage.record_path(),
            r#"{ "items": [], "version": "1.0" }"#,
        )
        .expect("write");

        let record = storage.load().expect("best-effort load");
        assert_eq!(record.version, "1.0");
        assert!(record.items.is_empty());
    }

    #[test]
    fn corrupt_record_fails_to_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = CanvasStorage::new(dir.path()).expect("storage");
        std::fs::write(storage.record_path(), "{ not json").expect("write");
        assert!(matches!(
            storage.load(),
            Err(PersistError::Serialization(_))
        ));
    }

    #[test]
    fn save_serializes_universal_props() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = CanvasStorage::new(dir.path()).expect("storage");

        let mut registry = ComponentRegistry::new();
        registry.register(
            "todo-list",
            ComponentEntry::new(Box::new(|_, _| {
                Ok(Renderable::new(RenderNode::Text {
                    content: String::new(),
                    style: None,
                }))
            }))
            .with_serialize(Box::new(|props| {
                let mut out = props.clone();
                out.remove("transient");
                out
            })),
        );

        let mut props = Props::new();
        props.insert("title".to_string(), json!("Tasks"));
        props.insert("transient".to_string(), json!(true));
        let items = vec![CanvasItem::new(
            ItemId::new(ItemKind::Universal, 1),
            ItemPayload::Universal {
                type_name: "todo-list".to_string(),
                props,
            },
            Geometry::default(),
        )];

        storage.save(&registry, &items).expect("save");
        let record = storage.load().expect("load");
        match &record.items[0].payload {
            ItemPayload::Universal { props, .. } => {
                assert!(props.contains_key("title"));
                assert!(!props.contains_key("transient"));
            }
            other => panic!("expected universal payload, got {other:?}"),
        }
    }
}
