//! Component registry - the catalog of pluggable universal components.
//!
//! Maps a string type name to a renderer plus defaults and optional custom
//! (de)serialization and validation. The registry is constructor-injected
//! into every subsystem that needs it rather than living in ambient global
//! state, so tests can instantiate isolated registries per case.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::item::Geometry;
use crate::render::Renderable;

/// Prop bag passed to universal component renderers.
pub type Props = Map<String, Value>;

/// Fallible renderer for a universal component.
///
/// Failure is signalled through `Err`; `create_component` converts it into
/// an inline error placeholder instead of letting it cross the boundary.
pub type RendererFn = Box<dyn Fn(&Props, Geometry) -> Result<Renderable, String>>;

/// Prop validator; rejecting makes component creation yield nothing.
pub type ValidateFn = Box<dyn Fn(&Props) -> bool>;

/// Custom prop serializer for save/export.
pub type SerializeFn = Box<dyn Fn(&Props) -> Props>;

/// Custom prop deserializer for load/import.
pub type DeserializeFn = Box<dyn Fn(Props) -> Props>;

/// Default width/height for instances of a registered component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
        }
    }
}

/// One registered component type.
pub struct ComponentEntry {
    /// Renderer producing the component's node tree.
    pub renderer: RendererFn,
    /// Props merged under instance props at creation time.
    pub default_props: Props,
    /// Default instance dimensions.
    pub default_dimensions: Dimensions,
    /// Optional prop validator.
    pub validate: Option<ValidateFn>,
    /// Optional custom serializer.
    pub serialize: Option<SerializeFn>,
    /// Optional custom deserializer.
    pub deserialize: Option<DeserializeFn>,
    /// Human-readable name for palettes and docs.
    pub display_name: Option<String>,
    /// Short description for palettes and docs.
    pub description: Option<String>,
}

impl ComponentEntry {
    /// Entry with a renderer and defaults for everything else.
    #[must_use]
    pub fn new(renderer: RendererFn) -> Self {
        Self {
            renderer,
            default_props: Props::new(),
            default_dimensions: Dimensions::default(),
            validate: None,
            serialize: None,
            deserialize: None,
            display_name: None,
            description: None,
        }
    }

    /// Set default props.
    #[must_use]
    pub fn with_default_props(mut self, props: Props) -> Self {
        self.default_props = props;
        self
    }

    /// Set default dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.default_dimensions = Dimensions { width, height };
        self
    }

    /// Set a prop validator.
    #[must_use]
    pub fn with_validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Set a custom serializer.
    #[must_use]
    pub fn with_serialize(mut self, serialize: SerializeFn) -> Self {
        self.serialize = Some(serialize);
        self
    }

    /// Set a custom deserializer.
    #[must_use]
    pub fn with_deserialize(mut self, deserialize: DeserializeFn) -> Self {
        self.deserialize = Some(deserialize);
        self
    }

    /// Set display name and description.
    #[must_use]
    pub fn with_info(mut self, display_name: impl Into<String>, description: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self.description = Some(description.into());
        self
    }
}

impl std::fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("default_props", &self.default_props)
            .field("default_dimensions", &self.default_dimensions)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Catalog of universal component types.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: HashMap<String, ComponentEntry>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type, overwriting any existing entry.
    ///
    /// Re-registration is tolerated with a warning, not an error, so
    /// embedders can hot-swap component implementations.
    pub fn register(&mut self, type_name: impl Into<String>, entry: ComponentEntry) {
        let type_name = type_name.into();
        if self.entries.contains_key(&type_name) {
            tracing::warn!("Component type {type_name:?} is already registered. Overwriting.");
        }
        self.entries.insert(type_name, entry);
    }

    /// Look up an entry by type name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&ComponentEntry> {
        self.entries.get(type_name)
    }

    /// Check whether a type name is registered.
    #[must_use]
    pub fn has(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// All registered type names, sorted for stable iteration.
    #[must_use]
    pub fn registered_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Remove a type. Returns whether it existed.
    pub fn unregister(&mut self, type_name: &str) -> bool {
        self.entries.remove(type_name).is_some()
    }

    /// Remove every entry.
    pub fn clear_entries(&mut self) {
        self.entries.clear();
    }

    /// Default dimensions for a type, if registered.
    #[must_use]
    pub fn dimensions_for(&self, type_name: &str) -> Option<Dimensions> {
        self.entries.get(type_name).map(|e| e.default_dimensions)
    }

    /// Create a component's renderable.
    ///
    /// Returns `None` when the type is unknown or the props are rejected by
    /// the entry's validator (both logged). A renderer failure is caught
    /// here and replaced with a visible error placeholder so one broken
    /// item never takes down the caller.
    #[must_use]
    pub fn create_component(
        &self,
        type_name: &str,
        props: &Props,
        geometry: Geometry,
    ) -> Option<Renderable> {
        let Some(entry) = self.entries.get(type_name) else {
            tracing::error!("Component type {type_name:?} is not registered");
            return None;
        };

        if let Some(validate) = &entry.validate {
            if !validate(props) {
                tracing::error!("Invalid props for component type {type_name:?}");
                return None;
            }
        }

        // Merge instance props over the defaults; instance values win.
        let mut merged = entry.default_props.clone();
        for (key, value) in props {
            merged.insert(key.clone(), value.clone());
        }

        match (entry.renderer)(&merged, geometry) {
            Ok(renderable) => Some(renderable),
            Err(message) => {
                tracing::warn!("Error rendering component {type_name:?}: {message}");
                Some(Renderable::error_placeholder(type_name, &message))
            }
        }
    }

    /// Serialize a prop bag for save/export.
    ///
    /// Delegates to the entry's custom serializer when present; otherwise
    /// props pass through unchanged (prop bags are JSON maps, so every
    /// representable value is serializable by construction).
    #[must_use]
    pub fn serialize_props(&self, type_name: &str, props: &Props) -> Props {
        match self.entries.get(type_name).and_then(|e| e.serialize.as_ref()) {
            Some(serialize) => serialize(props),
            None => props.clone(),
        }
    }

    /// Deserialize a prop bag from a saved canvas or config document.
    ///
    /// Delegates to the entry's custom deserializer when present; the
    /// default is the identity function.
    #[must_use]
    pub fn deserialize_props(&self, type_name: &str, data: Props) -> Props {
        match self.entries.get(type_name).and_then(|e| e.deserialize.as_ref()) {
            Some(deserialize) => deserialize(data),
            None => data,
        }
    }
}
