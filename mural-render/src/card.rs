//! The full card renderer behind the core's renderer seam.

use mural_core::{
    ComponentRegistry, FrameDirection, Geometry, ItemPayload, RenderFactory, RenderNode,
    Renderable,
};

use crate::{chart, note, website};

/// Renders every built-in item kind and dispatches universal payloads
/// through the component registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRenderer;

impl CardRenderer {
    /// Create a card renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderFactory for CardRenderer {
    fn build(
        &self,
        registry: &ComponentRegistry,
        payload: &ItemPayload,
        geometry: Geometry,
    ) -> Renderable {
        match payload {
            ItemPayload::Url { url, title } => website::website_card(url, title),
            ItemPayload::Chart {
                chart_type,
                title,
                data,
            } => Renderable::new(chart::chart_card(*chart_type, title, data)),
            ItemPayload::Note {
                title,
                content,
                color,
            } => note::note_card(title, content, *color),
            ItemPayload::Component { type_name, .. } => Renderable::new(RenderNode::Frame {
                direction: FrameDirection::Vertical,
                children: vec![RenderNode::Text {
                    content: format!("Legacy component: {type_name}"),
                    style: None,
                }],
                style: None,
            }),
            ItemPayload::Universal { type_name, props } => registry
                .create_component(type_name, props, geometry)
                .unwrap_or_else(|| {
                    tracing::warn!("No renderable for universal component {type_name:?}");
                    Renderable::error_placeholder(type_name, "component type not registered")
                }),
        }
    }
}
