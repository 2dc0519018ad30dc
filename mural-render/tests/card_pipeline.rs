//! Integration test: the full controller + card renderer pipeline.

use mural_core::{
    CanvasController, CanvasStorage, ChartType, Command, ComponentRegistry, Geometry, ItemPayload,
    Notification, Props, RenderNode, Viewport,
};
use mural_render::{register_builtins, CardRenderer};
use serde_json::json;

fn controller() -> CanvasController {
    let mut registry = ComponentRegistry::new();
    register_builtins(&mut registry);
    CanvasController::new(registry, Box::new(CardRenderer::new()), Viewport::default())
}

#[test]
fn universal_items_render_through_the_registry() {
    let mut c = controller();
    let id = c
        .add_item(
            ItemPayload::Universal {
                type_name: "weather".to_string(),
                props: Props::new(),
            },
            None,
        )
        .expect("added");

    let item = c.store().get(&id).expect("item");
    // Registry default dimensions applied.
    assert!((item.geometry.width - 280.0).abs() < f32::EPSILON);
    assert!(matches!(
        item.renderable.as_ref().expect("renderable").root,
        RenderNode::Frame { .. }
    ));
}

#[test]
fn chart_renderable_tracks_its_data_on_resize() {
    let mut c = controller();
    let id = c
        .add_item(
            ItemPayload::Chart {
                chart_type: ChartType::Pie,
                title: "Share".to_string(),
                data: json!({"values": [30, 25, 20, 15, 10]}),
            },
            Some(Geometry::new(100.0, 100.0, 350.0, 300.0)),
        )
        .expect("added");

    assert!(c.begin_resize(&id, 450.0, 400.0));
    c.pointer_move(500.0, 450.0);
    c.end_gesture();

    let item = c.store().get(&id).expect("item");
    assert!((item.geometry.width - 400.0).abs() < f32::EPSILON);

    // Five values, five slices, still consistent after the rebuild.
    let RenderNode::Frame { children, .. } = &item.renderable.as_ref().expect("renderable").root
    else {
        panic!("expected card frame");
    };
    let RenderNode::Frame { children: slices, .. } = &children[1] else {
        panic!("expected plot frame");
    };
    assert_eq!(slices.len(), 5);
}

#[test]
fn saved_canvas_rebuilds_renderables_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = CanvasStorage::new(dir.path()).expect("storage");
    let mut c = controller().with_storage(storage);

    c.add_item(
        ItemPayload::Universal {
            type_name: "todo-list".to_string(),
            props: serde_json::json!({"title": "Sprint", "items": [{"text": "ship", "completed": false}]})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        },
        None,
    )
    .expect("added");
    c.add_item(
        ItemPayload::Url {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
        },
        None,
    )
    .expect("added");

    assert_eq!(c.dispatch(Command::Save), Some(Notification::Saved));
    c.clear();
    assert_eq!(c.dispatch(Command::Load), Some(Notification::Loaded));

    assert_eq!(c.items().len(), 2);
    for item in c.items() {
        assert!(
            item.renderable.is_some(),
            "renderable rebuilt for {}",
            item.id
        );
    }
}
