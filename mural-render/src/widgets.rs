//! Built-in universal widgets: todo list, timer, sticky note, weather.
//!
//! These are regular registry entries, not special cases - embedders can
//! unregister or overwrite them like any dynamically registered component.

use mural_core::{
    ComponentEntry, ComponentRegistry, FrameDirection, NodeStyle, NoteColor, Props, RenderNode,
    Renderable,
};
use serde_json::{json, Value};

use crate::note;

/// Register every built-in widget type.
pub fn register_builtins(registry: &mut ComponentRegistry) {
    registry.register("todo-list", todo_list_entry());
    registry.register("timer", timer_entry());
    registry.register("note", note_entry());
    registry.register("weather", weather_entry());
}

fn todo_list_entry() -> ComponentEntry {
    ComponentEntry::new(Box::new(|props, _| {
        let title = string_prop(props, "title");
        let items: &[Value] = match props.get("items") {
            None => &[],
            Some(Value::Array(items)) => items,
            Some(other) => return Err(format!("todo items must be an array, got {other}")),
        };
        let max_items = props
            .get("maxItems")
            .and_then(Value::as_u64)
            .unwrap_or(u64::MAX);

        let mut children = vec![RenderNode::Text {
            content: title,
            style: None,
        }];
        #[allow(clippy::cast_possible_truncation)]
        children.extend(items.iter().take(max_items as usize).map(|item| {
            let done = item
                .get("completed")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let text = item.get("text").and_then(Value::as_str).unwrap_or_default();
            RenderNode::Text {
                content: format!("[{}] {text}", if done { "x" } else { " " }),
                style: None,
            }
        }));

        Ok(Renderable::new(RenderNode::Frame {
            direction: FrameDirection::Vertical,
            children,
            style: None,
        }))
    }))
    .with_info(
        "Todo List",
        "Interactive todo list with add/remove/complete functionality",
    )
    .with_dimensions(300.0, 400.0)
    .with_default_props(props(json!({
        "title": "My Tasks",
        "items": [],
        "maxItems": 10
    })))
    .with_validate(Box::new(|props| {
        matches!(props.get("title"), None | Some(Value::String(_)))
    }))
}

fn timer_entry() -> ComponentEntry {
    ComponentEntry::new(Box::new(|props, _| {
        let minutes = props
            .get("initialMinutes")
            .and_then(Value::as_u64)
            .unwrap_or(25);
        Ok(Renderable::new(RenderNode::Frame {
            direction: FrameDirection::Vertical,
            children: vec![
                RenderNode::Text {
                    content: string_prop(props, "title"),
                    style: None,
                },
                RenderNode::Text {
                    content: format!("{minutes:02}:00"),
                    style: None,
                },
            ],
            style: None,
        }))
    }))
    .with_info("Timer", "Countdown timer with start/stop/reset functionality")
    .with_dimensions(250.0, 300.0)
    .with_default_props(props(json!({
        "title": "Focus Timer",
        "initialMinutes": 25,
        "autoStart": false
    })))
}

fn note_entry() -> ComponentEntry {
    ComponentEntry::new(Box::new(|props, _| {
        let color = props
            .get("color")
            .cloned()
            .and_then(|v| serde_json::from_value::<NoteColor>(v).ok())
            .unwrap_or_default();
        Ok(note::note_card(
            &string_prop(props, "title"),
            &string_prop(props, "content"),
            color,
        ))
    }))
    .with_info("Sticky Note", "Editable sticky note with color options")
    .with_dimensions(300.0, 250.0)
    .with_default_props(props(json!({
        "title": "Quick Note",
        "content": "",
        "color": "yellow",
        "editable": true
    })))
}

fn weather_entry() -> ComponentEntry {
    ComponentEntry::new(Box::new(|props, _| {
        let temperature = props
            .get("temperature")
            .and_then(Value::as_f64)
            .ok_or_else(|| "weather requires a numeric temperature".to_string())?;
        let humidity = props.get("humidity").and_then(Value::as_f64).unwrap_or(0.0);

        Ok(Renderable::new(RenderNode::Frame {
            direction: FrameDirection::Vertical,
            children: vec![
                RenderNode::Text {
                    content: string_prop(props, "city"),
                    style: Some(NodeStyle::background("#e0f2fe")),
                },
                RenderNode::Text {
                    content: format!("{temperature:.0}\u{b0}"),
                    style: None,
                },
                RenderNode::Text {
                    content: string_prop(props, "condition"),
                    style: None,
                },
                RenderNode::Text {
                    content: format!("Humidity {humidity:.0}%"),
                    style: None,
                },
            ],
            style: None,
        }))
    }))
    .with_info(
        "Weather Widget",
        "Weather display widget with temperature and conditions",
    )
    .with_dimensions(280.0, 200.0)
    .with_default_props(props(json!({
        "city": "San Francisco",
        "temperature": 72,
        "condition": "Sunny",
        "humidity": 65
    })))
}

/// String prop, empty when absent or not a string.
fn string_prop(props: &Props, key: &str) -> String {
    props
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Shorthand: a JSON object literal as a prop bag.
fn props(value: Value) -> Props {
    value.as_object().cloned().unwrap_or_default()
}
