//! Chart card factories.
//!
//! Pure functions turning `(chart type, title, data)` into renderable node
//! trees. Marks are normalized: bar fractions against the plot height,
//! polylines and slice paths in a 100x100 box. The host decides pixels.

use mural_core::{ChartType, FrameDirection, NodeStyle, RenderNode};
use serde_json::Value;

/// Series colors, cycled per slice/series.
pub const SERIES_COLORS: [&str; 6] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4",
];

/// Bar mark fill.
const BAR_FILL: &str = "#3b82f6";
/// Line stroke and marker fill.
const LINE_STROKE: &str = "#10b981";

/// Header tints per chart family.
const BAR_HEADER: &str = "#eff6ff";
const LINE_HEADER: &str = "#f0fdf4";
const PIE_HEADER: &str = "#faf5ff";
const METRICS_HEADER: &str = "#f0fdf4";

/// Fraction of the plot the tallest bar (or line peak) occupies.
const PLOT_FILL: f32 = 0.8;

/// Build the card for a chart item.
///
/// Unknown-to-this-renderer flavors (KPI) fall back to a plain captioned
/// card rather than failing.
#[must_use]
pub fn chart_card(chart_type: ChartType, title: &str, data: &Value) -> RenderNode {
    match chart_type {
        ChartType::Bar => bar_card(title, data),
        ChartType::Line => line_card(title, data),
        ChartType::Pie => arc_card(title, data, 40.0, None),
        ChartType::Donut => arc_card(title, data, 35.0, Some(20.0)),
        ChartType::Metrics => metrics_card(title, data),
        ChartType::Kpi => fallback_card(chart_type, title),
    }
}

fn bar_card(title: &str, data: &Value) -> RenderNode {
    let values = number_series(data, "values");
    let labels = label_series(data);
    let max = values.iter().copied().fold(0.0_f32, f32::max);

    let bars = values
        .iter()
        .enumerate()
        .map(|(i, value)| RenderNode::Bar {
            fraction: if max > 0.0 { value / max * PLOT_FILL } else { 0.0 },
            label: Some(
                labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| i.to_string()),
            ),
            fill: BAR_FILL.to_string(),
        })
        .collect();

    card(
        title,
        BAR_HEADER,
        RenderNode::Frame {
            direction: FrameDirection::Horizontal,
            children: bars,
            style: None,
        },
    )
}

fn line_card(title: &str, data: &Value) -> RenderNode {
    let values = number_series(data, "values");
    let max = values.iter().copied().fold(0.0_f32, f32::max);
    let span = values.len().saturating_sub(1).max(1);

    #[allow(clippy::cast_precision_loss)]
    let points: Vec<(f32, f32)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = i as f32 / span as f32 * 100.0;
            let y = if max > 0.0 {
                100.0 - value / max * PLOT_FILL * 100.0
            } else {
                100.0
            };
            (x, y)
        })
        .collect();

    let mut children = vec![RenderNode::Polyline {
        points: points.clone(),
        stroke: LINE_STROKE.to_string(),
    }];
    children.extend(points.into_iter().map(|(x, y)| RenderNode::Dot {
        x,
        y,
        fill: LINE_STROKE.to_string(),
    }));

    card(
        title,
        LINE_HEADER,
        RenderNode::Frame {
            direction: FrameDirection::Vertical,
            children,
            style: None,
        },
    )
}

/// Pie/donut card: one closed path per slice in a 100x100 viewbox.
fn arc_card(title: &str, data: &Value, radius: f32, inner_radius: Option<f32>) -> RenderNode {
    let values = number_series(data, "values");
    let total: f32 = values.iter().sum();
    let total = if total > 0.0 { total } else { 1.0 };

    let mut current_angle = 0.0_f32;
    let slices = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let sweep = value / total * 360.0;
            let start = current_angle;
            let end = current_angle + sweep;
            current_angle = end;

            RenderNode::Path {
                d: slice_path(start, end, radius, inner_radius),
                fill: SERIES_COLORS[i % SERIES_COLORS.len()].to_string(),
            }
        })
        .collect();

    card(
        title,
        PIE_HEADER,
        RenderNode::Frame {
            direction: FrameDirection::Vertical,
            children: slices,
            style: None,
        },
    )
}

/// Path data for one slice between `start` and `end` degrees.
///
/// Angles measure clockwise from 12 o'clock, the viewbox is 100x100 with
/// the center at (50, 50). Donut slices trace the outer arc forward and
/// the inner arc back.
fn slice_path(start: f32, end: f32, radius: f32, inner_radius: Option<f32>) -> String {
    let (x1, y1) = arc_point(start, radius);
    let (x2, y2) = arc_point(end, radius);
    let large_arc = i32::from(end - start > 180.0);

    match inner_radius {
        None => format!(
            "M 50 50 L {x1:.2} {y1:.2} A {radius:.0} {radius:.0} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
        ),
        Some(inner) => {
            let (ix1, iy1) = arc_point(start, inner);
            let (ix2, iy2) = arc_point(end, inner);
            format!(
                "M {x1:.2} {y1:.2} A {radius:.0} {radius:.0} 0 {large_arc} 1 {x2:.2} {y2:.2} \
                 L {ix2:.2} {iy2:.2} A {inner:.0} {inner:.0} 0 {large_arc} 0 {ix1:.2} {iy1:.2} Z"
            )
        }
    }
}

/// Point on a circle of `radius` around (50, 50) at `angle` degrees from
/// 12 o'clock.
fn arc_point(angle: f32, radius: f32) -> (f32, f32) {
    let radians = (angle - 90.0).to_radians();
    (50.0 + radius * radians.cos(), 50.0 + radius * radians.sin())
}

fn metrics_card(title: &str, data: &Value) -> RenderNode {
    let tiles = data
        .get("metrics")
        .and_then(Value::as_array)
        .map(|metrics| {
            metrics
                .iter()
                .map(|metric| RenderNode::Metric {
                    label: text_field(metric, "label"),
                    value: text_field(metric, "value"),
                })
                .collect()
        })
        .unwrap_or_default();

    card(
        title,
        METRICS_HEADER,
        RenderNode::Frame {
            direction: FrameDirection::Horizontal,
            children: tiles,
            style: None,
        },
    )
}

/// Plain captioned card for flavors without a dedicated renderer.
fn fallback_card(chart_type: ChartType, title: &str) -> RenderNode {
    RenderNode::Frame {
        direction: FrameDirection::Vertical,
        children: vec![
            RenderNode::Text {
                content: title.to_string(),
                style: None,
            },
            RenderNode::Text {
                content: format!("{} chart", chart_type.label()),
                style: None,
            },
        ],
        style: None,
    }
}

/// Title header over a plot body.
fn card(title: &str, header_tint: &str, body: RenderNode) -> RenderNode {
    RenderNode::Frame {
        direction: FrameDirection::Vertical,
        children: vec![
            RenderNode::Text {
                content: title.to_string(),
                style: Some(NodeStyle::background(header_tint)),
            },
            body,
        ],
        style: None,
    }
}

/// Numeric series under `key`, non-numbers skipped.
#[allow(clippy::cast_possible_truncation)]
fn number_series(data: &Value, key: &str) -> Vec<f32> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_f64)
                .map(|v| v as f32)
                .collect()
        })
        .unwrap_or_default()
}

/// String series under `labels`.
fn label_series(data: &Value) -> Vec<String> {
    data.get("labels")
        .and_then(Value::as_array)
        .map(|labels| {
            labels
                .iter()
                .map(|label| match label {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Field rendered as display text whether it is a string or a number.
fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_of(node: &RenderNode) -> &RenderNode {
        match node {
            RenderNode::Frame { children, .. } => &children[1],
            other => panic!("expected card frame, got {other:?}"),
        }
    }

    #[test]
    fn bar_fractions_normalize_to_the_tallest() {
        let node = chart_card(
            ChartType::Bar,
            "Sales",
            &json!({"values": [50, 100], "labels": ["a", "b"]}),
        );
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected bar frame");
        };
        assert_eq!(children.len(), 2);
        match &children[1] {
            RenderNode::Bar { fraction, label, .. } => {
                assert!((fraction - 0.8).abs() < f32::EPSILON);
                assert_eq!(label.as_deref(), Some("b"));
            }
            other => panic!("expected bar, got {other:?}"),
        }
        match &children[0] {
            RenderNode::Bar { fraction, .. } => assert!((fraction - 0.4).abs() < f32::EPSILON),
            other => panic!("expected bar, got {other:?}"),
        }
    }

    #[test]
    fn missing_bar_labels_fall_back_to_indices() {
        let node = chart_card(ChartType::Bar, "Sales", &json!({"values": [1, 2, 3]}));
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected bar frame");
        };
        match &children[2] {
            RenderNode::Bar { label, .. } => assert_eq!(label.as_deref(), Some("2")),
            other => panic!("expected bar, got {other:?}"),
        }
    }

    #[test]
    fn line_spans_the_plot_box() {
        let node = chart_card(ChartType::Line, "Trend", &json!({"values": [10, 20, 40]}));
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected line frame");
        };
        let RenderNode::Polyline { points, .. } = &children[0] else {
            panic!("expected polyline first");
        };
        assert_eq!(points.len(), 3);
        assert!((points[0].0 - 0.0).abs() < f32::EPSILON);
        assert!((points[2].0 - 100.0).abs() < f32::EPSILON);
        // Peak value sits at the top of the 80% band.
        assert!((points[2].1 - 20.0).abs() < 1e-3);
        // One dot per vertex follows the polyline.
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn single_point_line_does_not_divide_by_zero() {
        let node = chart_card(ChartType::Line, "Trend", &json!({"values": [10]}));
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected line frame");
        };
        let RenderNode::Polyline { points, .. } = &children[0] else {
            panic!("expected polyline");
        };
        assert!(points[0].0.is_finite());
        assert!(points[0].1.is_finite());
    }

    #[test]
    fn pie_emits_one_slice_per_value() {
        let node = chart_card(ChartType::Pie, "Share", &json!({"values": [35, 25, 20, 15, 5]}));
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected pie frame");
        };
        assert_eq!(children.len(), 5);
        for (i, slice) in children.iter().enumerate() {
            match slice {
                RenderNode::Path { d, fill } => {
                    assert!(d.starts_with("M 50 50 L"), "pie slices anchor at center");
                    assert_eq!(fill, SERIES_COLORS[i % SERIES_COLORS.len()]);
                }
                other => panic!("expected path, got {other:?}"),
            }
        }
    }

    #[test]
    fn donut_slices_trace_both_arcs() {
        let node = chart_card(ChartType::Donut, "Revenue", &json!({"values": [60, 40]}));
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected donut frame");
        };
        match &children[0] {
            RenderNode::Path { d, .. } => {
                assert!(!d.starts_with("M 50 50"), "donut slices skip the center");
                assert!(d.contains("A 35 35"), "outer arc radius");
                assert!(d.contains("A 20 20"), "inner arc radius");
            }
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn majority_slice_sets_the_large_arc_flag() {
        let d = slice_path(0.0, 270.0, 40.0, None);
        assert!(d.contains(" 1 1 "), "sweep over 180 degrees uses large-arc");
        let d = slice_path(0.0, 90.0, 40.0, None);
        assert!(d.contains(" 0 1 "), "quarter sweep does not");
    }

    #[test]
    fn metrics_tiles_stringify_values() {
        let node = chart_card(
            ChartType::Metrics,
            "Key Metrics",
            &json!({"metrics": [
                {"label": "Users", "value": "2,456"},
                {"label": "Growth", "value": 18}
            ]}),
        );
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected metrics frame");
        };
        assert_eq!(
            children[0],
            RenderNode::Metric {
                label: "Users".to_string(),
                value: "2,456".to_string()
            }
        );
        assert_eq!(
            children[1],
            RenderNode::Metric {
                label: "Growth".to_string(),
                value: "18".to_string()
            }
        );
    }

    #[test]
    fn kpi_falls_back_to_a_captioned_card() {
        let node = chart_card(ChartType::Kpi, "North Star", &json!({}));
        let RenderNode::Frame { children, .. } = &node else {
            panic!("expected frame");
        };
        assert_eq!(
            children[1],
            RenderNode::Text {
                content: "kpi chart".to_string(),
                style: None
            }
        );
    }

    #[test]
    fn empty_data_renders_an_empty_plot() {
        let node = chart_card(ChartType::Bar, "Empty", &json!({}));
        let RenderNode::Frame { children, .. } = body_of(&node) else {
            panic!("expected frame");
        };
        assert!(children.is_empty());
    }
}
