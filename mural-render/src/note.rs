//! Sticky-note card factory.

use mural_core::{FrameDirection, NodeStyle, NoteColor, RenderNode, Renderable};

/// Background and border hex pair for each note swatch.
#[must_use]
pub fn swatch(color: NoteColor) -> (&'static str, &'static str) {
    match color {
        NoteColor::Yellow => ("#fef9c3", "#fde047"),
        NoteColor::Blue => ("#dbeafe", "#93c5fd"),
        NoteColor::Green => ("#dcfce7", "#86efac"),
        NoteColor::Pink => ("#fce7f3", "#f9a8d4"),
        NoteColor::Purple => ("#f3e8ff", "#d8b4fe"),
    }
}

/// Build the card for a note item.
#[must_use]
pub fn note_card(title: &str, content: &str, color: NoteColor) -> Renderable {
    let (background, border) = swatch(color);
    Renderable::new(RenderNode::Frame {
        direction: FrameDirection::Vertical,
        children: vec![
            RenderNode::Text {
                content: title.to_string(),
                style: None,
            },
            RenderNode::Text {
                content: content.to_string(),
                style: None,
            },
        ],
        style: Some(NodeStyle {
            background: Some(background.to_string()),
            border: Some(border.to_string()),
            ..NodeStyle::default()
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_drives_the_frame_style() {
        let card = note_card("Reminder", "ship it", NoteColor::Pink);
        match card.root {
            RenderNode::Frame { style, children, .. } => {
                let style = style.expect("styled frame");
                assert_eq!(style.background.as_deref(), Some("#fce7f3"));
                assert_eq!(style.border.as_deref(), Some("#f9a8d4"));
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected frame, got {other:?}"),
        }
    }

    #[test]
    fn every_swatch_is_distinct() {
        let colors = [
            NoteColor::Yellow,
            NoteColor::Blue,
            NoteColor::Green,
            NoteColor::Pink,
            NoteColor::Purple,
        ];
        let mut backgrounds: Vec<&str> = colors.iter().map(|c| swatch(*c).0).collect();
        backgrounds.sort_unstable();
        backgrounds.dedup();
        assert_eq!(backgrounds.len(), colors.len());
    }
}
