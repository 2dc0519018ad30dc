//! Embedded-website card factory.
//!
//! The embed node carries the address; whether the host can actually frame
//! the page is the host's problem (third-party pages may refuse embedding),
//! so the card always pairs the embed with a readable title header.

use mural_core::{FrameDirection, NodeStyle, RenderNode, Renderable};

/// Header tint for website cards.
const HEADER_TINT: &str = "#f0f9ff";

/// Build the card for a website item.
#[must_use]
pub fn website_card(url: &str, title: &str) -> Renderable {
    Renderable::new(RenderNode::Frame {
        direction: FrameDirection::Vertical,
        children: vec![
            RenderNode::Text {
                content: title.to_string(),
                style: Some(NodeStyle::background(HEADER_TINT)),
            },
            RenderNode::Embed {
                url: url.to_string(),
                title: title.to_string(),
            },
        ],
        style: None,
    })
}
