//! # Mural Render
//!
//! Card renderers for Mural: pure factories turning item payloads into
//! renderable node trees, plus the built-in universal widgets.
//!
//! The heavy lifting - state, history, layout - lives in `mural-core`;
//! this crate only decides what each card looks like. Hosts paint the
//! resulting [`mural_core::RenderNode`] trees however they render.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod card;
pub mod chart;
pub mod note;
pub mod website;
pub mod widgets;

pub use card::CardRenderer;
pub use chart::{chart_card, SERIES_COLORS};
pub use note::note_card;
pub use website::website_card;
pub use widgets::register_builtins;
