//! # Mural Core
//!
//! Core engine for a freeform canvas: place, drag, resize, and arrange
//! heterogeneous items on an infinite 2D surface, with undo/redo,
//! persistence, JSON import/export, and alternate presentation modes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              CanvasController               │
//! ├─────────────────────────────────────────────┤
//! │  Item Store      │  Layout Engine           │
//! │  - Items         │  - Grid auto-layout      │
//! │  - History log   │  - Turnstile / carousel  │
//! │  - Registry      │  - Auto-fit transform    │
//! ├─────────────────────────────────────────────┤
//! │  Gestures        │  Persistence             │
//! │  - Drag/resize   │  - Config import/export  │
//! │  - Single commit │  - Saved-canvas storage  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The [`CanvasController`] is the single mutating owner; everything else
//! receives state by reference. Item presentation is delegated through the
//! [`render::RenderFactory`] seam - the full card renderer lives in the
//! `mural-render` crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod controller;
pub mod error;
pub mod history;
pub mod interact;
pub mod item;
pub mod layout;
pub mod mode;
pub mod persist;
pub mod registry;
pub mod render;
pub mod schema;
pub mod store;

pub use command::Command;
pub use controller::CanvasController;
pub use error::{CanvasError, CanvasResult};
pub use history::{HistoryLog, Snapshot};
pub use interact::{GestureController, GestureState, MIN_ITEM_HEIGHT, MIN_ITEM_WIDTH};
pub use item::{CanvasItem, ChartType, Geometry, ItemId, ItemKind, ItemPayload, NoteColor};
pub use layout::{Bounds, Placement, ViewTransform, Viewport};
pub use mode::{CarouselSettings, Transition, ViewMode};
pub use persist::{CanvasStorage, Notification, PersistError};
pub use registry::{ComponentEntry, ComponentRegistry, Dimensions, Props};
pub use render::{FrameDirection, NodeStyle, PlainRenderer, RenderFactory, RenderNode, Renderable};
pub use schema::{CanvasConfig, SavedCanvas, SCHEMA_VERSION, STORAGE_KEY};
pub use store::ItemStore;

/// Canvas core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
