//! The keyboard-command surface.
//!
//! Exact key bindings are the embedder's concern; the core exposes one
//! command per operation and the controller dispatches them.

use crate::mode::Transition;

/// One invokable canvas operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Save the canvas to storage.
    Save,
    /// Load the saved canvas from storage.
    Load,
    /// Produce the export config document.
    Export,
    /// Step back one history snapshot.
    Undo,
    /// Step forward one history snapshot.
    Redo,
    /// Delete every selected item.
    DeleteSelected,
    /// Remove all items.
    Clear,
    /// Scale and center the view to show all items.
    AutoFit,
    /// Arrange all items in a grid, then auto-fit.
    AutoLayout,
    /// Return the view to 100% scale.
    ResetZoom,
    /// Toggle the circular turnstile presentation.
    ToggleTurnstile,
    /// Toggle the linear carousel presentation.
    ToggleCarousel,
    /// Advance the carousel one slide (wraps).
    CarouselNext,
    /// Step the carousel back one slide (wraps).
    CarouselPrev,
    /// Jump to a slide by index (no-op when out of range).
    CarouselJump(usize),
    /// Toggle carousel autoplay.
    CarouselToggleAutoplay,
    /// Toggle the carousel thumbnail strip.
    CarouselToggleThumbnails,
    /// Set the autoplay interval in milliseconds.
    CarouselSetSpeed(u64),
    /// Set the slide transition style.
    CarouselSetTransition(Transition),
    /// Leave the active presentation mode.
    Escape,
}
