//! Rendering module
//!
//! The simulation hands out a [`RenderSnapshot`]; the 2D canvas renderer
//! (web only) draws it without touching simulation internals.

pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use snapshot::RenderSnapshot;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
