//! Rendering module
//!
//! `scene` builds a platform-independent draw list from the simulation
//! state; `canvas` paints it with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{Scene, Shape, build_scene};
