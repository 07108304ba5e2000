//! Canvas 2D rendering module
//!
//! Geometry and colors are pure and testable natively; only the canvas
//! backend touches the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub mod layer;
pub mod palette;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
