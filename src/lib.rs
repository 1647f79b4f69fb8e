//! Spinning orthographic globe engine.
//!
//! [`globe::Globe`] owns the view state and turns drag, zoom, hover and clock
//! input into [`globe::render::DrawList`] frames that any
//! [`globe::render::DrawSurface`] can paint.

pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod globe;
