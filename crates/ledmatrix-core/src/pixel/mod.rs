//! Pixel buffer and region types shared by the pipeline stages.
//!
//! # Layout
//!
//! A [`PixelBuffer`] is row-major RGBA, 4 bytes per pixel, channel order
//! R, G, B, A. Coordinates have their origin at the top-left corner.
//!
//! # Ownership
//!
//! The pipeline only ever reads the caller's buffer. Stages that change
//! pixel values (contrast enhancement) return a new buffer.

mod types;

pub use types::{BoundingBox, PixelBuffer, BYTES_PER_PIXEL};
