//! Crop-and-resample from text bounds to the LED grid.
//!
//! # Coordinate Mapping
//!
//! The crop is never materialized. Each destination cell maps straight to
//! one source pixel inside the bounding box (nearest-neighbor, no
//! blending):
//!
//! - `source_x = floor(x * crop_width / target_width) + min_x`
//! - `source_y = floor(y * crop_height / led_rows) + min_y`
//!
//! # Column Count
//!
//! `target_width = round(led_rows * crop_width / crop_height * 1.2)`,
//! at least 1. The 1.2 factor widens the grid to compensate for the
//! geometry of LED cells.
//!
//! A grid may hold at most [`MAX_GRID_CELLS`] cells; very wide crops at
//! high row counts fail with `GridTooLarge` before anything is allocated.

mod resample;

pub use resample::{resample, target_width, BrightnessGrid, LED_ASPECT_MULTIPLIER, MAX_GRID_CELLS};
