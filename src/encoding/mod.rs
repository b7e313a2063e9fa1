//! Magnitude to color/radius mapping
//!
//! Both mappings are pure functions of a single optional magnitude, driven by a
//! [`VisualScale`] so alternate scales can be swapped in without touching the mapping
//! logic. [`color_from_mag`] and [`radius_from_mag`] apply the default scale.

mod encoded_event;
mod rgba;
mod visual_scale;

pub use encoded_event::EncodedEvent;
pub use rgba::Rgba;
pub use visual_scale::{VisualScale, color_from_mag, radius_from_mag};
