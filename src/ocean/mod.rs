//! Water surface: the damped wave height field and its gradient shading.

mod field;
mod shading;

// Re-export public types
pub use field::WaveField;
pub use shading::{shade_field, FrameBuffer, Tint};
