//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here:
//! - Units (field cells, frames, radians, 0-255 channels)
//! - Documented ranges and meanings
//! - Type safety where possible

mod render;
mod spawn;
mod wave;
mod zone;

// Re-export all types
pub use render::{RecordingConfig, RenderConfig, Rgb};
pub use spawn::SpawnConfig;
pub use wave::WavePhysics;
pub use zone::{OceanState, UnknownName, ZoneConfig, ZoneId};
pub(crate) use zone::normalize_name;
