//! Ripplecatch library - interactive water ripples with creatures to catch

pub mod cli;
pub mod creatures;
pub mod events;
pub mod frame_loop;
pub mod ocean;
pub mod params;
pub mod recording;
pub mod rendering;
pub mod scene;
pub mod simulation;
