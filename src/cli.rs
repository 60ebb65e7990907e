//! Command-line argument parsing.

use std::str::FromStr;

use clap::Parser;

use crate::creatures::BaitId;
use crate::params::{OceanState, RecordingConfig, RenderConfig, WavePhysics, ZoneId};
use crate::simulation::SimulationConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Ripplecatch")]
#[command(about = "Interactive water ripples with creatures to catch", long_about = None)]
pub struct Args {
    /// Record frames headlessly instead of opening a window (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Starting zone: surface (default), diamond-pit, abyssal-void
    #[arg(long, value_name = "ZONE", default_value = "surface")]
    pub zone: String,

    /// Equipped bait: none (default), bread, standard, deluxe, glow, abyssal,
    /// fermented, pheromones, tech, siren-nectar, singularity, fallen-star, void-essence
    #[arg(long, value_name = "BAIT", default_value = "none")]
    pub bait: String,

    /// Ocean state: calm (default), stormy, clear, boss-battle
    #[arg(long, value_name = "STATE", default_value = "calm")]
    pub ocean: String,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Window (or recording) width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Window (or recording) height in pixels
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Display pixels per wave cell
    #[arg(long, value_name = "N", default_value = "2")]
    pub divisor: u32,
}

/// Parse a name, warning and falling back to the default when unknown
fn parse_or_default<T>(value: &str) -> T
where
    T: FromStr + Default + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        let fallback = T::default();
        log::warn!("{}, using {}", e, fallback);
        fallback
    })
}

impl Args {
    pub fn parse_zone(&self) -> ZoneId {
        parse_or_default(&self.zone)
    }

    pub fn parse_bait(&self) -> BaitId {
        parse_or_default(&self.bait)
    }

    pub fn parse_ocean(&self) -> OceanState {
        parse_or_default(&self.ocean)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..RenderConfig::default()
        }
    }

    /// Starting configuration assembled from the arguments
    pub fn simulation_config(&self) -> SimulationConfig {
        let divisor = if self.divisor == 0 {
            log::warn!("Divisor must be at least 1, using 1");
            1
        } else {
            self.divisor
        };

        SimulationConfig {
            physics: WavePhysics {
                resolution_divisor: divisor,
                ..WavePhysics::default()
            },
            render: self.render_config(),
            zone: self.parse_zone(),
            bait: self.parse_bait(),
            ocean: self.parse_ocean(),
            seed: self.seed,
            ..SimulationConfig::default()
        }
    }

    /// Recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(RecordingConfig::new)
    }
}
