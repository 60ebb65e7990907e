//! Events emitted to the game layer.

/// Outcome of a successful primary-action hit
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A non-boss creature was caught and removed from the water
    Capture {
        species_name: String,
        value: u32,
        spawn_chance: f32,
    },

    /// The boss was struck; health is tracked by the game layer
    BossHit,
}
