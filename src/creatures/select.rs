//! Weighted random selection.

use rand::Rng;

/// Pick one candidate with probability `weight_i / sum(weights)`
///
/// Draws `u ~ Uniform(0, total)` and walks the list subtracting weights until
/// `u` falls below the current candidate's weight. Negative and non-finite
/// weights count as 0. Returns `None` when there is nothing to pick from or
/// every weight is 0. Extra weights beyond `candidates.len()` are ignored.
pub fn weighted_pick<'a, T, R: Rng + ?Sized>(
    candidates: &'a [T],
    weights: &[f32],
    rng: &mut R,
) -> Option<&'a T> {
    let sanitize = |w: f32| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let pairs = candidates.iter().zip(weights.iter().copied().map(sanitize));

    let total: f32 = pairs.clone().map(|(_, w)| w).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let mut u = rng.gen::<f32>() * total;
    let mut last = None;
    for (candidate, weight) in pairs {
        if weight <= 0.0 {
            continue;
        }
        if u < weight {
            return Some(candidate);
        }
        u -= weight;
        last = Some(candidate);
    }

    // Float round-off left a sliver past the end
    last
}
