//! Sizing of leverage loops that repeatedly borrow a fixed ratio of the last
//! deposit and deposit it again.

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("borrow ratio {0} must be between 0 and 1 (exclusive)")]
    Ratio(f64),
    #[error("target {target} can't be reached from {initial}")]
    Unreachable { initial: f64, target: f64 },
}

/// Share of the target that may still be missing for it to count as
/// reachable. Anything closer to the series limit is rounding noise.
const TOLERANCE: f64 = 1e-9;

/// The smallest number of deposits `n` for which the geometric series
/// `initial * (1 - ratio^n) / (1 - ratio)` reaches `target`.
pub fn minimum_rounds(initial: f64, ratio: f64, target: f64) -> Result<u32, Error> {
    if !(ratio > 0. && ratio < 1.) {
        return Err(Error::Ratio(ratio));
    }
    let remaining = (initial - target * (1. - ratio)) / initial;
    if !(remaining > TOLERANCE && remaining.is_finite()) {
        return Err(Error::Unreachable { initial, target });
    }
    let rounds = (remaining.ln() / ratio.ln()).ceil();
    // A target at or below the initial deposit needs just that deposit.
    Ok(rounds.max(1.) as u32)
}
