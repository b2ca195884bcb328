//! Process-wide numeric settings.
//!
//! # Environment Variables
//!
//! * `SANDBOX_EPSILON`: overrides the zero threshold returned by [`epsilon`]. Must parse as a
//!   positive, finite [`f64`]. Invalid values are reported through [`log`] and ignored.

use std::env::{self, VarError};

use once_cell::sync::Lazy;

use crate::traits::Float;

/// The default zero threshold.
///
/// Scalar divisors, determinants and projection extents whose magnitude is below this value are
/// treated as zero.
pub const DEFAULT_EPSILON: f64 = 1e-8;

const EPSILON_VAR: &str = "SANDBOX_EPSILON";

static EPSILON: Lazy<f64> = Lazy::new(|| match env::var(EPSILON_VAR) {
    Ok(v) => match parse_epsilon(&v) {
        Some(eps) => {
            log::debug!("using zero threshold {eps} from `{EPSILON_VAR}`");
            eps
        }
        None => {
            log::warn!("invalid value set for `{EPSILON_VAR}` variable: '{v}'; using default");
            DEFAULT_EPSILON
        }
    },
    Err(VarError::NotPresent) => DEFAULT_EPSILON,
    Err(VarError::NotUnicode(s)) => {
        log::warn!(
            "invalid value set for `{EPSILON_VAR}` variable: {}; using default",
            s.to_string_lossy()
        );
        DEFAULT_EPSILON
    }
});

fn parse_epsilon(value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(eps) if eps.is_finite() && eps > 0.0 => Some(eps),
        _ => None,
    }
}

/// Returns the active zero threshold.
///
/// This is [`DEFAULT_EPSILON`] unless overridden via `SANDBOX_EPSILON`. The variable is read once,
/// the first time this function is called.
#[inline]
pub fn epsilon() -> f64 {
    *EPSILON
}

/// Returns the active zero threshold converted to `T`.
#[inline]
pub fn epsilon_as<T: Float>() -> T {
    T::from_f64(epsilon())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(parse_epsilon("1e-6"), Some(1e-6));
        assert_eq!(parse_epsilon(" 0.5 "), Some(0.5));
        assert_eq!(parse_epsilon("0"), None);
        assert_eq!(parse_epsilon("-1e-8"), None);
        assert_eq!(parse_epsilon("inf"), None);
        assert_eq!(parse_epsilon("tiny"), None);
    }

    #[test]
    fn threshold_is_positive() {
        assert!(epsilon() > 0.0);
        assert!(epsilon_as::<f32>() > 0.0);
    }
}
