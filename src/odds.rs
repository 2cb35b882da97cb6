//! Pot odds from a win probability.

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum OddsError {
    #[error("max bet is undefined for win probability {0}; needs 0 < p < 1")]
    Undefined(f64),
}

/// Largest profitable bet as a multiple of the pot: `1 / (1/p - 1)`.
///
/// Only defined for `0 < p < 1`. A certain win has no upper bound and a
/// certain loss has no profitable bet, so both are errors rather than
/// `inf` or `0`.
///
/// ```
/// use holdem_equity::odds::max_bet_ratio;
///
/// assert_eq!(max_bet_ratio(0.5).unwrap(), 1.0);
/// assert!(max_bet_ratio(1.0).is_err());
/// ```
pub fn max_bet_ratio(p: f64) -> Result<f64, OddsError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(OddsError::Undefined(p));
    }
    let ratio = 1.0 / (1.0 / p - 1.0);
    if !ratio.is_finite() {
        return Err(OddsError::Undefined(p));
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_money_is_one_pot() {
        assert_eq!(max_bet_ratio(0.5), Ok(1.0));
    }

    #[test]
    fn favourite_can_bet_more() {
        let r = max_bet_ratio(0.75).unwrap();
        assert!((r - 3.0).abs() < 1e-9);
        let r = max_bet_ratio(0.2).unwrap();
        assert!((r - 0.25).abs() < 1e-9);
    }

    #[test]
    fn bounds_are_errors() {
        assert!(matches!(max_bet_ratio(0.0), Err(OddsError::Undefined(_))));
        assert!(matches!(max_bet_ratio(1.0), Err(OddsError::Undefined(_))));
        assert!(matches!(max_bet_ratio(-0.1), Err(OddsError::Undefined(_))));
        assert!(matches!(max_bet_ratio(f64::NAN), Err(OddsError::Undefined(_))));
    }

    #[test]
    fn grows_without_bound_near_one() {
        let near = max_bet_ratio(1.0 - 1e-9).unwrap();
        assert!(near > 1e8);
        assert!(near.is_finite());
    }
}
