//! Estimated time of arrival.

use std::fmt;
use std::ops::Add;

use serde::{Serialize, Serializer};

/// Estimated minutes until arrival, or no usable estimate.
///
/// On the wire an ETA is a whole number of minutes, with `-1` standing for
/// [`Eta::Unavailable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eta {
    Minutes(u32),
    Unavailable,
}

impl Eta {
    /// Wire value for an unavailable estimate.
    pub const UNAVAILABLE_SENTINEL: i64 = -1;

    /// Round a raw estimate in minutes.
    ///
    /// Negative or non-finite estimates carry no information and become
    /// `Unavailable`.
    pub fn from_estimate(minutes: f64) -> Self {
        if minutes.is_finite() && minutes >= 0.0 {
            Eta::Minutes(minutes.round().min(u32::MAX as f64) as u32)
        } else {
            Eta::Unavailable
        }
    }

    /// Minutes, if an estimate is available.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            Eta::Minutes(m) => Some(*m),
            Eta::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Eta::Minutes(_))
    }

    /// Minutes as a signed integer, `-1` when unavailable.
    pub fn as_signed(&self) -> i64 {
        match self {
            Eta::Minutes(m) => i64::from(*m),
            Eta::Unavailable => Self::UNAVAILABLE_SENTINEL,
        }
    }
}

/// Adding an unavailable estimate makes the sum unavailable.
impl Add for Eta {
    type Output = Eta;

    fn add(self, rhs: Eta) -> Eta {
        match (self, rhs) {
            (Eta::Minutes(a), Eta::Minutes(b)) => Eta::Minutes(a.saturating_add(b)),
            _ => Eta::Unavailable,
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Minutes(m) => write!(f, "{m} min"),
            Eta::Unavailable => f.write_str("unavailable"),
        }
    }
}

impl Serialize for Eta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_signed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_estimate_rounds() {
        assert_eq!(Eta::from_estimate(0.0), Eta::Minutes(0));
        assert_eq!(Eta::from_estimate(12.4), Eta::Minutes(12));
        assert_eq!(Eta::from_estimate(12.5), Eta::Minutes(13));
    }

    #[test]
    fn from_estimate_rejects_nonsense() {
        assert_eq!(Eta::from_estimate(-3.0), Eta::Unavailable);
        assert_eq!(Eta::from_estimate(f64::NAN), Eta::Unavailable);
        assert_eq!(Eta::from_estimate(f64::INFINITY), Eta::Unavailable);
    }

    #[test]
    fn addition_propagates_unavailable() {
        assert_eq!(Eta::Minutes(4) + Eta::Minutes(6), Eta::Minutes(10));
        assert_eq!(Eta::Minutes(4) + Eta::Unavailable, Eta::Unavailable);
        assert_eq!(Eta::Unavailable + Eta::Minutes(4), Eta::Unavailable);
    }

    #[test]
    fn wire_format_uses_sentinel() {
        assert_eq!(serde_json::to_string(&Eta::Minutes(17)).unwrap(), "17");
        assert_eq!(serde_json::to_string(&Eta::Unavailable).unwrap(), "-1");
    }

    #[test]
    fn display() {
        assert_eq!(Eta::Minutes(9).to_string(), "9 min");
        assert_eq!(Eta::Unavailable.to_string(), "unavailable");
    }
}
