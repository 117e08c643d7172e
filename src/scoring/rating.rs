//! Likelihood and impact ratings.
//!
//! Both ratings live on the same 1-5 scale. Construction always clamps, so a
//! rating value outside [1, 5] cannot exist once it has been built:
//!
//! ```rust
//! use riskgrid::scoring::{Impact, Likelihood};
//!
//! assert_eq!(Likelihood::new(0).value(), 1);
//! assert_eq!(Likelihood::new(7).value(), 5);
//! assert_eq!(Impact::new(4).label(), "Major");
//! ```

use serde::{Deserialize, Serialize};

/// Lowest valid rating.
pub const MIN_RATING: u8 = 1;

/// Highest valid rating.
pub const MAX_RATING: u8 = 5;

/// Rating substituted for a missing or unreadable value.
pub const NEUTRAL_RATING: u8 = 3;

/// Clamp an arbitrary integer into the rating scale.
pub fn clamp_rating(value: i64) -> u8 {
    value.clamp(MIN_RATING as i64, MAX_RATING as i64) as u8
}

/// Read a rating the way loosely-typed register data is read.
///
/// Leading whitespace is skipped, then an optional sign and the leading run of
/// digits are taken (`"4"`, `" 4 "`, `"4 - Likely"` all read as 4). Returns
/// `None` when there are no digits or the value is zero, both of which mean
/// "not assessed". Non-zero values are clamped.
pub fn parse_rating(raw: &str) -> Option<u8> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Anything too long for i64 is far outside the scale anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };

    (value != 0).then(|| clamp_rating(value))
}

macro_rules! rating_type {
    ($(#[$meta:meta])* $name:ident, [$($label:literal),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "i64", into = "u8")]
        pub struct $name(u8);

        impl $name {
            const LABELS: [&'static str; MAX_RATING as usize] = [$($label),+];

            /// Build a rating, clamping `value` into [1, 5].
            pub fn new(value: i64) -> Self {
                Self(clamp_rating(value))
            }

            /// Neutral mid-scale rating.
            pub fn neutral() -> Self {
                Self(NEUTRAL_RATING)
            }

            pub fn value(self) -> u8 {
                self.0
            }

            /// Zero-based position on the heat-map axis.
            pub fn index(self) -> usize {
                (self.0 - MIN_RATING) as usize
            }

            pub fn label(self) -> &'static str {
                Self::LABELS[self.index()]
            }

            /// Every rating from lowest to highest.
            pub fn all() -> impl DoubleEndedIterator<Item = Self> {
                (MIN_RATING..=MAX_RATING).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::neutral()
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for u8 {
            fn from(rating: $name) -> u8 {
                rating.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} ({})", self.0, self.label())
            }
        }
    };
}

rating_type!(
    /// How probable a risk event is, from 1 (Rare) to 5 (Almost Certain).
    Likelihood,
    ["Rare", "Unlikely", "Possible", "Likely", "Almost Certain"]
);

rating_type!(
    /// Severity of a risk event's consequences, from 1 (Negligible) to
    /// 5 (Catastrophic).
    Impact,
    ["Negligible", "Minor", "Moderate", "Major", "Catastrophic"]
);
