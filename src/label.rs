//! Label values assigned by raters.
//!
//! A label is either a symbolic category (nominal data) or a number
//! (ordinal, interval and ratio data). Labels are hashable and totally
//! ordered so they can key the value-count and coincidence tables:
//! numbers sort numerically before categories, categories sort lexically.

use crate::error::AlphaError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value a rater assigns to an item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Numeric value (ranked category, interval or ratio measurement)
    Number(f64),
    /// Symbolic category
    Category(String),
}

impl Label {
    /// Numeric value of this label, `None` for categories and NaN
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Check if this label carries a usable number
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Numeric value required by a scale-sensitive metric
    pub(crate) fn require_number(&self, metric: &'static str) -> Result<f64, AlphaError> {
        self.as_f64().ok_or_else(|| AlphaError::TypeMismatch {
            metric,
            label: self.clone(),
        })
    }
}

/// Collapse `-0.0` onto `0.0` and every NaN onto one payload
fn canonical(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Self::Number(_), Self::Category(_)) => Ordering::Less,
            (Self::Category(_), Self::Number(_)) => Ordering::Greater,
            (Self::Category(a), Self::Category(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(v) => {
                0_u8.hash(state);
                canonical(*v).to_bits().hash(state);
            }
            Self::Category(s) => {
                1_u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Category(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Category(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

impl From<char> for Label {
    fn from(value: char) -> Self {
        Self::Category(value.to_string())
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Label {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Label {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, u8, u16, u32);

impl From<i64> for Label {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for Label {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}
