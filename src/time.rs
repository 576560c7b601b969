//! # Fixed-point astronomical time
//!
//! Seconds elapsed since J2000.0 reach magnitudes of ~1e11 over the multi-millennium
//! validity window of the orbital tables; a single `f64` no longer resolves sub-second
//! offsets there. [`TimeValue`] splits the value into a 64-bit integer part and a `f64`
//! fraction kept in `[0, 1)`, so arithmetic stays well-conditioned whatever the offset.
//!
//! The reference epoch is J2000.0 (2000-01-01 12:00:00 TT) and the unit is the SI second.
//! Conversions from and to [`hifitime::Epoch`] are exact to the nanosecond.
use hifitime::{Duration, Epoch, TimeScale};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};

use crate::constants::{JulianCentury, SECONDS_PER_DAY, SECONDS_PER_JULIAN_CENTURY};
use crate::orrery_errors::OrreryError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Immutable fixed-point real number, `integer + fraction` with `fraction ∈ [0, 1)`.
///
/// When used as an astronomical time it counts seconds relative to J2000.0.
///
/// Equality is **exact**: two values compare equal only if both parts are bit-identical
/// after normalization. Callers needing a tolerance must compare `(a - b).to_f64()`
/// themselves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawTimeValue")]
pub struct TimeValue {
    int: i64,
    fract: f64,
}

/// Serialized layout of [`TimeValue`]; the fraction is normalized on the way in.
#[derive(Deserialize)]
struct RawTimeValue {
    int: i64,
    fract: f64,
}

impl TryFrom<RawTimeValue> for TimeValue {
    type Error = OrreryError;

    fn try_from(raw: RawTimeValue) -> Result<Self, Self::Error> {
        if !raw.fract.is_finite() {
            return Err(OrreryError::InvalidParameter(format!(
                "time fraction must be finite, got {}",
                raw.fract
            )));
        }
        Ok(TimeValue::from_parts(raw.int, raw.fract))
    }
}

impl TimeValue {
    pub const ZERO: TimeValue = TimeValue { int: 0, fract: 0.0 };
    pub const MIN: TimeValue = TimeValue {
        int: i64::MIN,
        fract: 0.0,
    };
    pub const MAX: TimeValue = TimeValue {
        int: i64::MAX,
        fract: 1.0 - f64::EPSILON / 2.0,
    };

    /// Build a value from an integer part and an arbitrary (possibly out of range)
    /// fraction, carrying `floor(fract)` into the integer part.
    pub fn from_parts(int: i64, fract: f64) -> Self {
        debug_assert!(fract.is_finite(), "non-finite fraction: {fract}");
        let carry = fract.floor();
        let mut int = int.saturating_add(carry as i64);
        let mut fract = fract - carry;
        // `x - floor(x)` rounds up to exactly 1.0 for tiny negative inputs
        if fract >= 1.0 {
            int = int.saturating_add(1);
            fract = 0.0;
        }
        if fract == 0.0 {
            fract = 0.0;
        }
        TimeValue { int, fract }
    }

    /// Build a value from a double, normalizing immediately.
    pub fn from_f64(value: f64) -> Self {
        Self::from_parts(0, value)
    }

    #[inline]
    pub fn integer(&self) -> i64 {
        self.int
    }

    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fract
    }

    /// Collapse into a single double (loses precision for large magnitudes).
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.int as f64 + self.fract
    }

    /// Nearest integer, halves rounded up.
    pub fn rounded(&self) -> i64 {
        if self.fract >= 0.5 {
            self.int.saturating_add(1)
        } else {
            self.int
        }
    }

    /// Index of the step containing this value: `floor(self / step)`.
    ///
    /// `step` must be strictly positive.
    pub fn floor_div(&self, step: i64) -> i64 {
        debug_assert!(step > 0, "step must be strictly positive");
        self.int.div_euclid(step)
    }

    /// Smallest step index whose start is not before this value: `ceil(self / step)`.
    ///
    /// `step` must be strictly positive.
    pub fn ceil_div(&self, step: i64) -> i64 {
        debug_assert!(step > 0, "step must be strictly positive");
        let exact = self.int.rem_euclid(step) == 0 && self.fract == 0.0;
        self.int.div_euclid(step) + if exact { 0 } else { 1 }
    }

    /// Offset of this value inside its step, in `[0, step)`.
    pub fn rem_step(&self, step: i64) -> f64 {
        debug_assert!(step > 0, "step must be strictly positive");
        self.int.rem_euclid(step) as f64 + self.fract
    }

    /// Days elapsed since J2000.0.
    pub fn days(&self) -> f64 {
        *self / SECONDS_PER_DAY
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries(&self) -> JulianCentury {
        *self / SECONDS_PER_JULIAN_CENTURY
    }

    /// The J2000.0 reference epoch as a [`hifitime::Epoch`].
    pub fn j2000_epoch() -> Epoch {
        Epoch::from_gregorian(2000, 1, 1, 12, 0, 0, 0, TimeScale::TT)
    }

    /// Seconds elapsed between J2000.0 and `epoch`, exact to the nanosecond.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let nanos = (epoch - Self::j2000_epoch()).total_nanoseconds();
        TimeValue::from_parts(
            nanos.div_euclid(NANOS_PER_SECOND) as i64,
            nanos.rem_euclid(NANOS_PER_SECOND) as f64 / NANOS_PER_SECOND as f64,
        )
    }

    /// Convert back to a [`hifitime::Epoch`] (fraction rounded to the nanosecond).
    pub fn to_epoch(&self) -> Epoch {
        let nanos = self.int as i128 * NANOS_PER_SECOND
            + (self.fract * NANOS_PER_SECOND as f64).round() as i128;
        Self::j2000_epoch() + Duration::from_total_nanoseconds(nanos)
    }
}

impl Default for TimeValue {
    fn default() -> Self {
        TimeValue::ZERO
    }
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        TimeValue::from_f64(value)
    }
}

impl From<i64> for TimeValue {
    fn from(value: i64) -> Self {
        TimeValue {
            int: value,
            fract: 0.0,
        }
    }
}

impl PartialEq for TimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.int == other.int && self.fract == other.fract
    }
}

impl Eq for TimeValue {}

impl Hash for TimeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.int.hash(state);
        self.fract.to_bits().hash(state);
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.int
            .cmp(&other.int)
            .then_with(|| self.fract.total_cmp(&other.fract))
    }
}

impl Add<f64> for TimeValue {
    type Output = TimeValue;

    fn add(self, delta: f64) -> TimeValue {
        TimeValue::from_parts(self.int, self.fract + delta)
    }
}

impl Sub<f64> for TimeValue {
    type Output = TimeValue;

    fn sub(self, delta: f64) -> TimeValue {
        TimeValue::from_parts(self.int, self.fract - delta)
    }
}

impl Add<i64> for TimeValue {
    type Output = TimeValue;

    fn add(self, delta: i64) -> TimeValue {
        TimeValue {
            int: self.int.saturating_add(delta),
            fract: self.fract,
        }
    }
}

impl Sub<i64> for TimeValue {
    type Output = TimeValue;

    fn sub(self, delta: i64) -> TimeValue {
        TimeValue {
            int: self.int.saturating_sub(delta),
            fract: self.fract,
        }
    }
}

impl Add for TimeValue {
    type Output = TimeValue;

    fn add(self, other: TimeValue) -> TimeValue {
        TimeValue::from_parts(self.int.saturating_add(other.int), self.fract + other.fract)
    }
}

impl Sub for TimeValue {
    type Output = TimeValue;

    fn sub(self, other: TimeValue) -> TimeValue {
        TimeValue::from_parts(self.int.saturating_sub(other.int), self.fract - other.fract)
    }
}

impl Neg for TimeValue {
    type Output = TimeValue;

    fn neg(self) -> TimeValue {
        TimeValue::from_parts(self.int.saturating_neg(), -self.fract)
    }
}

impl AddAssign<f64> for TimeValue {
    fn add_assign(&mut self, delta: f64) {
        *self = *self + delta;
    }
}

impl SubAssign<f64> for TimeValue {
    fn sub_assign(&mut self, delta: f64) {
        *self = *self - delta;
    }
}

impl AddAssign for TimeValue {
    fn add_assign(&mut self, other: TimeValue) {
        *self = *self + other;
    }
}

impl SubAssign for TimeValue {
    fn sub_assign(&mut self, other: TimeValue) {
        *self = *self - other;
    }
}

/// Division by an integer, the remainder of the integer part is distributed into the
/// fractional contribution so that large values keep their sub-unit precision.
impl Div<i64> for TimeValue {
    type Output = f64;

    fn div(self, divisor: i64) -> f64 {
        (self.int / divisor) as f64 + ((self.int % divisor) as f64 + self.fract) / divisor as f64
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}+{})", self.int, self.fract)
    }
}
