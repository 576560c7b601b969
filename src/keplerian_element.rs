//! # Keplerian element sets with secular drift
//!
//! Approximate planetary positions follow the JPL "Keplerian Elements for Approximate
//! Positions of the Major Planets" scheme: six elements at J2000.0, their linear rates
//! per Julian century and, for the giant planets, four extra terms correcting the mean
//! anomaly over long spans.
//!
//! Two representations coexist:
//!
//! * [`ElementTable`] – the coefficients exactly as published (AU and **degrees**), suited
//!   for compiled-in constants and for files edited by hand.
//! * [`OrbitalElements`] – the working form (AU and **radians**) consumed by the Kepler
//!   model, obtained with `OrbitalElements::from(&table)`.
use serde::{Deserialize, Serialize};

use crate::constants::{
    AstronomicalUnit, Degree, JulianCentury, Radian, DAYS_PER_JULIAN_CENTURY, DPI, RADEG,
    SECONDS_PER_JULIAN_CENTURY,
};
use crate::kepler::wrap_pi;
use crate::time::TimeValue;

/// Linear secular rates, per Julian century (AU/cy, 1/cy, rad/cy).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementRates {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub mean_longitude: Radian,
    pub perihelion_longitude: Radian,
    pub ascending_node_longitude: Radian,
}

/// Extra mean anomaly terms `b·T² + c·cos(f·T) + s·sin(f·T)` (radians, f in rad/cy).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FineTune {
    pub b: Radian,
    pub c: Radian,
    pub s: Radian,
    pub f: Radian,
}

impl FineTune {
    pub fn correction(&self, centuries: JulianCentury) -> Radian {
        let ft = self.f * centuries;
        self.b * centuries * centuries + self.c * ft.cos() + self.s * ft.sin()
    }
}

/// Time span, in seconds since J2000.0, over which the secular rates are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub min_seconds: i64,
    pub max_seconds: i64,
}

impl TimeWindow {
    /// Window expressed in whole Julian centuries around J2000.0.
    pub const fn from_centuries(min: i64, max: i64) -> Self {
        TimeWindow {
            min_seconds: min * SECONDS_PER_JULIAN_CENTURY,
            max_seconds: max * SECONDS_PER_JULIAN_CENTURY,
        }
    }

    pub fn clamp(&self, time: TimeValue) -> TimeValue {
        time.clamp(
            TimeValue::from(self.min_seconds),
            TimeValue::from(self.max_seconds),
        )
    }

    pub fn contains(&self, time: TimeValue) -> bool {
        self.clamp(time) == time
    }
}

/// Keplerian elements at J2000.0 with their secular rates.
///
/// Units:
/// * `semi_major_axis`: AU
/// * `eccentricity`: unitless
/// * `inclination`, `mean_longitude`, `perihelion_longitude`, `ascending_node_longitude`: radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub mean_longitude: Radian,
    pub perihelion_longitude: Radian,
    pub ascending_node_longitude: Radian,
    #[serde(default)]
    pub rates: ElementRates,
    #[serde(default)]
    pub fine_tune: Option<FineTune>,
    #[serde(default)]
    pub window: Option<TimeWindow>,
}

/// Element set evaluated at a given date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftedElements {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub mean_longitude: Radian,
    pub perihelion_longitude: Radian,
    pub ascending_node_longitude: Radian,
    /// ω = ϖ − Ω
    pub periapsis_argument: Radian,
    /// M = L − ϖ + fine-tune correction, wrapped into (−π, π]
    pub mean_anomaly: Radian,
}

impl OrbitalElements {
    /// Build an element set from mean elements with daily rates, as tabulated by
    /// P. Schlyter's "How to compute planetary positions" (ppcomp).
    ///
    /// Arguments
    /// ---------
    /// * `node`, `inclination`, `periapsis_argument`, `mean_anomaly`: N, i, w, M (degrees)
    ///   at 2000 Jan 0.0.
    /// * `semi_major_axis` (AU) and `eccentricity`.
    /// * `daily_rates`: per-day rates of `[N, i, w, a, e, M]` (degrees, AU, unitless).
    ///
    /// Return
    /// ------
    /// * Elements referenced to J2000.0. The ppcomp day count starts 1.5 days before
    ///   J2000.0, the elements are advanced by that offset.
    pub fn from_mean_elements(
        node: Degree,
        inclination: Degree,
        periapsis_argument: Degree,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        mean_anomaly: Degree,
        daily_rates: [f64; 6],
    ) -> Self {
        const EPOCH_SHIFT_DAYS: f64 = 1.5;
        let [d_node, d_incl, d_peri, d_a, d_e, d_m] = daily_rates;
        let at_j2000 = |value: f64, rate: f64| value + rate * EPOCH_SHIFT_DAYS;

        let node0 = at_j2000(node, d_node);
        let peri0 = at_j2000(periapsis_argument, d_peri);
        let perihelion_longitude = node0 + peri0;
        let mean_longitude = at_j2000(mean_anomaly, d_m) + perihelion_longitude;

        let d_lp = d_node + d_peri;
        let d_l = d_m + d_lp;

        OrbitalElements {
            semi_major_axis: at_j2000(semi_major_axis, d_a),
            eccentricity: at_j2000(eccentricity, d_e),
            inclination: at_j2000(inclination, d_incl) * RADEG,
            mean_longitude: mean_longitude * RADEG,
            perihelion_longitude: perihelion_longitude * RADEG,
            ascending_node_longitude: node0 * RADEG,
            rates: ElementRates {
                semi_major_axis: d_a * DAYS_PER_JULIAN_CENTURY,
                eccentricity: d_e * DAYS_PER_JULIAN_CENTURY,
                inclination: d_incl * DAYS_PER_JULIAN_CENTURY * RADEG,
                mean_longitude: d_l * DAYS_PER_JULIAN_CENTURY * RADEG,
                perihelion_longitude: d_lp * DAYS_PER_JULIAN_CENTURY * RADEG,
                ascending_node_longitude: d_node * DAYS_PER_JULIAN_CENTURY * RADEG,
            },
            fine_tune: None,
            window: None,
        }
    }

    /// Julian centuries since J2000.0 at `time`: `(T, T′)` where `T′` is clamped to the
    /// validity window and `T` is not.
    pub fn centuries_at(&self, time: TimeValue) -> (JulianCentury, JulianCentury) {
        let t = time.centuries();
        let clamped = match self.window {
            Some(window) => window.clamp(time).centuries(),
            None => t,
        };
        (t, clamped)
    }

    /// Evaluate the elements at `T` (mean longitude only) and `T′` (everything else).
    ///
    /// Keeping the mean longitude unclamped preserves the orbital motion indefinitely,
    /// while the slow elements freeze at the window boundary.
    pub fn at(&self, centuries: JulianCentury, clamped: JulianCentury) -> DriftedElements {
        let r = &self.rates;
        let semi_major_axis = self.semi_major_axis + r.semi_major_axis * clamped;
        let eccentricity = self.eccentricity + r.eccentricity * clamped;
        let inclination = self.inclination + r.inclination * clamped;
        let mean_longitude = self.mean_longitude + r.mean_longitude * centuries;
        let perihelion_longitude = self.perihelion_longitude + r.perihelion_longitude * clamped;
        let ascending_node_longitude =
            self.ascending_node_longitude + r.ascending_node_longitude * clamped;

        let correction = self
            .fine_tune
            .map_or(0.0, |fine_tune| fine_tune.correction(clamped));

        DriftedElements {
            semi_major_axis,
            eccentricity,
            inclination,
            mean_longitude,
            perihelion_longitude,
            ascending_node_longitude,
            periapsis_argument: perihelion_longitude - ascending_node_longitude,
            mean_anomaly: wrap_pi(mean_longitude - perihelion_longitude + correction),
        }
    }

    /// Sidereal period from the mean longitude rate, `None` when the rate is zero.
    pub fn period_seconds(&self) -> Option<f64> {
        let rate = self.rates.mean_longitude.abs();
        (rate > 0.0).then(|| DPI / rate * SECONDS_PER_JULIAN_CENTURY as f64)
    }
}

/// Published coefficients, in AU and degrees.
///
/// * `values`: `[a, e, I, L, ϖ, Ω]` at J2000.0
/// * `rates`: the same six quantities per Julian century
/// * `fine_tune`: `[b, c, s, f]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementTable {
    pub values: [f64; 6],
    pub rates: [f64; 6],
    #[serde(default)]
    pub fine_tune: Option<[f64; 4]>,
    #[serde(default)]
    pub window: Option<TimeWindow>,
}

impl From<&ElementTable> for OrbitalElements {
    fn from(table: &ElementTable) -> Self {
        let [a, e, i, l, lp, lan] = table.values;
        let [da, de, di, dl, dlp, dlan] = table.rates;

        OrbitalElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: i * RADEG,
            mean_longitude: l * RADEG,
            perihelion_longitude: lp * RADEG,
            ascending_node_longitude: lan * RADEG,
            rates: ElementRates {
                semi_major_axis: da,
                eccentricity: de,
                inclination: di * RADEG,
                mean_longitude: dl * RADEG,
                perihelion_longitude: dlp * RADEG,
                ascending_node_longitude: dlan * RADEG,
            },
            fine_tune: table.fine_tune.map(|[b, c, s, f]| FineTune {
                b: b * RADEG,
                c: c * RADEG,
                s: s * RADEG,
                f: f * RADEG,
            }),
            window: table.window,
        }
    }
}

impl From<ElementTable> for OrbitalElements {
    fn from(table: ElementTable) -> Self {
        OrbitalElements::from(&table)
    }
}
