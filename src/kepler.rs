//! # Kepler's equation and perifocal geometry
//!
//! Angle helpers, the Newton–Raphson solver for the elliptic Kepler equation
//! `M = E − e·sin E`, and the two geometric steps turning an eccentric anomaly into a
//! heliocentric position: the in-plane coordinates, then the `Rz(Ω) · Rx(I) · Rz(ω)`
//! rotation into the ecliptic frame.
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

use crate::constants::DPI;
use crate::orrery_errors::OrreryError;
use crate::ref_system::rotmt;

/// Newton–Raphson controls for Kepler's equation.
///
/// * `tolerance` – stop once the correction `|ΔE|` drops below this value (radians).
/// * `max_iter` – iteration cap, reaching it is reported as
///   [`OrreryError::KeplerNotConverged`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            tolerance: 1e-9,
            max_iter: 100,
        }
    }
}

/// Principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Wrap an angle into the half-open interval (−π, π].
pub fn wrap_pi(a: f64) -> f64 {
    let p = principal_angle(a);
    if p > PI {
        p - DPI
    } else {
        p
    }
}

/// Principal difference `a − b` between two angles, in [−π, π].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Solve Kepler's equation `M = E − e·sin(E)` for the eccentric anomaly `E`.
///
/// Arguments
/// ---------
/// * `eccentricity`: orbital eccentricity, elliptic regime `0 ≤ e < 1`.
/// * `mean_anomaly`: mean anomaly `M` in radians, expected in `(−π, π]`.
/// * `solver`: tolerance and iteration cap.
///
/// Return
/// ------
/// * The eccentric anomaly `E` in radians.
///
/// Details
/// -------
/// Starting from `E₀ = M + e·sin(M)`, iterates
/// `ΔE = (M − (E − e·sin E)) / (1 − e·cos E)` until `|ΔE| < tolerance`.
/// The cap is never reached for planetary eccentricities (e < 0.25); hitting it means
/// the element set is invalid and the error is returned without retry.
pub fn solve_kepler_equation(
    eccentricity: f64,
    mean_anomaly: f64,
    solver: &KeplerSolver,
) -> Result<f64, OrreryError> {
    let mut ecc_anom = mean_anomaly + eccentricity * mean_anomaly.sin();

    for _ in 0..solver.max_iter {
        let residual = mean_anomaly - (ecc_anom - eccentricity * ecc_anom.sin());
        let delta = residual / (1.0 - eccentricity * ecc_anom.cos());
        ecc_anom += delta;
        if delta.abs() < solver.tolerance {
            return Ok(ecc_anom);
        }
    }

    log::error!(
        "Kepler solver hit its iteration cap: M = {mean_anomaly}, e = {eccentricity}, E = {ecc_anom}"
    );
    Err(OrreryError::KeplerNotConverged {
        mean_anomaly,
        eccentricity,
        last_estimate: ecc_anom,
        iterations: solver.max_iter,
    })
}

/// Heliocentric coordinates in the orbital plane, x axis toward perihelion.
pub fn perifocal_position(semi_major_axis: f64, eccentricity: f64, ecc_anom: f64) -> Vector3<f64> {
    Vector3::new(
        semi_major_axis * (ecc_anom.cos() - eccentricity),
        semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt() * ecc_anom.sin(),
        0.0,
    )
}

/// Rotation from the perifocal frame to the reference (ecliptic) frame.
///
/// Composition `Rz(Ω) · Rx(I) · Rz(ω)`, applied right to left to perifocal vectors.
pub fn perifocal_to_ecliptic(
    periapsis_argument: f64,
    inclination: f64,
    ascending_node_longitude: f64,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, 2) * rotmt(inclination, 0) * rotmt(periapsis_argument, 2)
}
