//! # Reference frames and rotations
//!
//! Positions are produced in the **mean ecliptic and equinox of J2000** (x axis toward
//! the equinox), the native frame of the Keplerian element tables. IAU rotational
//! elements on the other hand are defined against the **ICRF / J2000 equator**. This
//! module provides the elementary rotations and the frame changes between the two, plus
//! the quaternion helpers used by the orientation models.
use nalgebra::{Matrix3, Quaternion, Rotation3, UnitQuaternion, Vector3};

use crate::constants::{Degree, JulianCentury, Radian, RADEG, RADSEC};
use crate::time::TimeValue;

/// Reference frame of the positions and orientations handed out by an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceFrame {
    /// Mean ecliptic and equinox of J2000.
    #[default]
    EclipticJ2000,
    /// Mean equator and equinox of J2000.
    EquatorialJ2000,
}

/// Compute the mean obliquity of the ecliptic (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `centuries`: Julian centuries since J2000.0 (TT).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(T) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³
/// ```
/// evaluated with Horner's scheme, coefficients in arcseconds.
pub fn obleq(centuries: JulianCentury) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    ((ob3 * centuries + ob2) * centuries + ob1) * centuries + ob0
}

/// Mean obliquity of the ecliptic at J2000.0 (84381.448″).
pub fn obleq_j2000() -> Radian {
    obleq(0.0)
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, `2` → Z.
///
/// # Returns
///
/// The **active** rotation matrix `R` such that the rotated vector is `x' = R · x`.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
pub fn rotmt(alpha: f64, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation taking ecliptic J2000 coordinates to equatorial J2000 coordinates.
pub fn ecliptic_to_equatorial() -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), obleq_j2000())
}

/// Rotation taking equatorial J2000 coordinates to ecliptic J2000 coordinates.
pub fn equatorial_to_ecliptic() -> UnitQuaternion<f64> {
    ecliptic_to_equatorial().inverse()
}

/// Frame change applied by a `Transformed` decorator: ecliptic → equatorial.
pub fn transform_to_equatorial(
    _time: TimeValue,
    position: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let rot = ecliptic_to_equatorial();
    (rot * position, rot * orientation)
}

/// Frame change applied by a `Transformed` decorator: equatorial → ecliptic.
pub fn transform_to_ecliptic(
    _time: TimeValue,
    position: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let rot = equatorial_to_ecliptic();
    (rot * position, rot * orientation)
}

/// Orientation of a body from its IAU rotational elements.
///
/// Arguments
/// ---------
/// * `pole_ra`: right ascension α₀ of the north pole (degrees).
/// * `pole_dec`: declination δ₀ of the north pole (degrees).
/// * `spin`: prime meridian angle W (degrees).
///
/// Return
/// ------
/// * The body-fixed → equatorial rotation `Rz(α₀ + 90°) · Rx(90° − δ₀) · Rz(W)`.
pub fn iau_orientation(pole_ra: Degree, pole_dec: Degree, spin: Degree) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), (pole_ra + 90.0) * RADEG)
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), (90.0 - pole_dec) * RADEG)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), spin * RADEG)
}

/// Spherical linear interpolation along the shortest arc.
///
/// `t` is clamped to `[0, 1]`. Nearly parallel inputs fall back to a normalized
/// linear interpolation.
pub fn slerp_shortest(
    a: &UnitQuaternion<f64>,
    b: &UnitQuaternion<f64>,
    t: f64,
) -> UnitQuaternion<f64> {
    let t = t.clamp(0.0, 1.0);
    let qa = a.coords;
    let mut qb = b.coords;

    let mut dot = qa.dot(&qb).clamp(-1.0, 1.0);
    if dot < 0.0 {
        qb = -qb;
        dot = -dot;
    }

    if dot > 1.0 - 1e-10 {
        return UnitQuaternion::new_normalize(Quaternion::from(qa.lerp(&qb, t)));
    }

    let theta = dot.acos() * t;
    let qc = (qb - qa * dot).normalize();
    UnitQuaternion::new_normalize(Quaternion::from(qa * theta.cos() + qc * theta.sin()))
}
