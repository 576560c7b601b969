//! Configuration of the solar-system assembly.
use std::cmp::Ordering::{Equal, Greater, Less};

use crate::constants::{Kilogram, DEFAULT_BARYCENTER_MASS_THRESHOLD};
use crate::kepler::KeplerSolver;
use crate::orrery_errors::OrreryError;
use crate::ref_system::ReferenceFrame;

/// Tunable parameters of [`SolarSystemModel`](crate::solar_system::SolarSystemModel).
///
/// Fields
/// -----------------
/// * `kepler_tolerance` – stop criterion `|ΔE|` of the Kepler solver (radians).
/// * `kepler_max_iter` – iteration cap of the Kepler solver, reaching it is an error.
/// * `light_propagation_speed` – signal speed (AU/s) used by the Sun's barycenter model to
///   delay its companions. `0.0` evaluates every companion at the same instant.
/// * `barycenter_mass_threshold` – planets whose mass does not exceed this value (kg) are
///   left out of the Sun's barycenter correction.
/// * `frame` – frame of the positions and orientations handed out to consumers.
///
/// Validation rules (enforced by [`SolarSystemParamsBuilder::build`])
/// -----------------
/// * `0 < kepler_tolerance ≤ 1e-3`
/// * `kepler_max_iter ≥ 1`
/// * `light_propagation_speed ≥ 0` and finite
/// * `barycenter_mass_threshold ≥ 0`
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystemParams {
    pub kepler_tolerance: f64,
    pub kepler_max_iter: usize,
    pub light_propagation_speed: f64,
    pub barycenter_mass_threshold: Kilogram,
    pub frame: ReferenceFrame,
}

impl SolarSystemParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SolarSystemParamsBuilder {
        SolarSystemParamsBuilder::new()
    }

    /// Solver slice of the parameters.
    pub fn kepler_solver(&self) -> KeplerSolver {
        KeplerSolver {
            tolerance: self.kepler_tolerance,
            max_iter: self.kepler_max_iter,
        }
    }
}

impl Default for SolarSystemParams {
    fn default() -> Self {
        SolarSystemParams {
            kepler_tolerance: 1e-9,
            kepler_max_iter: 100,
            light_propagation_speed: 0.0,
            barycenter_mass_threshold: DEFAULT_BARYCENTER_MASS_THRESHOLD,
            frame: ReferenceFrame::EclipticJ2000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolarSystemParamsBuilder {
    params: SolarSystemParams,
}

impl Default for SolarSystemParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystemParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: SolarSystemParams::default(),
        }
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.kepler_max_iter = v;
        self
    }
    pub fn light_propagation_speed(mut self, v: f64) -> Self {
        self.params.light_propagation_speed = v;
        self
    }
    pub fn barycenter_mass_threshold(mut self, v: Kilogram) -> Self {
        self.params.barycenter_mass_threshold = v;
        self
    }
    pub fn frame(mut self, v: ReferenceFrame) -> Self {
        self.params.frame = v;
        self
    }

    /// Strictly positive; NaN is rejected.
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Non-negative; NaN is rejected.
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
    }

    /// Validate and produce the parameters.
    ///
    /// Errors
    /// -----------------
    /// [`OrreryError::InvalidParameter`] naming the first rule broken.
    pub fn build(self) -> Result<SolarSystemParams, OrreryError> {
        let p = &self.params;

        if !Self::gt0(p.kepler_tolerance) || !Self::le(p.kepler_tolerance, 1e-3) {
            return Err(OrreryError::InvalidParameter(format!(
                "kepler_tolerance must be in (0, 1e-3] (got {})",
                p.kepler_tolerance
            )));
        }
        if p.kepler_max_iter == 0 {
            return Err(OrreryError::InvalidParameter(
                "kepler_max_iter must be >= 1".into(),
            ));
        }
        if !Self::ge0(p.light_propagation_speed) || !p.light_propagation_speed.is_finite() {
            return Err(OrreryError::InvalidParameter(format!(
                "light_propagation_speed must be >= 0 and finite (got {})",
                p.light_propagation_speed
            )));
        }
        if !Self::ge0(p.barycenter_mass_threshold) {
            return Err(OrreryError::InvalidParameter(
                "barycenter_mass_threshold must be >= 0".into(),
            ));
        }

        Ok(self.params)
    }
}
