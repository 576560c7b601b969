//! Position of a central body from the barycenter condition.
//!
//! Given a system whose center of mass sits at a known point `B`, the central body of
//! mass `M` sits at
//!
//! ```text
//! P = B − Σ mᵢ · (pᵢ(tᵢ) − B) / M
//! ```
//!
//! where `pᵢ` are the companions' positions. With a finite propagation speed `c`, each
//! companion is read at the delayed time `tᵢ = t − |pᵢ(t) − B| / c`. The delay is a single
//! correction step, not iterated to a fixed point. `c = 0` disables it.
use log::{debug, trace};
use nalgebra::Vector3;
use std::fmt;

use super::{DynModel, LazyState, PositionModel};
use crate::constants::Kilogram;
use crate::orrery_errors::OrreryError;
use crate::time::TimeValue;

/// Definition of a barycentric position model.
///
/// Built with [`BarycenterSpec::new`] and the `with_*` setters, then turned into a model
/// with [`BarycenterPositionModel::new`].
#[derive(Clone)]
pub struct BarycenterSpec {
    companions: Vec<(Box<dyn PositionModel>, Kilogram)>,
    mass: Kilogram,
    barycenter: Vector3<f64>,
    propagation_speed: f64,
    mass_threshold: Kilogram,
}

impl fmt::Debug for BarycenterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarycenterSpec")
            .field(
                "companion_masses",
                &self.companions.iter().map(|(_, m)| *m).collect::<Vec<_>>(),
            )
            .field("mass", &self.mass)
            .field("barycenter", &self.barycenter)
            .field("propagation_speed", &self.propagation_speed)
            .field("mass_threshold", &self.mass_threshold)
            .finish()
    }
}

impl BarycenterSpec {
    /// Empty system around a central body of mass `mass` (kg), barycenter at the origin,
    /// no propagation delay, every companion kept.
    pub fn new(mass: Kilogram) -> Self {
        BarycenterSpec {
            companions: Vec::new(),
            mass,
            barycenter: Vector3::zeros(),
            propagation_speed: 0.0,
            mass_threshold: 0.0,
        }
    }

    pub fn with_companion(mut self, model: Box<dyn PositionModel>, mass: Kilogram) -> Self {
        self.companions.push((model, mass));
        self
    }

    pub fn with_barycenter(mut self, barycenter: Vector3<f64>) -> Self {
        self.barycenter = barycenter;
        self
    }

    /// Propagation speed in AU/s, `0.0` for instantaneous evaluation.
    pub fn with_propagation_speed(mut self, speed: f64) -> Self {
        self.propagation_speed = speed;
        self
    }

    /// Companions whose mass does not exceed `threshold` (kg) are ignored.
    pub fn with_mass_threshold(mut self, threshold: Kilogram) -> Self {
        self.mass_threshold = threshold;
        self
    }
}

pub struct BarycenterPositionModel {
    companions: Vec<(Box<dyn PositionModel>, Kilogram)>,
    mass: Kilogram,
    barycenter: Vector3<f64>,
    propagation_speed: f64,
    mass_threshold: Kilogram,
    state: LazyState,
    last_result: Vector3<f64>,
}

impl fmt::Debug for BarycenterPositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarycenterPositionModel")
            .field("companions", &self.companions.len())
            .field("mass", &self.mass)
            .field("barycenter", &self.barycenter)
            .field("propagation_speed", &self.propagation_speed)
            .field("time", &self.state.time())
            .finish()
    }
}

impl BarycenterPositionModel {
    /// Validate `spec` and build the model, dropping companions under the mass threshold.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::InvalidParameter`] if the central mass is not strictly positive
    ///   and finite, or the propagation speed is negative or not finite.
    pub fn new(spec: BarycenterSpec) -> Result<Self, OrreryError> {
        if !(spec.mass.is_finite() && spec.mass > 0.0) {
            return Err(OrreryError::InvalidParameter(format!(
                "barycenter mass must be > 0 and finite (got {})",
                spec.mass
            )));
        }
        if !(spec.propagation_speed.is_finite() && spec.propagation_speed >= 0.0) {
            return Err(OrreryError::InvalidParameter(format!(
                "propagation speed must be >= 0 and finite (got {})",
                spec.propagation_speed
            )));
        }

        let total = spec.companions.len();
        let threshold = spec.mass_threshold;
        let companions: Vec<_> = spec
            .companions
            .into_iter()
            .filter(|(_, mass)| *mass > threshold)
            .collect();

        if companions.len() < total {
            debug!(
                "BarycenterPositionModel: {} of {} companions dropped (mass <= {:e} kg)",
                total - companions.len(),
                total,
                threshold
            );
        }

        Ok(BarycenterPositionModel {
            companions,
            mass: spec.mass,
            barycenter: spec.barycenter,
            propagation_speed: spec.propagation_speed,
            mass_threshold: threshold,
            state: LazyState::new(),
            last_result: Vector3::zeros(),
        })
    }

    /// Number of companions taking part in the computation.
    pub fn companion_count(&self) -> usize {
        self.companions.len()
    }

    fn compute(&mut self) -> Result<Vector3<f64>, OrreryError> {
        let time = self.state.time();
        let mut weighted = Vector3::zeros();

        for (model, mass) in self.companions.iter_mut() {
            model.seek(time);
            if self.propagation_speed > 0.0 {
                let distance = (model.position()? - self.barycenter).norm();
                model.seek(time - distance / self.propagation_speed);
            }
            weighted += (model.position()? - self.barycenter) * *mass;
        }

        Ok(self.barycenter - weighted / self.mass)
    }
}

impl DynModel for BarycenterPositionModel {
    fn time(&self) -> TimeValue {
        self.state.time()
    }

    fn seek(&mut self, time: TimeValue) {
        self.state.seek(time);
    }
}

impl PositionModel for BarycenterPositionModel {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        if self.state.is_dirty() {
            trace!("BarycenterPositionModel: recomputing at {}", self.state.time());
            self.last_result = self.compute()?;
            self.state.mark_clean();
        }
        Ok(self.last_result)
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(BarycenterPositionModel {
            companions: self
                .companions
                .iter()
                .map(|(model, mass)| (model.clone_position(), *mass))
                .collect(),
            mass: self.mass,
            barycenter: self.barycenter,
            propagation_speed: self.propagation_speed,
            mass_threshold: self.mass_threshold,
            state: LazyState::new(),
            last_result: Vector3::zeros(),
        })
    }
}
