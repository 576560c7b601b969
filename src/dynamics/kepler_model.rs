//! Heliocentric position from a drifting Keplerian element set.
//!
//! Follows the JPL approximate-positions recipe: elements are drifted to the requested
//! date, Kepler's equation is solved for the eccentric anomaly and the perifocal position
//! is rotated into the J2000 ecliptic frame (x axis toward the equinox).
use log::trace;
use nalgebra::Vector3;

use super::{DynModel, LazyState, PositionModel};
use crate::kepler::{perifocal_position, perifocal_to_ecliptic, solve_kepler_equation, KeplerSolver};
use crate::keplerian_element::OrbitalElements;
use crate::orrery_errors::OrreryError;
use crate::time::TimeValue;

#[derive(Debug, Clone)]
pub struct KeplerModel {
    elements: OrbitalElements,
    solver: KeplerSolver,
    state: LazyState,
    last_result: Vector3<f64>,
}

impl KeplerModel {
    pub fn new(elements: OrbitalElements, solver: KeplerSolver) -> Self {
        KeplerModel {
            elements,
            solver,
            state: LazyState::new(),
            last_result: Vector3::zeros(),
        }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Replace the element set; the next read recomputes.
    pub fn set_elements(&mut self, elements: OrbitalElements) {
        self.elements = elements;
        self.state.mark_dirty();
    }

    /// Position at an arbitrary time, without touching the cursor or the cache.
    pub fn position_at(&self, time: TimeValue) -> Result<Vector3<f64>, OrreryError> {
        let (centuries, clamped) = self.elements.centuries_at(time);
        let el = self.elements.at(centuries, clamped);

        let ecc_anom = solve_kepler_equation(el.eccentricity, el.mean_anomaly, &self.solver)?;
        let perifocal = perifocal_position(el.semi_major_axis, el.eccentricity, ecc_anom);

        Ok(perifocal_to_ecliptic(
            el.periapsis_argument,
            el.inclination,
            el.ascending_node_longitude,
        ) * perifocal)
    }
}

impl DynModel for KeplerModel {
    fn time(&self) -> TimeValue {
        self.state.time()
    }

    fn seek(&mut self, time: TimeValue) {
        self.state.seek(time);
    }
}

impl PositionModel for KeplerModel {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        if self.state.is_dirty() {
            trace!("KeplerModel: recomputing position at {}", self.state.time());
            self.last_result = self.position_at(self.state.time())?;
            self.state.mark_clean();
        }
        Ok(self.last_result)
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(KeplerModel::new(self.elements, self.solver))
    }
}
