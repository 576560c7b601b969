//! Body orientation from IAU/WGCCRE rotational elements.
use log::trace;
use nalgebra::UnitQuaternion;

use super::{DynModel, LazyState, OrientationModel};
use crate::constants::{Degree, JulianCentury};
use crate::orrery_errors::OrreryError;
use crate::ref_system::iau_orientation;
use crate::time::TimeValue;

/// Rotational elements at a given date, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IauRotation {
    /// α₀, right ascension of the north pole
    pub pole_ra: Degree,
    /// δ₀, declination of the north pole
    pub pole_dec: Degree,
    /// W, prime meridian angle
    pub spin: Degree,
}

/// Rotational elements as a function of `(days, centuries)` since J2000.0.
pub type IauFunction = fn(f64, JulianCentury) -> IauRotation;

/// Orientation model evaluating an [`IauFunction`].
///
/// The raw IAU orientation is relative to the J2000 equator; `frame` is applied on the
/// left so the result can be expressed in another frame (e.g. the J2000 ecliptic).
#[derive(Debug, Clone)]
pub struct IauOrientationModel {
    elements: IauFunction,
    frame: UnitQuaternion<f64>,
    state: LazyState,
    last_result: UnitQuaternion<f64>,
}

impl IauOrientationModel {
    pub fn new(elements: IauFunction) -> Self {
        IauOrientationModel {
            elements,
            frame: UnitQuaternion::identity(),
            state: LazyState::new(),
            last_result: UnitQuaternion::identity(),
        }
    }

    pub fn with_frame(mut self, frame: UnitQuaternion<f64>) -> Self {
        self.frame = frame;
        self.state.mark_dirty();
        self
    }

    /// Rotational elements at an arbitrary time.
    pub fn rotation_at(&self, time: TimeValue) -> IauRotation {
        (self.elements)(time.days(), time.centuries())
    }

    pub fn orientation_at(&self, time: TimeValue) -> UnitQuaternion<f64> {
        let rot = self.rotation_at(time);
        self.frame * iau_orientation(rot.pole_ra, rot.pole_dec, rot.spin)
    }
}

impl DynModel for IauOrientationModel {
    fn time(&self) -> TimeValue {
        self.state.time()
    }

    fn seek(&mut self, time: TimeValue) {
        self.state.seek(time);
    }
}

impl OrientationModel for IauOrientationModel {
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
        if self.state.is_dirty() {
            trace!("IauOrientationModel: recomputing orientation at {}", self.state.time());
            self.last_result = self.orientation_at(self.state.time());
            self.state.mark_clean();
        }
        Ok(self.last_result)
    }

    fn clone_orientation(&self) -> Box<dyn OrientationModel> {
        Box::new(IauOrientationModel::new(self.elements).with_frame(self.frame))
    }
}
