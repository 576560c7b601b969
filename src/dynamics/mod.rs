//! # Time-seekable dynamic models
//!
//! Every body of the simulation is driven by a small graph of **dynamic models**. A model
//! holds a *current evaluation time*, moved only by [`DynModel::seek`], and answers
//! position and/or orientation queries for that time.
//!
//! ## Overview
//! -----------------
//! * [`DynModel`] – the time cursor (`time`, `seek`). Seeking never fails.
//! * [`PositionModel`] / [`OrientationModel`] – read accessors valid for the last seeked
//!   time. Accessors take `&mut self` because leaf models evaluate lazily; they return a
//!   `Result` so that a Kepler non-convergence reaches the caller.
//! * [`CelestialModel`] – a model answering both queries, what the assembly hands out per
//!   body.
//!
//! ## Cloning
//! -----------------
//! `clone_position` / `clone_orientation` / `clone_celestial` return an **independent**
//! instance: same defining parameters, fresh time cursor (not copied), private caches.
//! Cloning is the only supported way for two consumers to evaluate the same trajectory at
//! different times, e.g. a live view and a trail sampler.
//!
//! ## Building blocks
//! -----------------
//! * Leaves: [`KeplerModel`], [`IauOrientationModel`], [`BarycenterPositionModel`].
//! * Combinators: [`StaticPosition`], [`StaticOrientation`], [`Composed`], [`Blending`],
//!   [`Transformed`], [`RelativePosition`], [`Dummy`].
//!
//! Before the first `seek`, every model evaluates at J2000.0.
use nalgebra::{UnitQuaternion, Vector3};

use crate::orrery_errors::OrreryError;
use crate::time::TimeValue;

pub mod barycenter;
pub mod iau_orientation;
pub mod kepler_model;
pub mod variants;

pub use barycenter::{BarycenterPositionModel, BarycenterSpec};
pub use iau_orientation::{IauFunction, IauOrientationModel, IauRotation};
pub use kepler_model::KeplerModel;
pub use variants::{
    Blending, Composed, Dummy, RelativePosition, StaticOrientation, StaticPosition, Transform,
    Transformed,
};

/// Time cursor shared by all models.
pub trait DynModel: Send {
    /// Time of the last `seek`, J2000.0 if never seeked.
    fn time(&self) -> TimeValue;

    fn seek(&mut self, time: TimeValue);
}

pub trait PositionModel: DynModel {
    /// Position at the current time, in AU.
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError>;

    fn clone_position(&self) -> Box<dyn PositionModel>;
}

pub trait OrientationModel: DynModel {
    /// Body-fixed → reference frame rotation at the current time.
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError>;

    fn clone_orientation(&self) -> Box<dyn OrientationModel>;
}

pub trait CelestialModel: PositionModel + OrientationModel {
    fn clone_celestial(&self) -> Box<dyn CelestialModel>;
}

impl Clone for Box<dyn PositionModel> {
    fn clone(&self) -> Self {
        self.clone_position()
    }
}

impl Clone for Box<dyn OrientationModel> {
    fn clone(&self) -> Self {
        self.clone_orientation()
    }
}

impl Clone for Box<dyn CelestialModel> {
    fn clone(&self) -> Self {
        self.clone_celestial()
    }
}

/// Embeddable cache cursor for models whose evaluation is costly.
///
/// Tracks the current time, the last time a recomputation was requested for, and a dirty
/// flag. Seeking the time already seen keeps the cached result valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LazyState {
    time: TimeValue,
    last_time: Option<TimeValue>,
    dirty: bool,
}

impl Default for LazyState {
    fn default() -> Self {
        LazyState {
            time: TimeValue::ZERO,
            last_time: None,
            dirty: true,
        }
    }
}

impl LazyState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn time(&self) -> TimeValue {
        self.time
    }

    pub fn seek(&mut self, time: TimeValue) {
        self.time = time;
        if self.last_time != Some(time) {
            self.dirty = true;
            self.last_time = Some(time);
        }
    }

    /// Force the next read to recompute, for when defining parameters change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod dynamics_test {
    use super::*;

    #[test]
    fn test_lazy_state_starts_dirty() {
        let state = LazyState::new();
        assert!(state.is_dirty());
        assert_eq!(state.time(), TimeValue::ZERO);
    }

    #[test]
    fn test_lazy_state_same_time_stays_clean() {
        let mut state = LazyState::new();
        state.seek(TimeValue::from(10_i64));
        state.mark_clean();

        state.seek(TimeValue::from(10_i64));
        assert!(!state.is_dirty());

        state.seek(TimeValue::from(11_i64));
        assert!(state.is_dirty());
        assert_eq!(state.time(), TimeValue::from(11_i64));
    }

    #[test]
    fn test_lazy_state_mark_dirty() {
        let mut state = LazyState::new();
        state.seek(TimeValue::from(5_i64));
        state.mark_clean();
        state.mark_dirty();
        assert!(state.is_dirty());
    }
}
