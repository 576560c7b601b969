//! # Trajectory sampling
//!
//! Helpers for history/trail consumers. They work on a **clone** of the model they are
//! given, so the caller's model keeps its time cursor and cache, and accept samples in
//! any order and outside the validity window of the orbital elements (secular terms are
//! clamped there, the mean motion is not).
use nalgebra::Vector3;
use std::ops::RangeInclusive;

use crate::dynamics::PositionModel;
use crate::orrery_errors::OrreryError;
use crate::time::TimeValue;

/// One position per sample time, in sample order.
pub fn sample_positions<M: PositionModel + ?Sized>(
    model: &M,
    times: &[TimeValue],
) -> Result<Vec<Vector3<f64>>, OrreryError> {
    let mut model = model.clone_position();
    times
        .iter()
        .map(|&time| {
            model.seek(time);
            model.position()
        })
        .collect()
}

/// Positions of `model` relative to `reference` at each sample time.
pub fn sample_relative<M, R>(
    model: &M,
    reference: &R,
    times: &[TimeValue],
) -> Result<Vec<Vector3<f64>>, OrreryError>
where
    M: PositionModel + ?Sized,
    R: PositionModel + ?Sized,
{
    let mut model = model.clone_position();
    let mut reference = reference.clone_position();
    times
        .iter()
        .map(|&time| {
            model.seek(time);
            reference.seek(time);
            Ok(model.position()? - reference.position()?)
        })
        .collect()
}

/// Indices `k` of the step instants `k · step` lying in `[start, end]`.
///
/// Errors
/// ----------
/// * [`OrreryError::InvalidTimeStep`] if `step <= 0`.
pub fn step_range(
    start: TimeValue,
    end: TimeValue,
    step: i64,
) -> Result<RangeInclusive<i64>, OrreryError> {
    if step <= 0 {
        return Err(OrreryError::InvalidTimeStep(step));
    }
    Ok(start.ceil_div(step)..=end.floor_div(step))
}

/// Sample `model` on the step grid `k · step` (seconds) covering `[start, end]`.
///
/// Returns the sample instants with their positions; the grid is aligned on J2000.0 so
/// successive calls over sliding windows share their sample points.
pub fn sample_steps<M: PositionModel + ?Sized>(
    model: &M,
    start: TimeValue,
    end: TimeValue,
    step: i64,
) -> Result<Vec<(TimeValue, Vector3<f64>)>, OrreryError> {
    let times: Vec<TimeValue> = step_range(start, end, step)?
        .map(|k| TimeValue::from(k.saturating_mul(step)))
        .collect();
    let positions = sample_positions(model, &times)?;
    Ok(times.into_iter().zip(positions).collect())
}

#[cfg(test)]
mod trail_test {
    use super::*;
    use crate::dynamics::{DynModel, StaticPosition};

    #[derive(Debug, Clone, Default)]
    struct Ramp {
        time: TimeValue,
    }

    impl DynModel for Ramp {
        fn time(&self) -> TimeValue {
            self.time
        }

        fn seek(&mut self, time: TimeValue) {
            self.time = time;
        }
    }

    impl PositionModel for Ramp {
        fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
            Ok(Vector3::new(self.time.to_f64(), 0.0, 0.0))
        }

        fn clone_position(&self) -> Box<dyn PositionModel> {
            Box::new(Ramp::default())
        }
    }

    #[test]
    fn test_sample_positions_any_order() {
        let mut model = Ramp::default();
        model.seek(TimeValue::from(99_i64));

        let times = [5_i64, -3, 12].map(TimeValue::from);
        let positions = sample_positions(&model, &times).unwrap();
        assert_eq!(
            positions.iter().map(|p| p.x).collect::<Vec<_>>(),
            vec![5.0, -3.0, 12.0]
        );
        // caller's cursor untouched
        assert_eq!(model.time(), TimeValue::from(99_i64));
    }

    #[test]
    fn test_sample_relative() {
        let model = Ramp::default();
        let reference = StaticPosition::new(Vector3::new(1.0, 1.0, 0.0));
        let out = sample_relative(&model, &reference, &[TimeValue::from(4_i64)]).unwrap();
        assert_eq!(out, vec![Vector3::new(3.0, -1.0, 0.0)]);
    }

    #[test]
    fn test_step_range() {
        let range = step_range(TimeValue::from(-7.5), TimeValue::from(10.0), 5).unwrap();
        assert_eq!(range, -1..=2);

        let exact = step_range(TimeValue::from(10_i64), TimeValue::from(10_i64), 5).unwrap();
        assert_eq!(exact.collect::<Vec<_>>(), vec![2]);

        let empty = step_range(TimeValue::from(11_i64), TimeValue::from(14_i64), 5).unwrap();
        assert!(empty.is_empty());

        assert_eq!(
            step_range(TimeValue::ZERO, TimeValue::from(1_i64), 0).unwrap_err(),
            OrreryError::InvalidTimeStep(0)
        );
    }

    #[test]
    fn test_sample_steps() {
        let samples = sample_steps(
            &Ramp::default(),
            TimeValue::from(0.5),
            TimeValue::from(30.0),
            10,
        )
        .unwrap();
        let xs: Vec<f64> = samples.iter().map(|(_, p)| p.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
        assert_eq!(samples[0].0, TimeValue::from(10_i64));
    }
}
