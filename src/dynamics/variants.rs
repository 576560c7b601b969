//! Combinators over dynamic models.
use nalgebra::{UnitQuaternion, Vector3};
use std::fmt;
use std::sync::Arc;

use super::{CelestialModel, DynModel, OrientationModel, PositionModel};
use crate::orrery_errors::OrreryError;
use crate::ref_system::slerp_shortest;
use crate::time::TimeValue;

/// Pure `(time, position, orientation) → (position', orientation')` map applied by
/// [`Transformed`], typically a reference-frame change.
pub type Transform = Arc<
    dyn Fn(TimeValue, Vector3<f64>, UnitQuaternion<f64>) -> (Vector3<f64>, UnitQuaternion<f64>)
        + Send
        + Sync,
>;

/// Constant position.
#[derive(Debug, Clone)]
pub struct StaticPosition {
    value: Vector3<f64>,
    time: TimeValue,
}

impl StaticPosition {
    pub fn new(value: Vector3<f64>) -> Self {
        StaticPosition {
            value,
            time: TimeValue::ZERO,
        }
    }
}

impl DynModel for StaticPosition {
    fn time(&self) -> TimeValue {
        self.time
    }

    fn seek(&mut self, time: TimeValue) {
        self.time = time;
    }
}

impl PositionModel for StaticPosition {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        Ok(self.value)
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(StaticPosition::new(self.value))
    }
}

/// Constant orientation.
#[derive(Debug, Clone)]
pub struct StaticOrientation {
    value: UnitQuaternion<f64>,
    time: TimeValue,
}

impl StaticOrientation {
    pub fn new(value: UnitQuaternion<f64>) -> Self {
        StaticOrientation {
            value,
            time: TimeValue::ZERO,
        }
    }

    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity())
    }
}

impl DynModel for StaticOrientation {
    fn time(&self) -> TimeValue {
        self.time
    }

    fn seek(&mut self, time: TimeValue) {
        self.time = time;
    }
}

impl OrientationModel for StaticOrientation {
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
        Ok(self.value)
    }

    fn clone_orientation(&self) -> Box<dyn OrientationModel> {
        Box::new(StaticOrientation::new(self.value))
    }
}

/// Position of one model joined with the orientation of another.
pub struct Composed {
    position: Box<dyn PositionModel>,
    orientation: Box<dyn OrientationModel>,
    time: TimeValue,
}

impl Composed {
    pub fn new(position: Box<dyn PositionModel>, orientation: Box<dyn OrientationModel>) -> Self {
        Composed {
            position,
            orientation,
            time: TimeValue::ZERO,
        }
    }

    pub fn position_model_mut(&mut self) -> &mut dyn PositionModel {
        self.position.as_mut()
    }

    pub fn orientation_model_mut(&mut self) -> &mut dyn OrientationModel {
        self.orientation.as_mut()
    }
}

impl fmt::Debug for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composed").field("time", &self.time).finish()
    }
}

impl DynModel for Composed {
    fn time(&self) -> TimeValue {
        self.time
    }

    fn seek(&mut self, time: TimeValue) {
        self.time = time;
        self.position.seek(time);
        self.orientation.seek(time);
    }
}

impl PositionModel for Composed {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        self.position.position()
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        self.position.clone_position()
    }
}

impl OrientationModel for Composed {
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
        self.orientation.orientation()
    }

    fn clone_orientation(&self) -> Box<dyn OrientationModel> {
        self.orientation.clone_orientation()
    }
}

impl CelestialModel for Composed {
    fn clone_celestial(&self) -> Box<dyn CelestialModel> {
        Box::new(Composed::new(
            self.position.clone_position(),
            self.orientation.clone_orientation(),
        ))
    }
}

/// Interpolation between two models: `lerp` on positions, shortest-arc `slerp` on
/// orientations. A factor of 0 yields `a`, 1 yields `b`.
pub struct Blending {
    a: Box<dyn CelestialModel>,
    b: Box<dyn CelestialModel>,
    factor: f64,
    time: TimeValue,
}

impl Blending {
    pub fn new(a: Box<dyn CelestialModel>, b: Box<dyn CelestialModel>, factor: f64) -> Self {
        Blending {
            a,
            b,
            factor,
            time: TimeValue::ZERO,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn set_factor(&mut self, factor: f64) {
        self.factor = factor;
    }

    fn fresh(&self) -> Self {
        Blending::new(
            self.a.clone_celestial(),
            self.b.clone_celestial(),
            self.factor,
        )
    }
}

impl DynModel for Blending {
    fn time(&self) -> TimeValue {
        self.time
    }

    fn seek(&mut self, time: TimeValue) {
        self.time = time;
        self.a.seek(time);
        self.b.seek(time);
    }
}

impl PositionModel for Blending {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        let pa = self.a.position()?;
        let pb = self.b.position()?;
        Ok(pa.lerp(&pb, self.factor))
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(self.fresh())
    }
}

impl OrientationModel for Blending {
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
        let qa = self.a.orientation()?;
        let qb = self.b.orientation()?;
        Ok(slerp_shortest(&qa, &qb, self.factor))
    }

    fn clone_orientation(&self) -> Box<dyn OrientationModel> {
        Box::new(self.fresh())
    }
}

impl CelestialModel for Blending {
    fn clone_celestial(&self) -> Box<dyn CelestialModel> {
        Box::new(self.fresh())
    }
}

/// Delegate followed by a pure [`Transform`]; the transformed pair is cached until the
/// next `seek`.
pub struct Transformed {
    transform: Transform,
    delegate: Box<dyn CelestialModel>,
    cached: Option<(Vector3<f64>, UnitQuaternion<f64>)>,
}

impl Transformed {
    pub fn new(delegate: Box<dyn CelestialModel>, transform: Transform) -> Self {
        Transformed {
            transform,
            delegate,
            cached: None,
        }
    }

    fn fresh(&self) -> Self {
        Transformed::new(self.delegate.clone_celestial(), Arc::clone(&self.transform))
    }

    fn update(&mut self) -> Result<(Vector3<f64>, UnitQuaternion<f64>), OrreryError> {
        if let Some(cached) = self.cached {
            return Ok(cached);
        }
        let position = self.delegate.position()?;
        let orientation = self.delegate.orientation()?;
        let result = (self.transform)(self.delegate.time(), position, orientation);
        self.cached = Some(result);
        Ok(result)
    }
}

impl DynModel for Transformed {
    fn time(&self) -> TimeValue {
        self.delegate.time()
    }

    fn seek(&mut self, time: TimeValue) {
        self.delegate.seek(time);
        self.cached = None;
    }
}

impl PositionModel for Transformed {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        Ok(self.update()?.0)
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(self.fresh())
    }
}

impl OrientationModel for Transformed {
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
        Ok(self.update()?.1)
    }

    fn clone_orientation(&self) -> Box<dyn OrientationModel> {
        Box::new(self.fresh())
    }
}

impl CelestialModel for Transformed {
    fn clone_celestial(&self) -> Box<dyn CelestialModel> {
        Box::new(self.fresh())
    }
}

/// Position of `delegate` expressed in the frame of `reference`: `delegate + reference`.
pub struct RelativePosition {
    delegate: Box<dyn PositionModel>,
    reference: Box<dyn PositionModel>,
    time: TimeValue,
}

impl RelativePosition {
    pub fn new(delegate: Box<dyn PositionModel>, reference: Box<dyn PositionModel>) -> Self {
        RelativePosition {
            delegate,
            reference,
            time: TimeValue::ZERO,
        }
    }
}

impl DynModel for RelativePosition {
    fn time(&self) -> TimeValue {
        self.time
    }

    fn seek(&mut self, time: TimeValue) {
        self.time = time;
        self.delegate.seek(time);
        self.reference.seek(time);
    }
}

impl PositionModel for RelativePosition {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        Ok(self.delegate.position()? + self.reference.position()?)
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(RelativePosition::new(
            self.delegate.clone_position(),
            self.reference.clone_position(),
        ))
    }
}

/// Placeholder: origin, identity orientation.
#[derive(Debug, Clone, Default)]
pub struct Dummy {
    time: TimeValue,
}

impl Dummy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DynModel for Dummy {
    fn time(&self) -> TimeValue {
        self.time
    }

    fn seek(&mut self, time: TimeValue) {
        self.time = time;
    }
}

impl PositionModel for Dummy {
    fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
        Ok(Vector3::zeros())
    }

    fn clone_position(&self) -> Box<dyn PositionModel> {
        Box::new(Dummy::new())
    }
}

impl OrientationModel for Dummy {
    fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
        Ok(UnitQuaternion::identity())
    }

    fn clone_orientation(&self) -> Box<dyn OrientationModel> {
        Box::new(Dummy::new())
    }
}

impl CelestialModel for Dummy {
    fn clone_celestial(&self) -> Box<dyn CelestialModel> {
        Box::new(Dummy::new())
    }
}

#[cfg(test)]
mod variants_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    /// Position moving at 1 AU/s along x, orientation turning at 1 rad/s about z.
    #[derive(Debug, Clone, Default)]
    struct Linear {
        time: TimeValue,
    }

    impl DynModel for Linear {
        fn time(&self) -> TimeValue {
            self.time
        }

        fn seek(&mut self, time: TimeValue) {
            self.time = time;
        }
    }

    impl PositionModel for Linear {
        fn position(&mut self) -> Result<Vector3<f64>, OrreryError> {
            Ok(Vector3::new(self.time.to_f64(), 0.0, 0.0))
        }

        fn clone_position(&self) -> Box<dyn PositionModel> {
            Box::new(Linear::default())
        }
    }

    impl OrientationModel for Linear {
        fn orientation(&mut self) -> Result<UnitQuaternion<f64>, OrreryError> {
            Ok(UnitQuaternion::from_axis_angle(
                &Vector3::z_axis(),
                self.time.to_f64(),
            ))
        }

        fn clone_orientation(&self) -> Box<dyn OrientationModel> {
            Box::new(Linear::default())
        }
    }

    impl CelestialModel for Linear {
        fn clone_celestial(&self) -> Box<dyn CelestialModel> {
            Box::new(Linear::default())
        }
    }

    fn static_body(x: f64, angle: f64) -> Box<dyn CelestialModel> {
        Box::new(Composed::new(
            Box::new(StaticPosition::new(Vector3::new(x, 0.0, 0.0))),
            Box::new(StaticOrientation::new(UnitQuaternion::from_axis_angle(
                &Vector3::z_axis(),
                angle,
            ))),
        ))
    }

    #[test]
    fn test_static_ignores_time() {
        let mut p = StaticPosition::new(Vector3::new(1.0, 2.0, 3.0));
        p.seek(TimeValue::from(1e9));
        assert_eq!(p.position().unwrap(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(p.time(), TimeValue::from(1e9));
        assert_eq!(p.clone_position().time(), TimeValue::ZERO);
    }

    #[test]
    fn test_composed_seeks_both_parts() {
        let mut c = Composed::new(Box::new(Linear::default()), Box::new(Linear::default()));
        c.seek(TimeValue::from(0.5));
        assert_eq!(c.position().unwrap(), Vector3::new(0.5, 0.0, 0.0));
        assert_abs_diff_eq!(c.orientation().unwrap().angle(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_blending_interpolates() {
        let mut blend = Blending::new(static_body(0.0, 0.0), static_body(4.0, FRAC_PI_2), 0.25);
        blend.seek(TimeValue::from(3_i64));
        assert_abs_diff_eq!(
            blend.position().unwrap(),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            blend.orientation().unwrap().angle(),
            FRAC_PI_2 / 4.0,
            epsilon = 1e-12
        );

        blend.set_factor(1.0);
        assert_abs_diff_eq!(
            blend.position().unwrap(),
            Vector3::new(4.0, 0.0, 0.0),
            epsilon = 1e-15
        );
        assert_eq!(blend.factor(), 1.0);
    }

    #[test]
    fn test_transformed_applies_and_caches() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shift: Transform = Arc::new(
            move |time: TimeValue, p: Vector3<f64>, q: UnitQuaternion<f64>| {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                (p + Vector3::new(0.0, time.to_f64(), 0.0), q)
            },
        );

        let mut model = Transformed::new(Box::new(Linear::default()), shift);
        model.seek(TimeValue::from(2_i64));
        assert_eq!(model.position().unwrap(), Vector3::new(2.0, 2.0, 0.0));
        model.orientation().unwrap();
        model.position().unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        model.seek(TimeValue::from(3_i64));
        assert_eq!(model.position().unwrap(), Vector3::new(3.0, 3.0, 0.0));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_relative_position_adds_reference() {
        let mut rel = RelativePosition::new(
            Box::new(Linear::default()),
            Box::new(StaticPosition::new(Vector3::new(10.0, 1.0, 0.0))),
        );
        rel.seek(TimeValue::from(5_i64));
        assert_eq!(rel.position().unwrap(), Vector3::new(15.0, 1.0, 0.0));
    }

    #[test]
    fn test_dummy() {
        let mut d = Dummy::new();
        d.seek(TimeValue::from(42_i64));
        assert_eq!(d.position().unwrap(), Vector3::zeros());
        assert_eq!(d.orientation().unwrap(), UnitQuaternion::identity());
    }

    #[test]
    fn test_clone_has_fresh_cursor_and_independent_state() {
        let mut original = Composed::new(Box::new(Linear::default()), Box::new(Linear::default()));
        original.seek(TimeValue::from(7_i64));

        let mut clone = original.clone_celestial();
        assert_eq!(clone.time(), TimeValue::ZERO);

        clone.seek(TimeValue::from(1_i64));
        assert_eq!(original.position().unwrap(), Vector3::new(7.0, 0.0, 0.0));
        assert_eq!(clone.position().unwrap(), Vector3::new(1.0, 0.0, 0.0));
    }
}
