//! # Solar-system assembly
//!
//! Wires the ten bodies of the solar system out of the building blocks of
//! [`crate::dynamics`]:
//!
//! | Body    | Position                                                  | Orientation |
//! |---------|-----------------------------------------------------------|-------------|
//! | Sun     | barycenter correction over the planets                    | IAU         |
//! | Planets | Kepler model on the JPL 3000 BC – 3000 AD elements        | IAU         |
//! | Earth   | Earth–Moon barycenter + correction for the Moon's mass    | IAU         |
//! | Moon    | Earth–Moon barycenter + geocentric lunar orbit            | IAU         |
//!
//! Positions are heliocentric-ecliptic J2000 in AU. IAU orientations are rotated into the
//! same frame. With [`ReferenceFrame::EquatorialJ2000`] every body is wrapped in a
//! [`Transformed`] turning both to the J2000 equator, so the stored models, and the ones
//! a [`crate::registry::UniverseDynamicRegistry`] binds to, already speak the output frame.
//!
//! ## Example
//! -----------------
//! ```rust,no_run
//! use orrery::solar_system::{Body, SolarSystemModel, SolarSystemParams};
//! use orrery::time::TimeValue;
//!
//! # fn demo() -> Result<(), orrery::orrery_errors::OrreryError> {
//! let mut model = SolarSystemModel::new(&SolarSystemParams::default())?;
//! model.seek(TimeValue::from(86_400_i64 * 365));
//! let mars = model.position(Body::Mars)?;
//! # Ok(())
//! # }
//! ```
use log::trace;
use nalgebra::{UnitQuaternion, Vector3};
use std::fmt;
use std::sync::Arc;

use crate::constants::{
    Kilogram, EARTH_MASS, JUPITER_MASS, MARS_MASS, MERCURY_MASS, MOON_MASS, NEPTUNE_MASS,
    SATURN_MASS, SUN_MASS, URANUS_MASS, VENUS_MASS,
};
use crate::dynamics::{
    BarycenterPositionModel, BarycenterSpec, CelestialModel, Composed, IauFunction,
    IauOrientationModel, KeplerModel, PositionModel, RelativePosition, Transform, Transformed,
};
use crate::keplerian_element::{ElementTable, OrbitalElements};
use crate::orrery_errors::OrreryError;
use crate::ref_system::{equatorial_to_ecliptic, transform_to_equatorial, ReferenceFrame};
use crate::registry::ModelProvider;
use crate::time::TimeValue;

pub mod elements;
pub mod params;

pub use params::{SolarSystemParams, SolarSystemParamsBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    pub fn mass(&self) -> Kilogram {
        match self {
            Body::Sun => SUN_MASS,
            Body::Mercury => MERCURY_MASS,
            Body::Venus => VENUS_MASS,
            Body::Earth => EARTH_MASS,
            Body::Moon => MOON_MASS,
            Body::Mars => MARS_MASS,
            Body::Jupiter => JUPITER_MASS,
            Body::Saturn => SATURN_MASS,
            Body::Uranus => URANUS_MASS,
            Body::Neptune => NEPTUNE_MASS,
        }
    }

    /// Position of the body in [`Body::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ten-body assembly. Owns one model per [`Body`], in the configured frame.
pub struct SolarSystemModel {
    bodies: Vec<Box<dyn CelestialModel>>,
    frame: ReferenceFrame,
    time: TimeValue,
    last_time: Option<TimeValue>,
}

impl fmt::Debug for SolarSystemModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolarSystemModel")
            .field("frame", &self.frame)
            .field("time", &self.time)
            .finish()
    }
}

impl SolarSystemModel {
    /// Build the assembly.
    ///
    /// Errors
    /// ----------
    /// * [`OrreryError::InvalidParameter`] if the barycenter parameters (propagation speed)
    ///   are rejected.
    pub fn new(params: &SolarSystemParams) -> Result<Self, OrreryError> {
        let solver = params.kepler_solver();
        let kepler = |table: &ElementTable| KeplerModel::new(OrbitalElements::from(table), solver);

        let mercury = kepler(&elements::MERCURY);
        let venus = kepler(&elements::VENUS);
        let earth_moon = kepler(&elements::EARTH_MOON_BARYCENTER);
        let mars = kepler(&elements::MARS);
        let jupiter = kepler(&elements::JUPITER);
        let saturn = kepler(&elements::SATURN);
        let uranus = kepler(&elements::URANUS);
        let neptune = kepler(&elements::NEPTUNE);
        let moon_geocentric = KeplerModel::new(elements::moon_geocentric(), solver);

        let sun = BarycenterPositionModel::new(
            BarycenterSpec::new(SUN_MASS)
                .with_companion(mercury.clone_position(), MERCURY_MASS)
                .with_companion(venus.clone_position(), VENUS_MASS)
                .with_companion(earth_moon.clone_position(), EARTH_MASS + MOON_MASS)
                .with_companion(mars.clone_position(), MARS_MASS)
                .with_companion(jupiter.clone_position(), JUPITER_MASS)
                .with_companion(saturn.clone_position(), SATURN_MASS)
                .with_companion(uranus.clone_position(), URANUS_MASS)
                .with_companion(neptune.clone_position(), NEPTUNE_MASS)
                .with_propagation_speed(params.light_propagation_speed)
                .with_mass_threshold(params.barycenter_mass_threshold),
        )?;

        // Earth sits opposite the Moon around their barycenter
        let earth_offset = BarycenterPositionModel::new(
            BarycenterSpec::new(EARTH_MASS)
                .with_companion(moon_geocentric.clone_position(), MOON_MASS),
        )?;
        let earth = RelativePosition::new(Box::new(earth_offset), earth_moon.clone_position());
        let moon = RelativePosition::new(Box::new(moon_geocentric), earth_moon.clone_position());

        let to_ecliptic = equatorial_to_ecliptic();
        let output_frame = params.frame;
        let compose = |position: Box<dyn PositionModel>, rotation: IauFunction| {
            let body = Box::new(Composed::new(
                position,
                Box::new(IauOrientationModel::new(rotation).with_frame(to_ecliptic)),
            ));
            match output_frame {
                ReferenceFrame::EclipticJ2000 => body as Box<dyn CelestialModel>,
                ReferenceFrame::EquatorialJ2000 => {
                    let transform: Transform = Arc::new(transform_to_equatorial);
                    Box::new(Transformed::new(body, transform))
                }
            }
        };

        let bodies = vec![
            compose(Box::new(sun), elements::sun_rotation),
            compose(Box::new(mercury), elements::mercury_rotation),
            compose(Box::new(venus), elements::venus_rotation),
            compose(Box::new(earth), elements::earth_rotation),
            compose(Box::new(moon), elements::moon_rotation),
            compose(Box::new(mars), elements::mars_rotation),
            compose(Box::new(jupiter), elements::jupiter_rotation),
            compose(Box::new(saturn), elements::saturn_rotation),
            compose(Box::new(uranus), elements::uranus_rotation),
            compose(Box::new(neptune), elements::neptune_rotation),
        ];
        debug_assert_eq!(bodies.len(), Body::ALL.len());

        Ok(SolarSystemModel {
            bodies,
            frame: params.frame,
            time: TimeValue::ZERO,
            last_time: None,
        })
    }

    pub fn frame(&self) -> ReferenceFrame {
        self.frame
    }

    pub fn time(&self) -> TimeValue {
        self.time
    }

    /// Move every body to `time`. Does nothing if the assembly is already there.
    pub fn seek(&mut self, time: TimeValue) {
        if self.last_time == Some(time) {
            trace!("SolarSystemModel already at {time}, seek skipped");
            return;
        }
        self.time = time;
        self.last_time = Some(time);
        for body in self.bodies.iter_mut() {
            body.seek(time);
        }
    }

    /// Read-only view of a body's model, in the configured frame.
    ///
    /// Trail consumers clone it (see [`crate::trail`]); moving the body itself goes
    /// through [`SolarSystemModel::seek`] or a registry binding.
    pub fn body(&self, body: Body) -> &dyn CelestialModel {
        self.bodies[body.index()].as_ref()
    }

    /// Position of `body` at the current time, in the configured frame.
    pub fn position(&mut self, body: Body) -> Result<Vector3<f64>, OrreryError> {
        self.bodies[body.index()].position()
    }

    /// Orientation of `body` at the current time, in the configured frame.
    pub fn orientation(&mut self, body: Body) -> Result<UnitQuaternion<f64>, OrreryError> {
        self.bodies[body.index()].orientation()
    }
}

impl ModelProvider<Body> for SolarSystemModel {
    fn model_mut(&mut self, body: &Body) -> Option<&mut (dyn CelestialModel + 'static)> {
        // the caller may move this body alone: the next assembly seek must cascade
        self.last_time = None;
        Some(self.bodies[body.index()].as_mut())
    }
}
