//! # Orrery
//!
//! Time-seekable dynamics of the solar system: approximate heliocentric positions of the
//! Sun, the eight major planets and the Moon from Keplerian element sets, body orientations
//! from the IAU rotational elements, and the plumbing that lets several consumers evaluate
//! them at different times.
//!
//! ## Overview
//! -----------------
//! * [`time`] – fixed-point [`TimeValue`](time::TimeValue), seconds since J2000.0.
//! * [`kepler`] / [`keplerian_element`] – Kepler's equation and drifting element sets.
//! * [`ref_system`] – ecliptic/equatorial frames, IAU orientation quaternions.
//! * [`dynamics`] – the model contract (`seek`, `position`, `orientation`, clone) and its
//!   variants.
//! * [`solar_system`] – the ten-body assembly and its configuration.
//! * [`registry`] – binding external handles to the models a provider owns.
//! * [`trail`] – sampling a model over many instants.
//!
//! Units: AU, SI seconds, radians (degrees in published coefficient tables), kilograms.
pub mod constants;
pub mod dynamics;
pub mod kepler;
pub mod keplerian_element;
pub mod orrery_errors;
pub mod ref_system;
pub mod registry;
pub mod solar_system;
pub mod time;
pub mod trail;

pub use dynamics::{CelestialModel, DynModel, OrientationModel, PositionModel};
pub use orrery_errors::OrreryError;
pub use registry::{ModelProvider, UniverseDynamicRegistry};
pub use solar_system::{Body, SolarSystemModel, SolarSystemParams};
pub use time::TimeValue;
