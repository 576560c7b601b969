//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors** and **type
//! aliases** shared by the dynamics engine.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, speed of light, Earth radius)
//! - Calendar constants for the J2000.0 time representation
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians)
//! - Body masses used by the barycenter computations
//!
//! Positions produced by the crate are expressed in **AU**, times in **SI seconds**
//! relative to J2000.0 and masses in **kilograms**.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of seconds in a Julian year (365.25 days)
pub const SECONDS_PER_JULIAN_YEAR: i64 = 31_557_600;

/// Number of seconds in a Julian century (36525 days)
pub const SECONDS_PER_JULIAN_CENTURY: i64 = 100 * SECONDS_PER_JULIAN_YEAR;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per second
pub const VLIGHT_AU_PER_SECOND: f64 = VLIGHT / AU;

/// Earth equatorial radius in kilometers (IAU 2015 nominal)
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378.1366;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = EARTH_EQUATORIAL_RADIUS / AU;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

// -------------------------------------------------------------------------------------------------
// Masses (kg), NSSDC planetary fact sheet
// -------------------------------------------------------------------------------------------------

pub const SUN_MASS: Kilogram = 1_988_400e24;
pub const MERCURY_MASS: Kilogram = 0.33010e24;
pub const VENUS_MASS: Kilogram = 4.8673e24;
pub const EARTH_MASS: Kilogram = 5.9722e24;
pub const MOON_MASS: Kilogram = 0.07346e24;
pub const MARS_MASS: Kilogram = 0.64169e24;
pub const JUPITER_MASS: Kilogram = 1898.13e24;
pub const SATURN_MASS: Kilogram = 568.32e24;
pub const URANUS_MASS: Kilogram = 86.811e24;
pub const NEPTUNE_MASS: Kilogram = 102.409e24;

/// Companions lighter than this are ignored by the solar barycenter by default
pub const DEFAULT_BARYCENTER_MASS_THRESHOLD: Kilogram = 1e24;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Julian centuries elapsed since J2000.0
pub type JulianCentury = f64;
