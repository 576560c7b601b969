//! Compiled-in coefficients of the solar-system assembly.
//!
//! * Keplerian elements: JPL "Keplerian Elements for Approximate Positions of the Major
//!   Planets", table for 3000 BC – 3000 AD (E. M. Standish), J2000 ecliptic and equinox.
//! * Lunar mean elements: P. Schlyter, "How to compute planetary positions" (ppcomp),
//!   geocentric, without the perturbation terms.
//! * Rotational elements: WGCCRE 2015 report (Archinal et al.), Earth from the 2009
//!   report.
use crate::constants::{JulianCentury, ERAU, RADEG};
use crate::dynamics::IauRotation;
use crate::keplerian_element::{ElementTable, OrbitalElements, TimeWindow};

/// Validity window of the JPL long-term table.
pub const JPL_3000BC_3000AD: TimeWindow = TimeWindow::from_centuries(-50, 10);

//                                    a              e            I             L                ϖ              Ω
#[rustfmt::skip]
pub const MERCURY: ElementTable = ElementTable {
    values: [ 0.38709843,  0.20563661,  7.00559432,    252.25166724,  77.45771895,  48.33961819],
    rates:  [ 0.00000000,  0.00002123, -0.00590158, 149472.67486623,   0.15940013,  -0.12214182],
    fine_tune: None,
    window: Some(JPL_3000BC_3000AD),
};

#[rustfmt::skip]
pub const VENUS: ElementTable = ElementTable {
    values: [ 0.72332102,  0.00676399,  3.39777545,    181.97970850, 131.76755713,  76.67261496],
    rates:  [-0.00000026, -0.00005107,  0.00043494,  58517.81560260,   0.05679648,  -0.27274174],
    fine_tune: None,
    window: Some(JPL_3000BC_3000AD),
};

#[rustfmt::skip]
pub const EARTH_MOON_BARYCENTER: ElementTable = ElementTable {
    values: [ 1.00000018,  0.01673163, -0.00054346,    100.46691572, 102.93005885,  -5.11260389],
    rates:  [-0.00000003, -0.00003661, -0.01337178,  35999.37306329,   0.31795260,  -0.24123856],
    fine_tune: None,
    window: Some(JPL_3000BC_3000AD),
};

#[rustfmt::skip]
pub const MARS: ElementTable = ElementTable {
    values: [ 1.52371243,  0.09336511,  1.85181869,     -4.56813164, -23.91744784,  49.71320984],
    rates:  [ 0.00000097,  0.00009149, -0.00724757,  19140.29934243,   0.45223625,  -0.26852431],
    fine_tune: None,
    window: Some(JPL_3000BC_3000AD),
};

//                                    b            c            s            f
#[rustfmt::skip]
pub const JUPITER: ElementTable = ElementTable {
    values: [ 5.20248019,  0.04853590,  1.29861416,     34.33479152,  14.27495244, 100.29282654],
    rates:  [-0.00002864,  0.00018026, -0.00322699,   3034.90371757,   0.18199196,   0.13024619],
    fine_tune: Some([-0.00012452,  0.06064060, -0.35635438, 38.35125000]),
    window: Some(JPL_3000BC_3000AD),
};

#[rustfmt::skip]
pub const SATURN: ElementTable = ElementTable {
    values: [ 9.54149883,  0.05550825,  2.49424102,     50.07571329,  92.86136063, 113.63998702],
    rates:  [-0.00003065, -0.00032044,  0.00451969,   1222.11494724,   0.54179478,  -0.25015002],
    fine_tune: Some([ 0.00025899, -0.13434469,  0.87320147, 38.35125000]),
    window: Some(JPL_3000BC_3000AD),
};

#[rustfmt::skip]
pub const URANUS: ElementTable = ElementTable {
    values: [19.18797948,  0.04685740,  0.77298127,    314.20276625, 172.43404441,  73.96250215],
    rates:  [-0.00020455, -0.00001550, -0.00180155,    428.49512595,   0.09266985,   0.05739699],
    fine_tune: Some([ 0.00058331, -0.97731848,  0.17689245,  7.67025000]),
    window: Some(JPL_3000BC_3000AD),
};

#[rustfmt::skip]
pub const NEPTUNE: ElementTable = ElementTable {
    values: [30.06952752,  0.00895439,  1.77005520,    304.22289287,  46.68158724, 131.78635853],
    rates:  [ 0.00006447,  0.00000818,  0.00022400,    218.46515314,   0.01009938,  -0.00606302],
    fine_tune: Some([-0.00041348,  0.68346318, -0.10162547,  7.67025000]),
    window: Some(JPL_3000BC_3000AD),
};

/// Geocentric lunar orbit (ppcomp mean elements, semi-major axis 60.2666 Earth radii).
pub fn moon_geocentric() -> OrbitalElements {
    OrbitalElements::from_mean_elements(
        125.1228,
        5.1454,
        318.0634,
        60.2666 * ERAU,
        0.054900,
        115.3654,
        [-0.0529538083, 0.0, 0.1643573223, 0.0, 0.0, 13.0649929509],
    )
}

#[inline]
fn sind(x: f64) -> f64 {
    (x * RADEG).sin()
}

#[inline]
fn cosd(x: f64) -> f64 {
    (x * RADEG).cos()
}

pub fn sun_rotation(d: f64, _t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 286.13,
        pole_dec: 63.87,
        spin: 84.176 + 14.1844000 * d,
    }
}

pub fn mercury_rotation(d: f64, t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 281.0103 - 0.0328 * t,
        pole_dec: 61.4155 - 0.0049 * t,
        spin: 329.5988 + 6.1385108 * d + 0.01067257 * sind(174.7910857 + 4.092335 * d)
            - 0.00112309 * sind(349.5821714 + 8.184670 * d)
            - 0.00011040 * sind(164.3732571 + 12.277005 * d)
            - 0.00002539 * sind(339.1643429 + 16.369340 * d)
            - 0.00000571 * sind(153.9554286 + 20.461675 * d),
    }
}

pub fn venus_rotation(d: f64, _t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 272.76,
        pole_dec: 67.16,
        spin: 160.20 - 1.4813688 * d,
    }
}

pub fn earth_rotation(d: f64, t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 0.00 - 0.641 * t,
        pole_dec: 90.00 - 0.557 * t,
        spin: 190.147 + 360.9856235 * d,
    }
}

pub fn moon_rotation(d: f64, t: JulianCentury) -> IauRotation {
    let e1 = 125.045 - 0.0529921 * d;
    let e2 = 250.089 - 0.1059842 * d;
    let e3 = 260.008 + 13.0120009 * d;
    let e4 = 176.625 + 13.3407154 * d;
    let e5 = 357.529 + 0.9856003 * d;
    let e6 = 311.589 + 26.4057084 * d;
    let e7 = 134.963 + 13.0649930 * d;
    let e8 = 276.617 + 0.3287146 * d;
    let e9 = 34.226 + 1.7484877 * d;
    let e10 = 15.134 - 0.1589763 * d;
    let e11 = 119.743 + 0.0036096 * d;
    let e12 = 239.961 + 0.1643573 * d;
    let e13 = 25.053 + 12.9590088 * d;

    IauRotation {
        pole_ra: 269.9949 + 0.0031 * t - 3.8787 * sind(e1) - 0.1204 * sind(e2)
            + 0.0700 * sind(e3)
            - 0.0172 * sind(e4)
            + 0.0072 * sind(e6)
            - 0.0052 * sind(e10)
            + 0.0043 * sind(e13),
        pole_dec: 66.5392 + 0.0130 * t + 1.5419 * cosd(e1) + 0.0239 * cosd(e2)
            - 0.0278 * cosd(e3)
            + 0.0068 * cosd(e4)
            - 0.0029 * cosd(e6)
            + 0.0009 * cosd(e7)
            + 0.0008 * cosd(e10)
            - 0.0009 * cosd(e13),
        spin: 38.3213 + 13.17635815 * d - 1.4e-12 * d * d + 3.5610 * sind(e1)
            + 0.1208 * sind(e2)
            - 0.0642 * sind(e3)
            + 0.0158 * sind(e4)
            + 0.0252 * sind(e5)
            - 0.0066 * sind(e6)
            - 0.0047 * sind(e7)
            - 0.0046 * sind(e8)
            + 0.0028 * sind(e9)
            + 0.0052 * sind(e10)
            + 0.0040 * sind(e11)
            + 0.0019 * sind(e12)
            - 0.0044 * sind(e13),
    }
}

pub fn mars_rotation(d: f64, t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 317.68143 - 0.1061 * t,
        pole_dec: 52.88650 - 0.0609 * t,
        spin: 176.630 + 350.89198226 * d,
    }
}

pub fn jupiter_rotation(d: f64, t: JulianCentury) -> IauRotation {
    let ja = 99.360714 + 4850.4046 * t;
    let jb = 175.895369 + 1191.9605 * t;
    let jc = 300.323162 + 262.5475 * t;
    let jd = 114.012305 + 6070.2476 * t;
    let je = 49.511251 + 64.3000 * t;

    IauRotation {
        pole_ra: 268.056595 - 0.006499 * t
            + 0.000117 * sind(ja)
            + 0.000938 * sind(jb)
            + 0.001432 * sind(jc)
            + 0.000030 * sind(jd)
            + 0.002150 * sind(je),
        pole_dec: 64.495303 + 0.002413 * t + 0.000050 * cosd(ja) + 0.000404 * cosd(jb)
            + 0.000617 * cosd(jc)
            - 0.000013 * cosd(jd)
            + 0.000926 * cosd(je),
        spin: 284.95 + 870.5360000 * d,
    }
}

pub fn saturn_rotation(d: f64, t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 40.589 - 0.036 * t,
        pole_dec: 83.537 - 0.004 * t,
        spin: 38.90 + 810.7939024 * d,
    }
}

pub fn uranus_rotation(d: f64, _t: JulianCentury) -> IauRotation {
    IauRotation {
        pole_ra: 257.311,
        pole_dec: -15.175,
        spin: 203.81 - 501.1600928 * d,
    }
}

pub fn neptune_rotation(d: f64, t: JulianCentury) -> IauRotation {
    let n = 357.85 + 52.316 * t;
    IauRotation {
        pole_ra: 299.36 + 0.70 * sind(n),
        pole_dec: 43.46 - 0.51 * cosd(n),
        spin: 253.18 + 536.3128492 * d - 0.48 * sind(n),
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_giant_planets_carry_fine_tune() {
        for table in [JUPITER, SATURN, URANUS, NEPTUNE] {
            assert!(table.fine_tune.is_some());
        }
        for table in [MERCURY, VENUS, EARTH_MOON_BARYCENTER, MARS] {
            assert!(table.fine_tune.is_none());
        }
    }

    #[test]
    fn test_moon_distance() {
        let moon = moon_geocentric();
        // ~384 400 km
        assert_abs_diff_eq!(moon.semi_major_axis, 0.00257, epsilon = 1e-5);
    }

    #[test]
    fn test_neptune_periodic_terms_in_degrees() {
        // N = 357.85° at J2000: sin N ≈ −0.0375
        let rot = neptune_rotation(0.0, 0.0);
        assert_abs_diff_eq!(rot.pole_ra, 299.36 + 0.70 * (357.85 * RADEG).sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(rot.pole_ra, 299.334, epsilon = 1e-3);
    }

    #[test]
    fn test_earth_spin_rate() {
        let a = earth_rotation(0.0, 0.0);
        let b = earth_rotation(1.0, 1.0 / 36_525.0);
        assert_abs_diff_eq!(b.spin - a.spin, 360.9856235, epsilon = 1e-9);
    }
}
