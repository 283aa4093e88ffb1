//! Read-only tables of mathematical and physical constants.
//!
//! The tables are grouped by [`Category`]. [`all_constants`] merges them in
//! category order (physics, math, astronomy, conversions, values), with later
//! categories overriding earlier ones, so `e` resolves to Euler's number
//! rather than the elementary charge.

use std::{collections::BTreeMap, str::FromStr};

/// Physical constants (CODATA 2018).
pub static PHYSICS: &[(&str, f64)] = &[("c", 299_792_458.0),
                                       ("G", 6.674_30e-11),
                                       ("h", 6.626_070_15e-34),
                                       ("hbar", 1.054_571_817e-34),
                                       ("k", 1.380_649e-23),
                                       ("g", 9.806_65),
                                       ("e", 1.602_176_634e-19),
                                       ("me", 9.109_383_701_5e-31),
                                       ("mp", 1.672_621_923_69e-27),
                                       ("mn", 1.674_927_498_04e-27),
                                       ("R", 8.314_462_618),
                                       ("Na", 6.022_140_76e23),
                                       ("sigma", 5.670_374_419e-8),
                                       ("epsilon0", 8.854_187_812_8e-12),
                                       ("mu0", 1.256_637_062_12e-6),
                                       ("R_inf", 10_973_731.568_160),
                                       ("alpha", 7.297_352_569_3e-3),
                                       ("phi", 1.618_033_988_749_895)];

/// Mathematical constants.
pub static MATH: &[(&str, f64)] = &[("pi", std::f64::consts::PI),
                                    ("e", std::f64::consts::E),
                                    ("gamma", 0.577_215_664_901_532_9),
                                    ("phi", 1.618_033_988_749_895),
                                    ("sqrt2", std::f64::consts::SQRT_2),
                                    ("sqrt3", 1.732_050_807_568_877_2),
                                    ("ln2", std::f64::consts::LN_2),
                                    ("ln10", std::f64::consts::LN_10)];

/// Astronomical constants.
pub static ASTRONOMY: &[(&str, f64)] = &[("AU", 1.495_978_707e11),
                                         ("ly", 9.460_730_472_580_8e15),
                                         ("pc", 3.085_677_581_491_367_3e16),
                                         ("M_sun", 1.988_47e30),
                                         ("R_sun", 6.957e8),
                                         ("L_sun", 3.828e26)];

/// Unit conversion factors.
pub static CONVERSIONS: &[(&str, f64)] = &[("deg_to_rad", 0.017_453_292_519_943_295),
                                           ("rad_to_deg", 57.295_779_513_082_32),
                                           ("eV_to_J", 1.602_176_634e-19),
                                           ("J_to_eV", 6.241_509_074_460_763e18),
                                           ("amu_to_kg", 1.660_539_066_60e-27),
                                           ("kg_to_amu", 6.022_140_76e26)];

/// Common physical quantities.
pub static VALUES: &[(&str, f64)] = &[("earth_mass", 5.9722e24),
                                      ("earth_radius", 6.371e6),
                                      ("moon_mass", 7.342e22),
                                      ("moon_radius", 1.7371e6),
                                      ("sun_mass", 1.9885e30),
                                      ("sun_radius", 6.957e8),
                                      ("atmospheric_pressure", 101_325.0),
                                      ("water_density", 997.0),
                                      ("air_density", 1.225)];

/// A group of related constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Physical constants.
    Physics,
    /// Mathematical constants.
    Math,
    /// Astronomical constants.
    Astronomy,
    /// Unit conversion factors.
    Conversions,
    /// Common physical quantities.
    Values,
}

impl Category {
    /// Every category, in merge order.
    pub const ALL: [Self; 5] =
        [Self::Physics, Self::Math, Self::Astronomy, Self::Conversions, Self::Values];

    /// Returns the category's lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Physics => "physics",
            Self::Math => "math",
            Self::Astronomy => "astronomy",
            Self::Conversions => "conversions",
            Self::Values => "values",
        }
    }

    /// Returns the constants in this category.
    #[must_use]
    pub const fn constants(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Physics => PHYSICS,
            Self::Math => MATH,
            Self::Astronomy => ASTRONOMY,
            Self::Conversions => CONVERSIONS,
            Self::Values => VALUES,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl std::fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        write!(f,
               "Unknown constant category '{}'. Expected one of: {}.",
               self.0,
               names.join(", "))
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
                 .find(|c| c.name().eq_ignore_ascii_case(s))
                 .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Merges every category into one map; later categories win on name clashes.
///
/// # Example
/// ```
/// use safecalc::constants::all_constants;
///
/// let all = all_constants();
/// assert_eq!(all["e"], std::f64::consts::E);
/// assert_eq!(all["c"], 299_792_458.0);
/// ```
#[must_use]
pub fn all_constants() -> BTreeMap<&'static str, f64> {
    Category::ALL.iter()
                 .flat_map(|category| category.constants().iter().copied())
                 .collect()
}

/// Looks up a constant in the merged view.
///
/// # Example
/// ```
/// use safecalc::constants::lookup;
///
/// assert_eq!(lookup("g"), Some(9.80665));
/// assert_eq!(lookup("nope"), None);
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<f64> {
    Category::ALL.iter()
                 .rev()
                 .find_map(|category| {
                     category.constants()
                             .iter()
                             .find(|(n, _)| *n == name)
                             .map(|(_, v)| *v)
                 })
}
