//! Nuclide descriptors and the decay process.

use std::str::FromStr;
use crate::{
    config::NucleusConfig,
    constants::{ FM_TO_NATURAL, R0_FM },
    error::StructureError,
};

/// Beta-decay process.
///
/// The discriminant is the change in proton number, so that
/// `Z_daughter - beta_type == Z_mother` holds for a valid transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BetaType {
    Minus = 1,
    Plus = -1,
}

impl BetaType {
    /// Return the signed change in proton number.
    pub fn value(self) -> i32 { self as i32 }

    /// Return the nucleon species that decays.
    pub fn initial_nucleon(self) -> Nucleon {
        match self {
            Self::Minus => Nucleon::Neutron,
            Self::Plus => Nucleon::Proton,
        }
    }

    /// Return the nucleon species that is produced.
    pub fn final_nucleon(self) -> Nucleon {
        match self {
            Self::Minus => Nucleon::Proton,
            Self::Plus => Nucleon::Neutron,
        }
    }
}

impl FromStr for BetaType {
    type Err = StructureError;

    /// `"B+"` (in any case) selects β⁺; everything else is β⁻.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("B+") {
            Ok(Self::Plus)
        } else {
            Ok(Self::Minus)
        }
    }
}

impl std::fmt::Display for BetaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minus => write!(f, "B-"),
            Self::Plus => write!(f, "B+"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Nucleon {
    Proton,
    Neutron,
}

impl std::fmt::Display for Nucleon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proton => write!(f, "proton"),
            Self::Neutron => write!(f, "neutron"),
        }
    }
}

/// Immutable snapshot of the properties of one nuclide.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nucleus {
    pub Z: i32,
    pub A: i32,
    /// Twice the total spin; the sign carries the parity.
    pub dJ: i32,
    /// Radius in natural units.
    pub R: f64,
    pub excitation_energy: f64,
    pub beta2: f64,
    pub beta4: f64,
    pub beta6: f64,
}

impl Nucleus {
    /// Create a spherical ground-state nucleus.
    pub fn new(Z: i32, A: i32, dJ: i32, R: f64) -> Self {
        Self {
            Z, A, dJ, R,
            excitation_energy: 0.0,
            beta2: 0.0,
            beta4: 0.0,
            beta6: 0.0,
        }
    }

    /// Set the deformation parameters.
    pub fn with_deformation(mut self, beta2: f64, beta4: f64, beta6: f64)
        -> Self
    {
        self.beta2 = beta2;
        self.beta4 = beta4;
        self.beta6 = beta6;
        self
    }

    /// Build a nucleus from its configuration entry.
    ///
    /// The configured radius is an RMS charge radius in fm, converted to the
    /// radius of the equivalent uniform sphere. A zero radius falls back to
    /// `r0 A^(1/3)`.
    pub fn from_config(config: &NucleusConfig) -> Self {
        let R
            = if config.radius == 0.0 {
                R0_FM * f64::from(config.a).cbrt() * FM_TO_NATURAL
            } else {
                config.radius * FM_TO_NATURAL * (5.0_f64 / 3.0).sqrt()
            };
        Self {
            Z: config.z,
            A: config.a,
            dJ: config.spin_parity,
            R,
            excitation_energy: config.excitation_energy,
            beta2: config.beta2,
            beta4: config.beta4,
            beta6: config.beta6,
        }
    }

    /// Number of neutrons.
    pub fn N(&self) -> i32 { self.A - self.Z }

    /// Number of nucleons of a given species.
    pub fn count(&self, nucleon: Nucleon) -> i32 {
        match nucleon {
            Nucleon::Proton => self.Z,
            Nucleon::Neutron => self.N(),
        }
    }

    /// Radius in fm.
    pub fn radius_fm(&self) -> f64 { self.R / FM_TO_NATURAL }

    /// Doubled isospin projection `A - 2Z`.
    pub fn dT3(&self) -> i32 { self.A - 2 * self.Z }

    pub fn is_even_A(&self) -> bool { self.A % 2 == 0 }

    pub fn is_even_Z(&self) -> bool { self.Z % 2 == 0 }
}
