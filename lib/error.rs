//! Error type shared by every stage of the calculation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StructureError>;

/// Which end of a transition a diagnostic refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Mother,
    Daughter,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mother => write!(f, "mother"),
            Self::Daughter => write!(f, "daughter"),
        }
    }
}

/// A coupled K projection that fails to reproduce the spin of a nucleus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpinMismatch {
    pub side: Side,
    /// Parity-signed doubled K.
    pub coupled: i32,
    /// Doubled spin of the nucleus.
    pub required: i32,
    pub dOi: i32,
    pub dOf: i32,
}

impl std::fmt::Display for SpinMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "single-particle spin coupling does not match {} spin: \
            coupled 2K = {}, required 2J = {} (2Omega_i = {}, 2Omega_f = {})",
            self.side, self.coupled, self.required, self.dOi, self.dOf,
        )
    }
}

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("mother and daughter mass numbers do not agree: {mother} != {daughter}")]
    MassMismatch { mother: i32, daughter: i32 },

    #[error(
        "mother (Z = {mother}) and daughter (Z = {daughter}) proton numbers \
        cannot be coupled through {process}"
    )]
    ChargeMismatch { mother: i32, daughter: i32, process: String },

    #[error("{0}")]
    SpinMismatch(SpinMismatch),

    #[error("degenerate denominator in {quantity}: AM101 = {value}")]
    DegenerateDenominator { quantity: &'static str, value: f64 },

    #[error("unknown computational method '{0}'")]
    UnknownMethod(String),

    #[error("unknown potential '{0}'")]
    UnknownPotential(String),

    #[error("no occupied orbital for {0} nucleons")]
    NoOrbital(i32),

    #[error("a deformed solver is required for the {0} potential")]
    MissingSolver(String),

    #[error("deformed solver failed: {0}")]
    Solver(String),

    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
