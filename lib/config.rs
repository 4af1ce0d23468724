//! TOML configuration for a single beta transition.
//!
//! Section and key names follow the dotted option paths used to describe a
//! transition (`Mother.Z`, `Computational.Potential`, ...). Keys that may be
//! legitimately absent are `Option`s, so "not given" stays distinct from any
//! default value.

use std::path::Path;
use serde::Deserialize;
use crate::{
    constants as c,
    error::{ Result, StructureError },
};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub mother: NucleusConfig,
    pub daughter: NucleusConfig,
    #[serde(default)]
    pub transition: TransitionConfig,
    #[serde(default)]
    pub computational: ComputationalConfig,
    #[serde(default)]
    pub constants: ConstantsConfig,
}

impl Config {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.mother.validate("Mother")?;
        config.daughter.validate("Daughter")?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Measured or assumed properties of one nuclide.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NucleusConfig {
    #[serde(rename = "Z")]
    pub z: i32,
    #[serde(rename = "A")]
    pub a: i32,
    /// Twice the total spin, signed by parity.
    pub spin_parity: i32,
    /// RMS charge radius [fm]; zero selects `r0 A^(1/3)`.
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub excitation_energy: f64,
    #[serde(default)]
    pub beta2: f64,
    #[serde(default)]
    pub beta4: f64,
    #[serde(default)]
    pub beta6: f64,
    /// Doubled single-particle spin to force in even-A nuclei.
    #[serde(rename = "ForcedSPSpin")]
    pub forced_sp_spin: Option<i32>,
    /// Doubled isospin overriding `|A - 2Z|`.
    pub isospin: Option<i32>,
}

impl NucleusConfig {
    fn validate(&self, section: &str) -> Result<()> {
        if self.a <= 0 || self.z < 0 || self.z > self.a {
            return Err(StructureError::InvalidConfig(format!(
                "{section}: Z = {} and A = {} do not describe a nucleus",
                self.z, self.a,
            )));
        }
        if self.radius < 0.0 {
            return Err(StructureError::InvalidConfig(format!(
                "{section}: negative radius {}", self.radius,
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransitionConfig {
    /// `"B+"` or `"B-"`, case-insensitive.
    pub process: String,
}

impl Default for TransitionConfig {
    fn default() -> Self { Self { process: "B-".into() } }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ComputationalConfig {
    pub method: String,
    pub potential: String,
    pub vproton: f64,
    pub vneutron: f64,
    pub xproton: f64,
    pub xneutron: f64,
    pub surface_thickness: f64,
    #[serde(rename = "V0Sproton")]
    pub v0s_proton: f64,
    #[serde(rename = "V0Sneutron")]
    pub v0s_neutron: f64,
    pub energy_margin: f64,
    pub force_spin: bool,
    pub reversed_gallagher: bool,
}

impl Default for ComputationalConfig {
    fn default() -> Self {
        Self {
            method: "ESP".into(),
            potential: "SHO".into(),
            vproton: c::WS_V_PROTON,
            vneutron: c::WS_V_NEUTRON,
            xproton: c::WS_X_PROTON,
            xneutron: c::WS_X_NEUTRON,
            surface_thickness: c::WS_SURFACE_THICKNESS,
            v0s_proton: c::WS_V0S_PROTON,
            v0s_neutron: c::WS_V0S_NEUTRON,
            energy_margin: c::WS_ENERGY_MARGIN,
            force_spin: true,
            reversed_gallagher: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConstantsConfig {
    #[serde(rename = "gA")]
    pub g_a: f64,
    #[serde(rename = "gM")]
    pub g_m: f64,
}

impl Default for ConstantsConfig {
    fn default() -> Self { Self { g_a: c::G_A, g_m: c::G_M } }
}
