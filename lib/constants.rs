//! Physical constants and default couplings.

// masses [keV]
pub const NUCLEON_MASS_KEV: f64 = 938918.74;
pub const ELECTRON_MASS_KEV: f64 = 510.998910;

/// Nucleon mass in units of the electron mass.
pub const NUCLEON_MASS_ME: f64 = NUCLEON_MASS_KEV / ELECTRON_MASS_KEV;

// reduced Compton wavelength of the electron [m]; the natural length unit
pub const NATLENGTH: f64 = 3.8615926764e-13;

/// Conversion factor from femtometers to natural length units.
pub const FM_TO_NATURAL: f64 = 1e-15 / NATLENGTH;

// radius parameter for R = r0 A^(1/3) [fm]
pub const R0_FM: f64 = 1.2;

// couplings [dimensionless]
pub const G_A: f64 = 1.2723;
pub const G_M: f64 = 4.706;

// Woods-Saxon parameters [MeV] and [fm]
pub const WS_V_PROTON: f64 = 51.0;
pub const WS_V_NEUTRON: f64 = 51.0;
pub const WS_X_PROTON: f64 = 0.67;
pub const WS_X_NEUTRON: f64 = 0.67;
pub const WS_SURFACE_THICKNESS: f64 = 0.67;
pub const WS_V0S_PROTON: f64 = 22.4;
pub const WS_V0S_NEUTRON: f64 = 22.4;
pub const WS_ENERGY_MARGIN: f64 = 0.5; // MeV
