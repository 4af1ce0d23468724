//! Single-particle states of the active nucleon.

use crate::{ nucleus::BetaType, spin::SpinProj };

/// One term of a basis expansion of a single-particle state.
///
/// For deformed (Nilsson) states `ds` is twice the intrinsic spin projection
/// Σ, so that the orbital projection is `dΛ = dO - ds`. For spherical states
/// `ds` is `2(j - l)`, i.e. `+1` for `j = l + 1/2` and `-1` for
/// `j = l - 1/2`. The radial quantum number `n` starts at 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WfComponent {
    pub amplitude: f64,
    pub n: i32,
    pub l: i32,
    pub ds: i32,
}

impl WfComponent {
    pub fn new(amplitude: f64, n: i32, l: i32, ds: i32) -> Self {
        Self { amplitude, n, l, ds }
    }

    /// Doubled total angular momentum of a spherical component.
    pub fn dj(&self) -> i32 { 2 * self.l + self.ds }
}

/// A single-particle quantum state as produced by a solver.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleParticleState {
    /// Twice the projection Ω of the total angular momentum on the symmetry
    /// axis.
    pub dO: i32,
    pub parity: i32,
    /// Sign of the spin projection.
    pub sign: i32,
    pub l: i32,
    pub n: i32,
    pub energy: f64,
    pub beta_type: BetaType,
    pub binding_energy: f64,
    pub components: Vec<WfComponent>,
}

impl SingleParticleState {
    /// Return a copy of `self` with the sign of Ω reversed.
    ///
    /// This is the only modification ever applied to a solved state; it is
    /// needed when antiparallel Gallagher coupling requires the projection to
    /// be reversed relative to the companion state.
    pub fn with_reflected_projection(&self) -> Self {
        Self {
            dO: SpinProj::new(self.dO).reflected().halves(),
            ..self.clone()
        }
    }

    /// Doubled Ω minus the doubled orbital number, the quantity compared by
    /// the Gallagher rules.
    pub fn gallagher_key(&self) -> i32 { self.dO - self.l }
}
