//! Sources of single-particle states.
//!
//! Spherical oscillator states come straight from the shell-occupation table.
//! Woods-Saxon states (spherical or deformed) are obtained from an external
//! eigensolver behind the [`DeformedSolver`] trait.

use crate::{
    error::Result,
    nucleus::{ BetaType, Nucleon, Nucleus },
    occupation,
    state::{ SingleParticleState, WfComponent },
};

/// Inputs to a deformed Woods-Saxon single-particle calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeformedParams {
    /// Number of active protons (zero for a neutron state).
    pub Z: i32,
    /// Number of active neutrons (zero for a proton state).
    pub N: i32,
    pub A: i32,
    /// Doubled spin of the nucleus.
    pub dJ: i32,
    /// Nuclear radius [fm].
    pub R: f64,
    pub beta2: f64,
    pub beta4: f64,
    pub beta6: f64,
    /// Central well depth [MeV].
    pub V0: f64,
    /// Surface thickness [fm].
    pub surface_thickness: f64,
    /// Spin-orbit depth [MeV].
    pub V0_so: f64,
    /// Doubled Ω the solver should try to select.
    pub dJ_forced: i32,
    /// Energy window [MeV] within which a state with the forced Ω is
    /// preferred over the lowest unoccupied level; zero disables forcing.
    pub threshold: f64,
}

/// Eigensolver for the single-particle states of a (deformed) mean-field
/// potential.
///
/// For undeformed potentials the returned state should carry j-coupled
/// components, whose `ds` is `2(j - l)` (see [`WfComponent`]).
pub trait DeformedSolver: Send + Sync {
    fn solve(&self, params: &DeformedParams) -> Result<SingleParticleState>;
}

impl<F> DeformedSolver for F
where F: Fn(&DeformedParams) -> Result<SingleParticleState> + Send + Sync
{
    fn solve(&self, params: &DeformedParams) -> Result<SingleParticleState> {
        self(params)
    }
}

/// Build the spherical oscillator state of the valence `nucleon` of
/// `nucleus`.
///
/// The state takes Ω from the nuclear spin and its quantum numbers from the
/// last filled orbital, as a single basis component. The nuclear parity is
/// already carried by the sign of Ω, so every oscillator state has parity -1
/// and the parity product of a transition is always +1.
pub fn spherical_state(
    nucleus: &Nucleus,
    nucleon: Nucleon,
    beta_type: BetaType,
) -> Result<SingleParticleState> {
    let orbital = occupation::last_filled(nucleus.count(nucleon))?;
    Ok(SingleParticleState {
        dO: nucleus.dJ,
        parity: -1,
        sign: orbital.ds,
        l: orbital.l,
        n: orbital.n,
        energy: 0.0,
        beta_type,
        binding_energy: 0.0,
        components: vec![
            WfComponent::new(1.0, orbital.n, orbital.l, orbital.ds)
        ],
    })
}
