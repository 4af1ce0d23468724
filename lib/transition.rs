//! One-body transitions and the K-quantum-number assignment of their ends.

use tracing::warn;
use crate::{
    error::{ Side, SpinMismatch },
    nucleus::Nucleus,
    state::SingleParticleState,
};

/// A single-particle transition `spsi -> spsf` contributing to the many-body
/// decay with weight `obdme`.
#[derive(Clone, Debug, PartialEq)]
pub struct OneBodyTransition {
    pub obdme: f64,
    /// Twice the K projection on the mother side.
    pub dKi: i32,
    /// Twice the K projection on the daughter side.
    pub dKf: i32,
    pub spsi: SingleParticleState,
    pub spsf: SingleParticleState,
}

/// Result of coupling two odd-nucleon projections into a core spin.
#[derive(Clone, Debug, PartialEq)]
pub struct GallagherCoupling {
    /// Doubled coupled projection.
    pub dKc: i32,
    pub spsi: SingleParticleState,
    pub spsf: SingleParticleState,
    /// The end whose Ω was reversed, if any.
    pub flipped: Option<Side>,
}

/// Couple the projections of two single-particle states according to the
/// Gallagher rules.
///
/// Parallel coupling (`dKc = dOi + dOf`) applies when `dOi - li == dOf - lf`,
/// antiparallel coupling (`dKc = |dOi - dOf|`) otherwise; `reversed` swaps
/// the two rules. For antiparallel coupling the Ω of the state with the larger
/// projection is reversed, the returned states reflecting the change.
pub fn gallagher_coupling(
    spsi: &SingleParticleState,
    spsf: &SingleParticleState,
    reversed: bool,
) -> GallagherCoupling {
    let parallel = (spsi.gallagher_key() == spsf.gallagher_key()) ^ reversed;
    if parallel {
        GallagherCoupling {
            dKc: spsi.dO + spsf.dO,
            spsi: spsi.clone(),
            spsf: spsf.clone(),
            flipped: None,
        }
    } else if spsi.dO > spsf.dO {
        GallagherCoupling {
            dKc: (spsi.dO - spsf.dO).abs(),
            spsi: spsi.clone(),
            spsf: spsf.with_reflected_projection(),
            flipped: Some(Side::Daughter),
        }
    } else {
        GallagherCoupling {
            dKc: (spsi.dO - spsf.dO).abs(),
            spsi: spsi.with_reflected_projection(),
            spsf: spsf.clone(),
            flipped: Some(Side::Mother),
        }
    }
}

impl OneBodyTransition {
    pub fn new(
        obdme: f64,
        dKi: i32,
        dKf: i32,
        spsi: SingleParticleState,
        spsf: SingleParticleState,
    ) -> Self
    {
        Self { obdme, dKi, dKf, spsi, spsf }
    }

    /// Build the transition of an even-A deformed decay, where the odd-odd
    /// side carries the Gallagher-coupled K and the even-even side K = 0.
    pub fn even_deformed(
        mother: &Nucleus,
        spsi: &SingleParticleState,
        spsf: &SingleParticleState,
        reversed: bool,
    ) -> Self
    {
        let GallagherCoupling { dKc, spsi, spsf, .. }
            = gallagher_coupling(spsi, spsf, reversed);
        let (dKi, dKf) = if mother.is_even_Z() { (0, dKc) } else { (dKc, 0) };
        Self::new(1.0, dKi, dKf, spsi, spsf)
    }

    /// Build a transition whose K values are the single-particle projections.
    pub fn direct(spsi: SingleParticleState, spsf: SingleParticleState)
        -> Self
    {
        let (dKi, dKf) = (spsi.dO, spsf.dO);
        Self::new(1.0, dKi, dKf, spsi, spsf)
    }

    /// Check that the coupled projections reproduce the spins of both
    /// nuclei, returning every mismatch found.
    pub fn spin_mismatches(&self, mother: &Nucleus, daughter: &Nucleus)
        -> Vec<SpinMismatch>
    {
        let parity = self.spsi.parity * self.spsf.parity;
        [
            (Side::Mother, self.dKi, mother.dJ),
            (Side::Daughter, self.dKf, daughter.dJ),
        ]
        .into_iter()
        .filter(|(_, dK, dJ)| parity * dK != *dJ)
        .map(|(side, dK, dJ)| SpinMismatch {
            side,
            coupled: parity * dK,
            required: dJ,
            dOi: self.spsi.dO,
            dOf: self.spsf.dO,
        })
        .inspect(|mismatch| warn!("{}", mismatch))
        .collect()
    }
}
