//! One-body density matrix elements in the extreme single-particle picture.
//!
//! The weight of a single-particle transition in the many-body matrix element
//! follows from recoupling the nuclear spins (and, for even-A spherical
//! decays, isospins) around the active nucleon. Which coupling applies is
//! decided by three things: whether A is even, whether the decay is treated
//! as deformed, and, for even A, whether the mother has even Z.

use tracing::debug;
use crate::{
    nucleus::{ BetaType, Nucleus },
    spin::{ delta, phase, w3j, w6j },
    transition::OneBodyTransition,
};

/// Per-nucleus doubled isospins overriding the `|A - 2Z|` default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IsospinOverride {
    pub mother: Option<i32>,
    pub daughter: Option<i32>,
}

/// Evaluates OBDMEs for the transitions of one decay.
#[derive(Copy, Clone, Debug)]
pub struct CouplingEngine<'a> {
    pub mother: &'a Nucleus,
    pub daughter: &'a Nucleus,
    pub beta_type: BetaType,
    pub deformed: bool,
    pub isospin: IsospinOverride,
}

impl<'a> CouplingEngine<'a> {
    /// Compute the OBDME of `obt` for an operator of rank `K`.
    pub fn obdme(&self, K: i32, obt: &OneBodyTransition) -> f64 {
        match (self.mother.is_even_A(), self.deformed) {
            (true, true) => self.even_deformed(K, obt),
            (true, false) => self.even_spherical(K, obt),
            (false, true) => self.odd_deformed(obt),
            (false, false) => self.odd_spherical(),
        }
    }

    fn dJi(&self) -> i32 { self.mother.dJ.abs() }

    fn dJf(&self) -> i32 { self.daughter.dJ.abs() }

    fn even_deformed(&self, K: i32, obt: &OneBodyTransition) -> f64 {
        let (dJi, dJf) = (self.dJi(), self.dJf());
        let mult = f64::from(dJi + 1) * f64::from(dJf + 1);
        if self.mother.is_even_Z() {
            0.5 * (mult / (1.0 + delta(obt.dKf, 0))).sqrt()
                * (1.0 + phase(dJi / 2))
                * w3j((dJf, -obt.dKf), (2 * K, obt.dKf), (dJi, 0))
        } else {
            0.5 * (mult / (1.0 + delta(obt.dKi, 0))).sqrt()
                * (1.0 + phase(dJf / 2))
                * w3j((dJf, 0), (2 * K, -obt.dKi), (dJi, obt.dKi))
        }
    }

    /// Doubled isospins `(dTi, dTf)` and projections `(dT3i, dT3f)`.
    fn isospins(&self) -> ((i32, i32), (i32, i32)) {
        let dT3i = self.mother.dT3();
        let dT3f = self.daughter.dT3();
        let dTi = self.isospin.mother.unwrap_or(dT3i.abs());
        let dTf = self.isospin.daughter.unwrap_or(dT3f.abs());
        ((dTi, dTf), (dT3i, dT3f))
    }

    fn even_spherical(&self, K: i32, obt: &OneBodyTransition) -> f64 {
        even_spherical_unnormalized(self, K, obt)
            * spherical_normalization(obt.spsi.dO, obt.spsf.dO)
    }

    fn odd_deformed(&self, obt: &OneBodyTransition) -> f64 {
        let mult = f64::from(self.dJi() + 1) * f64::from(self.dJf() + 1);
        (
            mult
            / (1.0 + delta(obt.dKi, 0))
            / (1.0 + delta(obt.dKf, 0))
        ).sqrt()
    }

    // TODO: replace the unit weight once the odd-A spherical normalization
    // has been checked against the reference physics literature
    fn odd_spherical(&self) -> f64 { 1.0 }
}

/// Normalization of the even-A spherical OBDME, halving the weight when both
/// single-particle projections coincide.
pub fn spherical_normalization(dOi: i32, dOf: i32) -> f64 {
    1.0 / (1.0 + delta(dOi, dOf))
}

fn even_spherical_unnormalized(
    engine: &CouplingEngine<'_>,
    K: i32,
    obt: &OneBodyTransition,
) -> f64 {
    let (dJi, dJf) = (engine.dJi(), engine.dJf());
    let ((dTi, dTf), (dT3i, dT3f)) = engine.isospins();
    debug!(
        Ti = f64::from(dTi) / 2.0,
        Tf = f64::from(dTf) / 2.0,
        T3i = f64::from(dT3i) / 2.0,
        T3f = f64::from(dT3f) / 2.0,
        "isospin"
    );
    let dOi = obt.spsi.dO;
    let dOf = obt.spsf.dO;
    let isospin
        = (
            f64::from(dJi + 1) * f64::from(dJf + 1)
            * f64::from(dTi + 1) * f64::from(dTf + 1)
        ).sqrt()
        * phase((dTf - dT3f) / 2)
        * w3j((dTf, -dT3f), (2, -2 * engine.beta_type.value()), (dTi, dT3i))
        * w6j(1, dTf, (dTf + dTi) / 2, dTi, 1, 2)
        * 1.5_f64.sqrt()
        * phase(K);
    let spin
        = if engine.mother.is_even_Z() {
            2.0 * (delta(dOi, dOf) - phase((dOi + dOf) / 2))
                * w6j(dOf, dJf, dOi, dJi, dOi, 2 * K)
        } else {
            2.0 * (1.0 + delta(dOi, dOi))
                * w6j(dOf, dJf, dOf, dJi, dOi, 2 * K)
        };
    isospin * spin
}
