//! Assembly of one-body transitions and evaluation of decay matrix elements
//! and form factors.

use std::str::FromStr;
use rayon::prelude::*;
use tracing::{ debug, info };
use crate::{
    charge::calc_nu,
    config::{ ComputationalConfig, Config, ConstantsConfig },
    constants::NUCLEON_MASS_ME,
    coupling::{ CouplingEngine, IsospinOverride },
    error::{ Result, SpinMismatch, StructureError },
    integral::{ Geometry, HarmonicOscillator, Multipole, MultipoleIntegrator },
    nucleus::{ BetaType, Nucleon, Nucleus },
    solver::{ spherical_state, DeformedParams, DeformedSolver },
    state::SingleParticleState,
    transition::OneBodyTransition,
};

/// Nuclear model used to build the one-body transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Extreme single particle: one active nucleon on each side.
    ExtremeSingleParticle,
}

impl FromStr for Method {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ESP" => Ok(Self::ExtremeSingleParticle),
            _ => Err(StructureError::UnknownMethod(s.to_string())),
        }
    }
}

/// Mean-field potential of the single-particle states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Potential {
    /// Spherical harmonic oscillator.
    SHO,
    /// Spherical Woods-Saxon.
    WS,
    /// Deformed Woods-Saxon.
    DWS,
}

impl FromStr for Potential {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHO" => Ok(Self::SHO),
            "WS" => Ok(Self::WS),
            "DWS" => Ok(Self::DWS),
            _ => Err(StructureError::UnknownPotential(s.to_string())),
        }
    }
}

impl std::fmt::Display for Potential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SHO => write!(f, "SHO"),
            Self::WS => write!(f, "WS"),
            Self::DWS => write!(f, "DWS"),
        }
    }
}

/// Doubled single-particle spins to force in even-A nuclei.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ForcedSpin {
    pub mother: Option<i32>,
    pub daughter: Option<i32>,
}

/// Builds and holds the one-body transitions of a beta decay and evaluates
/// matrix elements from them.
///
/// A manager whose [initialization][Self::initialize] failed holds no
/// transitions, so that every matrix element evaluates to zero.
pub struct NuclearStructureManager<I = HarmonicOscillator> {
    beta_type: BetaType,
    mother: Nucleus,
    daughter: Nucleus,
    method: Option<Method>,
    potential: Option<Potential>,
    transitions: Vec<OneBodyTransition>,
    mismatches: Vec<SpinMismatch>,
    computational: ComputationalConfig,
    constants: ConstantsConfig,
    forced_spin: ForcedSpin,
    isospin: IsospinOverride,
    solver: Option<Box<dyn DeformedSolver>>,
    integrator: I,
}

impl NuclearStructureManager<HarmonicOscillator> {
    /// Create an uninitialized manager with default settings.
    pub fn new(beta_type: BetaType, mother: Nucleus, daughter: Nucleus)
        -> Self
    {
        Self {
            beta_type,
            mother,
            daughter,
            method: None,
            potential: None,
            transitions: Vec::new(),
            mismatches: Vec::new(),
            computational: ComputationalConfig::default(),
            constants: ConstantsConfig::default(),
            forced_spin: ForcedSpin::default(),
            isospin: IsospinOverride::default(),
            solver: None,
            integrator: HarmonicOscillator::default(),
        }
    }

    /// Build and initialize a manager from a configuration.
    ///
    /// `solver` is only consulted for Woods-Saxon potentials.
    pub fn from_config(
        config: &Config,
        solver: Option<Box<dyn DeformedSolver>>,
    ) -> Result<Self>
    {
        let beta_type: BetaType = config.transition.process.parse()?;
        let mother = Nucleus::from_config(&config.mother);
        let daughter = Nucleus::from_config(&config.daughter);
        let method: Method = config.computational.method.parse()?;
        let potential: Potential = config.computational.potential.parse()?;
        let mut manager = Self::new(beta_type, mother, daughter);
        manager.computational = config.computational.clone();
        manager.constants = config.constants;
        manager.forced_spin = ForcedSpin {
            mother: config.mother.forced_sp_spin,
            daughter: config.daughter.forced_sp_spin,
        };
        manager.isospin = IsospinOverride {
            mother: config.mother.isospin,
            daughter: config.daughter.isospin,
        };
        manager.solver = solver;
        manager.initialize(method, potential)?;
        Ok(manager)
    }
}

impl<I> NuclearStructureManager<I>
where I: MultipoleIntegrator
{
    /// Replace the multipole integrator.
    pub fn with_integrator<J>(self, integrator: J) -> NuclearStructureManager<J>
    where J: MultipoleIntegrator
    {
        NuclearStructureManager {
            beta_type: self.beta_type,
            mother: self.mother,
            daughter: self.daughter,
            method: self.method,
            potential: self.potential,
            transitions: self.transitions,
            mismatches: self.mismatches,
            computational: self.computational,
            constants: self.constants,
            forced_spin: self.forced_spin,
            isospin: self.isospin,
            solver: self.solver,
            integrator,
        }
    }

    /// Set the solver used for Woods-Saxon single-particle states.
    pub fn with_solver<S>(mut self, solver: S) -> Self
    where S: DeformedSolver + 'static
    {
        self.solver = Some(Box::new(solver));
        self
    }

    pub fn with_computational(mut self, computational: ComputationalConfig)
        -> Self
    {
        self.computational = computational;
        self
    }

    pub fn with_constants(mut self, constants: ConstantsConfig) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_forced_spin(mut self, forced_spin: ForcedSpin) -> Self {
        self.forced_spin = forced_spin;
        self
    }

    pub fn with_isospin(mut self, isospin: IsospinOverride) -> Self {
        self.isospin = isospin;
        self
    }

    pub fn set_mother(&mut self, mother: Nucleus) { self.mother = mother; }

    pub fn set_daughter(&mut self, daughter: Nucleus) {
        self.daughter = daughter;
    }

    pub fn beta_type(&self) -> BetaType { self.beta_type }

    pub fn mother(&self) -> &Nucleus { &self.mother }

    pub fn daughter(&self) -> &Nucleus { &self.daughter }

    pub fn method(&self) -> Option<Method> { self.method }

    pub fn potential(&self) -> Option<Potential> { self.potential }

    pub fn transitions(&self) -> &[OneBodyTransition] { &self.transitions }

    /// Return `true` if at least one transition has been assembled.
    pub fn is_initialized(&self) -> bool { !self.transitions.is_empty() }

    /// Spin-coupling mismatches recorded during initialization.
    pub fn spin_mismatches(&self) -> &[SpinMismatch] { &self.mismatches }

    /// Return the first recorded spin-coupling mismatch as an error.
    pub fn verify_spin_coupling(&self) -> Result<()> {
        match self.mismatches.first() {
            Some(mismatch) => Err(StructureError::SpinMismatch(*mismatch)),
            None => Ok(()),
        }
    }

    /// Append a one-body transition.
    pub fn add_one_body_transition(
        &mut self,
        obdme: f64,
        dKi: i32,
        dKf: i32,
        spsi: SingleParticleState,
        spsf: SingleParticleState,
    ) {
        self.transitions.push(OneBodyTransition::new(obdme, dKi, dKf, spsi, spsf));
    }

    /// Check that mother and daughter can be connected by the decay process.
    pub fn check_consistency(&self) -> Result<()> {
        if self.mother.A != self.daughter.A {
            return Err(StructureError::MassMismatch {
                mother: self.mother.A,
                daughter: self.daughter.A,
            });
        }
        if self.daughter.Z - self.beta_type.value() != self.mother.Z {
            return Err(StructureError::ChargeMismatch {
                mother: self.mother.Z,
                daughter: self.daughter.Z,
                process: self.beta_type.to_string(),
            });
        }
        Ok(())
    }

    /// Select the nuclear model and assemble the one-body transitions.
    ///
    /// Any previously assembled transitions and diagnostics are discarded
    /// first, so that on error the manager holds no transition. Spin-coupling
    /// mismatches are not errors here; they are logged and kept for
    /// [`Self::verify_spin_coupling`].
    pub fn initialize(&mut self, method: Method, potential: Potential)
        -> Result<()>
    {
        self.transitions.clear();
        self.mismatches.clear();
        self.method = None;
        self.potential = None;
        self.check_consistency()?;
        match method {
            Method::ExtremeSingleParticle => {
                let obt = self.esp_transition(potential)?;
                let mismatches = obt.spin_mismatches(&self.mother, &self.daughter);
                self.mismatches.extend(mismatches);
                info!(
                    dOi = obt.spsi.dO,
                    dOf = obt.spsf.dO,
                    dKi = obt.dKi,
                    dKf = obt.dKf,
                    "added one-body transition"
                );
                self.transitions.push(obt);
            },
        }
        self.method = Some(method);
        self.potential = Some(potential);
        Ok(())
    }

    /// Return `true` if matrix elements are evaluated in the deformed basis.
    pub fn is_deformed(&self) -> bool {
        self.potential.is_some_and(|potential| self.is_deformed_with(potential))
    }

    /// Operator normalization discriminant passed to deformed integrals.
    pub fn opt(&self) -> i32 {
        match (self.mother.is_even_A(), self.mother.is_even_Z()) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        }
    }

    fn esp_transition(&self, potential: Potential) -> Result<OneBodyTransition> {
        let (spsi, spsf)
            = match potential {
                Potential::SHO => (
                    spherical_state(
                        &self.mother,
                        self.beta_type.initial_nucleon(),
                        self.beta_type,
                    )?,
                    spherical_state(
                        &self.daughter,
                        self.beta_type.final_nucleon(),
                        self.beta_type,
                    )?,
                ),
                Potential::WS | Potential::DWS => (
                    self.solve_state(potential, &self.mother, true)?,
                    self.solve_state(potential, &self.daughter, false)?,
                ),
            };
        for (side, sps) in [("mother", &spsi), ("daughter", &spsf)] {
            info!(
                side,
                dO = sps.dO,
                n = sps.n,
                l = sps.l,
                parity = sps.parity,
                energy = sps.energy,
                "single-particle state"
            );
        }
        if self.is_deformed_with(potential) && self.mother.is_even_A() {
            Ok(OneBodyTransition::even_deformed(
                &self.mother,
                &spsi,
                &spsf,
                self.computational.reversed_gallagher,
            ))
        } else {
            Ok(OneBodyTransition::direct(spsi, spsf))
        }
    }

    fn is_deformed_with(&self, potential: Potential) -> bool {
        potential == Potential::DWS
            && self.mother.beta2 != 0.0
            && self.daughter.beta2 != 0.0
    }

    /// Isospin-dependent well depths `(V0p, V0n)`.
    fn well_depths(&self) -> (f64, f64) {
        let c = &self.computational;
        let asym
            = f64::from(self.mother.A - 2 * self.mother.Z)
            / f64::from(self.mother.A);
        (c.vproton * (1.0 + c.xproton * asym), c.vneutron * (1.0 - c.xneutron * asym))
    }

    fn solve_state(&self, potential: Potential, nucleus: &Nucleus, initial: bool)
        -> Result<SingleParticleState>
    {
        let solver
            = self.solver.as_ref()
            .ok_or_else(|| StructureError::MissingSolver(potential.to_string()))?;
        let c = &self.computational;
        let (nucleon, forced)
            = if initial {
                (self.beta_type.initial_nucleon(), self.forced_spin.mother)
            } else {
                (self.beta_type.final_nucleon(), self.forced_spin.daughter)
            };
        let dJ_forced
            = if nucleus.is_even_A() { forced.unwrap_or(nucleus.dJ) } else { nucleus.dJ };
        let (V0p, V0n) = self.well_depths();
        let (beta2, beta4, beta6)
            = if potential == Potential::DWS {
                (nucleus.beta2, nucleus.beta4, nucleus.beta6)
            } else {
                (0.0, 0.0, 0.0)
            };
        let params
            = match nucleon {
                Nucleon::Proton => DeformedParams {
                    Z: nucleus.Z,
                    N: 0,
                    V0: V0p,
                    V0_so: c.v0s_proton,
                    ..self.base_params(nucleus, beta2, beta4, beta6, dJ_forced)
                },
                Nucleon::Neutron => DeformedParams {
                    Z: 0,
                    N: nucleus.N(),
                    V0: V0n,
                    V0_so: c.v0s_neutron,
                    ..self.base_params(nucleus, beta2, beta4, beta6, dJ_forced)
                },
            };
        debug!(%nucleon, "solving for single-particle state");
        debug!(?params, "deformed solver input");
        solver.solve(&params)
    }

    fn base_params(
        &self,
        nucleus: &Nucleus,
        beta2: f64,
        beta4: f64,
        beta6: f64,
        dJ_forced: i32,
    ) -> DeformedParams {
        let c = &self.computational;
        DeformedParams {
            Z: 0,
            N: 0,
            A: nucleus.A,
            dJ: nucleus.dJ,
            R: nucleus.radius_fm(),
            beta2,
            beta4,
            beta6,
            V0: 0.0,
            surface_thickness: c.surface_thickness,
            V0_so: 0.0,
            dJ_forced,
            threshold: if c.force_spin { c.energy_margin } else { 0.0 },
        }
    }

    fn coupling_engine(&self) -> CouplingEngine<'_> {
        CouplingEngine {
            mother: &self.mother,
            daughter: &self.daughter,
            beta_type: self.beta_type,
            deformed: self.is_deformed(),
            isospin: self.isospin,
        }
    }

    /// Compute the multipole matrix element `{V,A}M_{KLs}` summed over all
    /// one-body transitions.
    ///
    /// Under the extreme single-particle method each OBDME is recomputed for
    /// rank `K` on a private copy; the stored transitions are left untouched.
    pub fn calculate_matrix_element(&self, vector: bool, K: i32, L: i32, s: i32)
        -> Result<f64>
    {
        let op = Multipole::new(vector, K, L, s);
        let nu = calc_nu(self.mother.R * (3.0_f64 / 5.0).sqrt(), self.mother.Z);
        let engine = self.coupling_engine();
        let deformed = self.is_deformed();
        let opt = self.opt();
        self.transitions.iter()
            .map(|obt| -> Result<f64> {
                let obdme
                    = match self.method {
                        Some(Method::ExtremeSingleParticle) => engine.obdme(K, obt),
                        None => obt.obdme,
                    };
                let geom = Geometry {
                    dJi: self.mother.dJ.abs(),
                    dJf: self.daughter.dJ.abs(),
                    dKi: obt.dKi,
                    dKf: obt.dKf,
                    R: self.mother.R,
                    nu,
                };
                let me
                    = if deformed {
                        self.integrator.deformed(opt, op, &obt.spsi, &obt.spsf, &geom)?
                    } else {
                        self.integrator.spherical(op, &obt.spsi, &obt.spsf, &geom)?
                    };
                debug!(%op, obdme, me, "one-body contribution");
                Ok(obdme * me)
            })
            .sum()
    }

    /// Compute several matrix elements in parallel.
    pub fn calculate_matrix_elements(&self, ops: &[Multipole])
        -> Result<Vec<f64>>
    {
        ops.par_iter()
            .map(|op| self.calculate_matrix_element(op.vector, op.K, op.L, op.s))
            .collect()
    }

    fn am101(&self, quantity: &'static str) -> Result<f64> {
        let am101 = self.calculate_matrix_element(false, 1, 0, 1)?;
        if am101 == 0.0 || !am101.is_finite() {
            return Err(StructureError::DegenerateDenominator {
                quantity,
                value: am101,
            });
        }
        Ok(am101)
    }

    /// Weak-magnetism form factor `b/Ac`.
    pub fn weak_magnetism(&self) -> Result<f64> {
        let ConstantsConfig { g_a, g_m } = self.constants;
        let vm111 = self.calculate_matrix_element(true, 1, 1, 1)?;
        let am101 = self.am101("weak magnetism")?;
        debug!(vm111, am101, "weak magnetism matrix elements");
        Ok(
            -(2.0_f64 / 3.0).sqrt() * NUCLEON_MASS_ME * self.mother.R / g_a
                * vm111 / am101
            + g_m / g_a
        )
    }

    /// Induced-tensor form factor `d/Ac`.
    pub fn induced_tensor(&self) -> Result<f64> {
        let am110 = self.calculate_matrix_element(false, 1, 1, 0)?;
        let am101 = self.am101("induced tensor")?;
        debug!(am110, am101, "induced tensor matrix elements");
        Ok(
            2.0 / 3.0_f64.sqrt() * NUCLEON_MASS_ME * self.mother.R
                * am110 / am101
        )
    }
}
