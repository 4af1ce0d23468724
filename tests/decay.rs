#![allow(non_snake_case)]

use std::sync::{ Arc, Mutex };
use nuclear_structure::{
    config::{ ComputationalConfig, Config },
    coupling::IsospinOverride,
    error::{ Side, StructureError },
    integral::{ Geometry, Multipole },
    manager::ForcedSpin,
    BetaType,
    DeformedParams,
    Method,
    MultipoleIntegrator,
    NuclearStructureManager,
    Nucleus,
    Potential,
    Result,
    SingleParticleState,
    WfComponent,
};

const CA45: &str = r#"
    [Transition]
    Process = "B-"

    [Mother]
    Z = 20
    A = 45
    SpinParity = -7
    Radius = 3.48

    [Daughter]
    Z = 21
    A = 45
    SpinParity = -7
    Radius = 3.55

    [Computational]
    Method = "ESP"
    Potential = "SHO"
"#;

fn ca45() -> NuclearStructureManager {
    let config = Config::from_toml_str(CA45).expect("config");
    NuclearStructureManager::from_config(&config, None).expect("manager")
}

#[test]
fn calcium_45_single_transition() {
    let manager = ca45();
    assert!(manager.is_initialized());
    assert_eq!(manager.transitions().len(), 1);
    assert!(manager.spin_mismatches().is_empty());
    assert!(manager.verify_spin_coupling().is_ok());
    let obt = &manager.transitions()[0];
    assert_eq!((obt.spsi.l, obt.spsf.l), (3, 3));
    assert_eq!((obt.dKi, obt.dKf), (-7, -7));
    assert!(!manager.is_deformed());
}

#[test]
fn calcium_45_form_factors() {
    let manager = ca45();
    let am101 = manager.calculate_matrix_element(false, 1, 0, 1).unwrap();
    assert!(am101.abs() > 0.0);
    let b = manager.weak_magnetism().unwrap();
    assert!(b.is_finite());
    let d = manager.induced_tensor().unwrap();
    assert!(d.is_finite());
}

#[test]
fn parallel_matches_serial() {
    let manager = ca45();
    let ops = [
        Multipole::new(true, 0, 0, 0),
        Multipole::new(false, 1, 0, 1),
        Multipole::new(true, 1, 1, 1),
        Multipole::new(false, 1, 2, 1),
    ];
    let parallel = manager.calculate_matrix_elements(&ops).unwrap();
    for (op, me) in ops.iter().zip(parallel) {
        let serial = manager.calculate_matrix_element(op.vector, op.K, op.L, op.s)
            .unwrap();
        assert_eq!(me, serial);
    }
}

#[test]
fn mass_mismatch_leaves_manager_empty() {
    let mut manager = NuclearStructureManager::new(
        BetaType::Minus,
        Nucleus::new(20, 45, -7, 0.01),
        Nucleus::new(21, 46, -7, 0.01),
    );
    let res = manager.initialize(Method::ExtremeSingleParticle, Potential::SHO);
    assert!(matches!(
        res,
        Err(StructureError::MassMismatch { mother: 45, daughter: 46 })
    ));
    assert!(!manager.is_initialized());
    assert_eq!(manager.calculate_matrix_element(false, 1, 0, 1).unwrap(), 0.0);
    assert_eq!(manager.calculate_matrix_element(true, 0, 0, 0).unwrap(), 0.0);
    assert!(matches!(
        manager.weak_magnetism(),
        Err(StructureError::DegenerateDenominator { .. })
    ));
}

#[test]
fn charge_mismatch_leaves_manager_empty() {
    // beta+ cannot raise Z
    let mut manager = NuclearStructureManager::new(
        BetaType::Plus,
        Nucleus::new(20, 45, -7, 0.01),
        Nucleus::new(21, 45, -7, 0.01),
    );
    let res = manager.initialize(Method::ExtremeSingleParticle, Potential::SHO);
    assert!(matches!(res, Err(StructureError::ChargeMismatch { .. })));
    assert!(manager.transitions().is_empty());
    assert_eq!(manager.calculate_matrix_element(true, 1, 1, 1).unwrap(), 0.0);
}

/// Returns the same single-particle matrix element for every operator.
struct Constant(f64);

impl MultipoleIntegrator for Constant {
    fn spherical(
        &self,
        _op: Multipole,
        _spsi: &SingleParticleState,
        _spsf: &SingleParticleState,
        _geom: &Geometry,
    ) -> Result<f64> {
        Ok(self.0)
    }

    fn deformed(
        &self,
        _opt: i32,
        _op: Multipole,
        _spsi: &SingleParticleState,
        _spsf: &SingleParticleState,
        _geom: &Geometry,
    ) -> Result<f64> {
        Ok(-self.0)
    }
}

fn s_half(dO: i32) -> SingleParticleState {
    SingleParticleState {
        dO,
        parity: 1,
        sign: 1,
        l: 0,
        n: 1,
        energy: 0.0,
        beta_type: BetaType::Minus,
        binding_energy: 0.0,
        components: vec![WfComponent::new(1.0, 1, 0, 1)],
    }
}

#[test]
fn matrix_element_is_linear_in_obdme() {
    let mut manager = NuclearStructureManager::new(
        BetaType::Minus,
        Nucleus::new(1, 3, 1, 0.004),
        Nucleus::new(2, 3, 1, 0.004),
    )
    .with_integrator(Constant(2.0));
    manager.add_one_body_transition(0.25, 1, 1, s_half(1), s_half(1));
    manager.add_one_body_transition(-1.5, 1, 1, s_half(1), s_half(-1));
    assert!(manager.is_initialized());
    for (vector, K, L, s) in [(true, 0, 0, 0), (false, 1, 0, 1), (false, 2, 1, 1)] {
        let me = manager.calculate_matrix_element(vector, K, L, s).unwrap();
        assert!((me - 2.0 * (0.25 - 1.5)).abs() < 1e-14);
    }
}

/// Deformed solver with fixed Nilsson orbits: the decaying neutron in
/// `1/2[220]` and the produced proton in `3/2[211]`.
fn nilsson_solver(params: &DeformedParams) -> Result<SingleParticleState> {
    let (dO, components)
        = if params.N > 0 {
            (1, vec![WfComponent::new(0.8, 1, 0, 1), WfComponent::new(0.6, 1, 2, 1)])
        } else {
            (3, vec![WfComponent::new(1.0, 1, 2, 1)])
        };
    Ok(SingleParticleState {
        dO,
        parity: 1,
        sign: 1,
        l: components[0].l,
        n: 1,
        energy: -params.V0 / 5.0,
        beta_type: BetaType::Minus,
        binding_energy: 0.0,
        components,
    })
}

fn deformed_even(daughter_dJ: i32, reversed: bool)
    -> NuclearStructureManager
{
    let mother = Nucleus::new(10, 24, 0, 0.015).with_deformation(0.3, 0.0, 0.0);
    let daughter = Nucleus::new(11, 24, daughter_dJ, 0.015)
        .with_deformation(0.3, 0.0, 0.0);
    let mut config = Config::from_toml_str(CA45).unwrap().computational;
    config.reversed_gallagher = reversed;
    let mut manager = NuclearStructureManager::new(BetaType::Minus, mother, daughter)
        .with_solver(nilsson_solver)
        .with_computational(config)
        .with_forced_spin(ForcedSpin { mother: Some(1), daughter: Some(3) })
        .with_isospin(IsospinOverride::default());
    manager.initialize(Method::ExtremeSingleParticle, Potential::DWS).unwrap();
    manager
}

#[test]
fn deformed_even_a_uses_gallagher_coupling() {
    let manager = deformed_even(4, false);
    assert!(manager.is_deformed());
    assert_eq!(manager.opt(), 2);
    let obt = &manager.transitions()[0];
    // parallel coupling: 2K = 1 + 3 on the odd-odd daughter
    assert_eq!((obt.dKi, obt.dKf), (0, 4));
    assert!(manager.verify_spin_coupling().is_ok());
    let am101 = manager.calculate_matrix_element(false, 1, 0, 1).unwrap();
    assert!(am101.is_finite());
}

#[test]
fn reversed_gallagher_records_spin_mismatch() {
    let manager = deformed_even(4, true);
    let obt = &manager.transitions()[0];
    assert_eq!((obt.dKi, obt.dKf), (0, 2));
    assert_eq!(obt.spsi.dO, -1);
    let mismatches = manager.spin_mismatches();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].side, Side::Daughter);
    assert!(matches!(
        manager.verify_spin_coupling(),
        Err(StructureError::SpinMismatch(_))
    ));
}

#[test]
fn spherical_woods_saxon_without_deformation_is_direct() {
    let mother = Nucleus::new(20, 45, 7, 0.01);
    let daughter = Nucleus::new(21, 45, 3, 0.01);
    let mut manager = NuclearStructureManager::new(BetaType::Minus, mother, daughter)
        .with_solver(nilsson_solver);
    manager.initialize(Method::ExtremeSingleParticle, Potential::WS).unwrap();
    assert!(!manager.is_deformed());
    let obt = &manager.transitions()[0];
    assert_eq!((obt.dKi, obt.dKf), (1, 3));
    // 2K_i = 1 does not reproduce 2J = 7
    assert_eq!(manager.spin_mismatches().len(), 1);
}

#[test]
fn reinitialization_replaces_previous_transitions() {
    let mut manager = ca45();
    let am101 = manager.calculate_matrix_element(false, 1, 0, 1).unwrap();
    manager.initialize(Method::ExtremeSingleParticle, Potential::SHO).unwrap();
    assert_eq!(manager.transitions().len(), 1);
    assert!(manager.spin_mismatches().is_empty());
    assert_eq!(manager.calculate_matrix_element(false, 1, 0, 1).unwrap(), am101);

    let R = manager.daughter().R;
    manager.set_daughter(Nucleus::new(21, 46, -7, R));
    let res = manager.initialize(Method::ExtremeSingleParticle, Potential::SHO);
    assert!(matches!(res, Err(StructureError::MassMismatch { .. })));
    assert!(manager.transitions().is_empty());
    assert_eq!(manager.method(), None);
    assert_eq!(manager.potential(), None);
    assert_eq!(manager.calculate_matrix_element(false, 1, 0, 1).unwrap(), 0.0);
}

#[test]
fn first_forbidden_oscillator_decay_passes_spin_check() {
    // Ar43 (7/2-) -> K43 (3/2+): 1f7/2 neutron to 1d3/2 proton
    let mut manager = NuclearStructureManager::new(
        BetaType::Minus,
        Nucleus::new(18, 43, -7, 0.01),
        Nucleus::new(19, 43, 3, 0.01),
    );
    manager.initialize(Method::ExtremeSingleParticle, Potential::SHO).unwrap();
    let obt = &manager.transitions()[0];
    assert_eq!((obt.spsi.l, obt.spsf.l), (3, 2));
    assert_eq!((obt.dKi, obt.dKf), (-7, 3));
    assert!(manager.spin_mismatches().is_empty());
    assert!(manager.verify_spin_coupling().is_ok());
    let am111 = manager.calculate_matrix_element(false, 1, 1, 1).unwrap();
    assert!(am111.is_finite());
}

type Record = Arc<Mutex<Vec<DeformedParams>>>;

fn recording_solver()
    -> (Record, impl Fn(&DeformedParams) -> Result<SingleParticleState> + Send + Sync)
{
    let record: Record = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&record);
    let solver = move |params: &DeformedParams| {
        sink.lock().unwrap().push(*params);
        nilsson_solver(params)
    };
    (record, solver)
}

#[test]
fn woods_saxon_solver_inputs_for_odd_a() {
    let (record, solver) = recording_solver();
    let computational = ComputationalConfig {
        force_spin: false,
        ..ComputationalConfig::default()
    };
    let mother = Nucleus::new(20, 45, 7, 0.01).with_deformation(0.25, 0.05, 0.0);
    let daughter = Nucleus::new(21, 45, 3, 0.01).with_deformation(0.25, 0.05, 0.0);
    let mut manager = NuclearStructureManager::new(BetaType::Minus, mother, daughter)
        .with_solver(solver)
        .with_computational(computational.clone())
        .with_forced_spin(ForcedSpin { mother: Some(11), daughter: Some(11) });
    manager.initialize(Method::ExtremeSingleParticle, Potential::WS).unwrap();

    let params = record.lock().unwrap().clone();
    assert_eq!(params.len(), 2);
    let (ni, pf) = (params[0], params[1]);
    let asym = 5.0 / 45.0;

    // decaying neutron of the mother
    assert_eq!((ni.Z, ni.N, ni.A), (0, 25, 45));
    let V0n = computational.vneutron * (1.0 - computational.xneutron * asym);
    assert!((ni.V0 - V0n).abs() < 1e-12);
    assert_eq!(ni.V0_so, computational.v0s_neutron);

    // produced proton of the daughter
    assert_eq!((pf.Z, pf.N, pf.A), (21, 0, 45));
    let V0p = computational.vproton * (1.0 + computational.xproton * asym);
    assert!((pf.V0 - V0p).abs() < 1e-12);
    assert_eq!(pf.V0_so, computational.v0s_proton);

    for (p, dJ) in [(ni, 7), (pf, 3)] {
        // odd A never takes the forced spin
        assert_eq!(p.dJ_forced, dJ);
        assert_eq!(p.threshold, 0.0);
        // spherical Woods-Saxon drops the deformation
        assert_eq!((p.beta2, p.beta4, p.beta6), (0.0, 0.0, 0.0));
        assert_eq!(p.surface_thickness, computational.surface_thickness);
    }
}

#[test]
fn deformed_solver_inputs_for_even_a() {
    let (record, solver) = recording_solver();
    let mother = Nucleus::new(10, 24, 0, 0.015).with_deformation(0.3, -0.02, 0.0);
    let daughter = Nucleus::new(11, 24, 4, 0.015).with_deformation(0.3, -0.02, 0.0);
    let mut manager = NuclearStructureManager::new(BetaType::Minus, mother, daughter)
        .with_solver(solver)
        .with_forced_spin(ForcedSpin { mother: Some(1), daughter: None });
    manager.initialize(Method::ExtremeSingleParticle, Potential::DWS).unwrap();

    let params = record.lock().unwrap().clone();
    assert_eq!(params.len(), 2);
    let margin = ComputationalConfig::default().energy_margin;
    // forced spin on the mother, nuclear spin as fallback on the daughter
    assert_eq!((params[0].dJ_forced, params[1].dJ_forced), (1, 4));
    for p in params {
        assert_eq!(p.threshold, margin);
        assert_eq!((p.beta2, p.beta4), (0.3, -0.02));
        assert_eq!(p.dJ, if p.N > 0 { 0 } else { 4 });
    }
}

#[test]
fn solver_failure_leaves_manager_empty() {
    let failing = |_: &DeformedParams| -> Result<SingleParticleState> {
        Err(StructureError::Solver("no bound level below the threshold".into()))
    };
    let mut manager = NuclearStructureManager::new(
        BetaType::Minus,
        Nucleus::new(20, 45, 7, 0.01),
        Nucleus::new(21, 45, 7, 0.01),
    )
    .with_solver(failing);
    let res = manager.initialize(Method::ExtremeSingleParticle, Potential::WS);
    assert!(matches!(res, Err(StructureError::Solver(_))));
    assert!(!manager.is_initialized());
    assert_eq!(manager.calculate_matrix_element(true, 0, 0, 0).unwrap(), 0.0);
}
