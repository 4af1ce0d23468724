#![allow(non_snake_case)]

//! Nuclear-structure inputs for allowed and first-forbidden beta decays:
//! single-particle states of the decaying nucleon, one-body transition
//! densities, multipole matrix elements, and the weak-magnetism and
//! induced-tensor form factors built from them.

pub mod constants;
pub mod error;
pub mod spin;
pub mod config;
pub mod nucleus;
pub mod state;
pub mod occupation;
pub mod charge;
pub mod solver;
pub mod transition;
pub mod coupling;
pub mod integral;
pub mod manager;

pub use error::{ StructureError, Result };
pub use nucleus::{ BetaType, Nucleon, Nucleus };
pub use state::{ SingleParticleState, WfComponent };
pub use transition::OneBodyTransition;
pub use integral::{ HarmonicOscillator, MultipoleIntegrator };
pub use solver::{ DeformedParams, DeformedSolver };
pub use manager::{ Method, NuclearStructureManager, Potential };
