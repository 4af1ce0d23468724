//! Multipole matrix elements between single-particle states.
//!
//! Operators are labelled in the Behrens-Bühring fashion by their class
//! (vector or axial vector), total rank `K`, orbital rank `L` and spin rank
//! `s`. In the non-relativistic reduction used here they act as
//! ```text
//!   V, s = 0 :  (r/R)^L Y_L
//!   A, s = 1 :  (r/R)^L [Y_L ⊗ σ]_K
//!   V, s = 1 :  (r/R)^L [Y_L ⊗ α]_K,  α → p/M   (K = L = 1 only)
//!   A, s = 0 :  (r/R)^L Y_L γ5,       γ5 → σ·p/M
//! ```
//! with radial functions of a spherical harmonic oscillator of size parameter
//! ν, and are normalized so that a single-particle Gamow-Teller transition
//! gives `AM101 = <f||σ||i> / sqrt(2J_i + 1)`.

use std::f64::consts::PI;
use itertools::Itertools;
use ndarray::{ self as nd, s };
use crate::{
    constants::NUCLEON_MASS_ME,
    error::{ Result, StructureError },
    spin::{ cg, phase, w3j, w6j, w9j },
    state::SingleParticleState,
};

/// Class and ranks of a multipole operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Multipole {
    pub vector: bool,
    pub K: i32,
    pub L: i32,
    pub s: i32,
}

impl Multipole {
    pub fn new(vector: bool, K: i32, L: i32, s: i32) -> Self {
        Self { vector, K, L, s }
    }
}

impl std::fmt::Display for Multipole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f, "{}M{}{}{}",
            if self.vector { "V" } else { "A" }, self.K, self.L, self.s,
        )
    }
}

/// Spins, projections and length scales of the many-body transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Geometry {
    pub dJi: i32,
    pub dJf: i32,
    pub dKi: i32,
    pub dKf: i32,
    /// Nuclear radius in natural units.
    pub R: f64,
    /// Oscillator size parameter in inverse squared natural units.
    pub nu: f64,
}

/// Evaluates single-particle multipole matrix elements.
///
/// Implementations must be reentrant: matrix elements for different
/// operators may be requested concurrently.
pub trait MultipoleIntegrator: Send + Sync {
    /// Matrix element between spherical states.
    fn spherical(
        &self,
        op: Multipole,
        spsi: &SingleParticleState,
        spsf: &SingleParticleState,
        geom: &Geometry,
    ) -> Result<f64>;

    /// Matrix element between deformed (Nilsson) states, including the
    /// rotational projection factor. `opt` is 0 for odd-A decays, 1 for
    /// even-A decays of an odd-Z mother, and 2 for even-A decays of an even-Z
    /// mother.
    fn deformed(
        &self,
        opt: i32,
        op: Multipole,
        spsi: &SingleParticleState,
        spsf: &SingleParticleState,
        geom: &Geometry,
    ) -> Result<f64>;
}

/// j-coupled piece of a single-particle state.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Piece {
    coef: f64,
    n: i32,
    l: i32,
    dj: i32,
    dO: i32,
}

impl Piece {
    fn ds(&self) -> i32 { self.dj - 2 * self.l }

    /// Apply time reversal, `T|j Ω> = (-1)^(j - Ω) |j -Ω>`.
    fn time_reversed(self) -> Self {
        Self {
            coef: self.coef * phase((self.dj - self.dO) / 2),
            dO: -self.dO,
            ..self
        }
    }
}

/// Pieces of a state whose components are already j-coupled.
fn spherical_pieces(state: &SingleParticleState) -> Vec<Piece> {
    state.components.iter()
        .map(|c| Piece {
            coef: c.amplitude,
            n: c.n,
            l: c.l,
            dj: c.dj(),
            dO: state.dO,
        })
        .collect()
}

/// Expand the `|n l Λ Σ>` components of a Nilsson state into `|n l j Ω>`.
fn nilsson_pieces(state: &SingleParticleState) -> Vec<Piece> {
    let dO = state.dO;
    state.components.iter()
        .flat_map(|c| {
            let dL = dO - c.ds;
            [2 * c.l - 1, 2 * c.l + 1].into_iter()
                .filter(|dj| *dj > 0)
                .map(move |dj| Piece {
                    coef: c.amplitude * cg((2 * c.l, dL), (1, c.ds), (dj, dO)),
                    n: c.n,
                    l: c.l,
                    dj,
                    dO,
                })
        })
        .filter(|p| p.coef != 0.0)
        .collect()
}

/// `<l_f || Y_L || l_i>`.
fn ylm_reduced(lf: i32, L: i32, li: i32) -> f64 {
    phase(lf)
        * (
            f64::from(2 * lf + 1) * f64::from(2 * L + 1) * f64::from(2 * li + 1)
            / (4.0 * PI)
        ).sqrt()
        * w3j((2 * lf, 0), (2 * L, 0), (2 * li, 0))
}

/// `<1/2 || σ^s || 1/2>`, with `σ^0` the identity.
fn sigma_reduced(s: i32) -> f64 {
    match s {
        0 => 2.0_f64.sqrt(),
        1 => 6.0_f64.sqrt(),
        _ => 0.0,
    }
}

/// `<(l_f 1/2) j_f || [Y_L ⊗ σ^s]_K || (l_i 1/2) j_i>`.
fn spin_angular_reduced(
    lf: i32,
    djf: i32,
    li: i32,
    dji: i32,
    L: i32,
    s: i32,
    K: i32,
) -> f64 {
    (
        f64::from(djf + 1) * f64::from(dji + 1) * f64::from(2 * K + 1)
    ).sqrt()
        * w9j([2 * lf, 1, djf, 2 * li, 1, dji, 2 * L, 2 * s, 2 * K])
        * ylm_reduced(lf, L, li)
        * sigma_reduced(s)
}

/// `<(l 1/2) j_f || ℓ || (l 1/2) j_i>`.
fn orbital_reduced(l: i32, djf: i32, dji: i32) -> f64 {
    phase(l + (dji + 1) / 2 + 1)
        * (f64::from(djf + 1) * f64::from(dji + 1)).sqrt()
        * w6j(2 * l, djf, 1, dji, 2 * l, 2)
        * (f64::from(l) * f64::from(l + 1) * f64::from(2 * l + 1)).sqrt()
}

/// Generalized Laguerre polynomial `L_k^(α)(x)` by upward recursion.
fn laguerre(k: i32, alpha: f64, x: f64) -> f64 {
    if k <= 0 { return 1.0; }
    let mut lm1: f64 = 1.0;
    let mut l: f64 = 1.0 + alpha - x;
    for j in 1..k {
        let jf = f64::from(j);
        let lp1 = ((2.0 * jf + 1.0 + alpha - x) * l - (jf + alpha) * lm1)
            / (jf + 1.0);
        lm1 = l;
        l = lp1;
    }
    l
}

/// Apply trapezoidal rule to a 1D array sampled at even intervals.
fn trapz(y: &nd::Array1<f64>, dx: f64) -> f64 {
    let n: usize = y.len();
    if n < 2 { return 0.0; }
    dx * (
        0.5 * y[0]
        + y.slice(s![1..n - 1]).sum()
        + 0.5 * y[n - 1]
    )
}

/// Central finite-difference derivative, one-sided at the ends.
fn gradient(y: &nd::Array1<f64>, dx: f64) -> nd::Array1<f64> {
    let n: usize = y.len();
    let mut dy: nd::Array1<f64> = nd::Array1::zeros(n);
    if n < 2 { return dy; }
    dy.slice_mut(s![1..n - 1])
        .assign(&((&y.slice(s![2..]) - &y.slice(s![..n - 2])) / (2.0 * dx)));
    dy[0] = (y[1] - y[0]) / dx;
    dy[n - 1] = (y[n - 1] - y[n - 2]) / dx;
    dy
}

/// Multipole integrals with spherical harmonic oscillator radial functions,
/// evaluated on a uniform grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HarmonicOscillator {
    /// Number of grid points.
    pub n_grid: usize,
    /// Grid extent in units of the oscillator length `1/sqrt(ν)`.
    pub extent: f64,
}

impl Default for HarmonicOscillator {
    fn default() -> Self { Self { n_grid: 2001, extent: 10.0 } }
}

impl HarmonicOscillator {
    pub fn new(n_grid: usize, extent: f64) -> Self { Self { n_grid, extent } }

    fn grid(&self, nu: f64) -> (nd::Array1<f64>, f64) {
        let r_max = self.extent / nu.sqrt();
        let r = nd::Array1::linspace(0.0, r_max, self.n_grid.max(2));
        let dr = r[1] - r[0];
        (r, dr)
    }

    /// Normalized radial function `R_nl(r)` with `n - 1` nodes.
    fn radial(&self, n: i32, l: i32, nu: f64, r: &nd::Array1<f64>, dr: f64)
        -> nd::Array1<f64>
    {
        let alpha = f64::from(l) + 0.5;
        let unnormed: nd::Array1<f64>
            = r.mapv(|rk| {
                let x = nu * rk * rk;
                rk.powi(l) * (-x / 2.0).exp() * laguerre(n - 1, alpha, x)
            });
        let norm = trapz(&(&unnormed * &unnormed * r * r), dr).sqrt();
        unnormed / norm
    }

    /// `∫ R_f (r/R)^L R_i r^2 dr`.
    fn radial_integral(
        &self,
        pf: &Piece,
        pi: &Piece,
        L: i32,
        R: f64,
        nu: f64,
    ) -> f64 {
        let (r, dr) = self.grid(nu);
        let rf = self.radial(pf.n, pf.l, nu, &r, dr);
        let ri = self.radial(pi.n, pi.l, nu, &r, dr);
        let weight = r.mapv(|rk| (rk / R).powi(L) * rk * rk);
        trapz(&(&rf * &ri * &weight), dr)
    }

    /// `∫ R_f (r/R)^L (d/dr - k/r) R_i r^2 dr`, with `k` the eigenvalue of
    /// `σ·ℓ` on the initial piece.
    fn gradient_integral(
        &self,
        pf: &Piece,
        pi: &Piece,
        L: i32,
        R: f64,
        nu: f64,
    ) -> f64 {
        let (r, dr) = self.grid(nu);
        let rf = self.radial(pf.n, pf.l, nu, &r, dr);
        let ri = self.radial(pi.n, pi.l, nu, &r, dr);
        let k = if pi.ds() > 0 { f64::from(pi.l) } else { -f64::from(pi.l + 1) };
        let dri = gradient(&ri, dr);
        let g: nd::Array1<f64>
            = nd::Zip::from(&dri).and(&ri).and(&r)
            .map_collect(|d, v, rk| if *rk > 0.0 { d - k * v / rk } else { 0.0 });
        let weight = r.mapv(|rk| (rk / R).powi(L) * rk * rk);
        trapz(&(&rf * &g * &weight), dr)
    }

    /// Reduced single-particle matrix element `<f || O || i>` between two
    /// j-coupled pieces.
    fn reduced(
        &self,
        op: Multipole,
        pf: &Piece,
        pi: &Piece,
        R: f64,
        nu: f64,
    ) -> Result<f64> {
        let Multipole { vector, K, L, s } = op;
        match (vector, s) {
            (true, 0) | (false, 1) => {
                let ang = spin_angular_reduced(pf.l, pf.dj, pi.l, pi.dj, L, s, K);
                if ang == 0.0 { return Ok(0.0); }
                Ok(ang * self.radial_integral(pf, pi, L, R, nu))
            },
            (true, 1) if K == 1 && L == 1 => {
                if pf.l != pi.l { return Ok(0.0); }
                let ang
                    = -(3.0 / (8.0 * PI)).sqrt() / (NUCLEON_MASS_ME * R)
                    * orbital_reduced(pi.l, pf.dj, pi.dj);
                if ang == 0.0 { return Ok(0.0); }
                Ok(ang * self.radial_integral(pf, pi, 0, R, nu))
            },
            (false, 0) => {
                let lbar = pi.dj - pi.l;
                let ang
                    = spin_angular_reduced(pf.l, pf.dj, lbar, pi.dj, L, 0, K)
                    / NUCLEON_MASS_ME;
                if ang == 0.0 { return Ok(0.0); }
                Ok(ang * self.gradient_integral(pf, pi, L, R, nu))
            },
            _ => Err(StructureError::UnsupportedOperator(op.to_string())),
        }
    }

    /// Intrinsic matrix element `<f, Ω_f | O_(Ω_f - Ω_i) | i, Ω_i>`.
    fn intrinsic(
        &self,
        op: Multipole,
        pieces_f: &[Piece],
        pieces_i: &[Piece],
        R: f64,
        nu: f64,
    ) -> Result<f64> {
        pieces_f.iter().cartesian_product(pieces_i.iter())
            .map(|(pf, pi)| -> Result<f64> {
                let proj
                    = phase((pf.dj - pf.dO) / 2)
                    * w3j(
                        (pf.dj, -pf.dO),
                        (2 * op.K, pf.dO - pi.dO),
                        (pi.dj, pi.dO),
                    );
                if proj == 0.0 { return Ok(0.0); }
                Ok(pf.coef * pi.coef * proj * self.reduced(op, pf, pi, R, nu)?)
            })
            .sum()
    }
}

impl MultipoleIntegrator for HarmonicOscillator {
    fn spherical(
        &self,
        op: Multipole,
        spsi: &SingleParticleState,
        spsf: &SingleParticleState,
        geom: &Geometry,
    ) -> Result<f64> {
        let pieces_i = spherical_pieces(spsi);
        let pieces_f = spherical_pieces(spsf);
        let norm = (4.0 * PI / f64::from(geom.dJi + 1)).sqrt();
        let sum: f64
            = pieces_f.iter().cartesian_product(pieces_i.iter())
            .map(|(pf, pi)| -> Result<f64> {
                Ok(pf.coef * pi.coef * self.reduced(op, pf, pi, geom.R, geom.nu)?)
            })
            .sum::<Result<f64>>()?;
        Ok(norm * sum)
    }

    fn deformed(
        &self,
        opt: i32,
        op: Multipole,
        spsi: &SingleParticleState,
        spsf: &SingleParticleState,
        geom: &Geometry,
    ) -> Result<f64> {
        let mut pieces_i = nilsson_pieces(spsi);
        let mut pieces_f = nilsson_pieces(spsf);
        // the odd-odd partner of the active nucleon is the time-reversed
        // orbit on the even-even side
        match opt {
            1 => { pieces_f = pieces_f.into_iter().map(Piece::time_reversed).collect(); },
            2 => { pieces_i = pieces_i.into_iter().map(Piece::time_reversed).collect(); },
            _ => { },
        }
        let intrinsic = self.intrinsic(op, &pieces_f, &pieces_i, geom.R, geom.nu)?;
        let rotational
            = phase((geom.dJf - geom.dKf) / 2)
            * w3j(
                (geom.dJf, -geom.dKf),
                (2 * op.K, geom.dKf - geom.dKi),
                (geom.dJi, geom.dKi),
            );
        let norm = (4.0 * PI / f64::from(geom.dJi + 1)).sqrt();
        Ok(norm * rotational * intrinsic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ nucleus::BetaType, state::WfComponent };

    fn state(dO: i32, components: Vec<WfComponent>) -> SingleParticleState {
        let l = components[0].l;
        SingleParticleState {
            dO,
            parity: if l % 2 == 0 { 1 } else { -1 },
            sign: 1,
            l,
            n: components[0].n,
            energy: 0.0,
            beta_type: BetaType::Minus,
            binding_energy: 0.0,
            components,
        }
    }

    fn geom(dJi: i32, dJf: i32) -> Geometry {
        Geometry { dJi, dJf, dKi: dJi, dKf: dJf, R: 0.012, nu: 8000.0 }
    }

    #[test]
    fn radial_functions_are_orthonormal() {
        let ho = HarmonicOscillator::default();
        let nu = 8000.0;
        let p = |n| Piece { coef: 1.0, n, l: 0, dj: 1, dO: 1 };
        let overlap = ho.radial_integral(&p(1), &p(1), 0, 1.0, nu);
        assert!((overlap - 1.0).abs() < 1e-8);
        let cross = ho.radial_integral(&p(1), &p(2), 0, 1.0, nu);
        assert!(cross.abs() < 1e-6);
    }

    #[test]
    fn laguerre_values() {
        assert_eq!(laguerre(0, 0.5, 3.0), 1.0);
        assert!((laguerre(1, 0.5, 3.0) - (1.5 - 3.0)).abs() < 1e-14);
        // L_2^(a)(x) = (x^2 - 2(a + 2)x + (a + 1)(a + 2)) / 2
        let (a, x) = (1.5_f64, 0.7_f64);
        let expected = (x * x - 2.0 * (a + 2.0) * x + (a + 1.0) * (a + 2.0)) / 2.0;
        assert!((laguerre(2, a, x) - expected).abs() < 1e-12);
    }

    #[test]
    fn gamow_teller_s_half() {
        // <s1/2 || σ || s1/2> = sqrt(6) and AM101 = sqrt(6) / sqrt(2)
        let ho = HarmonicOscillator::default();
        let s = state(1, vec![WfComponent::new(1.0, 1, 0, 1)]);
        let am101 = ho.spherical(Multipole::new(false, 1, 0, 1), &s, &s, &geom(1, 1))
            .unwrap();
        assert!((am101 - 3.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn fermi_is_overlap() {
        // VM000 reduces to <f||1||i> / sqrt(2J + 1) = 1 for identical orbits
        let ho = HarmonicOscillator::default();
        let f = state(7, vec![WfComponent::new(1.0, 1, 3, 1)]);
        let vm000 = ho.spherical(Multipole::new(true, 0, 0, 0), &f, &f, &geom(7, 7))
            .unwrap();
        assert!((vm000 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orbital_operator_diagonal() {
        // for j = l + 1/2, <ℓ_z> in the stretched state is l, so
        // <j||ℓ||j> = l sqrt((2j + 1)(j + 1) / j)
        let (l, dj) = (3, 7);
        let j = f64::from(dj) / 2.0;
        let expected = f64::from(l) * ((2.0 * j + 1.0) * (j + 1.0) / j).sqrt();
        assert!((orbital_reduced(l, dj, dj).abs() - expected).abs() < 1e-10);
    }

    #[test]
    fn weak_magnetism_operator_needs_rank_one() {
        let ho = HarmonicOscillator::default();
        let f = state(7, vec![WfComponent::new(1.0, 1, 3, 1)]);
        let res = ho.spherical(Multipole::new(true, 2, 2, 1), &f, &f, &geom(7, 7));
        assert!(matches!(res, Err(StructureError::UnsupportedOperator(_))));
        let vm111 = ho.spherical(Multipole::new(true, 1, 1, 1), &f, &f, &geom(7, 7))
            .unwrap();
        assert!(vm111.is_finite() && vm111 != 0.0);
    }

    #[test]
    fn nilsson_expansion_is_normalized() {
        // Σ = +1/2 component of Ω = 3/2 in the d shell
        let s = state(3, vec![WfComponent::new(1.0, 1, 2, 1)]);
        let norm: f64 = nilsson_pieces(&s).iter().map(|p| p.coef * p.coef).sum();
        assert!((norm - 1.0).abs() < 1e-12);
        let tr = nilsson_pieces(&s)[0].time_reversed();
        assert_eq!(tr.dO, -3);
    }

    #[test]
    fn deformed_gamow_teller_is_finite() {
        let ho = HarmonicOscillator::default();
        let i = state(7, vec![WfComponent::new(1.0, 1, 3, 1)]);
        let f = state(7, vec![WfComponent::new(1.0, 1, 3, 1)]);
        let me = ho.deformed(0, Multipole::new(false, 1, 0, 1), &i, &f, &geom(7, 7))
            .unwrap();
        assert!(me.is_finite() && me != 0.0);
    }
}
