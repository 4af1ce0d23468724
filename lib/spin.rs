//! Angular momentum quantum numbers and recoupling coefficients.
//!
//! All half-integer quantities are carried as doubled integers ("halves") so
//! that arithmetic on them stays exact. The coefficient functions in this
//! module evaluate to zero whenever their arguments violate a selection rule,
//! so callers never need to special-case forbidden couplings.

use wigner_symbols::{ ClebschGordan, Wigner3jm, Wigner6j, Wigner9j };

/// Doubled magnetic projection `2m`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinProj(i32);

impl SpinProj {
    pub fn new(m: i32) -> Self { Self(m) }

    /// Return the projection with its sign reversed.
    pub fn reflected(self) -> Self { Self(-self.0) }

    pub fn halves(self) -> i32 { self.0 }
}

/// Doubled total angular momentum `2j`, never negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct SpinTotal(u32);

impl SpinTotal {
    fn from_halves(j: i32) -> Option<Self> {
        u32::try_from(j).ok().map(Self)
    }

    fn tj(self) -> i32 { self.0 as i32 }
}

/// A `(2j, 2m)` pair with `|m| <= j` and `j - m` integral.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Spin(SpinTotal, SpinProj);

impl Spin {
    /// Return `None` unless `m` is one of the `2j + 1` projections of `j`.
    pub fn new(j: u32, m: i32) -> Option<Self> {
        let j_i64 = i64::from(j);
        let m_i64 = i64::from(m);
        (
            (-j_i64..=j_i64).contains(&m_i64)
            && (m_i64 - j_i64) % 2 == 0
        )
        .then_some(Self(SpinTotal(j), SpinProj(m)))
    }

    /// Like [`Self::new`], but also rejecting a negative total.
    pub fn from_halves(j: i32, m: i32) -> Option<Self> {
        u32::try_from(j).ok().and_then(|j| Self::new(j, m))
    }

    /// Doubled total.
    pub fn tj(self) -> i32 { self.0.tj() }

    pub fn proj(self) -> SpinProj { self.1 }
}

/// Return `true` if three doubled angular momenta satisfy the triangle rule.
pub fn triangle(a: i32, b: i32, c: i32) -> bool {
    a >= 0 && b >= 0 && c >= 0
        && c <= a + b
        && c >= (a - b).abs()
        && (a + b + c) % 2 == 0
}

/// Kronecker delta as an `f64`.
pub fn delta<T: PartialEq>(a: T, b: T) -> f64 {
    if a == b { 1.0 } else { 0.0 }
}

/// Compute `(-1)^n`.
pub fn phase(n: i32) -> f64 {
    if n.rem_euclid(2) == 0 { 1.0 } else { -1.0 }
}

/// Calculate the Clebsch-Gordan coefficient for the angular momentum addition
/// `s1 + s2 = s3`, with each spin given as a `(2j, 2m)` pair.
pub fn cg(s1: (i32, i32), s2: (i32, i32), s3: (i32, i32)) -> f64 {
    let (Some(s1), Some(s2), Some(s3))
        = (
            Spin::from_halves(s1.0, s1.1),
            Spin::from_halves(s2.0, s2.1),
            Spin::from_halves(s3.0, s3.1),
        )
    else { return 0.0; };
    if s1.proj().halves() + s2.proj().halves() != s3.proj().halves()
        || !triangle(s1.tj(), s2.tj(), s3.tj())
    {
        return 0.0;
    }
    ClebschGordan {
        tj1: s1.tj(),
        tm1: s1.proj().halves(),
        tj2: s2.tj(),
        tm2: s2.proj().halves(),
        tj12: s3.tj(),
        tm12: s3.proj().halves(),
    }
    .value()
    .into()
}

/// Calculate the Wigner 3j symbol with columns (left to right) given as
/// `(2j, 2m)` pairs.
pub fn w3j(s1: (i32, i32), s2: (i32, i32), s3: (i32, i32)) -> f64 {
    let (Some(s1), Some(s2), Some(s3))
        = (
            Spin::from_halves(s1.0, s1.1),
            Spin::from_halves(s2.0, s2.1),
            Spin::from_halves(s3.0, s3.1),
        )
    else { return 0.0; };
    if s1.proj().halves() + s2.proj().halves() + s3.proj().halves() != 0
        || !triangle(s1.tj(), s2.tj(), s3.tj())
    {
        return 0.0;
    }
    Wigner3jm {
        tj1: s1.tj(),
        tm1: s1.proj().halves(),
        tj2: s2.tj(),
        tm2: s2.proj().halves(),
        tj3: s3.tj(),
        tm3: s3.proj().halves(),
    }
    .value()
    .into()
}

/// Calculate the Wigner 6j symbol `{ j1 j2 j3 ; j4 j5 j6 }` for doubled
/// total spins given by row.
pub fn w6j(j1: i32, j2: i32, j3: i32, j4: i32, j5: i32, j6: i32) -> f64 {
    let tjs: Option<Vec<SpinTotal>>
        = [j1, j2, j3, j4, j5, j6].into_iter()
        .map(SpinTotal::from_halves)
        .collect();
    let Some(tjs) = tjs else { return 0.0; };
    let [a, b, c, d, e, f] = [
        tjs[0].tj(), tjs[1].tj(), tjs[2].tj(),
        tjs[3].tj(), tjs[4].tj(), tjs[5].tj(),
    ];
    if !(triangle(a, b, c) && triangle(a, e, f)
        && triangle(d, b, f) && triangle(d, e, c))
    {
        return 0.0;
    }
    Wigner6j { tj1: a, tj2: b, tj3: c, tj4: d, tj5: e, tj6: f }
        .value()
        .into()
}

/// Calculate the Wigner 9j symbol for doubled total spins given by row.
pub fn w9j(j: [i32; 9]) -> f64 {
    if j.iter().any(|tj| *tj < 0) { return 0.0; }
    let rows_ok
        = triangle(j[0], j[1], j[2])
        && triangle(j[3], j[4], j[5])
        && triangle(j[6], j[7], j[8]);
    let cols_ok
        = triangle(j[0], j[3], j[6])
        && triangle(j[1], j[4], j[7])
        && triangle(j[2], j[5], j[8]);
    if !(rows_ok && cols_ok) { return 0.0; }
    Wigner9j {
        tj1: j[0], tj2: j[1], tj3: j[2],
        tj4: j[3], tj5: j[4], tj6: j[5],
        tj7: j[6], tj8: j[7], tj9: j[8],
    }
    .value()
    .into()
}
