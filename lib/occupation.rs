//! Shell-model occupation of spherical orbitals.
//!
//! Orbitals are filled in the standard spin-orbit ordering of the spherical
//! shell model, reproducing the magic numbers 2, 8, 20, 28, 50, 82, 126 and
//! 184.

use crate::error::{ Result, StructureError };

/// A spherical orbital `n l j`, `j = l + ds / 2`, with its occupancy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Orbital {
    pub n: i32,
    pub l: i32,
    pub ds: i32,
    pub occupancy: i32,
}

impl Orbital {
    /// Doubled total angular momentum.
    pub fn dj(&self) -> i32 { 2 * self.l + self.ds }

    /// Maximum number of identical nucleons the orbital holds.
    pub fn capacity(&self) -> i32 { self.dj() + 1 }
}

// (n, l, 2(j - l))
const ORDER: &[(i32, i32, i32)] = &[
    (1, 0,  1),
    (1, 1,  1), (1, 1, -1),
    (1, 2,  1), (2, 0,  1), (1, 2, -1),
    (1, 3,  1),
    (2, 1,  1), (1, 3, -1), (2, 1, -1), (1, 4,  1),
    (1, 4, -1), (2, 2,  1), (2, 2, -1), (3, 0,  1), (1, 5,  1),
    (1, 5, -1), (2, 3,  1), (2, 3, -1), (3, 1,  1), (3, 1, -1), (1, 6,  1),
    (2, 4,  1), (1, 6, -1), (1, 7,  1), (3, 2,  1), (4, 0,  1), (2, 4, -1),
    (3, 2, -1),
];

/// Return the sequence of occupied orbitals for `count` identical nucleons,
/// the last of which may be partially filled.
pub fn occupation_numbers(count: i32) -> Vec<Orbital> {
    let mut remaining = count.max(0);
    let mut orbitals: Vec<Orbital> = Vec::new();
    for &(n, l, ds) in ORDER.iter() {
        if remaining == 0 { break; }
        let mut orbital = Orbital { n, l, ds, occupancy: 0 };
        orbital.occupancy = remaining.min(orbital.capacity());
        remaining -= orbital.occupancy;
        orbitals.push(orbital);
    }
    orbitals
}

/// Return the last (valence) orbital occupied by `count` identical nucleons.
pub fn last_filled(count: i32) -> Result<Orbital> {
    occupation_numbers(count)
        .last()
        .copied()
        .ok_or(StructureError::NoOrbital(count))
}
