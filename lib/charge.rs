//! Charge-distribution utilities.

/// Compute the harmonic-oscillator size parameter ν (in inverse squared
/// units of `rms`) reproducing a given RMS charge radius for `Z` protons.
///
/// Protons fill oscillator major shells `N = 0, 1, 2, ...` with
/// `(N + 1)(N + 2)` states each; an oscillator state has
/// `<r^2> = (N + 3/2) / ν`, so
/// ```text
/// ν = Σ_occupied (N + 3/2) / (Z rms^2)
/// ```
pub fn calc_nu(rms: f64, Z: i32) -> f64 {
    if Z <= 0 {
        return 1.5 / rms.powi(2);
    }
    let mut remaining = Z;
    let mut sum: f64 = 0.0;
    let mut N: i32 = 0;
    while remaining > 0 {
        let in_shell = remaining.min((N + 1) * (N + 2));
        sum += f64::from(in_shell) * (f64::from(N) + 1.5);
        remaining -= in_shell;
        N += 1;
    }
    sum / (f64::from(Z) * rms.powi(2))
}
