//! ANTT regulatory minimum-freight floor (Resolução 5.867/2019).
//!
//! Each vehicle class carries coefficients plus a calculation mode. The
//! floor is a lower bound on what can legally be charged for the haul;
//! `Free` mode models atypical cargo (e.g. oversized-load trailers) with
//! no regulatory minimum.

use serde::{Deserialize, Serialize};

/// Which floor formula applies to a vehicle class. Exhaustive by design:
/// adding a mode forces every match site to handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcMode {
    /// `fixed + variable * km`, the ANTT table form for heavy classes.
    Antt,
    /// `factor * km`, a flat per-kilometer rate.
    Km,
    /// `factor * km * 2`, the per-kilometer rate charged for the empty
    /// return leg as well. Used for light utility vehicles.
    KmRoundTrip,
    /// No regulatory minimum; the floor is always zero.
    Free,
}

/// Per-class pricing coefficients, externally persisted and admin-edited.
/// `axles`, `capacity_kg` and `consumption_km_l` are reference data only;
/// they do not enter any floor formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleCoefficients {
    pub calc_mode: CalcMode,
    pub fixed: f64,
    pub variable: f64,
    pub factor: f64,
    pub axles: u32,
    pub capacity_kg: f64,
    pub consumption_km_l: f64,
}

/// Compute the regulatory floor for a distance in kilometers.
///
/// A non-positive distance yields 0.0; callers that gate compliance on the
/// floor must additionally require `distance_km > 0` (a zero floor alone
/// does not mean the haul is compliant, it may just be unevaluable).
pub fn compute_floor(coefficients: &VehicleCoefficients, distance_km: f64) -> f64 {
    if distance_km <= 0.0 {
        return 0.0;
    }
    match coefficients.calc_mode {
        CalcMode::Antt => coefficients.fixed + coefficients.variable * distance_km,
        CalcMode::Km => coefficients.factor * distance_km,
        CalcMode::KmRoundTrip => coefficients.factor * distance_km * 2.0,
        CalcMode::Free => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coefficients(calc_mode: CalcMode, fixed: f64, variable: f64, factor: f64) -> VehicleCoefficients {
        VehicleCoefficients {
            calc_mode,
            fixed,
            variable,
            factor,
            axles: 3,
            capacity_kg: 12_000.0,
            consumption_km_l: 4.0,
        }
    }

    #[test]
    fn antt_mode_is_fixed_plus_variable_times_km() {
        let c = coefficients(CalcMode::Antt, 1600.0, 3.5, 0.0);
        assert!((compute_floor(&c, 500.0) - 3350.0).abs() < 1e-9);
    }

    #[test]
    fn km_mode_is_factor_times_km() {
        let c = coefficients(CalcMode::Km, 0.0, 0.0, 4.2);
        assert!((compute_floor(&c, 300.0) - 1260.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_mode_doubles_the_distance() {
        let c = coefficients(CalcMode::KmRoundTrip, 0.0, 0.0, 2.5);
        assert!((compute_floor(&c, 300.0) - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn free_mode_has_no_floor() {
        let c = coefficients(CalcMode::Free, 1600.0, 3.5, 2.5);
        assert_eq!(compute_floor(&c, 300.0), 0.0);
    }

    #[test]
    fn non_positive_distance_yields_zero() {
        let c = coefficients(CalcMode::Antt, 1600.0, 3.5, 0.0);
        assert_eq!(compute_floor(&c, 0.0), 0.0);
        assert_eq!(compute_floor(&c, -10.0), 0.0);
    }
}
