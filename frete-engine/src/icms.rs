//! ICMS rate resolution for freight invoices.
//!
//! Resolution order, per the brokerage's fiscal rules:
//! 1. Manual admin override for the exact origin-destination pair
//! 2. Intrastate: the state's own internal rate (fixed 27-entry table)
//! 3. Interstate from the South/Southeast bloc (ES excluded) into any
//!    other state: 7%
//! 4. Everything else, including S/SE -> S/SE: the standard 12%
//!
//! An unresolvable UF never fails the calculation; it falls back to the
//! standard interstate rate.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::policy::DEFAULT_INTERSTATE_ICMS_PCT;

/// The 27 Brazilian federative units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Uf {
    AC, AL, AM, AP, BA, CE, DF, ES, GO, MA, MT, MS, MG, PA,
    PB, PE, PI, PR, RJ, RN, RS, RO, RR, SC, SP, SE, TO,
}

impl Uf {
    pub const ALL: [Uf; 27] = [
        Uf::AC, Uf::AL, Uf::AM, Uf::AP, Uf::BA, Uf::CE, Uf::DF, Uf::ES,
        Uf::GO, Uf::MA, Uf::MT, Uf::MS, Uf::MG, Uf::PA, Uf::PB, Uf::PE,
        Uf::PI, Uf::PR, Uf::RJ, Uf::RN, Uf::RS, Uf::RO, Uf::RR, Uf::SC,
        Uf::SP, Uf::SE, Uf::TO,
    ];

    /// Internal (intrastate) ICMS rate in percent.
    pub fn internal_rate(self) -> f64 {
        match self {
            Uf::AC => 19.0,
            Uf::AL => 19.0,
            Uf::AM => 20.0,
            Uf::AP => 18.0,
            Uf::BA => 20.5,
            Uf::CE => 20.0,
            Uf::DF => 18.0,
            Uf::ES => 12.0,
            Uf::GO => 19.0,
            Uf::MA => 23.0,
            Uf::MT => 17.0,
            Uf::MS => 17.0,
            Uf::MG => 18.0,
            Uf::PA => 19.0,
            Uf::PB => 20.0,
            Uf::PE => 20.5,
            Uf::PI => 22.5,
            Uf::PR => 12.0,
            Uf::RJ => 20.0,
            Uf::RN => 20.0,
            Uf::RS => 12.0,
            Uf::RO => 19.5,
            Uf::RR => 20.0,
            Uf::SC => 12.0,
            Uf::SP => 18.0,
            Uf::SE => 18.0,
            Uf::TO => 20.0,
        }
    }

    /// Is this UF in the South/Southeast origin bloc that ships at the
    /// reduced 7% interstate rate? ES belongs to the destination bloc
    /// despite being geographically Southeast.
    pub fn is_south_southeast_bloc(self) -> bool {
        matches!(self, Uf::RS | Uf::SC | Uf::PR | Uf::SP | Uf::RJ | Uf::MG)
    }

    pub fn code(self) -> &'static str {
        match self {
            Uf::AC => "AC", Uf::AL => "AL", Uf::AM => "AM", Uf::AP => "AP",
            Uf::BA => "BA", Uf::CE => "CE", Uf::DF => "DF", Uf::ES => "ES",
            Uf::GO => "GO", Uf::MA => "MA", Uf::MT => "MT", Uf::MS => "MS",
            Uf::MG => "MG", Uf::PA => "PA", Uf::PB => "PB", Uf::PE => "PE",
            Uf::PI => "PI", Uf::PR => "PR", Uf::RJ => "RJ", Uf::RN => "RN",
            Uf::RS => "RS", Uf::RO => "RO", Uf::RR => "RR", Uf::SC => "SC",
            Uf::SP => "SP", Uf::SE => "SE", Uf::TO => "TO",
        }
    }
}

impl fmt::Display for Uf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Uf {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Uf::ALL
            .iter()
            .copied()
            .find(|uf| uf.code() == upper)
            .ok_or(())
    }
}

/// Extract a UF from a free-text location such as "Duque de Caxias, RJ".
///
/// Scans two-letter word tokens and keeps the **last** valid UF code, since
/// addresses put the state at the end ("City - UF" / "City, UF").
pub fn extract_uf(location: &str) -> Option<Uf> {
    let upper = location.to_ascii_uppercase();
    upper
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| token.len() == 2)
        .filter_map(|token| token.parse::<Uf>().ok())
        .last()
}

/// Override map key for an origin-destination pair, e.g. "ES-RJ".
pub fn override_key(origin: Uf, destination: Uf) -> String {
    format!("{}-{}", origin, destination)
}

/// Resolve the ICMS rate (percent) for a known origin-destination pair.
pub fn resolve_icms_rate(
    origin: Uf,
    destination: Uf,
    overrides: &HashMap<String, f64>,
) -> f64 {
    if let Some(&rate) = overrides.get(&override_key(origin, destination)) {
        return rate;
    }
    if origin == destination {
        return origin.internal_rate();
    }
    if origin.is_south_southeast_bloc() && !destination.is_south_southeast_bloc() {
        return 7.0;
    }
    12.0
}

/// Resolve the ICMS rate when either endpoint may be unknown.
/// Unresolvable UFs fall back to the standard interstate rate.
pub fn resolve_icms_rate_opt(
    origin: Option<Uf>,
    destination: Option<Uf>,
    overrides: &HashMap<String, f64>,
) -> f64 {
    match (origin, destination) {
        (Some(o), Some(d)) => resolve_icms_rate(o, d, overrides),
        _ => DEFAULT_INTERSTATE_ICMS_PCT,
    }
}
