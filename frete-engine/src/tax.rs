//! Federal tax configuration and the shared presumed-credit helper.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::policy::PRESUMED_ICMS_CREDIT;

/// Process-wide tax configuration. Loaded once per session from the config
/// store and passed by reference into every pricing call; pricing never
/// writes it back.
///
/// All rates are percentages (0-100). Negative values are operator error
/// and are not validated away; no upper bound is enforced either.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub pis: f64,
    pub cofins: f64,
    pub csll: f64,
    pub irpj: f64,
    /// What insurance actually costs the brokerage (percent of goods
    /// value), independent of the ad valorem rate charged to the client.
    pub insurance_policy_rate: f64,
    /// Sparse per-route ICMS overrides keyed "ORIGIN-DEST" (e.g. "ES-RJ").
    #[serde(default)]
    pub icms_overrides: HashMap<String, f64>,
}

impl TaxConfig {
    /// Combined federal tax percent (PIS + COFINS + CSLL + IRPJ).
    pub fn federal_total(&self) -> f64 {
        self.pis + self.cofins + self.csll + self.irpj
    }
}

impl Default for TaxConfig {
    fn default() -> Self {
        // Lucro Presumido defaults for road freight: PIS 0.65, COFINS 3.0,
        // CSLL 1.08, IRPJ 1.2 (sums to 5.93).
        TaxConfig {
            pis: 0.65,
            cofins: 3.0,
            csll: 1.08,
            irpj: 1.2,
            insurance_policy_rate: 0.1,
            icms_overrides: HashMap::new(),
        }
    }
}

/// Effective ICMS rate (percent) after the statutory presumed credit.
///
/// Both the spot EBITDA calculation and the retention-rate headroom derive
/// from this single helper so the two can never drift apart.
pub fn effective_icms_rate_pct(full_rate_pct: f64) -> f64 {
    full_rate_pct * (1.0 - PRESUMED_ICMS_CREDIT)
}
