//! Spot-load accept/reject decisions.
//!
//! Given a freight value already offered on the spot market, compute the
//! realized EBITDA margin under Lucro Presumido taxation and gate the
//! decision on two conditions: the ANTT regulatory floor and the minimum
//! EBITDA policy. When the load fails, the engine also reports the resale
//! price that would clear both gates, to support a counter-offer.

use serde::{Deserialize, Serialize};

use crate::antt::{compute_floor, VehicleCoefficients};
use crate::icms::{resolve_icms_rate_opt, Uf};
use crate::policy::MIN_EBITDA_MARGIN_PCT;
use crate::tax::{effective_icms_rate_pct, TaxConfig};

/// Inputs for a spot check. Origin/destination UFs are optional because
/// they come from free-text route fields; when either is unknown the
/// standard interstate ICMS rate applies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpotInput {
    pub offered_freight: f64,
    pub distance_km: f64,
    pub origin_uf: Option<Uf>,
    pub destination_uf: Option<Uf>,
}

/// Full decision breakdown, shaped for display as a tax memory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotDecision {
    pub antt_floor: f64,
    pub offered_freight: f64,
    /// Full ICMS rate (percent) before the presumed credit.
    pub icms_rate_pct: f64,
    pub icms_gross: f64,
    pub presumed_credit: f64,
    pub icms_net: f64,
    pub federal_tax_amount: f64,
    pub total_tax: f64,
    pub ebitda: f64,
    pub ebitda_percent: f64,
    /// True only when the distance is known (> 0) and the offer clears the
    /// floor. A zero floor with no distance is unevaluable, not compliant.
    pub antt_compliant: bool,
    pub margin_acceptable: bool,
    pub can_take: bool,
    /// Negotiation ceiling for the carrier when the load is taken.
    pub max_driver_payment: f64,
    /// Resale ask that would clear both gates when it is not.
    pub suggested_sales_freight: f64,
}

/// Evaluate a spot offer against the floor and the EBITDA gate.
///
/// Missing coefficients (unknown vehicle class) make the floor zero and the
/// compliance check unevaluable, mirroring the distance rule.
pub fn evaluate_spot(
    input: &SpotInput,
    coefficients: Option<&VehicleCoefficients>,
    tax: &TaxConfig,
) -> SpotDecision {
    let antt_floor = coefficients
        .map(|c| compute_floor(c, input.distance_km))
        .unwrap_or(0.0);

    let icms_rate_pct =
        resolve_icms_rate_opt(input.origin_uf, input.destination_uf, &tax.icms_overrides);
    let icms_gross = input.offered_freight * (icms_rate_pct / 100.0);
    let icms_net = input.offered_freight * (effective_icms_rate_pct(icms_rate_pct) / 100.0);
    let presumed_credit = icms_gross - icms_net;

    let federal_pct = tax.federal_total();
    let federal_tax_amount = input.offered_freight * (federal_pct / 100.0);
    let total_tax = icms_net + federal_tax_amount;

    let ebitda = input.offered_freight - antt_floor - total_tax;
    let ebitda_percent = if input.offered_freight > 0.0 {
        ebitda / input.offered_freight * 100.0
    } else {
        0.0
    };

    let antt_compliant = input.distance_km > 0.0
        && coefficients.is_some()
        && (antt_floor <= input.offered_freight || antt_floor == 0.0);
    let margin_acceptable = ebitda_percent >= MIN_EBITDA_MARGIN_PCT;
    let can_take = antt_compliant && margin_acceptable;

    // Share of each freight real left after effective ICMS, federal taxes
    // and the target margin. Derived from the same presumed-credit helper
    // as the EBITDA line above.
    let retention_rate = 1.0
        - effective_icms_rate_pct(icms_rate_pct) / 100.0
        - federal_pct / 100.0
        - MIN_EBITDA_MARGIN_PCT / 100.0;

    let max_driver_payment = input.offered_freight * retention_rate;
    let suggested_sales_freight = if retention_rate > 0.0 {
        antt_floor / retention_rate
    } else {
        0.0
    };

    SpotDecision {
        antt_floor,
        offered_freight: input.offered_freight,
        icms_rate_pct,
        icms_gross,
        presumed_credit,
        icms_net,
        federal_tax_amount,
        total_tax,
        ebitda,
        ebitda_percent,
        antt_compliant,
        margin_acceptable,
        can_take,
        max_driver_payment,
        suggested_sales_freight,
    }
}
